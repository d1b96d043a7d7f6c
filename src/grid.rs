use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::{debug, info};

use crate::error::GridError;
use crate::models::{default_label, DaySample};

const MIN_COLUMNS: usize = 3;

pub const EXAMPLE_GRID: &str = "Day\tPlanned\tMade\n\
Start\t0\t0\n\
Day 1\t5\t3\n\
Day 2\t10\t8\n\
Day 3\t15\t12\n\
Day 4\t20\t18\n\
Day 5\t25\t22\n\
Day 6\t30\t28\n\
Day 7\t35\t32\n\
Day 8\t40\t38\n\
Day 9\t45\t44\n\
Day 10\t50\t48";

/// Parses tab-separated `Day, Planned, Made` rows as pasted from a spreadsheet.
pub fn parse(raw: &str) -> Result<Vec<DaySample>, GridError> {
    parse_delimited(raw, b'\t')
}

/// Lines with fewer than three cells are skipped rather than rejected, so a
/// header row or a stray note does not abort the import. A header row with
/// three cells is kept as a row of zeros. Blank labels are named after the
/// physical line, so skipped and empty lines still count.
pub fn parse_delimited(raw: &str, delimiter: u8) -> Result<Vec<DaySample>, GridError> {
    let delimiter = char::from(delimiter);
    let mut samples = Vec::new();

    for (line_index, line) in raw.trim().split('\n').enumerate() {
        let cells: Vec<&str> = line.split(delimiter).map(str::trim).collect();
        if cells.len() < MIN_COLUMNS {
            debug!(line = line_index, cells = cells.len(), "skipping short row");
            continue;
        }

        let label = if cells[0].is_empty() {
            default_label(line_index)
        } else {
            cells[0].to_string()
        };
        samples.push(DaySample::new(
            label,
            lenient_number(cells[1]),
            lenient_number(cells[2]),
        ));
    }

    if samples.is_empty() {
        return Err(GridError::NoRows);
    }

    info!(rows = samples.len(), "parsed sprint grid");
    Ok(samples)
}

/// Reads the leading decimal number of a cell (`"12 pts"` is 12). Cells with
/// no leading number count as 0. Unlike a plain float parse, overflowing or
/// spelled-out infinities (`"1e999"`, `"Infinity"`) and `NaN` also count as 0.
pub fn lenient_number(cell: &str) -> f64 {
    numeric_prefix(cell)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let whole = digits_from(end);
    end += whole;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if whole + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole + fraction == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    &text[..end]
}

/// `Day,Planned Score,Made Score` export. Labels are written unquoted.
pub fn to_csv(samples: &[DaySample]) -> Result<String, GridError> {
    write_rows(samples, b',', ["Day", "Planned Score", "Made Score"])
}

/// Tab-separated rows in the shape `parse` accepts.
pub fn to_grid(samples: &[DaySample]) -> Result<String, GridError> {
    write_rows(samples, b'\t', ["Day", "Planned", "Made"])
}

fn write_rows(
    samples: &[DaySample],
    delimiter: u8,
    header: [&str; 3],
) -> Result<String, GridError> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for sample in samples {
        writer.write_record([
            sample.label.clone(),
            sample.planned_score.to_string(),
            sample.made_score.to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
