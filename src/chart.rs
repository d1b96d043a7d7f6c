use std::fmt::Write;

use csv::{Terminator, WriterBuilder};

use crate::error::GridError;
use crate::models::{ChartMode, ChartPoint, DaySample, SprintConfig};

pub fn build(samples: &[DaySample], config: &SprintConfig, mode: ChartMode) -> Vec<ChartPoint> {
    let scope = config.total_scope;
    samples
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            let ideal = config.ideal_cumulative(index);
            match mode {
                ChartMode::Burndown => ChartPoint {
                    label: sample.label.clone(),
                    actual: scope - sample.made_score,
                    planned: scope - sample.planned_score,
                    ideal: scope - ideal,
                    goal: Some(0.0),
                },
                ChartMode::Burnup => ChartPoint {
                    label: sample.label.clone(),
                    actual: sample.made_score,
                    planned: sample.planned_score,
                    ideal,
                    goal: Some(scope),
                },
            }
        })
        .collect()
}

pub fn render_table(points: &[ChartPoint], mode: ChartMode) -> String {
    let label_width = points
        .iter()
        .map(|point| point.label.chars().count())
        .chain(std::iter::once("Day".len()))
        .max()
        .unwrap_or(3);

    let mut output = String::new();
    let _ = writeln!(output, "{}", mode.title());
    let _ = writeln!(output, "{}", mode.description());
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "{:<label_width$}  {:>8}  {:>8}  {:>8}  {:>8}",
        "Day", "Actual", "Planned", "Ideal", "Goal"
    );

    for point in points {
        let _ = writeln!(
            output,
            "{:<label_width$}  {:>8.1}  {:>8.1}  {:>8.1}  {:>8}",
            point.label,
            point.actual,
            point.planned,
            point.ideal,
            point
                .goal
                .map(|goal| format!("{goal:.1}"))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    output
}

pub fn to_csv(points: &[ChartPoint]) -> Result<String, GridError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(["day", "actual", "planned", "ideal", "goal"])?;
    for point in points {
        writer.write_record([
            point.label.clone(),
            point.actual.to_string(),
            point.planned.to_string(),
            point.ideal.to_string(),
            point.goal.map(|goal| goal.to_string()).unwrap_or_default(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid;

    fn example_samples() -> Vec<DaySample> {
        grid::parse(grid::EXAMPLE_GRID).unwrap()[1..].to_vec()
    }

    #[test]
    fn burndown_tracks_remaining_work() {
        let config = SprintConfig::new(50.0, 10);
        let points = build(&example_samples(), &config, ChartMode::Burndown);
        assert_eq!(points.len(), 11);

        let start = &points[0];
        assert_eq!(start.label, "Start");
        assert_eq!(start.actual, 50.0);
        assert_eq!(start.ideal, 50.0);

        let last = &points[10];
        assert_eq!(last.actual, 2.0);
        assert_eq!(last.planned, 0.0);
        assert_eq!(last.ideal, 0.0);
        assert!(points.iter().all(|point| point.goal == Some(0.0)));
    }

    #[test]
    fn burnup_tracks_completed_work() {
        let config = SprintConfig::new(50.0, 10);
        let points = build(&example_samples(), &config, ChartMode::Burnup);

        let last = &points[10];
        assert_eq!(last.actual, 48.0);
        assert_eq!(last.planned, 50.0);
        assert_eq!(last.ideal, 50.0);
        assert_eq!(last.goal, Some(50.0));
        assert_eq!(points[3].ideal, 15.0);
        assert!(points.iter().all(|point| point.goal == Some(50.0)));
    }

    #[test]
    fn ideal_line_uses_sample_position() {
        let config = SprintConfig::new(10.0, 4);
        let samples = vec![
            DaySample::new("Mon", 0.0, 0.0),
            DaySample::new("Tue", 2.0, 1.0),
            DaySample::new("Wed", 5.0, 4.0),
        ];
        let points = build(&samples, &config, ChartMode::Burndown);
        assert_eq!(points[1].ideal, 7.5);
        assert_eq!(points[2].ideal, 5.0);
        assert_eq!(points[2].label, "Wed");
    }

    #[test]
    fn empty_samples_build_empty_series() {
        let config = SprintConfig::default();
        assert!(build(&[], &config, ChartMode::Burnup).is_empty());
    }

    #[test]
    fn table_lists_every_point() {
        let config = SprintConfig::new(50.0, 10);
        let points = build(&example_samples(), &config, ChartMode::Burnup);
        let table = render_table(&points, ChartMode::Burnup);
        assert!(table.starts_with("Burnup Chart\n"));
        assert!(table.contains("Day 10"));
        assert_eq!(table.lines().count(), 4 + points.len());
    }

    #[test]
    fn csv_has_header_and_rows() {
        let config = SprintConfig::new(50.0, 10);
        let points = build(&example_samples()[..2], &config, ChartMode::Burndown);
        let csv = to_csv(&points).unwrap();
        assert_eq!(
            csv,
            "day,actual,planned,ideal,goal\nStart,50,50,50,0\nDay 1,47,45,45,0\n"
        );
    }
}
