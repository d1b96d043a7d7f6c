use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use scrum_charts::models::{self, ChartMode, SprintConfig, MAX_SPRINT_DAYS, MIN_SPRINT_DAYS};
use scrum_charts::state::SprintState;
use scrum_charts::{chart, grid, logging, report};

#[derive(Parser)]
#[command(name = "scrum-charts")]
#[command(about = "Sprint burndown/burnup series and progress evaluation", long_about = None)]
struct Cli {
    /// Total story points planned for the sprint
    #[arg(long, global = true, default_value_t = 50.0, value_parser = parse_scope)]
    scope: f64,
    /// Working days in the sprint
    #[arg(
        long,
        global = true,
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_SPRINT_DAYS)..=i64::from(MAX_SPRINT_DAYS))
    )]
    days: u32,
    /// Tab-separated Day/Planned/Made rows; `-` reads stdin. Generated data is used when omitted.
    #[arg(long, global = true)]
    input: Option<PathBuf>,
    /// Seed for generated placeholder data
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Log filter, e.g. `debug`; falls back to RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an example grid to paste into a spreadsheet
    Example,
    /// Print generated placeholder data as a grid
    Generate,
    /// Print chart series
    Chart {
        #[arg(long, value_enum, default_value_t = ChartMode::Burndown)]
        mode: ChartMode,
        #[arg(long, value_enum, default_value_t = SeriesFormat::Table)]
        format: SeriesFormat,
    },
    /// Evaluate sprint progress
    Evaluate {
        #[arg(long, value_enum, default_value_t = EvaluationFormat::Text)]
        format: EvaluationFormat,
    },
    /// Write day samples as CSV
    Export {
        #[arg(long, default_value = "sprint-data.csv")]
        out: PathBuf,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, value_enum, default_value_t = ChartMode::Burndown)]
        mode: ChartMode,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SeriesFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, ValueEnum)]
enum EvaluationFormat {
    Text,
    Json,
}

fn parse_scope(raw: &str) -> Result<f64, String> {
    let scope: f64 = raw.parse().map_err(|_| format!("`{raw}` is not a number"))?;
    if !scope.is_finite() || scope < models::MIN_TOTAL_SCOPE {
        return Err(format!("scope must be at least {}", models::MIN_TOTAL_SCOPE));
    }
    Ok(scope)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read grid from stdin")?;
        return Ok(raw);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_state(cli: &Cli) -> anyhow::Result<SprintState> {
    let config = SprintConfig::new(cli.scope, cli.days);
    let state = match cli.seed {
        Some(seed) => SprintState::with_rng(config, &mut StdRng::seed_from_u64(seed)),
        None => SprintState::new(config),
    };

    let Some(path) = cli.input.as_deref() else {
        return Ok(state);
    };
    let raw = read_input(path)?;
    let imported = state
        .apply_import(&raw)
        .with_context(|| format!("could not import {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = imported.samples.len(),
        "imported sprint grid"
    );
    Ok(imported)
}

/// Runs one subcommand, printing to `stdout`.
fn run(cli: Cli, stdout: &mut impl Write) -> anyhow::Result<()> {
    if let Commands::Example = cli.command {
        writeln!(stdout, "{}", grid::EXAMPLE_GRID)?;
        return Ok(());
    }

    let state = load_state(&cli)?;

    match cli.command {
        // printed before any state is loaded
        Commands::Example => {}
        Commands::Generate => {
            write!(stdout, "{}", grid::to_grid(&state.samples)?)?;
        }
        Commands::Chart { mode, format } => {
            let points = state.chart(mode);
            match format {
                SeriesFormat::Table => write!(stdout, "{}", chart::render_table(&points, mode))?,
                SeriesFormat::Json => {
                    writeln!(stdout, "{}", serde_json::to_string_pretty(&points)?)?
                }
                SeriesFormat::Csv => write!(stdout, "{}", chart::to_csv(&points)?)?,
            }
        }
        Commands::Evaluate { format } => {
            let evaluation = state.evaluation();
            match format {
                EvaluationFormat::Text => {
                    write!(stdout, "{}", report::render_evaluation(&evaluation))?
                }
                EvaluationFormat::Json => {
                    writeln!(stdout, "{}", serde_json::to_string_pretty(&evaluation)?)?
                }
            }
        }
        Commands::Export { out } => {
            std::fs::write(&out, grid::to_csv(&state.samples)?)
                .with_context(|| format!("failed to write {}", out.display()))?;
            writeln!(
                stdout,
                "Exported {} days to {}.",
                state.samples.len(),
                out.display()
            )?;
        }
        Commands::Report { mode, out } => {
            let today = chrono::Local::now().date_naive();
            let report = report::build_report(&state, mode, today);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            writeln!(stdout, "Report written to {}.", out.display())?;
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref())?;
    run(cli, &mut std::io::stdout().lock())
}
