use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{ChartMode, ChartPoint, ProgressEvaluation};
use crate::state::SprintState;

pub fn format_projection(evaluation: &ProgressEvaluation) -> String {
    evaluation
        .projected_completion
        .map(|days| days.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn render_evaluation(evaluation: &ProgressEvaluation) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Status: {}", evaluation.status.as_str().to_uppercase());
    let _ = writeln!(output, "Velocity: {} points/day", evaluation.velocity);
    let _ = writeln!(output, "Efficiency: {}%", evaluation.efficiency);
    let _ = writeln!(output, "Days to complete: {}", format_projection(evaluation));
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", evaluation.message);
    let _ = writeln!(output);
    let _ = writeln!(output, "Recommendations:");
    for item in &evaluation.recommendations {
        let _ = writeln!(output, "- {item}");
    }
    output
}

const BURNDOWN_READINGS: &[&str] = &[
    "Actual line above planned: Team is behind schedule",
    "Actual line below planned: Team is ahead of schedule",
    "Flat actual line: No progress being made, investigate blockers",
    "Steep drops: Significant work completed quickly",
];

const BURNUP_READINGS: &[&str] = &[
    "Actual line below planned: Team is behind schedule",
    "Actual line above planned: Team is ahead of schedule",
    "Gap to goal line: Shows remaining work to complete",
    "Goal line movement: Indicates scope changes during sprint",
];

/// Summary, reading guide and goal sentence for the chart analysis section.
fn analysis_notes(mode: ChartMode) -> (&'static str, &'static [&'static str], &'static str) {
    match mode {
        ChartMode::Burndown => (
            "Burndown charts show the amount of work remaining over time. \
             The line should trend downward as tasks are completed.",
            BURNDOWN_READINGS,
            "The actual line should reach zero by the end of the sprint.",
        ),
        ChartMode::Burnup => (
            "Burnup charts show the amount of work completed over time. \
             The line should trend upward as work is finished.",
            BURNUP_READINGS,
            "The actual line should reach the sprint goal line by the end.",
        ),
    }
}

fn write_series(output: &mut String, points: &[ChartPoint]) {
    let _ = writeln!(output, "| Day | Actual | Planned | Ideal | Goal |");
    let _ = writeln!(output, "|---|---|---|---|---|");
    for point in points {
        let goal = point.goal.map(|goal| format!("{goal:.1}")).unwrap_or_default();
        let _ = writeln!(
            output,
            "| {} | {:.1} | {:.1} | {:.1} | {} |",
            point.label, point.actual, point.planned, point.ideal, goal
        );
    }
}

pub fn build_report(state: &SprintState, mode: ChartMode, generated_on: NaiveDate) -> String {
    let evaluation = state.evaluation();
    let points = state.chart(mode);

    let mut output = String::new();
    let _ = writeln!(output, "# Sprint Progress Report");
    let _ = writeln!(
        output,
        "Generated {} for {} story points over {} days",
        generated_on, state.config.total_scope, state.config.sprint_days
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Evaluation");
    let _ = writeln!(output, "- Status: {}", evaluation.status);
    let _ = writeln!(output, "- Velocity: {} points/day", evaluation.velocity);
    let _ = writeln!(output, "- Efficiency: {}%", evaluation.efficiency);
    let _ = writeln!(output, "- Days to complete: {}", format_projection(&evaluation));
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", evaluation.message);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommendations");
    for item in &evaluation.recommendations {
        let _ = writeln!(output, "- {item}");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## {}", mode.title());
    let _ = writeln!(output, "{}", mode.description());
    let _ = writeln!(output);
    if points.is_empty() {
        let _ = writeln!(output, "No progress recorded for this sprint.");
    } else {
        write_series(&mut output, &points);
    }

    let (summary, readings, goal) = analysis_notes(mode);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Chart Analysis");
    let _ = writeln!(output, "{summary}");
    let _ = writeln!(output);
    for reading in readings {
        let _ = writeln!(output, "- {reading}");
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "Goal: {goal}");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::insufficient_data;
    use crate::grid::EXAMPLE_GRID;
    use crate::models::SprintConfig;

    fn example_state() -> SprintState {
        SprintState::new(SprintConfig::new(50.0, 10))
            .apply_import(EXAMPLE_GRID)
            .unwrap()
    }

    #[test]
    fn report_has_all_sections() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let report = build_report(&example_state(), ChartMode::Burnup, date);

        assert!(report.starts_with("# Sprint Progress Report\n"));
        assert!(report.contains("Generated 2026-03-02 for 50 story points over 11 days"));
        assert!(report.contains("- Status: on-track"));
        assert!(report.contains("## Recommendations\n- Continue current pace"));
        assert!(report.contains("## Burnup Chart"));
        assert!(report.contains("| Day 10 | 48.0 | 50.0 |"));
        assert!(report.contains("Gap to goal line"));
    }

    #[test]
    fn burndown_report_uses_burndown_notes() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let report = build_report(&example_state(), ChartMode::Burndown, date);
        assert!(report.contains("## Burndown Chart"));
        assert!(report.contains("| Day 10 | 2.0 | 0.0 |"));
        assert!(report.contains("Goal: The actual line should reach zero"));
    }

    #[test]
    fn evaluation_text_shows_missing_projection() {
        let mut evaluation = insufficient_data();
        evaluation.projected_completion = None;
        let text = render_evaluation(&evaluation);
        assert!(text.starts_with("Status: ON-TRACK\n"));
        assert!(text.contains("Days to complete: n/a"));
        assert!(text.ends_with("- Add more daily progress data\n"));
    }
}
