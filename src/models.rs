use serde::Serialize;

pub const MIN_TOTAL_SCOPE: f64 = 1.0;
pub const MIN_SPRINT_DAYS: u32 = 1;
pub const MAX_SPRINT_DAYS: u32 = 30;

/// One row of sprint progress. Scores are cumulative story points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySample {
    pub label: String,
    pub planned_score: f64,
    pub made_score: f64,
}

impl DaySample {
    pub fn new(label: impl Into<String>, planned_score: f64, made_score: f64) -> Self {
        Self {
            label: label.into(),
            planned_score,
            made_score,
        }
    }

    pub fn peak(&self) -> f64 {
        self.planned_score.max(self.made_score)
    }
}

/// Label used for a row that carries no label of its own.
pub fn default_label(index: usize) -> String {
    if index == 0 {
        "Start".to_string()
    } else {
        format!("Day {index}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SprintConfig {
    pub total_scope: f64,
    pub sprint_days: u32,
}

impl SprintConfig {
    pub fn new(total_scope: f64, sprint_days: u32) -> Self {
        let total_scope = if total_scope.is_finite() {
            total_scope.max(MIN_TOTAL_SCOPE)
        } else {
            MIN_TOTAL_SCOPE
        };
        Self {
            total_scope,
            sprint_days: sprint_days.clamp(MIN_SPRINT_DAYS, MAX_SPRINT_DAYS),
        }
    }

    /// Ideal story points burned per day. Imports may leave `sprint_days` at 0,
    /// which is divided as 1.
    pub fn daily_rate(&self) -> f64 {
        self.total_scope / f64::from(self.sprint_days.max(MIN_SPRINT_DAYS))
    }

    pub fn ideal_cumulative(&self, index: usize) -> f64 {
        self.daily_rate() * index as f64
    }
}

impl Default for SprintConfig {
    fn default() -> Self {
        Self::new(50.0, 10)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ChartMode {
    #[default]
    Burndown,
    Burnup,
}

impl ChartMode {
    pub fn title(&self) -> &'static str {
        match self {
            ChartMode::Burndown => "Burndown Chart",
            ChartMode::Burnup => "Burnup Chart",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChartMode::Burndown => "Shows remaining work decreasing over time",
            ChartMode::Burnup => "Shows completed work increasing over time",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub actual: f64,
    pub planned: f64,
    pub ideal: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressStatus {
    OnTrack,
    AtRisk,
    Behind,
}

impl ProgressStatus {
    pub fn from_efficiency(efficiency: f64) -> Self {
        if efficiency >= 90.0 {
            ProgressStatus::OnTrack
        } else if efficiency >= 70.0 {
            ProgressStatus::AtRisk
        } else {
            ProgressStatus::Behind
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::OnTrack => "on-track",
            ProgressStatus::AtRisk => "at-risk",
            ProgressStatus::Behind => "behind",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ProgressStatus::OnTrack => {
                "Sprint is progressing well! Team is meeting or exceeding expectations."
            }
            ProgressStatus::AtRisk => {
                "Sprint is slightly behind schedule but recoverable with focused effort."
            }
            ProgressStatus::Behind => {
                "Sprint is significantly behind schedule. Immediate action required."
            }
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            ProgressStatus::OnTrack => &[
                "Continue current pace",
                "Consider taking on additional scope if capacity allows",
                "Share successful practices with other teams",
            ],
            ProgressStatus::AtRisk => &[
                "Identify and remove blockers",
                "Consider pair programming for complex tasks",
                "Daily check-ins on progress",
                "Reassess remaining scope priorities",
            ],
            ProgressStatus::Behind => &[
                "Emergency team meeting to identify issues",
                "Consider scope reduction",
                "Escalate blockers to management",
                "Implement daily standups if not already doing so",
                "Review and adjust task estimates",
            ],
        }
    }
}

impl std::fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvaluation {
    pub status: ProgressStatus,
    pub message: String,
    pub recommendations: Vec<String>,
    pub velocity: f64,
    /// Days still needed at the current velocity; `None` when nothing has been
    /// completed yet.
    pub projected_completion: Option<f64>,
    pub efficiency: f64,
}

/// Rounds halves toward positive infinity, so `-2.5` becomes `-2`.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_to_input_bounds() {
        let config = SprintConfig::new(0.0, 0);
        assert_eq!(config.total_scope, 1.0);
        assert_eq!(config.sprint_days, 1);

        let config = SprintConfig::new(f64::NAN, 45);
        assert_eq!(config.total_scope, 1.0);
        assert_eq!(config.sprint_days, 30);
    }

    #[test]
    fn daily_rate_treats_zero_days_as_one() {
        let config = SprintConfig {
            total_scope: 12.0,
            sprint_days: 0,
        };
        assert_eq!(config.daily_rate(), 12.0);
        assert_eq!(config.ideal_cumulative(2), 24.0);
    }

    #[test]
    fn status_thresholds_are_inclusive() {
        assert_eq!(ProgressStatus::from_efficiency(90.0), ProgressStatus::OnTrack);
        assert_eq!(ProgressStatus::from_efficiency(89.99), ProgressStatus::AtRisk);
        assert_eq!(ProgressStatus::from_efficiency(70.0), ProgressStatus::AtRisk);
        assert_eq!(ProgressStatus::from_efficiency(69.999), ProgressStatus::Behind);
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_to_tenth(4.86), 4.9);
        assert_eq!(round_to_tenth(0.05), 0.1);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&ProgressStatus::AtRisk).unwrap();
        assert_eq!(json, "\"at-risk\"");
        assert_eq!(ProgressStatus::Behind.recommendations().len(), 5);
    }

    #[test]
    fn default_labels() {
        assert_eq!(default_label(0), "Start");
        assert_eq!(default_label(3), "Day 3");
    }
}
