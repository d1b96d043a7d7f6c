use rand::Rng;
use tracing::{info, warn};

use crate::chart;
use crate::error::GridError;
use crate::evaluation;
use crate::generator;
use crate::grid;
use crate::models::{
    ChartMode, ChartPoint, DaySample, ProgressEvaluation, SprintConfig, MAX_SPRINT_DAYS,
};

/// The configuration plus the day samples it currently describes. Every
/// transition returns a new state; derived views are computed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct SprintState {
    pub config: SprintConfig,
    pub samples: Vec<DaySample>,
}

impl SprintState {
    pub fn new(config: SprintConfig) -> Self {
        let samples = generator::generate(&config);
        Self { config, samples }
    }

    pub fn with_rng<R: Rng + ?Sized>(config: SprintConfig, rng: &mut R) -> Self {
        let samples = generator::generate_with_rng(&config, rng);
        Self { config, samples }
    }

    /// Replaces the configuration and regenerates default samples, discarding
    /// any imported rows.
    pub fn update_config(self, config: SprintConfig) -> Self {
        Self::new(config)
    }

    /// Imports a pasted grid. On failure `self` is untouched and the caller
    /// keeps using it.
    pub fn apply_import(&self, raw: &str) -> Result<Self, GridError> {
        let samples = grid::parse(raw)?;
        Ok(self.with_samples(samples))
    }

    /// The sprint length follows the row count and the scope is raised to
    /// cover the largest score seen, never lowered.
    pub fn with_samples(&self, samples: Vec<DaySample>) -> Self {
        let sprint_days = u32::try_from(samples.len().saturating_sub(1)).unwrap_or(u32::MAX);
        let peak = samples
            .iter()
            .map(DaySample::peak)
            .fold(f64::NEG_INFINITY, f64::max);
        let total_scope = self.config.total_scope.max(peak);
        if sprint_days > MAX_SPRINT_DAYS {
            warn!(sprint_days, "imported sprint is longer than {MAX_SPRINT_DAYS} days");
        }

        info!(
            rows = samples.len(),
            sprint_days, total_scope, "replaced sprint data"
        );
        Self {
            config: SprintConfig {
                total_scope,
                sprint_days,
            },
            samples,
        }
    }

    pub fn chart(&self, mode: ChartMode) -> Vec<ChartPoint> {
        chart::build(&self.samples, &self.config, mode)
    }

    pub fn evaluation(&self) -> ProgressEvaluation {
        evaluation::evaluate(&self.samples, &self.config)
    }
}

impl Default for SprintState {
    fn default() -> Self {
        Self::new(SprintConfig::default())
    }
}
