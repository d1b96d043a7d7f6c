use tracing::debug;

use crate::models::{
    round_half_up, round_to_tenth, DaySample, ProgressEvaluation, ProgressStatus, SprintConfig,
};

pub fn evaluate(samples: &[DaySample], config: &SprintConfig) -> ProgressEvaluation {
    let Some(latest) = samples.last().filter(|_| samples.len() >= 2) else {
        return insufficient_data();
    };

    let current_day = samples.len() - 1;
    let current_progress = latest.made_score;
    let ideal_progress = config.ideal_cumulative(current_day);
    if !(ideal_progress > 0.0 && ideal_progress.is_finite()) {
        return insufficient_data();
    }

    let velocity = current_progress / current_day as f64;
    let projected_completion = (velocity > 0.0)
        .then(|| round_to_tenth((config.total_scope - current_progress) / velocity));
    let efficiency = current_progress / ideal_progress * 100.0;
    let status = ProgressStatus::from_efficiency(efficiency);

    debug!(
        current_day,
        velocity,
        efficiency,
        status = status.as_str(),
        "evaluated sprint progress"
    );

    ProgressEvaluation {
        status,
        message: status.message().to_string(),
        recommendations: status
            .recommendations()
            .iter()
            .map(|item| item.to_string())
            .collect(),
        velocity: round_to_tenth(velocity),
        projected_completion,
        efficiency: round_half_up(efficiency),
    }
}

pub fn insufficient_data() -> ProgressEvaluation {
    ProgressEvaluation {
        status: ProgressStatus::OnTrack,
        message: "Insufficient data for evaluation".to_string(),
        recommendations: vec!["Add more daily progress data".to_string()],
        velocity: 0.0,
        projected_completion: Some(0.0),
        efficiency: 0.0,
    }
}
