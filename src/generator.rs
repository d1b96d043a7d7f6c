use rand::Rng;
use tracing::debug;

use crate::models::{default_label, round_half_up, DaySample, SprintConfig};

const JITTER_LOW: f64 = 0.8;
const JITTER_HIGH: f64 = 1.2;

/// Placeholder progress for a sprint with no imported data.
pub fn generate(config: &SprintConfig) -> Vec<DaySample> {
    generate_with_rng(config, &mut rand::thread_rng())
}

pub fn generate_with_rng<R: Rng + ?Sized>(config: &SprintConfig, rng: &mut R) -> Vec<DaySample> {
    let days = config.sprint_days as usize;
    let samples: Vec<DaySample> = (0..=days)
        .map(|index| {
            let planned = config.ideal_cumulative(index);
            let jitter = rng.gen_range(JITTER_LOW..JITTER_HIGH);
            DaySample::new(
                default_label(index),
                round_half_up(planned),
                round_half_up(planned * jitter),
            )
        })
        .collect();

    debug!(
        days,
        total_scope = config.total_scope,
        "generated default sprint data"
    );
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn produces_one_sample_per_day_plus_start() {
        let config = SprintConfig::new(50.0, 10);
        let samples = generate(&config);
        assert_eq!(samples.len(), 11);
        assert_eq!(samples[0].label, "Start");
        assert_eq!(samples[0].planned_score, 0.0);
        assert_eq!(samples[0].made_score, 0.0);
        assert_eq!(samples[4].label, "Day 4");
        assert_eq!(samples[10].label, "Day 10");
    }

    #[test]
    fn planned_channel_is_deterministic() {
        let config = SprintConfig::new(17.0, 7);
        let samples = generate(&config);
        for (index, sample) in samples.iter().enumerate() {
            let expected = (17.0 / 7.0 * index as f64 + 0.5).floor();
            assert_eq!(sample.planned_score, expected, "index {index}");
        }
    }

    #[test]
    fn made_channel_stays_within_jitter_bounds() {
        let config = SprintConfig::new(30.0, 30);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            for (index, sample) in generate_with_rng(&config, &mut rng).iter().enumerate() {
                let planned = config.ideal_cumulative(index);
                assert!(sample.made_score >= (planned * 0.8).floor(), "index {index}");
                assert!(sample.made_score <= (planned * 1.2).ceil(), "index {index}");
            }
        }
    }

    #[test]
    fn same_seed_same_data() {
        let config = SprintConfig::default();
        let first = generate_with_rng(&config, &mut StdRng::seed_from_u64(42));
        let second = generate_with_rng(&config, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn single_day_sprint() {
        let config = SprintConfig::new(8.0, 1);
        let samples = generate(&config);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].planned_score, 8.0);
    }
}
