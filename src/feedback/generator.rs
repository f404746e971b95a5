//! Synthetic feedback data source.

use super::config::{FeedbackConfig, Sentiment, SentimentProfile};
use super::matrix::FeedbackMatrix;
use crate::error::SearchError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Creates a seeded RNG for data generation.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generates random feedback matrices from a [`FeedbackConfig`].
pub struct FeedbackGenerator;

impl FeedbackGenerator {
    /// Generates a matrix using the configured (or a random) seed.
    pub fn generate(config: &FeedbackConfig) -> Result<FeedbackMatrix, SearchError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);
        debug!(
            policies = config.policies,
            customers = config.customers,
            seed,
            "generating synthetic feedback"
        );
        Self::generate_with_rng(config, &mut rng)
    }

    /// Generates a matrix drawing from the given RNG.
    pub fn generate_with_rng<R: Rng>(
        config: &FeedbackConfig,
        rng: &mut R,
    ) -> Result<FeedbackMatrix, SearchError> {
        config.validate()?;

        let sentiments = Self::assign_sentiments(config, rng);
        let mut values = Vec::with_capacity(config.policies * config.customers);
        for sentiment in &sentiments {
            let range = sentiment.range();
            values.extend((0..config.customers).map(|_| rng.random_range(range.clone())));
        }

        FeedbackMatrix::from_flat(config.policies, config.customers, values)
    }

    /// Resolves the profile into one sentiment per policy.
    pub fn assign_sentiments<R: Rng>(config: &FeedbackConfig, rng: &mut R) -> Vec<Sentiment> {
        match &config.profile {
            SentimentProfile::Mixed {
                negative_probability,
            } => (0..config.policies)
                .map(|j| {
                    if j % 2 == 0 {
                        Sentiment::Neutral
                    } else if rng.random_bool(*negative_probability) {
                        Sentiment::Negative
                    } else {
                        Sentiment::Positive
                    }
                })
                .collect(),
            SentimentProfile::Uniform => vec![Sentiment::Neutral; config.policies],
            SentimentProfile::Fixed(sentiments) => sentiments.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(profile: SentimentProfile) -> FeedbackConfig {
        FeedbackConfig::default()
            .with_policies(6)
            .with_customers(200)
            .with_profile(profile)
            .with_seed(42)
    }

    #[test]
    fn test_generate_shape() {
        let m = FeedbackGenerator::generate(&small(SentimentProfile::default())).unwrap();
        assert_eq!(m.policies(), 6);
        assert_eq!(m.customers(), 200);
    }

    #[test]
    fn test_generate_deterministic_with_seed() {
        let config = small(SentimentProfile::default());
        let a = FeedbackGenerator::generate(&config).unwrap();
        let b = FeedbackGenerator::generate(&config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_profile_range() {
        let m = FeedbackGenerator::generate(&small(SentimentProfile::Uniform)).unwrap();
        for row in m.rows() {
            assert!(row.iter().all(|v| (-50..=50).contains(v)));
        }
    }

    #[test]
    fn test_fixed_profile_ranges() {
        let profile = SentimentProfile::Fixed(vec![
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Neutral,
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Neutral,
        ]);
        let m = FeedbackGenerator::generate(&small(profile.clone())).unwrap();
        let SentimentProfile::Fixed(sentiments) = profile else {
            unreachable!()
        };
        for (row, sentiment) in m.rows().zip(sentiments) {
            let range = sentiment.range();
            assert!(row.iter().all(|v| range.contains(v)));
        }
    }

    #[test]
    fn test_mixed_even_policies_neutral() {
        let config = small(SentimentProfile::Mixed {
            negative_probability: 1.0,
        });
        let mut rng = create_rng(1);
        let sentiments = FeedbackGenerator::assign_sentiments(&config, &mut rng);
        for (j, s) in sentiments.iter().enumerate() {
            if j % 2 == 0 {
                assert_eq!(*s, Sentiment::Neutral);
            } else {
                assert_eq!(*s, Sentiment::Negative);
            }
        }
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let config = FeedbackConfig::default().with_customers(0);
        assert!(FeedbackGenerator::generate(&config).is_err());
    }
}
