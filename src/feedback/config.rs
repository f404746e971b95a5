//! Synthetic feedback configuration and sentiment profiles.

use crate::error::SearchError;
use std::ops::RangeInclusive;

/// How customers generally receive a single policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    /// Scores uniform in `-50..=50`.
    Neutral,

    /// Scores uniform in `-20..=100`.
    Positive,

    /// Scores uniform in `-100..=20`.
    Negative,
}

impl Sentiment {
    /// The inclusive range scores are drawn from.
    pub fn range(self) -> RangeInclusive<i32> {
        match self {
            Sentiment::Neutral => -50..=50,
            Sentiment::Positive => -20..=100,
            Sentiment::Negative => -100..=20,
        }
    }
}

/// Assignment of a [`Sentiment`] to each policy.
#[derive(Debug, Clone, PartialEq)]
pub enum SentimentProfile {
    /// Even-indexed policies are [`Sentiment::Neutral`]. Each odd-indexed
    /// policy is [`Sentiment::Negative`] with `negative_probability`,
    /// otherwise [`Sentiment::Positive`].
    Mixed {
        /// Probability in `[0, 1]` that an odd policy is badly received.
        negative_probability: f64,
    },

    /// Every policy is [`Sentiment::Neutral`].
    Uniform,

    /// Explicit sentiment per policy. Length must equal the policy count.
    Fixed(Vec<Sentiment>),
}

impl Default for SentimentProfile {
    fn default() -> Self {
        SentimentProfile::Mixed {
            negative_probability: 0.25,
        }
    }
}

/// Configuration for [`FeedbackGenerator`](super::FeedbackGenerator).
///
/// # Examples
///
/// ```
/// use u_policysearch::feedback::{FeedbackConfig, SentimentProfile};
///
/// let config = FeedbackConfig::default()
///     .with_policies(8)
///     .with_customers(1_000)
///     .with_profile(SentimentProfile::Uniform)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct FeedbackConfig {
    /// Number of policies (matrix rows).
    pub policies: usize,

    /// Number of customers (matrix columns).
    pub customers: usize,

    /// Sentiment assignment for the policies.
    pub profile: SentimentProfile,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            policies: 16,
            customers: 50_000,
            profile: SentimentProfile::default(),
            seed: None,
        }
    }
}

impl FeedbackConfig {
    pub fn with_policies(mut self, n: usize) -> Self {
        self.policies = n;
        self
    }

    pub fn with_customers(mut self, n: usize) -> Self {
        self.customers = n;
        self
    }

    pub fn with_profile(mut self, profile: SentimentProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.policies == 0 {
            return Err(SearchError::config("policies", "must be at least 1"));
        }
        if self.customers == 0 {
            return Err(SearchError::config("customers", "must be at least 1"));
        }
        match &self.profile {
            SentimentProfile::Mixed {
                negative_probability,
            } => {
                if !(0.0..=1.0).contains(negative_probability) {
                    return Err(SearchError::config(
                        "negative_probability",
                        format!("must be in [0, 1], got {negative_probability}"),
                    ));
                }
            }
            SentimentProfile::Fixed(sentiments) => {
                if sentiments.len() != self.policies {
                    return Err(SearchError::config(
                        "profile",
                        format!(
                            "{} sentiments given for {} policies",
                            sentiments.len(),
                            self.policies
                        ),
                    ));
                }
            }
            SentimentProfile::Uniform => {}
        }
        Ok(())
    }
}
