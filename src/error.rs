//! Error taxonomy for configuration and data validation.
//!
//! Every variant is raised before any parallel work starts. Once a
//! search is running it cannot fail.

use thiserror::Error;

/// Errors returned by [`SearchRunner`](crate::search::SearchRunner) and
/// [`FeedbackGenerator`](crate::feedback::FeedbackGenerator).
#[derive(Debug, Error)]
pub enum SearchError {
    /// A configuration parameter is out of range.
    #[error("invalid config field `{field}`: {detail}")]
    InvalidConfig { field: &'static str, detail: String },

    /// The feedback matrix does not have a usable shape.
    #[error("invalid feedback matrix: {detail}")]
    InvalidMatrix { detail: String },

    /// `2^policies` combinations exceed the enumerable limit.
    #[error("search space too large: {policies} policies exceeds the limit of {max}")]
    SearchSpaceTooLarge { policies: usize, max: usize },

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SearchError {
    pub(crate) fn config(field: &'static str, detail: impl Into<String>) -> Self {
        SearchError::InvalidConfig {
            field,
            detail: detail.into(),
        }
    }

    pub(crate) fn matrix(detail: impl Into<String>) -> Self {
        SearchError::InvalidMatrix {
            detail: detail.into(),
        }
    }
}
