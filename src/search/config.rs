//! Search configuration.

use crate::combination::MAX_ENCODABLE_POLICIES;
use crate::error::SearchError;
use crate::evaluate::Accumulation;
use crate::feedback::FeedbackMatrix;

/// How workers share the global ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// All workers insert into one mutex-guarded ranking.
    ///
    /// Every candidate serializes through a single critical section.
    SharedLock,

    /// Each worker keeps a private ranking; the rankings are merged
    /// after all workers have joined. No contention during the search.
    #[default]
    LocalMerge,
}

/// Configuration for [`SearchRunner`](super::SearchRunner).
///
/// # Examples
///
/// ```
/// use u_policysearch::search::{MergeStrategy, SearchConfig};
///
/// let config = SearchConfig::default()
///     .with_top_k(5)
///     .with_num_threads(4)
///     .with_chunk_size(32)
///     .with_strategy(MergeStrategy::SharedLock);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of combinations kept in the ranking (K).
    pub top_k: usize,

    /// Worker thread count. 0 uses rayon's default (one per core).
    pub num_threads: usize,

    /// Number of consecutive indices a worker claims at a time.
    ///
    /// Smaller chunks balance load better; larger chunks touch the shared
    /// cursor less often.
    pub chunk_size: usize,

    /// How workers share the ranking.
    pub strategy: MergeStrategy,

    /// Division order used when averaging.
    pub accumulation: Accumulation,

    /// Largest policy count accepted. Searches over more policies fail
    /// fast with [`SearchError::SearchSpaceTooLarge`].
    pub max_policies: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            num_threads: 0,
            chunk_size: 16,
            strategy: MergeStrategy::default(),
            accumulation: Accumulation::default(),
            max_policies: 30,
        }
    }
}

impl SearchConfig {
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    pub fn with_num_threads(mut self, n: usize) -> Self {
        self.num_threads = n;
        self
    }

    pub fn with_chunk_size(mut self, n: usize) -> Self {
        self.chunk_size = n;
        self
    }

    pub fn with_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_accumulation(mut self, accumulation: Accumulation) -> Self {
        self.accumulation = accumulation;
        self
    }

    pub fn with_max_policies(mut self, n: usize) -> Self {
        self.max_policies = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.top_k == 0 {
            return Err(SearchError::config("top_k", "must be at least 1"));
        }
        if self.chunk_size == 0 {
            return Err(SearchError::config("chunk_size", "must be at least 1"));
        }
        if self.chunk_size > u32::MAX as usize {
            return Err(SearchError::config(
                "chunk_size",
                format!("must not exceed {}", u32::MAX),
            ));
        }
        if self.max_policies == 0 || self.max_policies > MAX_ENCODABLE_POLICIES {
            return Err(SearchError::config(
                "max_policies",
                format!(
                    "must be in [1, {MAX_ENCODABLE_POLICIES}], got {}",
                    self.max_policies
                ),
            ));
        }
        Ok(())
    }

    /// Validates the configuration against the matrix to be searched.
    pub fn validate_for(&self, matrix: &FeedbackMatrix) -> Result<(), SearchError> {
        self.validate()?;
        if matrix.policies() > self.max_policies {
            return Err(SearchError::SearchSpaceTooLarge {
                policies: matrix.policies(),
                max: self.max_policies,
            });
        }
        Ok(())
    }
}
