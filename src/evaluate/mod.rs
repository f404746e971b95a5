//! Combination scoring.
//!
//! [`ScoreEvaluator`] turns one combination into a [`ScoreRecord`]: the
//! mean and population standard deviation, over all customers, of the
//! per-customer average feedback across the selected policies.
//!
//! Evaluation writes only into a caller-owned [`EvalScratch`], so many
//! workers can evaluate concurrently against one shared matrix.

mod evaluator;
mod types;

pub use evaluator::{mean, population_std_dev, EvalScratch, ScoreEvaluator};
pub use types::{Accumulation, ScoreRecord, SENTINEL_SCORE};
