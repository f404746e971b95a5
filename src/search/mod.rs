//! Exhaustive parallel search over policy combinations.
//!
//! [`SearchRunner`] evaluates all `2^P` combinations of a
//! [`FeedbackMatrix`](crate::feedback::FeedbackMatrix) on a fixed team of
//! worker threads and returns the K combinations with the highest mean
//! aggregated feedback.
//!
//! # Work distribution
//!
//! Workers self-schedule: each claims the next `chunk_size` indices from
//! a shared atomic cursor whenever it finishes its current chunk. The
//! cost of a combination grows with the number of selected policies, so
//! static partitioning would leave some workers idle.
//!
//! # Ties
//!
//! When several combinations share a mean, their relative order in the
//! ranking depends on thread interleaving and is not reproducible across
//! runs. The multiset of ranked means is reproducible.

mod config;
mod runner;

pub use config::{MergeStrategy, SearchConfig};
pub use runner::{SearchResult, SearchRunner};
