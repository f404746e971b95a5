//! Top-K ranking of evaluated combinations.
//!
//! - [`TopKList`]: single-owner ranking with sentinel fill and a single
//!   insertion-sort step per accepted record.
//! - [`SharedTopK`]: the same list behind a mutex, for workers that all
//!   feed one global ranking.

mod shared;
mod top_k;

pub use shared::SharedTopK;
pub use top_k::TopKList;
