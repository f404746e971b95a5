//! Exhaustive search for the best-received combination of policies.
//!
//! Given a table of customer feedback scores per policy, evaluates every
//! subset of policies and ranks them by the mean of the per-customer
//! average feedback, reporting the population standard deviation
//! alongside.
//!
//! - **Feedback**: the read-only policy × customer score matrix, plus a
//!   seeded synthetic generator.
//! - **Combination**: bijection between integer indices and policy subsets.
//! - **Evaluate**: per-subset aggregation, mean, and standard deviation.
//! - **Ranking**: fixed-capacity top-K list, standalone or mutex-shared.
//! - **Search**: the parallel driver tying the pieces together.
//!
//! # Example
//!
//! ```
//! use u_policysearch::feedback::{FeedbackConfig, FeedbackGenerator};
//! use u_policysearch::search::{SearchConfig, SearchRunner};
//!
//! let matrix = FeedbackGenerator::generate(
//!     &FeedbackConfig::default().with_policies(6).with_customers(500).with_seed(1),
//! ).unwrap();
//! let result = SearchRunner::run(&matrix, &SearchConfig::default()).unwrap();
//!
//! assert_eq!(result.evaluated, 64);
//! assert_eq!(result.ranking.capacity(), 10);
//! ```
//!
//! # Scale
//!
//! The search is exponential in the number of policies. It is intended
//! for up to a few dozen policies; see [`search::SearchConfig::max_policies`].

pub mod combination;
pub mod error;
pub mod evaluate;
pub mod feedback;
pub mod ranking;
pub mod search;

pub use error::SearchError;
