//! Feedback data: the policy × customer score table searched over.
//!
//! [`FeedbackMatrix`] is the only input the search needs. It can be built
//! from real data with [`FeedbackMatrix::from_rows`], or synthesized with
//! [`FeedbackGenerator`], which draws each policy's scores from a range
//! chosen by its [`Sentiment`].

mod config;
mod generator;
mod matrix;

pub use config::{FeedbackConfig, Sentiment, SentimentProfile};
pub use generator::{create_rng, FeedbackGenerator};
pub use matrix::FeedbackMatrix;
