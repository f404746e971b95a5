//! Score records and accumulation order.

use crate::combination::Combination;

/// Mean and standard deviation reported for empty ranking slots.
///
/// Below any score the synthetic generator produces. Ranking does not
/// compare against it: a sentinel slot accepts any real record.
pub const SENTINEL_SCORE: f64 = -101.0;

/// Statistics for one evaluated combination.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreRecord {
    /// The evaluated subset. `None` for a sentinel.
    pub combination: Option<Combination>,

    /// Mean of the aggregated signal over all customers.
    pub mean: f64,

    /// Population standard deviation of the aggregated signal.
    pub std_dev: f64,
}

impl ScoreRecord {
    pub fn new(combination: Combination, mean: f64, std_dev: f64) -> Self {
        Self {
            combination: Some(combination),
            mean,
            std_dev,
        }
    }

    /// A placeholder that every real record outranks.
    pub fn sentinel() -> Self {
        Self {
            combination: None,
            mean: SENTINEL_SCORE,
            std_dev: SENTINEL_SCORE,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.combination.is_none()
    }
}

/// Order in which divisions are applied while averaging.
///
/// The two orders give results that agree to within rounding but are
/// not bit-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Accumulation {
    /// Divide every term before adding it: `Σ (x_i / n)`.
    ///
    /// Matches the reference program's rounding exactly.
    #[default]
    PerTerm,

    /// Add every term, then divide once: `(Σ x_i) / n`.
    ///
    /// Fewer divisions; slightly different rounding.
    SumThenDivide,
}
