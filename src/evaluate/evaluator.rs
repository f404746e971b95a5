//! Per-combination aggregation and statistics.

use super::types::{Accumulation, ScoreRecord};
use crate::combination::{decode_into, Combination};
use crate::feedback::FeedbackMatrix;

/// Worker-private buffers reused across evaluations.
///
/// Holds the decoded bit vector (length P) and the aggregated signal
/// (length C). One scratch per worker; never shared.
#[derive(Debug, Clone)]
pub struct EvalScratch {
    bits: Vec<bool>,
    signal: Vec<f64>,
}

impl EvalScratch {
    /// Allocates buffers sized for `matrix`.
    pub fn new(matrix: &FeedbackMatrix) -> Self {
        Self {
            bits: vec![false; matrix.policies()],
            signal: vec![0.0; matrix.customers()],
        }
    }

    /// The bit vector of the last evaluated combination.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// The aggregated signal of the last evaluated combination.
    pub fn signal(&self) -> &[f64] {
        &self.signal
    }
}

/// Computes the aggregated signal of a combination and its statistics.
///
/// For each customer, the signal is the mean of the scores given to the
/// selected policies. The empty combination uses divisor 1, so its
/// signal is identically zero.
///
/// # Examples
///
/// ```
/// use u_policysearch::combination::Combination;
/// use u_policysearch::evaluate::{EvalScratch, ScoreEvaluator};
/// use u_policysearch::feedback::FeedbackMatrix;
///
/// let matrix = FeedbackMatrix::from_rows(vec![vec![10, 20, 30], vec![-10, -20, -30]]).unwrap();
/// let mut scratch = EvalScratch::new(&matrix);
/// let record = ScoreEvaluator::default().evaluate(&matrix, Combination(1), &mut scratch);
///
/// assert!((record.mean - 20.0).abs() < 1e-12);
/// assert!((record.std_dev - 8.164965809).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluator {
    accumulation: Accumulation,
}

impl ScoreEvaluator {
    pub fn new(accumulation: Accumulation) -> Self {
        Self { accumulation }
    }

    pub fn accumulation(&self) -> Accumulation {
        self.accumulation
    }

    /// Evaluates one combination, writing intermediate state into `scratch`.
    pub fn evaluate(
        &self,
        matrix: &FeedbackMatrix,
        combination: Combination,
        scratch: &mut EvalScratch,
    ) -> ScoreRecord {
        decode_into(combination.id(), &mut scratch.bits);
        aggregate(matrix, &scratch.bits, &mut scratch.signal, self.accumulation);

        let mean = mean(&scratch.signal, self.accumulation);
        let std_dev = population_std_dev(&scratch.signal, mean, self.accumulation);
        ScoreRecord::new(combination, mean, std_dev)
    }

    /// Evaluates the combination with the given index.
    pub fn evaluate_index(
        &self,
        matrix: &FeedbackMatrix,
        index: u64,
        scratch: &mut EvalScratch,
    ) -> ScoreRecord {
        self.evaluate(matrix, Combination(index), scratch)
    }
}

/// Fills `signal` with the per-customer mean over the selected policies.
fn aggregate(
    matrix: &FeedbackMatrix,
    bits: &[bool],
    signal: &mut [f64],
    accumulation: Accumulation,
) {
    let selected = bits.iter().filter(|&&b| b).count();
    let divisor = selected.max(1) as f64;

    signal.fill(0.0);
    for (j, _) in bits.iter().enumerate().filter(|&(_, &b)| b) {
        let row = matrix.row(j);
        match accumulation {
            Accumulation::PerTerm => {
                for (s, &v) in signal.iter_mut().zip(row) {
                    *s += v as f64 / divisor;
                }
            }
            Accumulation::SumThenDivide => {
                for (s, &v) in signal.iter_mut().zip(row) {
                    *s += v as f64;
                }
            }
        }
    }

    if accumulation == Accumulation::SumThenDivide && selected > 1 {
        for s in signal.iter_mut() {
            *s /= divisor;
        }
    }
}

/// Arithmetic mean of `values`.
///
/// `values` must not be empty.
pub fn mean(values: &[f64], accumulation: Accumulation) -> f64 {
    let n = values.len() as f64;
    match accumulation {
        Accumulation::PerTerm => values.iter().map(|v| v / n).sum(),
        Accumulation::SumThenDivide => values.iter().sum::<f64>() / n,
    }
}

/// Population standard deviation of `values` around `mean` (divisor `n`).
pub fn population_std_dev(values: &[f64], mean: f64, accumulation: Accumulation) -> f64 {
    let n = values.len() as f64;
    let variance: f64 = match accumulation {
        Accumulation::PerTerm => values.iter().map(|v| (v - mean).powi(2) / n).sum(),
        Accumulation::SumThenDivide => {
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
        }
    };
    variance.sqrt()
}
