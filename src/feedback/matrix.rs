//! Read-only policy × customer feedback table.

use crate::error::SearchError;

/// A fixed P × C grid of integer feedback scores.
///
/// Row `j` holds the scores every customer gave to policy `j`. The grid
/// is stored row-major in a single allocation and never changes after
/// construction, so it can be shared by reference across worker threads
/// without synchronization.
///
/// # Examples
///
/// ```
/// use u_policysearch::feedback::FeedbackMatrix;
///
/// let matrix = FeedbackMatrix::from_rows(vec![
///     vec![10, 20, 30],
///     vec![-10, -20, -30],
/// ]).unwrap();
///
/// assert_eq!(matrix.policies(), 2);
/// assert_eq!(matrix.customers(), 3);
/// assert_eq!(matrix.row(1), &[-10, -20, -30]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackMatrix {
    values: Vec<i32>,
    policies: usize,
    customers: usize,
}

impl FeedbackMatrix {
    /// Builds a matrix from one row per policy.
    ///
    /// Fails if there are no rows, no customers, or rows of unequal length.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self, SearchError> {
        let policies = rows.len();
        if policies == 0 {
            return Err(SearchError::matrix("at least one policy row is required"));
        }
        let customers = rows[0].len();
        if customers == 0 {
            return Err(SearchError::matrix("at least one customer column is required"));
        }

        let len = cell_count(policies, customers)?;
        let mut values = Vec::with_capacity(len);
        for (j, row) in rows.into_iter().enumerate() {
            if row.len() != customers {
                return Err(SearchError::matrix(format!(
                    "row {j} has {} customers, expected {customers}",
                    row.len()
                )));
            }
            values.extend(row);
        }

        Ok(Self {
            values,
            policies,
            customers,
        })
    }

    /// Builds a matrix from a row-major buffer of `policies * customers` values.
    pub fn from_flat(
        policies: usize,
        customers: usize,
        values: Vec<i32>,
    ) -> Result<Self, SearchError> {
        if policies == 0 || customers == 0 {
            return Err(SearchError::matrix(format!(
                "dimensions must be non-zero, got {policies}x{customers}"
            )));
        }
        let len = cell_count(policies, customers)?;
        if values.len() != len {
            return Err(SearchError::matrix(format!(
                "expected {len} values for {policies}x{customers}, got {}",
                values.len()
            )));
        }
        Ok(Self {
            values,
            policies,
            customers,
        })
    }

    /// Number of policies (rows).
    pub fn policies(&self) -> usize {
        self.policies
    }

    /// Number of customers (columns).
    pub fn customers(&self) -> usize {
        self.customers
    }

    /// All customer scores for one policy.
    ///
    /// # Panics
    /// Panics if `policy >= self.policies()`.
    pub fn row(&self, policy: usize) -> &[i32] {
        let start = policy * self.customers;
        &self.values[start..start + self.customers]
    }

    /// Score given by `customer` to `policy`.
    pub fn get(&self, policy: usize, customer: usize) -> i32 {
        self.row(policy)[customer]
    }

    /// Iterates over the policy rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[i32]> {
        self.values.chunks_exact(self.customers)
    }
}

/// `policies * customers`, failing instead of overflowing.
fn cell_count(policies: usize, customers: usize) -> Result<usize, SearchError> {
    policies.checked_mul(customers).ok_or_else(|| {
        SearchError::matrix(format!("{policies}x{customers} cells overflow usize"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_shape() {
        let m = FeedbackMatrix::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
        assert_eq!(m.policies(), 3);
        assert_eq!(m.customers(), 2);
        assert_eq!(m.get(2, 1), 6);
        assert_eq!(m.rows().count(), 3);
    }

    #[test]
    fn test_from_rows_rejects_empty() {
        assert!(FeedbackMatrix::from_rows(vec![]).is_err());
        assert!(FeedbackMatrix::from_rows(vec![vec![]]).is_err());
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = FeedbackMatrix::from_rows(vec![vec![1, 2, 3], vec![4, 5]]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidMatrix { .. }));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_from_flat_matches_rows() {
        let a = FeedbackMatrix::from_flat(2, 2, vec![1, 2, 3, 4]).unwrap();
        let b = FeedbackMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(a, b);
        assert!(FeedbackMatrix::from_flat(2, 2, vec![1, 2, 3]).is_err());
        assert!(FeedbackMatrix::from_flat(0, 2, vec![]).is_err());
    }

    #[test]
    fn test_from_flat_rejects_overflowing_dimensions() {
        let err = FeedbackMatrix::from_flat(usize::MAX, 2, vec![]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidMatrix { .. }));
        assert!(err.to_string().contains("overflow"));
    }

    #[test]
    fn test_accepts_values_outside_generator_range() {
        let m = FeedbackMatrix::from_rows(vec![vec![-200, -300], vec![i32::MIN, i32::MAX]]).unwrap();
        assert_eq!(m.get(0, 1), -300);
        assert_eq!(m.get(1, 0), i32::MIN);
    }
}
