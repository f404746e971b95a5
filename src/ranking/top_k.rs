//! Fixed-capacity ranking kept sorted by mean.

use crate::evaluate::ScoreRecord;

/// The K best records seen so far, sorted non-increasing by mean.
///
/// Always holds exactly K entries. Slots not yet claimed by a real record
/// hold [`ScoreRecord::sentinel`] at the tail. A sentinel is outranked by
/// every real record, whatever the record's mean.
///
/// Records with equal means keep whatever relative order their
/// insertions happened in; the ranking among ties carries no meaning.
///
/// # Examples
///
/// ```
/// use u_policysearch::combination::Combination;
/// use u_policysearch::evaluate::ScoreRecord;
/// use u_policysearch::ranking::TopKList;
///
/// let mut top = TopKList::new(2);
/// assert!(top.try_insert(ScoreRecord::new(Combination(1), 5.0, 0.0)));
/// assert!(top.try_insert(ScoreRecord::new(Combination(2), 9.0, 0.0)));
/// assert!(top.try_insert(ScoreRecord::new(Combination(3), 7.0, 0.0)));
/// assert!(!top.try_insert(ScoreRecord::new(Combination(4), 7.0, 0.0)));
///
/// let ids: Vec<u64> = top.real_records().filter_map(|r| r.combination).map(|c| c.id()).collect();
/// assert_eq!(ids, vec![2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TopKList {
    records: Vec<ScoreRecord>,
}

impl TopKList {
    /// Creates a list of `capacity` sentinels.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "top-k capacity must be at least 1");
        Self {
            records: vec![ScoreRecord::sentinel(); capacity],
        }
    }

    /// Number of slots (K).
    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    /// All K slots, best first. May include sentinels at the tail.
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    /// Real (non-sentinel) records, best first.
    pub fn real_records(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.records.iter().filter(|r| !r.is_sentinel())
    }

    /// The mean a record must strictly exceed to be accepted.
    ///
    /// `f64::NEG_INFINITY` while any sentinel slot remains.
    pub fn min_mean(&self) -> f64 {
        let last = &self.records[self.records.len() - 1];
        if last.is_sentinel() {
            f64::NEG_INFINITY
        } else {
            last.mean
        }
    }

    pub fn into_records(self) -> Vec<ScoreRecord> {
        self.records
    }

    /// Inserts `record` if its mean is strictly greater than the current
    /// minimum, or if a sentinel slot remains, evicting the last slot.
    /// Returns whether it was inserted.
    pub fn try_insert(&mut self, record: ScoreRecord) -> bool {
        let last = self.records.len() - 1;
        if !outranks(&record, &self.records[last]) {
            return false;
        }

        // Single insertion-sort step: shift sentinels and smaller means right.
        let mut slot = last;
        while slot > 0 && outranks(&record, &self.records[slot - 1]) {
            self.records[slot] = self.records[slot - 1];
            slot -= 1;
        }
        self.records[slot] = record;
        true
    }

    /// Offers every real record of `other` to this list.
    ///
    /// Returns the number accepted.
    pub fn merge(&mut self, other: &TopKList) -> usize {
        let mut accepted = 0;
        for record in other.real_records() {
            if self.try_insert(*record) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Whether real records are sorted non-increasing by mean with every
    /// sentinel after them.
    pub fn is_sorted(&self) -> bool {
        self.records
            .windows(2)
            .all(|w| match (w[0].is_sentinel(), w[1].is_sentinel()) {
                (false, false) => w[0].mean >= w[1].mean,
                (true, false) => false,
                _ => true,
            })
    }
}

/// Whether `candidate` belongs ahead of `slot`.
///
/// Sentinels rank below every real record regardless of their mean, so
/// feedback outside the sentinel's range is still ranked.
fn outranks(candidate: &ScoreRecord, slot: &ScoreRecord) -> bool {
    slot.is_sentinel() || slot.mean < candidate.mean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combination::Combination;
    use crate::evaluate::SENTINEL_SCORE;
    use proptest::prelude::*;

    fn rec(id: u64, mean: f64) -> ScoreRecord {
        ScoreRecord::new(Combination(id), mean, 0.0)
    }

    fn means(list: &TopKList) -> Vec<f64> {
        list.records().iter().map(|r| r.mean).collect()
    }

    #[test]
    fn test_new_is_all_sentinels() {
        let list = TopKList::new(10);
        assert_eq!(list.capacity(), 10);
        assert!(list.records().iter().all(|r| r.is_sentinel()));
        assert_eq!(list.min_mean(), f64::NEG_INFINITY);
        assert_eq!(list.real_records().count(), 0);
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn test_zero_capacity_panics() {
        let _ = TopKList::new(0);
    }

    #[test]
    fn test_insert_keeps_descending_order() {
        let mut list = TopKList::new(4);
        for (id, m) in [(1, 3.0), (2, 8.0), (3, -1.0), (4, 5.0)] {
            assert!(list.try_insert(rec(id, m)));
        }
        assert_eq!(means(&list), vec![8.0, 5.0, 3.0, -1.0]);

        assert!(list.try_insert(rec(5, 6.0)));
        assert_eq!(means(&list), vec![8.0, 6.0, 5.0, 3.0]);
    }

    #[test]
    fn test_equal_to_min_is_rejected() {
        let mut list = TopKList::new(2);
        list.try_insert(rec(1, 4.0));
        list.try_insert(rec(2, 2.0));
        assert!(!list.try_insert(rec(3, 2.0)));
        assert!(!list.try_insert(rec(4, 1.0)));
        assert_eq!(list.records()[1].combination, Some(Combination(2)));
    }

    #[test]
    fn test_tie_placed_after_existing_equal() {
        let mut list = TopKList::new(3);
        list.try_insert(rec(1, 5.0));
        list.try_insert(rec(2, 5.0));
        let ids: Vec<_> = list.real_records().map(|r| r.combination).collect();
        assert_eq!(ids, vec![Some(Combination(1)), Some(Combination(2))]);
    }

    #[test]
    fn test_capacity_one() {
        let mut list = TopKList::new(1);
        assert!(list.try_insert(rec(1, 1.0)));
        assert!(list.try_insert(rec(2, 2.0)));
        assert!(!list.try_insert(rec(3, 0.5)));
        assert_eq!(list.records()[0].combination, Some(Combination(2)));
    }

    #[test]
    fn test_merge_skips_sentinels() {
        let mut a = TopKList::new(3);
        a.try_insert(rec(1, 1.0));
        let mut b = TopKList::new(3);
        b.try_insert(rec(2, 2.0));
        assert_eq!(a.merge(&b), 1);
        assert_eq!(a.real_records().count(), 2);
        assert_eq!(a.records()[2].mean, SENTINEL_SCORE);
    }

    #[test]
    fn test_means_below_sentinel_score_are_ranked() {
        let mut list = TopKList::new(3);
        assert!(list.try_insert(rec(1, -150.0)));
        assert!(list.try_insert(rec(2, -250.0)));
        assert!(list.is_sorted());
        assert_eq!(list.real_records().count(), 2);
        assert_eq!(list.records()[2].mean, SENTINEL_SCORE);
        assert_eq!(list.min_mean(), f64::NEG_INFINITY);

        assert!(list.try_insert(rec(3, -120.0)));
        assert_eq!(means(&list), vec![-120.0, -150.0, -250.0]);
        assert!(!list.try_insert(rec(4, -300.0)));
        assert_eq!(list.min_mean(), -250.0);
    }

    proptest! {
        #[test]
        fn prop_matches_sorted_reference(
            k in 1usize..=12,
            values in prop::collection::vec(-300i32..=300, 0..60),
        ) {
            let mut list = TopKList::new(k);
            for (id, &v) in values.iter().enumerate() {
                list.try_insert(rec(id as u64, v as f64));
                prop_assert!(list.is_sorted());
                prop_assert_eq!(list.capacity(), k);
            }

            let mut expected: Vec<f64> = values.iter().map(|&v| v as f64).collect();
            expected.sort_by(|a, b| b.partial_cmp(a).unwrap());
            expected.truncate(k);
            while expected.len() < k {
                expected.push(SENTINEL_SCORE);
            }
            prop_assert_eq!(means(&list), expected);
        }

        #[test]
        fn prop_merge_equals_single_list(
            k in 1usize..=8,
            left in prop::collection::vec(-50i32..=50, 0..30),
            right in prop::collection::vec(-50i32..=50, 0..30),
        ) {
            let mut single = TopKList::new(k);
            let mut a = TopKList::new(k);
            let mut b = TopKList::new(k);
            for (id, &v) in left.iter().enumerate() {
                single.try_insert(rec(id as u64, v as f64));
                a.try_insert(rec(id as u64, v as f64));
            }
            for (id, &v) in right.iter().enumerate() {
                single.try_insert(rec(1000 + id as u64, v as f64));
                b.try_insert(rec(1000 + id as u64, v as f64));
            }
            a.merge(&b);
            prop_assert_eq!(means(&a), means(&single));
        }
    }
}
