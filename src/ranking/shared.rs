//! Mutex-guarded ranking shared by all workers.

use super::top_k::TopKList;
use crate::evaluate::ScoreRecord;
use parking_lot::Mutex;

/// A [`TopKList`] that many threads insert into concurrently.
///
/// The comparison against the current minimum and the insertion that
/// follows run under one lock acquisition. Checking the minimum outside
/// the lock would let two workers pass against the same stale minimum.
#[derive(Debug)]
pub struct SharedTopK {
    inner: Mutex<TopKList>,
}

impl SharedTopK {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(TopKList::new(capacity)),
        }
    }

    /// Atomically inserts `record` if it beats the current minimum.
    pub fn try_insert(&self, record: ScoreRecord) -> bool {
        self.inner.lock().try_insert(record)
    }

    /// A copy of the current ranking.
    pub fn snapshot(&self) -> TopKList {
        self.inner.lock().clone()
    }

    /// Consumes the wrapper once every worker has finished.
    pub fn into_inner(self) -> TopKList {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combination::Combination;

    #[test]
    fn test_concurrent_inserts_keep_top_k() {
        let shared = SharedTopK::new(10);
        let threads = 8u64;
        let per_thread = 500u64;

        std::thread::scope(|s| {
            for t in 0..threads {
                let shared = &shared;
                s.spawn(move || {
                    for i in 0..per_thread {
                        let id = t * per_thread + i;
                        // distinct means so the expected set is unique
                        shared.try_insert(ScoreRecord::new(Combination(id), id as f64, 0.0));
                    }
                });
            }
        });

        let top = shared.into_inner();
        assert!(top.is_sorted());
        let ids: Vec<u64> = top
            .records()
            .iter()
            .map(|r| r.combination.unwrap().id())
            .collect();
        let total = threads * per_thread;
        let expected: Vec<u64> = (total - 10..total).rev().collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_snapshot_does_not_consume() {
        let shared = SharedTopK::new(2);
        shared.try_insert(ScoreRecord::new(Combination(1), 1.0, 0.0));
        assert_eq!(shared.snapshot().real_records().count(), 1);
        shared.try_insert(ScoreRecord::new(Combination(2), 2.0, 0.0));
        assert_eq!(shared.into_inner().real_records().count(), 2);
    }
}
