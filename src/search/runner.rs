//! Parallel exhaustive search.
//!
//! # Algorithm
//!
//! 1. Validate the configuration against the matrix
//! 2. Build a worker pool and broadcast one worker loop to every thread
//! 3. Each worker repeatedly claims the next `chunk_size` indices from a
//!    shared atomic cursor, evaluates them, and offers each record to a
//!    ranking (shared or worker-local, per [`MergeStrategy`])
//! 4. After the broadcast returns, merge worker-local rankings if any

use super::config::{MergeStrategy, SearchConfig};
use crate::combination::combination_count;
use crate::error::SearchError;
use crate::evaluate::{EvalScratch, ScoreEvaluator, ScoreRecord};
use crate::feedback::FeedbackMatrix;
use crate::ranking::{SharedTopK, TopKList};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of an exhaustive search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The K best combinations, sorted non-increasing by mean. Sentinels
    /// trail the real records when fewer than K combinations exist.
    pub ranking: TopKList,

    /// Number of combinations evaluated (always `2^P`).
    pub evaluated: u64,

    /// Number of worker threads used.
    pub workers: usize,

    /// Wall-clock duration of the parallel phase, including the merge.
    pub elapsed: Duration,
}

impl SearchResult {
    /// The highest-ranked record, if any real record was found.
    pub fn best(&self) -> Option<&ScoreRecord> {
        self.ranking.real_records().next()
    }
}

/// Per-worker counters.
#[derive(Debug, Clone, Copy, Default)]
struct WorkerStats {
    evaluated: u64,
    chunks: u64,
}

/// Executes the exhaustive search.
pub struct SearchRunner;

impl SearchRunner {
    /// Evaluates every combination of the matrix's policies and returns
    /// the top `config.top_k` by mean.
    ///
    /// Fails before any work starts if the configuration is invalid or
    /// the matrix has more than `config.max_policies` policies.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_policysearch::feedback::FeedbackMatrix;
    /// use u_policysearch::search::{SearchConfig, SearchRunner};
    ///
    /// let matrix = FeedbackMatrix::from_rows(vec![vec![10, 20, 30], vec![-10, -20, -30]]).unwrap();
    /// let result = SearchRunner::run(&matrix, &SearchConfig::default().with_top_k(4)).unwrap();
    ///
    /// assert_eq!(result.evaluated, 4);
    /// assert_eq!(result.best().unwrap().combination.unwrap().id(), 1);
    /// ```
    pub fn run(matrix: &FeedbackMatrix, config: &SearchConfig) -> Result<SearchResult, SearchError> {
        config.validate_for(matrix)?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.num_threads)
            .thread_name(|i| format!("policy-search-{i}"))
            .build()?;
        Self::run_in_pool(&pool, matrix, config)
    }

    /// Runs the search on a caller-supplied pool.
    ///
    /// Every pool thread becomes a worker; `config.num_threads` is
    /// ignored. Reusing one pool across searches avoids spawning threads
    /// on each call.
    pub fn run_in_pool(
        pool: &ThreadPool,
        matrix: &FeedbackMatrix,
        config: &SearchConfig,
    ) -> Result<SearchResult, SearchError> {
        config.validate_for(matrix)?;

        let total = combination_count(matrix.policies());
        let workers = pool.current_num_threads();

        info!(
            policies = matrix.policies(),
            customers = matrix.customers(),
            combinations = total,
            top_k = config.top_k,
            strategy = ?config.strategy,
            workers,
            "starting exhaustive search"
        );

        let evaluator = ScoreEvaluator::new(config.accumulation);
        let cursor = AtomicU64::new(0);
        let chunk = config.chunk_size as u64;
        let start = Instant::now();

        let (ranking, stats) = match config.strategy {
            MergeStrategy::SharedLock => {
                let shared = SharedTopK::new(config.top_k);
                let stats = pool.broadcast(|ctx| {
                    run_worker(ctx.index(), matrix, &evaluator, &cursor, chunk, total, |r| {
                        shared.try_insert(r);
                    })
                });
                (shared.into_inner(), stats)
            }
            MergeStrategy::LocalMerge => {
                let locals = pool.broadcast(|ctx| {
                    let mut local = TopKList::new(config.top_k);
                    let stats =
                        run_worker(ctx.index(), matrix, &evaluator, &cursor, chunk, total, |r| {
                            local.try_insert(r);
                        });
                    (local, stats)
                });

                let mut global = TopKList::new(config.top_k);
                let mut stats = Vec::with_capacity(locals.len());
                for (local, worker_stats) in locals {
                    global.merge(&local);
                    stats.push(worker_stats);
                }
                (global, stats)
            }
        };

        let elapsed = start.elapsed();
        let evaluated: u64 = stats.iter().map(|s| s.evaluated).sum();
        debug_assert_eq!(evaluated, total);

        info!(
            evaluated,
            elapsed_ms = elapsed.as_millis() as u64,
            "search complete"
        );

        Ok(SearchResult {
            ranking,
            evaluated,
            workers,
            elapsed,
        })
    }
}

/// Claims chunks from `cursor` until `total` is reached, offering each
/// evaluated record to `offer`.
fn run_worker<F: FnMut(ScoreRecord)>(
    worker: usize,
    matrix: &FeedbackMatrix,
    evaluator: &ScoreEvaluator,
    cursor: &AtomicU64,
    chunk: u64,
    total: u64,
    mut offer: F,
) -> WorkerStats {
    let mut scratch = EvalScratch::new(matrix);
    let mut stats = WorkerStats::default();

    loop {
        let begin = cursor.fetch_add(chunk, Ordering::Relaxed);
        if begin >= total {
            break;
        }
        let end = begin.saturating_add(chunk).min(total);
        for index in begin..end {
            offer(evaluator.evaluate_index(matrix, index, &mut scratch));
        }
        stats.evaluated += end - begin;
        stats.chunks += 1;
    }

    debug!(
        worker,
        evaluated = stats.evaluated,
        chunks = stats.chunks,
        "worker finished"
    );
    stats
}
