//! Policy Combination Search
//!
//! Generates synthetic customer feedback for a set of policies, evaluates
//! every combination of policies in parallel, and prints the best-received
//! combinations.
//!
//! Usage:
//!   cargo run --release --features cli --bin policy_search -- --policies 16 --customers 50000 --top-k 10

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use u_policysearch::evaluate::{Accumulation, ScoreRecord};
use u_policysearch::feedback::{FeedbackConfig, FeedbackGenerator, SentimentProfile};
use u_policysearch::search::{MergeStrategy, SearchConfig, SearchRunner};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// One mutex-guarded ranking shared by all workers
    Shared,
    /// Per-worker rankings merged after the search
    Merge,
}

impl From<StrategyArg> for MergeStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Shared => MergeStrategy::SharedLock,
            StrategyArg::Merge => MergeStrategy::LocalMerge,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "policy_search")]
#[command(about = "Exhaustive search for the best-received combination of policies")]
struct Args {
    /// Number of policies (the search covers 2^policies combinations)
    #[arg(long, default_value = "16")]
    policies: usize,

    /// Number of customers giving feedback
    #[arg(long, default_value = "50000")]
    customers: usize,

    /// Number of combinations to report
    #[arg(long, default_value = "10")]
    top_k: usize,

    /// Worker threads (0 = one per core)
    #[arg(long, default_value = "0")]
    threads: usize,

    /// Indices claimed by a worker at a time
    #[arg(long, default_value = "16")]
    chunk_size: usize,

    /// How workers share the ranking
    #[arg(long, value_enum, default_value = "merge")]
    strategy: StrategyArg,

    /// Random seed for the synthetic feedback (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Probability that an odd-indexed policy is badly received
    #[arg(long, default_value = "0.25")]
    negative_probability: f64,

    /// Draw every policy's feedback from the neutral range
    #[arg(long)]
    uniform: bool,

    /// Divide once after summing instead of per term
    #[arg(long)]
    sum_then_divide: bool,

    /// Also list the selected policy indices for each combination
    #[arg(long)]
    show_policies: bool,
}

fn format_record(record: &ScoreRecord, show_policies: bool) -> String {
    let id = record
        .combination
        .map_or_else(|| "-1".to_string(), |c| c.to_string());
    let mut line = format!(
        "Combination: {id} -- Average: {:.2} -- Standard Deviation: {:.2}",
        record.mean, record.std_dev
    );
    if show_policies {
        if let Some(c) = record.combination {
            let policies: Vec<String> = c.policies().map(|j| j.to_string()).collect();
            line.push_str(&format!(" -- Policies: [{}]", policies.join(", ")));
        }
    }
    line
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::level_filters::LevelFilter::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let profile = if args.uniform {
        SentimentProfile::Uniform
    } else {
        SentimentProfile::Mixed {
            negative_probability: args.negative_probability,
        }
    };
    let mut feedback_config = FeedbackConfig::default()
        .with_policies(args.policies)
        .with_customers(args.customers)
        .with_profile(profile);
    if let Some(seed) = args.seed {
        feedback_config = feedback_config.with_seed(seed);
    }

    let accumulation = if args.sum_then_divide {
        Accumulation::SumThenDivide
    } else {
        Accumulation::PerTerm
    };
    let search_config = SearchConfig::default()
        .with_top_k(args.top_k)
        .with_num_threads(args.threads)
        .with_chunk_size(args.chunk_size)
        .with_strategy(args.strategy.into())
        .with_accumulation(accumulation);
    search_config
        .validate()
        .context("invalid search configuration")?;

    info!(
        policies = args.policies,
        customers = args.customers,
        "generating feedback"
    );
    let matrix =
        FeedbackGenerator::generate(&feedback_config).context("failed to generate feedback")?;

    let result = SearchRunner::run(&matrix, &search_config).context("search failed")?;

    println!("Time taken : {:.2}", result.elapsed.as_secs_f64());
    println!("Top {} Results:", result.ranking.capacity());
    for record in result.ranking.records() {
        println!("{}", format_record(record, args.show_policies));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_policysearch::combination::Combination;

    #[test]
    fn test_format_record() {
        let r = ScoreRecord::new(Combination(5), 20.0, 8.16496);
        assert_eq!(
            format_record(&r, false),
            "Combination: 5 -- Average: 20.00 -- Standard Deviation: 8.16"
        );
        assert!(format_record(&r, true).ends_with("-- Policies: [0, 2]"));
    }

    #[test]
    fn test_format_sentinel() {
        let line = format_record(&ScoreRecord::sentinel(), true);
        assert_eq!(
            line,
            "Combination: -1 -- Average: -101.00 -- Standard Deviation: -101.00"
        );
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "policy_search",
            "--policies",
            "4",
            "--strategy",
            "shared",
            "--seed",
            "9",
        ]);
        assert_eq!(args.policies, 4);
        assert!(matches!(args.strategy, StrategyArg::Shared));
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.top_k, 10);
    }
}
