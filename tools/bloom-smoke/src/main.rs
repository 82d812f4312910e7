//! Bloom-Smoke: end-to-end check of the salted Bloom filter
//!
//! Builds a filter (10,000 elements at 1% by default), inserts the integers
//! `start..start + count`, queries them again and prints every one reported
//! missing. A correct filter prints nothing and exits 0.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use salted_bloom::{BloomFilter, FilterConfig, FilterConfigBuilder};

/// Bloom-Smoke: insert an integer range and report false negatives
#[derive(Parser, Debug)]
#[command(name = "bloom-smoke")]
#[command(about = "Insert an integer range into a Bloom filter and report misses")]
struct Args {
    /// Number of elements the filter is sized for
    #[arg(short, long, default_value = "10000")]
    expected: usize,

    /// Target false positive rate
    #[arg(short, long, default_value = "0.01")]
    fpr: f64,

    /// First integer to insert
    #[arg(short, long, default_value = "10000")]
    start: i64,

    /// How many consecutive integers to insert
    #[arg(short, long, default_value = "10000")]
    count: u32,

    /// JSON filter configuration; overrides --expected and --fpr
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also query this many never-inserted integers and report the observed FPR
    #[arg(long, default_value = "0")]
    probe: u32,
}

/// Outcome of one smoke run
#[derive(Debug)]
struct SmokeReport {
    /// Inserted integers the filter did not find
    missing: Vec<i64>,
    /// Never-inserted integers the filter claimed to contain
    false_positives: u32,
    /// Estimated FPR after the insertions
    estimated_fpr: f64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing()?;

    let config = load_config(&args)?;
    let mut filter = BloomFilter::from_config(&config).context("invalid filter configuration")?;
    info!(
        size_bits = filter.bit_array_size(),
        hash_count = filter.hash_count(),
        expected_count = filter.expected_count(),
        "Filter ready"
    );

    let report = run_smoke(&mut filter, args.start, args.count, args.probe)?;

    for value in &report.missing {
        println!("{}", value);
    }

    info!(
        inserted = filter.actual_count(),
        bits_set = filter.bits_set(),
        estimated_fpr = report.estimated_fpr,
        "Smoke run complete"
    );
    if args.probe > 0 {
        info!(
            probed = args.probe,
            false_positives = report.false_positives,
            observed_fpr = f64::from(report.false_positives) / f64::from(args.probe),
            "Probe results"
        );
    }

    if !report.missing.is_empty() {
        bail!("{} inserted elements reported missing", report.missing.len());
    }
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

fn load_config(args: &Args) -> anyhow::Result<FilterConfig> {
    if let Some(path) = &args.config {
        debug!(path = %path.display(), "Loading filter config");
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        return FilterConfig::from_json(&json)
            .with_context(|| format!("invalid config {}", path.display()));
    }

    FilterConfigBuilder::new()
        .expected_count(args.expected)
        .false_positive_rate(args.fpr)
        .build()
        .context("invalid --expected/--fpr")
}

/// Insert `start..start + count`, re-query it, then probe the integers right after it
fn run_smoke(
    filter: &mut BloomFilter,
    start: i64,
    count: u32,
    probe: u32,
) -> anyhow::Result<SmokeReport> {
    let Some(end) = start.checked_add(i64::from(count)) else {
        bail!("--start {start} plus --count {count} overflows i64");
    };
    let Some(probe_end) = end.checked_add(i64::from(probe)) else {
        bail!("probe range {end} plus --probe {probe} overflows i64");
    };

    filter.add_all(start..end);

    let missing = (start..end).filter(|value| !filter.contains(value)).collect();
    let false_positives = (end..probe_end)
        .filter(|value| filter.contains(value))
        .count() as u32;

    Ok(SmokeReport {
        missing,
        false_positives,
        estimated_fpr: filter.estimated_false_positive_probability(),
    })
}
