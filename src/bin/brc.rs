use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use brc_stats::{ProcessOptions, Source, TracingObserver, UnparsablePolicy, process_partitioned};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "brc")]
#[command(about = "Computes per-station min/mean/max over a measurements file")]
struct Args {
    /// File of `station;reading` lines
    #[arg(short, long)]
    file: PathBuf,

    /// What to do with readings outside the exact decimal fast path: abort, fallback or skip
    #[arg(long, default_value_t = UnparsablePolicy::Abort)]
    on_unparsable: UnparsablePolicy,

    /// Number of line-aligned regions to scan and merge
    #[arg(long, default_value_t = 1)]
    partitions: usize,

    /// Pre-sizes the station map
    #[arg(long, default_value_t = 10_000)]
    expected_stations: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("brc=info,brc_stats=info")),
        )
        .init();

    let args = Args::parse();
    info!(?args, "started");
    let start = Instant::now();

    let source = Source::open(&args.file)?;
    let options = ProcessOptions::default()
        .with_policy(args.on_unparsable)
        .with_expected_stations(args.expected_stations);

    let report = process_partitioned(&source, args.partitions, &options, &TracingObserver)
        .with_context(|| format!("processing {} failed", args.file.display()))?;

    info!(
        stations = report.stations.len(),
        records = report.summary.records,
        elapsed = ?start.elapsed(),
        "finished"
    );

    Ok(())
}
