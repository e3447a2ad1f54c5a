//! Trace-driven page cache simulator.
//!
//! Run with: cargo run --bin pagesim --features cli -- arc traces/web.txt 4096 64
//! Add `--features cli,metrics` and `--metrics` for Prometheus counters.

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use pagecache::builder::Cache;
use pagecache::cli::{Args, init_logger};
use pagecache::trace::replay;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level());

    let mut cache = args.build_cache().context("invalid cache geometry")?;
    info!(
        "{} cache: {} pages of {} bytes",
        args.policy,
        cache.max_pages(),
        cache.page_size()
    );

    let file = File::open(&args.trace)
        .with_context(|| format!("failed to open trace {}", args.trace.display()))?;
    let report = replay(&mut cache, BufReader::new(file))
        .with_context(|| format!("failed to replay {}", args.trace.display()))?;

    println!("{report}");
    if report.rejected > 0 {
        info!("{} requests did not fit a page", report.rejected);
    }

    if args.metrics {
        print_metrics(&cache)?;
    }
    Ok(())
}

#[cfg(feature = "metrics")]
fn print_metrics(cache: &Cache) -> Result<()> {
    use pagecache::metrics::exporter::PrometheusTextExporter;
    use pagecache::metrics::traits::MetricsExporter;

    let exporter = PrometheusTextExporter::new(
        format!("pagecache_{}", cache.policy()),
        std::io::stdout(),
    );
    if let Some(lru) = cache.as_lru() {
        exporter.export(&lru.metrics_snapshot());
    } else if let Some(arc) = cache.as_arc() {
        exporter.export(&arc.metrics_snapshot());
    }
    Ok(())
}

#[cfg(not(feature = "metrics"))]
fn print_metrics(_cache: &Cache) -> Result<()> {
    anyhow::bail!("--metrics requires building with the `metrics` feature")
}
