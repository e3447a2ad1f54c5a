//! Command-line surface of the `pagesim` trace simulator.
//!
//! Lives in the library so the argument parsing and cache construction can be
//! exercised without spawning the binary.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use env_logger::Builder;
use log::LevelFilter;

use crate::builder::{Cache, CacheBuilder, CachePolicy};
use crate::error::ConfigError;

#[derive(Parser, Debug)]
#[command(
    name = "pagesim",
    author,
    version,
    about = "Replay a page trace against an LRU or ARC cache"
)]
pub struct Args {
    /// Replacement policy: lru or arc
    pub policy: CachePolicy,

    /// Trace file, one request per line with the page key in the second field
    pub trace: PathBuf,

    /// Total cache size in bytes
    pub total_bytes: usize,

    /// Number of pages the bytes are split into
    pub num_pages: usize,

    /// Print Prometheus-format counters after the summary
    #[arg(long)]
    pub metrics: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Builds the requested cache, failing on unusable page geometry.
    pub fn build_cache(&self) -> Result<Cache, ConfigError> {
        CacheBuilder::new(self.total_bytes, self.num_pages).try_build(self.policy)
    }
}

/// Installs `env_logger` at `level`; `RUST_LOG` still overrides it.
pub fn init_logger(level: LevelFilter) {
    let mut builder = Builder::new();
    builder.filter_level(level).parse_default_env();
    let _ = builder.try_init();
}
