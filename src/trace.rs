//! Workload trace replay.
//!
//! A trace is a text file with one request per line. Fields are separated by
//! whitespace and the second field is the page key; other fields are ignored.
//! Each request is a demand read: `get(key)`, and on a miss `set(key, key)`,
//! so the cached value is the key's own bytes.
//!
//! ```text
//!   0  page-17  R
//!   1  page-04  R
//!   2  page-17  W      ← hit
//! ```
//!
//! ## Example
//!
//! ```
//! use pagecache::policy::lru::LruCache;
//! use pagecache::trace::replay;
//!
//! let trace = "0 a\n1 b\n\n2 a\n";
//! let mut cache = LruCache::new(128, 8);
//! let report = replay(&mut cache, trace.as_bytes()).unwrap();
//! assert_eq!(report.lines, 3);
//! assert_eq!(report.stats.hits, 1);
//! assert_eq!(report.stats.misses, 2);
//! ```

use std::fmt;
use std::io::BufRead;

use log::{debug, trace};

use crate::error::TraceError;
use crate::stats::Stats;
use crate::traits::PageCache;

/// Outcome of replaying one trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Hits and misses produced by this replay alone.
    pub stats: Stats,
    /// Requests replayed. Blank lines are not counted.
    pub lines: usize,
    /// Misses whose follow-up `set` was rejected as too large for a page.
    pub rejected: usize,
}

impl ReplayReport {
    /// `hits / (hits + misses)`, or 0.0 for an empty trace.
    pub fn ratio(&self) -> f64 {
        self.stats.hit_ratio()
    }
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hits: {}", self.stats.hits)?;
        writeln!(f, "Misses: {}", self.stats.misses)?;
        write!(f, "Ratio: {}", self.ratio())
    }
}

/// Replays every request in `reader` against `cache`.
///
/// Stops at the first malformed line (a non-blank line without a second
/// field) or read error. Requests before the failure have already been
/// applied to the cache.
pub fn replay<C, R>(cache: &mut C, reader: R) -> Result<ReplayReport, TraceError>
where
    C: PageCache + ?Sized,
    R: BufRead,
{
    let before = *cache.stats();
    let mut report = ReplayReport::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let mut fields = line.split_whitespace();
        if fields.next().is_none() {
            continue;
        }
        let Some(key) = fields.next() else {
            return Err(TraceError::MalformedLine {
                line: idx + 1,
                content: line,
            });
        };

        report.lines += 1;
        if cache.get(key).is_none() && !cache.set(key, key.as_bytes()) {
            trace!("trace line {}: {:?} does not fit a page", idx + 1, key);
            report.rejected += 1;
        }
    }

    let after = *cache.stats();
    report.stats = Stats {
        hits: after.hits - before.hits,
        misses: after.misses - before.misses,
    };
    debug!(
        "replayed {} requests: {} ({} rejected)",
        report.lines, report.stats, report.rejected
    );
    Ok(report)
}
