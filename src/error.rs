//! Error types for the pagecache library.
//!
//! None of the cache operations fail: misses, rejected entries and evictions
//! from an empty store are all reported through `Option`/`bool` returns. The
//! types here cover the edges around the caches.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned by fallible constructors when the page geometry
//!   is unusable (zero pages, or a budget too small for a single byte per page).
//! - [`InvariantError`]: Returned by `check_invariants` when internal
//!   bookkeeping has drifted.
//! - [`TraceError`]: Returned by [`replay`](crate::trace::replay) when a trace
//!   cannot be read or contains a malformed line.
//!
//! ## Example Usage
//!
//! ```
//! use pagecache::error::ConfigError;
//! use pagecache::policy::arc::ArcCache;
//!
//! let cache: Result<ArcCache, ConfigError> = ArcCache::try_new(128, 8);
//! assert!(cache.is_ok());
//!
//! let bad = ArcCache::try_new(128, 0);
//! assert!(bad.is_err());
//! ```

use std::fmt;
use std::io;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when the `(total_bytes, num_pages)` geometry is invalid.
///
/// # Example
///
/// ```
/// use pagecache::policy::lru::LruCache;
///
/// let err = LruCache::try_new(4, 8).unwrap_err();
/// assert!(err.to_string().contains("page size"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }

    /// Validates a cache geometry and returns the derived page size.
    pub(crate) fn check_geometry(total_bytes: usize, num_pages: usize) -> Result<usize, Self> {
        if num_pages == 0 {
            return Err(Self::new("num_pages must be > 0"));
        }
        let page_size = total_bytes / num_pages;
        if page_size == 0 {
            return Err(Self::new(format!(
                "page size is zero: {total_bytes} bytes cannot be split into {num_pages} pages"
            )));
        }
        Ok(page_size)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// TraceError
// ---------------------------------------------------------------------------

/// Error returned while replaying a workload trace.
#[derive(Debug)]
pub enum TraceError {
    /// The underlying reader failed.
    Io(io::Error),
    /// A non-blank line did not carry a key in its second field.
    MalformedLine { line: usize, content: String },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::Io(err) => write!(f, "failed to read trace: {err}"),
            TraceError::MalformedLine { line, content } => {
                write!(f, "malformed trace line {line}: {content:?}")
            },
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TraceError::Io(err) => Some(err),
            TraceError::MalformedLine { .. } => None,
        }
    }
}

impl From<io::Error> for TraceError {
    fn from(err: io::Error) -> Self {
        TraceError::Io(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
