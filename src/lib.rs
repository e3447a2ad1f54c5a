//! pagecache: page-budgeted LRU and ARC caches for replacement-policy
//! experiments.
//!
//! A cache is sized by `(total_bytes, num_pages)`. Every entry takes exactly
//! one page and must fit in `total_bytes / num_pages` bytes counting its key.
//! [`LruCache`] evicts by recency alone; [`ArcCache`] adapts between recency
//! and frequency using ghost lists of recently evicted keys.
//!
//! ```
//! use pagecache::prelude::*;
//!
//! let mut cache = CacheBuilder::new(128, 8).build(CachePolicy::Arc);
//! cache.set("key1", b"value1");
//! assert_eq!(cache.get("key1"), Some(&b"value1"[..]));
//! assert_eq!(cache.stats().hits, 1);
//! ```

pub mod builder;
#[cfg(feature = "cli")]
pub mod cli;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod stats;
pub mod trace;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;

pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::policy::arc::{ArcCache, Residency};
pub use crate::policy::lru::LruCache;
pub use crate::stats::Stats;
