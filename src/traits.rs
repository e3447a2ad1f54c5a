//! # Page Cache Trait Hierarchy
//!
//! The capability set every cache in this crate exposes to its callers. Trace
//! drivers, the [`builder`](crate::builder) wrapper and the property tests are
//! written against these traits rather than a concrete policy.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │        ReadOnlyPageCache                │
//!   │                                         │
//!   │  max_pages(&) → usize                   │
//!   │  remaining_pages(&) → usize             │
//!   │  page_size(&) → usize                   │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  contains(&, &str) → bool               │
//!   │  stats(&) → &Stats                      │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │            PageCache                    │
//!   │                                         │
//!   │  get(&mut, &str) → Option<&[u8]>        │
//!   │  set(&mut, &str, &[u8]) → bool          │
//!   │  clear(&mut)                            │
//!   └─────────────────────────────────────────┘
//!
//!   Implementors: LruCache, ArcCache, builder::Cache
//! ```
//!
//! ## Page Model
//!
//! A cache is built from `(total_bytes, num_pages)`. Each entry occupies one
//! page and must fit in `page_size = total_bytes / num_pages` bytes, counting
//! both key and value. `set` returns `false` for entries that do not fit; it
//! never evicts to make room for them.
//!
//! ## Example Usage
//!
//! ```
//! use pagecache::policy::arc::ArcCache;
//! use pagecache::policy::lru::LruCache;
//! use pagecache::traits::PageCache;
//!
//! fn warm<C: PageCache>(cache: &mut C, keys: &[&str]) {
//!     for key in keys {
//!         if cache.get(key).is_none() {
//!             cache.set(key, key.as_bytes());
//!         }
//!     }
//! }
//!
//! let mut lru = LruCache::new(128, 8);
//! let mut arc = ArcCache::new(128, 8);
//! warm(&mut lru, &["a", "b", "a"]);
//! warm(&mut arc, &["a", "b", "a"]);
//! assert_eq!(lru.stats().hits, 1);
//! assert_eq!(arc.stats().hits, 1);
//! ```
//!
//! ## Thread Safety
//!
//! Implementations are single-threaded. Share one behind a lock
//! (`Mutex<ArcCache>`); `get` mutates recency state, so a read lock is not
//! enough.

use crate::stats::Stats;

/// Read-only view over a page cache.
pub trait ReadOnlyPageCache {
    /// Total number of pages the cache may hold.
    fn max_pages(&self) -> usize;

    /// Pages still unused.
    fn remaining_pages(&self) -> usize {
        self.max_pages().saturating_sub(self.len())
    }

    /// Maximum `key.len() + value.len()` accepted by `set`.
    fn page_size(&self) -> usize;

    /// Number of pages currently in use.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership test. Never changes recency or statistics.
    fn contains(&self, key: &str) -> bool;

    /// Lifetime hit/miss counters.
    fn stats(&self) -> &Stats;

    /// Returns `true` if an entry of this shape would be accepted by `set`.
    fn fits(&self, key: &str, value: &[u8]) -> bool {
        key.len() + value.len() <= self.page_size()
    }
}

/// Full page cache contract.
pub trait PageCache: ReadOnlyPageCache {
    /// Looks up `key`, counting a hit or a miss.
    fn get(&mut self, key: &str) -> Option<&[u8]>;

    /// Stores `value` under `key`, evicting per policy when full.
    ///
    /// Returns `false` without touching any state when the entry does not
    /// fit in a page.
    fn set(&mut self, key: &str, value: &[u8]) -> bool;

    /// Drops every entry. Statistics are preserved.
    fn clear(&mut self);
}
