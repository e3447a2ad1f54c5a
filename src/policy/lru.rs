//! Least Recently Used (LRU) page store.
//!
//! A fixed number of equally sized pages, one entry per page. When every page
//! is taken, inserting a new key evicts the least recently used entry. This is
//! both a cache in its own right and the building block [`ArcCache`] composes
//! four times.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                           LruCache Layout                            │
//! │                                                                      │
//! │   map: FxHashMap<String, SlotId>     list: RecencyList<Entry>        │
//! │   ┌──────────┬──────────┐            ┌────────┬──────────────────┐   │
//! │   │  "key1"  │  id_0    │──────────► │ id_0   │ key1, value      │   │
//! │   │  "key2"  │  id_1    │──────────► │ id_1   │ key2, value      │   │
//! │   │  "key3"  │  id_2    │──────────► │ id_2   │ key3, value      │   │
//! │   └──────────┴──────────┘            └────────┴──────────────────┘   │
//! │                                                                      │
//! │   front (LRU) ─► [id_0] ◄──► [id_1] ◄──► [id_2] ◄── back (MRU)       │
//! │                    ▲                                                 │
//! │                  evict                                               │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Page Accounting
//!
//! `page_size = total_bytes / max_pages` (floor). An entry fits when
//! `key.len() + value.len() <= page_size`; entries that do not fit are
//! rejected up front and never cause an eviction.
//!
//! ## Operations
//!
//! | Operation    | Time | Notes                                       |
//! |--------------|------|---------------------------------------------|
//! | `get`        | O(1) | Moves hit to MRU, counts hit/miss           |
//! | `peek`       | O(1) | No recency or stats change                  |
//! | `set`        | O(1) | May evict the LRU entry                     |
//! | `remove`     | O(1) | No stats change                             |
//! | `remove_lru` | O(1) | `None` on an empty store                    |
//! | `contains`   | O(1) | No side effects                             |
//!
//! ## Example Usage
//!
//! ```
//! use pagecache::policy::lru::LruCache;
//! use pagecache::traits::{PageCache, ReadOnlyPageCache};
//!
//! // 128 bytes split into 8 pages of 16 bytes
//! let mut cache = LruCache::new(128, 8);
//! for i in 1..=8 {
//!     let key = format!("key{i}");
//!     assert!(cache.set(&key, key.as_bytes()));
//! }
//! assert_eq!(cache.len(), 8);
//!
//! // a ninth key pushes out the least recently used one
//! cache.set("key9", b"key9");
//! assert!(!cache.contains("key1"));
//! assert_eq!(cache.get("key9"), Some(&b"key9"[..]));
//!
//! // 17 bytes do not fit in a 16-byte page
//! assert!(!cache.set("key10", b"0123456789ab"));
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe; wrap in a lock for shared use.
//!
//! [`ArcCache`]: crate::policy::arc::ArcCache

use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::ds::{RecencyList, SlotId};
use crate::error::{ConfigError, InvariantError};
use crate::stats::Stats;
use crate::traits::{PageCache, ReadOnlyPageCache};

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, LruMetricsRecorder, MetricsSnapshotProvider};

#[derive(Debug)]
struct Entry {
    key: String,
    value: Vec<u8>,
}

/// Fixed-capacity, page-counted LRU store.
///
/// Keys are strings and values are byte buffers; each entry occupies exactly
/// one page regardless of its size, as long as it fits.
#[derive(Debug)]
pub struct LruCache {
    map: FxHashMap<String, SlotId>,
    list: RecencyList<Entry>,
    max_pages: usize,
    page_size: usize,
    stats: Stats,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl LruCache {
    /// Creates a store of `num_pages` pages sharing `total_bytes`.
    ///
    /// A zero page count produces a store that rejects every entry; use
    /// [`try_new`](Self::try_new) to surface that as an error instead.
    pub fn new(total_bytes: usize, num_pages: usize) -> Self {
        let page_size = total_bytes.checked_div(num_pages).unwrap_or(0);
        Self {
            map: FxHashMap::with_capacity_and_hasher(num_pages, Default::default()),
            list: RecencyList::with_capacity(num_pages),
            max_pages: num_pages,
            page_size,
            stats: Stats::new(),
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Like [`new`](Self::new), but rejects a geometry that cannot hold any
    /// entry.
    ///
    /// ```
    /// use pagecache::policy::lru::LruCache;
    ///
    /// assert!(LruCache::try_new(128, 8).is_ok());
    /// assert!(LruCache::try_new(128, 0).is_err());
    /// ```
    pub fn try_new(total_bytes: usize, num_pages: usize) -> Result<Self, ConfigError> {
        ConfigError::check_geometry(total_bytes, num_pages)?;
        Ok(Self::new(total_bytes, num_pages))
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn remaining_pages(&self) -> usize {
        self.max_pages.saturating_sub(self.len())
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages in use (one per distinct key).
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get(&mut self, key: &str) -> Option<&[u8]> {
        let Some(&id) = self.map.get(key) else {
            self.stats.record_miss();
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };
        self.list.touch(id);
        self.stats.record_hit();
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.list.get(id).map(|entry| entry.value.as_slice())
    }

    /// Returns the value for `key` without touching recency or statistics.
    pub fn peek(&self, key: &str) -> Option<&[u8]> {
        let &id = self.map.get(key)?;
        self.list.get(id).map(|entry| entry.value.as_slice())
    }

    /// Returns the entry that the next eviction would remove.
    pub fn peek_lru(&self) -> Option<(&str, &[u8])> {
        self.list
            .front()
            .map(|entry| (entry.key.as_str(), entry.value.as_slice()))
    }

    /// Stores `value` under `key`, copying both.
    ///
    /// Returns `false` and leaves the store untouched if the entry does not
    /// fit in a page.
    pub fn set(&mut self, key: &str, value: &[u8]) -> bool {
        if !self.accepts(key.len() + value.len()) {
            return false;
        }
        if let Some(&id) = self.map.get(key) {
            if let Some(entry) = self.list.get_mut(id) {
                entry.value.clear();
                entry.value.extend_from_slice(value);
            }
            self.list.touch(id);
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return true;
        }
        self.insert_new(key.to_owned(), value.to_vec());
        true
    }

    /// Owned variant of [`set`](Self::set); moves `key` and `value` in
    /// without copying.
    pub fn insert(&mut self, key: String, value: Vec<u8>) -> bool {
        if !self.accepts(key.len() + value.len()) {
            return false;
        }
        if let Some(&id) = self.map.get(&key) {
            if let Some(entry) = self.list.get_mut(id) {
                entry.value = value;
            }
            self.list.touch(id);
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return true;
        }
        self.insert_new(key, value);
        true
    }

    /// Deletes `key` if present and returns its value. Statistics are not
    /// affected.
    pub fn remove(&mut self, key: &str) -> Option<Vec<u8>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();
        let id = self.map.remove(key)?;
        let entry = self.list.remove(id)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();
        Some(entry.value)
    }

    /// Evicts and returns the least recently used entry, or `None` if the
    /// store is empty.
    pub fn remove_lru(&mut self) -> Option<(String, Vec<u8>)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();
        let Entry { key, value } = self.list.pop_front()?;
        self.map.remove(&key);
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();
        Some((key, value))
    }

    /// Drops every entry; statistics are kept.
    pub fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Iterates keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|entry| entry.key.as_str())
    }

    fn accepts(&mut self, size: usize) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();
        if self.max_pages == 0 || size > self.page_size {
            debug!(
                "lru rejected entry of {} bytes (page size {}, pages {})",
                size, self.page_size, self.max_pages
            );
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_rejected();
            return false;
        }
        true
    }

    fn insert_new(&mut self, key: String, value: Vec<u8>) {
        if self.len() >= self.max_pages
            && let Some((evicted, _)) = self.remove_lru()
        {
            trace!("lru evicted {:?} to admit {:?}", evicted, key);
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }
        let id = self.list.push_back(Entry {
            key: key.clone(),
            value,
        });
        self.map.insert(key, id);
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();
    }

    /// Verifies map/list agreement and page accounting.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "map holds {} keys but recency list holds {}",
                self.map.len(),
                self.list.len()
            )));
        }
        if self.map.len() > self.max_pages {
            return Err(InvariantError::new(format!(
                "{} pages in use exceeds max_pages {}",
                self.map.len(),
                self.max_pages
            )));
        }
        for (key, &id) in &self.map {
            let Some(entry) = self.list.get(id) else {
                return Err(InvariantError::new(format!(
                    "key {key:?} points at a vacant slot"
                )));
            };
            if entry.key != *key {
                return Err(InvariantError::new(format!(
                    "key {key:?} points at node for {:?}",
                    entry.key
                )));
            }
            if entry.key.len() + entry.value.len() > self.page_size {
                return Err(InvariantError::new(format!(
                    "entry {key:?} is larger than a page"
                )));
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("lru invariant violated: {err}");
        }
    }
}

impl ReadOnlyPageCache for LruCache {
    fn max_pages(&self) -> usize {
        self.max_pages
    }

    fn remaining_pages(&self) -> usize {
        LruCache::remaining_pages(self)
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn contains(&self, key: &str) -> bool {
        LruCache::contains(self, key)
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }
}

impl PageCache for LruCache {
    fn get(&mut self, key: &str) -> Option<&[u8]> {
        LruCache::get(self, key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> bool {
        LruCache::set(self, key, value)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

#[cfg(feature = "metrics")]
impl LruCache {
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            insert_rejected: self.metrics.insert_rejected,
            evicted_entries: self.metrics.evicted_entries,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            clears: self.metrics.clears,
            cache_len: self.len(),
            max_pages: self.max_pages,
        }
    }
}

#[cfg(feature = "metrics")]
impl MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache {
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}
