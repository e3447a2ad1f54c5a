//! Adaptive Replacement Cache (ARC) replacement policy.
//!
//! Balances recency against frequency by splitting the cache into two live
//! lists and remembering recent evictions from each in two ghost lists. A
//! dynamic target `p` for the size of the recency side moves toward whichever
//! ghost list keeps getting hit.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            ArcCache Layout                              │
//! │                                                                         │
//! │   T1: LruCache (seen once)              T2: LruCache (seen again)       │
//! │   ┌─────────────────────────┐           ┌─────────────────────────┐     │
//! │   │ LRU                 MRU │           │ LRU                 MRU │     │
//! │   │ [k3] ◄──► [k7] ◄──► [k9]│           │ [k1] ◄──► [k4] ◄──► [k2]│     │
//! │   └────┬────────────────────┘           └────┬────────────────────┘     │
//! │        │ replace                             │ replace                  │
//! │        ▼                                     ▼                          │
//! │   B1: LruCache (ghosts of T1)           B2: LruCache (ghosts of T2)     │
//! │   ┌─────────────────────────┐           ┌─────────────────────────┐     │
//! │   │ [k5] ◄──► [k6]          │           │ [k8]                    │     │
//! │   └─────────────────────────┘           └─────────────────────────┘     │
//! │                                                                         │
//! │   p: target |T1|, 0 ≤ p ≤ num_pages                                     │
//! │   • set() hit in B1 → p grows   (recency was undervalued)               │
//! │   • set() hit in B2 → p shrinks (frequency was undervalued)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every key lives in at most one of the four lists. `|T1| + |T2|` never
//! exceeds `num_pages`, `|T1| + |B1|` never exceeds `num_pages`, and all four
//! together never exceed `2 * num_pages`.
//!
//! ## Lookup
//!
//! ```text
//!   get(key):
//!     key in T1 → move to T2 MRU, hit
//!     key in T2 → refresh within T2, hit
//!     otherwise → miss (ghost lists are not consulted)
//! ```
//!
//! ## Insert
//!
//! ```text
//!   set(key, value):
//!     oversized              → reject
//!     Case 1: in T1          → move to T2 with new value
//!             in T2          → overwrite in place
//!     Case 2: in B1          → p += δ1; replace; B1 → T2
//!     Case 3: in B2          → p -= δ2; replace; B2 → T2
//!     Case 4: cold
//!       4A |T1|+|B1| == c    → |T1| < c ? (drop B1 LRU; replace) : drop T1 LRU
//!       4B |T1|+|B1| <  c
//!          and total ≥ c     → (total == 2c ? drop B2 LRU) ; replace
//!       then insert into T1
//!
//!   δ1 = 1 if |B1| ≥ |B2| else |B2| / |B1|
//!   δ2 = 1 if |B2| ≥ |B1| else |B1| / |B2|
//! ```
//!
//! ## Replace
//!
//! ```text
//!   if |T1| > 0 and (|T1| > p or (key in B2 and |T1| == p)):
//!     T1 LRU → B1
//!   else:
//!     T2 LRU → B2
//! ```
//!
//! The tie-break on `key in B2` at `|T1| == p` is what lets a B2 ghost hit
//! shrink T1 even once it has reached its target.
//!
//! ## Example Usage
//!
//! ```
//! use pagecache::policy::arc::{ArcCache, Residency};
//! use pagecache::traits::{PageCache, ReadOnlyPageCache};
//!
//! let mut cache = ArcCache::new(128, 8);
//! cache.set("page1", b"content1");
//! assert_eq!(cache.residency("page1"), Some(Residency::T1));
//!
//! // a hit proves reuse and promotes the page
//! assert_eq!(cache.get("page1"), Some(&b"content1"[..]));
//! assert_eq!(cache.residency("page1"), Some(Residency::T2));
//!
//! assert_eq!(cache.len(), 1);
//! assert_eq!(cache.stats().hits, 1);
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe; every method that can change recency takes `&mut self`.
//!
//! ## References
//!
//! - Megiddo & Modha, "ARC: A Self-Tuning, Low Overhead Replacement Cache",
//!   FAST 2003

use std::fmt;

use log::{debug, trace};

use crate::error::{ConfigError, InvariantError};
use crate::policy::lru::LruCache;
use crate::stats::Stats;
use crate::traits::{PageCache, ReadOnlyPageCache};

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::ArcMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::ArcMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{ArcMetricsRecorder, CoreMetricsRecorder, MetricsSnapshotProvider};

/// Which of the four ARC lists a key currently lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Residency {
    /// Cached, seen once since admission.
    T1,
    /// Cached, seen at least twice.
    T2,
    /// Ghost of an entry evicted from T1.
    B1,
    /// Ghost of an entry evicted from T2.
    B2,
}

impl Residency {
    /// `true` for T1/T2, `false` for the ghost lists.
    pub fn is_cached(self) -> bool {
        matches!(self, Residency::T1 | Residency::T2)
    }
}

impl fmt::Display for Residency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Residency::T1 => "T1",
            Residency::T2 => "T2",
            Residency::B1 => "B1",
            Residency::B2 => "B2",
        };
        f.write_str(name)
    }
}

/// Adaptive Replacement Cache over four [`LruCache`] lists.
///
/// Each list is its own `LruCache` built with the same
/// `(total_bytes, num_pages)` geometry, so every list has the same page size
/// and can hold up to `num_pages` keys on its own. Ghost lists keep the value
/// they were evicted with; it is never served, only carried along.
pub struct ArcCache {
    t1: LruCache,
    t2: LruCache,
    b1: LruCache,
    b2: LruCache,

    /// Target size for T1.
    p: usize,
    num_pages: usize,
    bytes_per_page: usize,
    /// Pages occupied across T1 and T2.
    pages_used: usize,

    stats: Stats,
    #[cfg(feature = "metrics")]
    metrics: ArcMetrics,
}

impl ArcCache {
    /// Creates an ARC cache of `num_pages` pages sharing `total_bytes`.
    ///
    /// `p` starts at 0, so the cache initially favours frequency until B1
    /// ghost hits argue otherwise. A zero page count produces a cache that
    /// rejects every entry.
    pub fn new(total_bytes: usize, num_pages: usize) -> Self {
        let t1 = LruCache::new(total_bytes, num_pages);
        let bytes_per_page = t1.page_size();
        Self {
            t1,
            t2: LruCache::new(total_bytes, num_pages),
            b1: LruCache::new(total_bytes, num_pages),
            b2: LruCache::new(total_bytes, num_pages),
            p: 0,
            num_pages,
            bytes_per_page,
            pages_used: 0,
            stats: Stats::new(),
            #[cfg(feature = "metrics")]
            metrics: ArcMetrics::default(),
        }
    }

    /// Like [`new`](Self::new), but rejects a geometry that cannot hold any
    /// entry.
    pub fn try_new(total_bytes: usize, num_pages: usize) -> Result<Self, ConfigError> {
        ConfigError::check_geometry(total_bytes, num_pages)?;
        Ok(Self::new(total_bytes, num_pages))
    }

    pub fn max_pages(&self) -> usize {
        self.num_pages
    }

    pub fn remaining_pages(&self) -> usize {
        self.num_pages.saturating_sub(self.pages_used)
    }

    pub fn page_size(&self) -> usize {
        self.bytes_per_page
    }

    /// Number of cached entries, `|T1| + |T2|`.
    pub fn len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if `key` is cached in T1 or T2. Ghosts do not count.
    pub fn contains(&self, key: &str) -> bool {
        self.t1.contains(key) || self.t2.contains(key)
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Current target size for T1.
    pub fn p_value(&self) -> usize {
        self.p
    }

    pub fn pages_used(&self) -> usize {
        self.pages_used
    }

    pub fn t1_len(&self) -> usize {
        self.t1.len()
    }

    pub fn t2_len(&self) -> usize {
        self.t2.len()
    }

    pub fn b1_len(&self) -> usize {
        self.b1.len()
    }

    pub fn b2_len(&self) -> usize {
        self.b2.len()
    }

    /// Reads a cached value without promoting it or counting a hit.
    pub fn peek(&self, key: &str) -> Option<&[u8]> {
        self.t1.peek(key).or_else(|| self.t2.peek(key))
    }

    /// Reports which list holds `key`, without touching recency or stats.
    pub fn residency(&self, key: &str) -> Option<Residency> {
        if self.t1.contains(key) {
            Some(Residency::T1)
        } else if self.t2.contains(key) {
            Some(Residency::T2)
        } else if self.b1.contains(key) {
            Some(Residency::B1)
        } else if self.b2.contains(key) {
            Some(Residency::B2)
        } else {
            None
        }
    }

    /// Looks up `key` in T1/T2.
    ///
    /// A hit in T1 promotes the entry to T2; a hit in T2 refreshes it there.
    pub fn get(&mut self, key: &str) -> Option<&[u8]> {
        if let Some(value) = self.t1.remove(key) {
            self.t2.insert(key.to_owned(), value);
            self.stats.record_hit();
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_get_hit();
                self.metrics.record_t1_to_t2_promotion();
            }
            trace!("arc promoted {:?} T1 -> T2 on get", key);
            return self.t2.peek(key);
        }
        if self.t2.contains(key) {
            self.stats.record_hit();
            #[cfg(feature = "metrics")]
            self.metrics.record_get_hit();
            return self.t2.get(key);
        }
        self.stats.record_miss();
        #[cfg(feature = "metrics")]
        self.metrics.record_get_miss();
        None
    }

    /// Stores `value` under `key` following the ARC admission rules.
    ///
    /// Returns `false` with no state change if `key.len() + value.len()`
    /// exceeds the page size.
    pub fn set(&mut self, key: &str, value: &[u8]) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();
        if self.num_pages == 0 || key.len() + value.len() > self.bytes_per_page {
            debug!(
                "arc rejected {:?}: {} bytes exceed page size {}",
                key,
                key.len() + value.len(),
                self.bytes_per_page
            );
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_rejected();
            return false;
        }

        // Case 1: already cached.
        if self.t1.contains(key) {
            self.t1.remove(key);
            self.t2.set(key, value);
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_insert_update();
                self.metrics.record_t1_to_t2_promotion();
            }
            trace!("arc promoted {:?} T1 -> T2 on rewrite", key);
            return true;
        }
        if self.t2.contains(key) {
            self.t2.set(key, value);
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return true;
        }

        // Case 2: ghost hit in B1, recency deserves more room.
        if self.b1.contains(key) {
            let delta = if self.b1.len() >= self.b2.len() {
                1
            } else {
                self.b2.len() / self.b1.len()
            };
            self.p = (self.p + delta).min(self.num_pages);
            debug!("arc B1 ghost hit on {:?}: p += {} -> {}", key, delta, self.p);
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_b1_ghost_hit();
                self.metrics.record_p_increase();
            }
            self.replace(key);
            self.b1.remove(key);
            self.admit_t2(key, value);
            return true;
        }

        // Case 3: ghost hit in B2, frequency deserves more room.
        if self.b2.contains(key) {
            let delta = if self.b2.len() >= self.b1.len() {
                1
            } else {
                self.b1.len() / self.b2.len()
            };
            self.p = self.p.saturating_sub(delta);
            debug!("arc B2 ghost hit on {:?}: p -= {} -> {}", key, delta, self.p);
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_b2_ghost_hit();
                self.metrics.record_p_decrease();
            }
            self.replace(key);
            self.b2.remove(key);
            self.admit_t2(key, value);
            return true;
        }

        // Case 4: cold key.
        let recency_side = self.t1.len() + self.b1.len();
        let directory = recency_side + self.t2.len() + self.b2.len();
        if recency_side == self.num_pages {
            if self.t1.len() < self.num_pages {
                self.trim_ghost(Residency::B1);
                self.replace(key);
            } else if let Some((dropped, _)) = self.t1.remove_lru() {
                // T1 alone fills the quota: drop its LRU outright, no ghost.
                self.pages_used -= 1;
                trace!("arc discarded {:?} from full T1", dropped);
                #[cfg(feature = "metrics")]
                self.metrics.record_t1_discard();
            }
        } else if recency_side < self.num_pages && directory >= self.num_pages {
            if directory == 2 * self.num_pages {
                self.trim_ghost(Residency::B2);
            }
            self.replace(key);
        }

        self.t1.set(key, value);
        self.pages_used += 1;
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();
        true
    }

    /// Drops every entry and ghost and resets `p`. Statistics are kept.
    pub fn clear(&mut self) {
        self.t1.clear();
        self.t2.clear();
        self.b1.clear();
        self.b2.clear();
        self.p = 0;
        self.pages_used = 0;
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Demotes one live entry into its ghost list to free a page.
    fn replace(&mut self, key: &str) {
        let t1_len = self.t1.len();
        let from_t1 =
            t1_len > 0 && (t1_len > self.p || (t1_len == self.p && self.b2.contains(key)));

        let (source, ghost) = if from_t1 {
            (&mut self.t1, &mut self.b1)
        } else {
            (&mut self.t2, &mut self.b2)
        };
        let Some((victim, value)) = source.remove_lru() else {
            return;
        };
        trace!(
            "arc replace demoted {:?} to {} (p={}, |T1|={})",
            victim,
            if from_t1 { Residency::B1 } else { Residency::B2 },
            self.p,
            t1_len
        );
        ghost.insert(victim, value);
        self.pages_used -= 1;

        #[cfg(feature = "metrics")]
        if from_t1 {
            self.metrics.record_t1_eviction();
        } else {
            self.metrics.record_t2_eviction();
        }
    }

    fn trim_ghost(&mut self, list: Residency) {
        let ghost = match list {
            Residency::B1 => &mut self.b1,
            Residency::B2 => &mut self.b2,
            Residency::T1 | Residency::T2 => return,
        };
        if let Some((forgotten, _)) = ghost.remove_lru() {
            trace!("arc forgot ghost {:?} from {}", forgotten, list);
            #[cfg(feature = "metrics")]
            self.metrics.record_ghost_trim();
        }
    }

    fn admit_t2(&mut self, key: &str, value: &[u8]) {
        self.t2.set(key, value);
        self.pages_used += 1;
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();
    }

    /// Verifies the list-size bounds, page accounting and disjointness of the
    /// four lists.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        for list in [&self.t1, &self.t2, &self.b1, &self.b2] {
            list.check_invariants()?;
        }

        let (t1, t2, b1, b2) = (self.t1.len(), self.t2.len(), self.b1.len(), self.b2.len());
        let c = self.num_pages;
        if self.pages_used != t1 + t2 {
            return Err(InvariantError::new(format!(
                "pages_used {} != |T1| + |T2| = {}",
                self.pages_used,
                t1 + t2
            )));
        }
        if t1 + t2 > c {
            return Err(InvariantError::new(format!(
                "|T1| + |T2| = {} exceeds {c} pages",
                t1 + t2
            )));
        }
        if t1 + b1 > c {
            return Err(InvariantError::new(format!(
                "|T1| + |B1| = {} exceeds {c} pages",
                t1 + b1
            )));
        }
        if t1 + t2 + b1 + b2 > 2 * c {
            return Err(InvariantError::new(format!(
                "directory holds {} keys, more than 2 * {c}",
                t1 + t2 + b1 + b2
            )));
        }
        if self.p > c {
            return Err(InvariantError::new(format!("p = {} exceeds {c}", self.p)));
        }

        let lists = [
            (Residency::T1, &self.t1),
            (Residency::T2, &self.t2),
            (Residency::B1, &self.b1),
            (Residency::B2, &self.b2),
        ];
        for (i, (name, list)) in lists.iter().enumerate() {
            for key in list.keys() {
                if let Some((other, _)) = lists[i + 1..].iter().find(|(_, o)| o.contains(key)) {
                    return Err(InvariantError::new(format!(
                        "key {key:?} is in both {name} and {other}"
                    )));
                }
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        for list in [&self.t1, &self.t2, &self.b1, &self.b2] {
            list.debug_validate_invariants();
        }
        if let Err(err) = self.check_invariants() {
            panic!("arc invariant violated: {err} ({self:?})");
        }
    }
}

impl fmt::Debug for ArcCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcCache")
            .field("num_pages", &self.num_pages)
            .field("bytes_per_page", &self.bytes_per_page)
            .field("p", &self.p)
            .field("pages_used", &self.pages_used)
            .field("t1_len", &self.t1.len())
            .field("t2_len", &self.t2.len())
            .field("b1_len", &self.b1.len())
            .field("b2_len", &self.b2.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl ReadOnlyPageCache for ArcCache {
    fn max_pages(&self) -> usize {
        self.num_pages
    }

    fn remaining_pages(&self) -> usize {
        ArcCache::remaining_pages(self)
    }

    fn page_size(&self) -> usize {
        self.bytes_per_page
    }

    fn len(&self) -> usize {
        ArcCache::len(self)
    }

    fn contains(&self, key: &str) -> bool {
        ArcCache::contains(self, key)
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }
}

impl PageCache for ArcCache {
    fn get(&mut self, key: &str) -> Option<&[u8]> {
        ArcCache::get(self, key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> bool {
        ArcCache::set(self, key, value)
    }

    fn clear(&mut self) {
        ArcCache::clear(self)
    }
}

#[cfg(feature = "metrics")]
impl ArcCache {
    pub fn metrics_snapshot(&self) -> ArcMetricsSnapshot {
        ArcMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            insert_rejected: self.metrics.insert_rejected,
            evicted_entries: self.metrics.evicted_entries,
            clears: self.metrics.clears,
            t1_to_t2_promotions: self.metrics.t1_to_t2_promotions,
            b1_ghost_hits: self.metrics.b1_ghost_hits,
            b2_ghost_hits: self.metrics.b2_ghost_hits,
            p_increases: self.metrics.p_increases,
            p_decreases: self.metrics.p_decreases,
            t1_evictions: self.metrics.t1_evictions,
            t2_evictions: self.metrics.t2_evictions,
            t1_discards: self.metrics.t1_discards,
            ghost_trims: self.metrics.ghost_trims,
            cache_len: self.len(),
            max_pages: self.num_pages,
            p: self.p,
            t1_len: self.t1.len(),
            t2_len: self.t2.len(),
            b1_len: self.b1.len(),
            b2_len: self.b2.len(),
        }
    }
}

#[cfg(feature = "metrics")]
impl MetricsSnapshotProvider<ArcMetricsSnapshot> for ArcCache {
    fn snapshot(&self) -> ArcMetricsSnapshot {
        self.metrics_snapshot()
    }
}
