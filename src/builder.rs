//! Unified cache builder for both replacement policies.
//!
//! Lets trace drivers pick a policy at runtime while still talking to a single
//! concrete type.
//!
//! ## Example
//!
//! ```rust
//! use pagecache::builder::{CacheBuilder, CachePolicy};
//!
//! let mut cache = CacheBuilder::new(128, 8).build(CachePolicy::Lru);
//! assert!(cache.set("key1", b"hello"));
//! assert_eq!(cache.get("key1"), Some(&b"hello"[..]));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::policy::arc::ArcCache;
use crate::policy::lru::LruCache;
use crate::stats::Stats;
use crate::traits::{PageCache, ReadOnlyPageCache};

/// Available replacement policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// Adaptive Replacement Cache.
    Arc,
}

impl CachePolicy {
    pub fn name(self) -> &'static str {
        match self {
            CachePolicy::Lru => "lru",
            CachePolicy::Arc => "arc",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(CachePolicy::Lru),
            "arc" => Ok(CachePolicy::Arc),
            other => Err(ConfigError::new(format!(
                "unknown policy {other:?}, expected \"lru\" or \"arc\""
            ))),
        }
    }
}

/// Cache wrapper that exposes one API regardless of policy.
#[derive(Debug)]
pub struct Cache {
    inner: CacheInner,
}

#[derive(Debug)]
enum CacheInner {
    Lru(LruCache),
    Arc(ArcCache),
}

impl Cache {
    /// Look up `key`, updating recency and hit/miss counts.
    pub fn get(&mut self, key: &str) -> Option<&[u8]> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.get(key),
            CacheInner::Arc(arc) => arc.get(key),
        }
    }

    /// Store `value` under `key`. Returns `false` if the entry does not fit
    /// in a page.
    pub fn set(&mut self, key: &str, value: &[u8]) -> bool {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.set(key, value),
            CacheInner::Arc(arc) => arc.set(key, value),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::Arc(arc) => arc.contains(key),
        }
    }

    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::Arc(arc) => arc.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_pages(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.max_pages(),
            CacheInner::Arc(arc) => arc.max_pages(),
        }
    }

    pub fn remaining_pages(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.remaining_pages(),
            CacheInner::Arc(arc) => arc.remaining_pages(),
        }
    }

    pub fn page_size(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.page_size(),
            CacheInner::Arc(arc) => arc.page_size(),
        }
    }

    pub fn stats(&self) -> &Stats {
        match &self.inner {
            CacheInner::Lru(lru) => lru.stats(),
            CacheInner::Arc(arc) => arc.stats(),
        }
    }

    /// Drop all entries. Statistics are kept.
    pub fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::Arc(arc) => arc.clear(),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Arc(_) => CachePolicy::Arc,
        }
    }

    /// The underlying LRU store, if this cache was built with
    /// [`CachePolicy::Lru`].
    pub fn as_lru(&self) -> Option<&LruCache> {
        match &self.inner {
            CacheInner::Lru(lru) => Some(lru),
            CacheInner::Arc(_) => None,
        }
    }

    /// The underlying ARC cache, if this cache was built with
    /// [`CachePolicy::Arc`].
    pub fn as_arc(&self) -> Option<&ArcCache> {
        match &self.inner {
            CacheInner::Arc(arc) => Some(arc),
            CacheInner::Lru(_) => None,
        }
    }
}

impl ReadOnlyPageCache for Cache {
    fn max_pages(&self) -> usize {
        Cache::max_pages(self)
    }

    fn remaining_pages(&self) -> usize {
        Cache::remaining_pages(self)
    }

    fn page_size(&self) -> usize {
        Cache::page_size(self)
    }

    fn len(&self) -> usize {
        Cache::len(self)
    }

    fn contains(&self, key: &str) -> bool {
        Cache::contains(self, key)
    }

    fn stats(&self) -> &Stats {
        Cache::stats(self)
    }
}

impl PageCache for Cache {
    fn get(&mut self, key: &str) -> Option<&[u8]> {
        Cache::get(self, key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> bool {
        Cache::set(self, key, value)
    }

    fn clear(&mut self) {
        Cache::clear(self)
    }
}

impl From<LruCache> for Cache {
    fn from(lru: LruCache) -> Self {
        Cache {
            inner: CacheInner::Lru(lru),
        }
    }
}

impl From<ArcCache> for Cache {
    fn from(arc: ArcCache) -> Self {
        Cache {
            inner: CacheInner::Arc(arc),
        }
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    total_bytes: usize,
    num_pages: usize,
}

impl CacheBuilder {
    /// Create a builder for `num_pages` pages sharing `total_bytes`.
    pub fn new(total_bytes: usize, num_pages: usize) -> Self {
        Self {
            total_bytes,
            num_pages,
        }
    }

    /// Build a cache with the specified policy.
    ///
    /// An unusable geometry yields a cache that rejects every entry; see
    /// [`try_build`](Self::try_build).
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagecache::builder::{CacheBuilder, CachePolicy};
    ///
    /// let lru = CacheBuilder::new(128, 8).build(CachePolicy::Lru);
    /// let arc = CacheBuilder::new(128, 8).build(CachePolicy::Arc);
    /// assert_eq!(lru.page_size(), arc.page_size());
    /// ```
    pub fn build(self, policy: CachePolicy) -> Cache {
        match policy {
            CachePolicy::Lru => LruCache::new(self.total_bytes, self.num_pages).into(),
            CachePolicy::Arc => ArcCache::new(self.total_bytes, self.num_pages).into(),
        }
    }

    /// Like [`build`](Self::build), but fails on zero pages or a zero page
    /// size.
    pub fn try_build(self, policy: CachePolicy) -> Result<Cache, ConfigError> {
        ConfigError::check_geometry(self.total_bytes, self.num_pages)?;
        Ok(self.build(policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_policies_basic_ops() {
        for policy in [CachePolicy::Lru, CachePolicy::Arc] {
            let mut cache = CacheBuilder::new(128, 8).build(policy);
            assert_eq!(cache.policy(), policy);

            assert!(cache.set("one", b"1"));
            assert!(cache.set("two", b"2"));

            assert_eq!(cache.get("one"), Some(&b"1"[..]));
            assert_eq!(cache.get("two"), Some(&b"2"[..]));
            assert_eq!(cache.get("three"), None);

            assert!(cache.contains("one"));
            assert!(!cache.contains("ninety-nine"));
            assert_eq!(cache.len(), 2);
            assert_eq!(cache.remaining_pages(), 6);

            assert!(cache.set("one", b"ONE"));
            assert_eq!(cache.get("one"), Some(&b"ONE"[..]));
            assert!(!cache.set("big", &[0u8; 64]));

            cache.clear();
            assert!(cache.is_empty());
            assert_eq!(cache.stats().hits, 3);
            assert_eq!(cache.stats().misses, 1);
        }
    }

    #[test]
    fn test_capacity_enforcement() {
        let mut cache = CacheBuilder::new(32, 2).build(CachePolicy::Lru);
        cache.set("a", b"1");
        cache.set("b", b"2");
        cache.set("c", b"3");

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_try_build_validates_geometry() {
        assert!(CacheBuilder::new(128, 0).try_build(CachePolicy::Arc).is_err());
        assert!(CacheBuilder::new(4, 8).try_build(CachePolicy::Lru).is_err());
        let cache = CacheBuilder::new(128, 8).try_build(CachePolicy::Arc).unwrap();
        assert!(cache.as_arc().is_some());
        assert!(cache.as_lru().is_none());
    }

    #[test]
    fn test_policy_parses_case_insensitively() {
        assert_eq!("lru".parse::<CachePolicy>(), Ok(CachePolicy::Lru));
        assert_eq!("ARC".parse::<CachePolicy>(), Ok(CachePolicy::Arc));
        assert!("fifo".parse::<CachePolicy>().is_err());
        assert_eq!(CachePolicy::Arc.to_string(), "arc");
    }
}
