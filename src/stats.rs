//! Hit/miss counters shared by every cache in the crate.

use std::fmt;

/// Lifetime hit and miss counts for one cache instance.
///
/// Each cache owns its own `Stats` and hands out a shared reference; callers
/// never mutate it directly.
///
/// # Example
///
/// ```
/// use pagecache::Stats;
///
/// let stats = Stats { hits: 3, misses: 1 };
/// assert_eq!(stats.total(), 4);
/// assert_eq!(stats.hit_ratio(), 0.75);
/// assert_eq!(stats, Stats { hits: 3, misses: 1 });
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stats {
    pub hits: u64,
    pub misses: u64,
}

impl Stats {
    pub const fn new() -> Self {
        Self { hits: 0, misses: 0 }
    }

    /// Number of lookups resolved so far.
    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }

    /// `hits / (hits + misses)`, or `0.0` before the first lookup.
    pub fn hit_ratio(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    #[inline]
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    #[inline]
    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} ratio={:.4}",
            self.hits,
            self.misses,
            self.hit_ratio()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ratio_is_zero() {
        let stats = Stats::new();
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.hit_ratio(), 0.0);
    }

    #[test]
    fn record_updates_counters() {
        let mut stats = Stats::default();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats, Stats { hits: 2, misses: 1 });
        assert!((stats.hit_ratio() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn value_equality() {
        assert_eq!(Stats { hits: 1, misses: 2 }, Stats { hits: 1, misses: 2 });
        assert_ne!(Stats { hits: 1, misses: 2 }, Stats { hits: 2, misses: 1 });
    }

    #[test]
    fn display_reports_ratio() {
        let stats = Stats { hits: 1, misses: 1 };
        assert_eq!(stats.to_string(), "hits=1 misses=1 ratio=0.5000");
    }
}
