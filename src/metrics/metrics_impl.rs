use crate::metrics::traits::{ArcMetricsRecorder, CoreMetricsRecorder, LruMetricsRecorder};

// ---------------------------------------------------------------------------
// LruMetrics
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct LruMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub insert_rejected: u64,
    pub evicted_entries: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub clears: u64,
}

impl CoreMetricsRecorder for LruMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_insert_rejected(&mut self) {
        self.insert_rejected += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl LruMetricsRecorder for LruMetrics {
    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }

    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }
}

// ---------------------------------------------------------------------------
// ArcMetrics
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct ArcMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub insert_rejected: u64,
    pub evicted_entries: u64,
    pub clears: u64,
    pub t1_to_t2_promotions: u64,
    pub b1_ghost_hits: u64,
    pub b2_ghost_hits: u64,
    pub p_increases: u64,
    pub p_decreases: u64,
    pub t1_evictions: u64,
    pub t2_evictions: u64,
    pub t1_discards: u64,
    pub ghost_trims: u64,
}

impl CoreMetricsRecorder for ArcMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_insert_rejected(&mut self) {
        self.insert_rejected += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl ArcMetricsRecorder for ArcMetrics {
    fn record_t1_to_t2_promotion(&mut self) {
        self.t1_to_t2_promotions += 1;
    }

    fn record_b1_ghost_hit(&mut self) {
        self.b1_ghost_hits += 1;
    }

    fn record_b2_ghost_hit(&mut self) {
        self.b2_ghost_hits += 1;
    }

    fn record_p_increase(&mut self) {
        self.p_increases += 1;
    }

    fn record_p_decrease(&mut self) {
        self.p_decreases += 1;
    }

    fn record_t1_eviction(&mut self) {
        self.t1_evictions += 1;
        self.evicted_entries += 1;
    }

    fn record_t2_eviction(&mut self) {
        self.t2_evictions += 1;
        self.evicted_entries += 1;
    }

    fn record_t1_discard(&mut self) {
        self.t1_discards += 1;
        self.evicted_entries += 1;
    }

    fn record_ghost_trim(&mut self) {
        self.ghost_trims += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_get_counters_track_calls() {
        let mut m = LruMetrics::default();
        m.record_get_hit();
        m.record_get_miss();
        m.record_get_miss();
        assert_eq!(m.get_calls, 3);
        assert_eq!(m.get_hits, 1);
        assert_eq!(m.get_misses, 2);
    }

    #[test]
    fn arc_evictions_roll_up() {
        let mut m = ArcMetrics::default();
        m.record_t1_eviction();
        m.record_t2_eviction();
        m.record_t1_discard();
        m.record_ghost_trim();
        assert_eq!(m.evicted_entries, 3);
        assert_eq!(m.ghost_trims, 1);
    }
}
