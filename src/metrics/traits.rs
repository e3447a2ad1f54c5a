//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and exporting are split into small traits so cache
//! code only ever writes counters.
//!
//! ```text
//!                 ┌─────────────────────────────┐
//!                 │     CoreMetricsRecorder     │
//!                 │  get/insert/reject/evict    │
//!                 └──────────────┬──────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌─────────────┐              ┌─────────────┐
//!          │     Lru     │              │     Arc     │
//!          │  Recorder   │              │  Recorder   │
//!          └─────────────┘              └─────────────┘
//!
//!   Consumption:
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (monitoring)                 │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters shared by every policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    /// Entry did not fit in a page.
    fn record_insert_rejected(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Counters for the plain LRU store.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
}

/// Counters for ARC list transitions and adaptation.
pub trait ArcMetricsRecorder: CoreMetricsRecorder {
    fn record_t1_to_t2_promotion(&mut self);
    fn record_b1_ghost_hit(&mut self);
    fn record_b2_ghost_hit(&mut self);
    fn record_p_increase(&mut self);
    fn record_p_decrease(&mut self);
    /// Replace demoted the LRU of T1 into B1.
    fn record_t1_eviction(&mut self);
    /// Replace demoted the LRU of T2 into B2.
    fn record_t2_eviction(&mut self);
    /// T1 filled the whole quota and its LRU was dropped without a ghost.
    fn record_t1_discard(&mut self);
    /// A ghost list dropped its oldest key to make room.
    fn record_ghost_trim(&mut self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
