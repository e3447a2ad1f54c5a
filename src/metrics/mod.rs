//! Optional counters for cache internals (feature `metrics`).
//!
//! Every cache keeps its [`Stats`](crate::Stats) regardless of features; the
//! counters here break that down further (updates, rejections, ghost hits,
//! adaptation steps) for benchmarking and monitoring.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
