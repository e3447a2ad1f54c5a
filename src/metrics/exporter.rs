use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::metrics::snapshot::{ArcMetricsSnapshot, LruMetricsSnapshot};
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the Prometheus text exposition format, suitable for a textfile
/// collector or for printing at the end of a trace replay.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn gauge(&self, suffix: &str, value: usize) {
        self.write_metric("gauge", suffix, value as u64);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<LruMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &LruMetricsSnapshot) {
        self.counter("get_calls_total", snapshot.get_calls);
        self.counter("get_hits_total", snapshot.get_hits);
        self.counter("get_misses_total", snapshot.get_misses);
        self.counter("insert_calls_total", snapshot.insert_calls);
        self.counter("insert_updates_total", snapshot.insert_updates);
        self.counter("insert_new_total", snapshot.insert_new);
        self.counter("insert_rejected_total", snapshot.insert_rejected);
        self.counter("evicted_entries_total", snapshot.evicted_entries);
        self.counter("remove_calls_total", snapshot.remove_calls);
        self.counter("remove_found_total", snapshot.remove_found);
        self.counter("pop_lru_calls_total", snapshot.pop_lru_calls);
        self.counter("pop_lru_found_total", snapshot.pop_lru_found);
        self.gauge("cache_len", snapshot.cache_len);
        self.gauge("max_pages", snapshot.max_pages);
    }
}

impl<W: Write + Send> MetricsExporter<ArcMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &ArcMetricsSnapshot) {
        self.counter("get_calls_total", snapshot.get_calls);
        self.counter("get_hits_total", snapshot.get_hits);
        self.counter("get_misses_total", snapshot.get_misses);
        self.counter("insert_calls_total", snapshot.insert_calls);
        self.counter("insert_updates_total", snapshot.insert_updates);
        self.counter("insert_new_total", snapshot.insert_new);
        self.counter("insert_rejected_total", snapshot.insert_rejected);
        self.counter("evicted_entries_total", snapshot.evicted_entries);
        self.counter("t1_to_t2_promotions_total", snapshot.t1_to_t2_promotions);
        self.counter("b1_ghost_hits_total", snapshot.b1_ghost_hits);
        self.counter("b2_ghost_hits_total", snapshot.b2_ghost_hits);
        self.counter("p_increases_total", snapshot.p_increases);
        self.counter("p_decreases_total", snapshot.p_decreases);
        self.counter("t1_evictions_total", snapshot.t1_evictions);
        self.counter("t2_evictions_total", snapshot.t2_evictions);
        self.counter("t1_discards_total", snapshot.t1_discards);
        self.counter("ghost_trims_total", snapshot.ghost_trims);
        self.gauge("cache_len", snapshot.cache_len);
        self.gauge("max_pages", snapshot.max_pages);
        self.gauge("p", snapshot.p);
        self.gauge("t1_len", snapshot.t1_len);
        self.gauge("t2_len", snapshot.t2_len);
        self.gauge("b1_len", snapshot.b1_len);
        self.gauge("b2_len", snapshot.b2_len);
    }
}
