use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::metrics::snapshot::SummaryMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for summary metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// directly or forwarded to an OpenTelemetry collector.
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

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_sample(&self, kind: &str, name: &str, value: u64) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, name: &str, value: u64) {
        self.write_sample("counter", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        self.write_sample("gauge", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<SummaryMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &SummaryMetricsSnapshot) {
        self.write_counter(&self.metric_name("hit_calls_total"), snapshot.hit_calls);
        self.write_counter(
            &self.metric_name("monitored_hits_total"),
            snapshot.monitored_hits,
        );
        self.write_counter(
            &self.metric_name("unmonitored_hits_total"),
            snapshot.unmonitored_hits,
        );
        self.write_counter(
            &self.metric_name("placeholder_claims_total"),
            snapshot.placeholder_claims,
        );
        self.write_counter(&self.metric_name("evictions_total"), snapshot.evictions);
        self.write_counter(
            &self.metric_name("buckets_created_total"),
            snapshot.buckets_created,
        );
        self.write_counter(
            &self.metric_name("buckets_removed_total"),
            snapshot.buckets_removed,
        );
        self.write_counter(&self.metric_name("clear_calls_total"), snapshot.clear_calls);
        self.write_counter(&self.metric_name("get_calls_total"), snapshot.get_calls);
        self.write_counter(&self.metric_name("get_found_total"), snapshot.get_found);
        self.write_counter(&self.metric_name("top_calls_total"), snapshot.top_calls);
        self.write_counter(
            &self.metric_name("frequent_calls_total"),
            snapshot.frequent_calls,
        );
        self.write_counter(
            &self.metric_name("ledger_scan_steps_total"),
            snapshot.ledger_scan_steps,
        );
        self.write_gauge(&self.metric_name("hits"), snapshot.hits);
        self.write_gauge(&self.metric_name("monitored"), snapshot.monitored as u64);
        self.write_gauge(&self.metric_name("buckets"), snapshot.buckets as u64);
        self.write_gauge(&self.metric_name("capacity"), snapshot.capacity as u64);
    }
}
