use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{SummaryMetricsReadRecorder, SummaryMetricsRecorder};

/// Counters kept by a [`StreamSummary`](crate::summary::StreamSummary).
#[derive(Debug, Default, Clone)]
pub struct SummaryMetrics {
    pub hit_calls: u64,
    pub monitored_hits: u64,
    pub unmonitored_hits: u64,
    pub placeholder_claims: u64,
    pub evictions: u64,
    pub buckets_created: u64,
    pub buckets_removed: u64,
    pub clear_calls: u64,
    pub get_calls: MetricsCell,
    pub get_found: MetricsCell,
    pub top_calls: MetricsCell,
    pub frequent_calls: MetricsCell,
    pub ledger_scan_steps: MetricsCell,
}

impl SummaryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SummaryMetricsRecorder for SummaryMetrics {
    fn record_hit_call(&mut self) {
        self.hit_calls += 1;
    }

    fn record_monitored_hit(&mut self) {
        self.monitored_hits += 1;
    }

    fn record_unmonitored_hit(&mut self) {
        self.unmonitored_hits += 1;
    }

    fn record_placeholder_claim(&mut self) {
        self.placeholder_claims += 1;
    }

    fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    fn record_bucket_created(&mut self) {
        self.buckets_created += 1;
    }

    fn record_bucket_removed(&mut self) {
        self.buckets_removed += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl SummaryMetricsReadRecorder for &SummaryMetrics {
    fn record_get_call(&self) {
        self.get_calls.incr();
    }

    fn record_get_found(&self) {
        self.get_found.incr();
    }

    fn record_top_call(&self) {
        self.top_calls.incr();
    }

    fn record_frequent_call(&self) {
        self.frequent_calls.incr();
    }

    fn record_ledger_scan_step(&self) {
        self.ledger_scan_steps.incr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorders_bump_their_counters() {
        let mut metrics = SummaryMetrics::new();
        metrics.record_hit_call();
        metrics.record_hit_call();
        metrics.record_unmonitored_hit();
        metrics.record_eviction();
        (&metrics).record_get_call();
        (&metrics).record_ledger_scan_step();

        assert_eq!(metrics.hit_calls, 2);
        assert_eq!(metrics.unmonitored_hits, 1);
        assert_eq!(metrics.evictions, 1);
        assert_eq!(metrics.get_calls.get(), 1);
        assert_eq!(metrics.ledger_scan_steps.get(), 1);

        metrics.reset();
        assert_eq!(metrics.hit_calls, 0);
        assert_eq!(metrics.get_calls.get(), 0);
    }
}
