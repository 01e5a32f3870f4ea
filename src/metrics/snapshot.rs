/// Point-in-time copy of [`SummaryMetrics`](crate::metrics::metrics_impl::SummaryMetrics)
/// plus structural gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SummaryMetricsSnapshot {
    pub hit_calls: u64,
    pub monitored_hits: u64,
    pub unmonitored_hits: u64,
    pub placeholder_claims: u64, // unmonitored hits that took a never-used slot
    pub evictions: u64,          // unmonitored hits that displaced a key
    pub buckets_created: u64,
    pub buckets_removed: u64,
    pub clear_calls: u64,

    pub get_calls: u64,
    pub get_found: u64,
    pub top_calls: u64,
    pub frequent_calls: u64,
    pub ledger_scan_steps: u64,

    // gauges captured at snapshot time
    pub hits: u64,
    pub monitored: usize,
    pub buckets: usize,
    pub capacity: usize,
}
