//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are separate traits so the summary only
//! ever writes counters and never knows how they are consumed.
//!
//! ```text
//!   ┌──────────────────────────────┐     ┌──────────────────────────────┐
//!   │  SummaryMetricsRecorder      │     │  SummaryMetricsReadRecorder  │
//!   │  (&mut self: hit path)       │     │  (&self: get/top/frequent)   │
//!   └──────────────┬───────────────┘     └──────────────┬───────────────┘
//!                  └──────────────┬─────────────────────┘
//!                                 ▼
//!                        ┌──────────────────┐
//!                        │  SummaryMetrics  │
//!                        └────────┬─────────┘
//!                                 │ snapshot()
//!                                 ▼
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │───►│ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters bumped by the mutating side of a summary.
pub trait SummaryMetricsRecorder {
    fn record_hit_call(&mut self);
    fn record_monitored_hit(&mut self);
    fn record_unmonitored_hit(&mut self);
    fn record_placeholder_claim(&mut self);
    fn record_eviction(&mut self);
    fn record_bucket_created(&mut self);
    fn record_bucket_removed(&mut self);
    fn record_clear(&mut self);
}

/// Counters bumped by `&self` queries (interior mutability).
pub trait SummaryMetricsReadRecorder {
    fn record_get_call(&self);
    fn record_get_found(&self);
    fn record_top_call(&self);
    fn record_frequent_call(&self);
    fn record_ledger_scan_step(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
