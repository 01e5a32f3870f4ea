//! Feature-gated observability for the stream summary.
//!
//! Enabled with the `metrics` feature. The summary records into
//! [`SummaryMetrics`](metrics_impl::SummaryMetrics); callers read a
//! [`SummaryMetricsSnapshot`](snapshot::SummaryMetricsSnapshot) and may publish
//! it with [`PrometheusTextExporter`](exporter::PrometheusTextExporter).

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
