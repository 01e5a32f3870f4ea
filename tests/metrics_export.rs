// ==============================================
// METRICS EXPORT TESTS (integration)
// ==============================================

#![cfg(feature = "metrics")]

use hitkit::metrics::exporter::PrometheusTextExporter;
use hitkit::metrics::traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider};
use hitkit::summary::StreamSummary;
use hitkit::traits::HeavyHitters;

#[test]
fn snapshot_reflects_placeholder_claims_and_evictions() {
    let mut summary = StreamSummary::new(2);
    summary.hit_all([1u32, 2, 3]);
    summary.frequent(0.5);

    let snapshot = summary.snapshot();
    assert_eq!(snapshot.hit_calls, 3);
    assert_eq!(snapshot.unmonitored_hits, 3);
    assert_eq!(snapshot.placeholder_claims, 2);
    assert_eq!(snapshot.evictions, 1);
    assert_eq!(snapshot.frequent_calls, 1);
    assert_eq!(snapshot.hits, 3);
    assert_eq!(snapshot.monitored, 2);
    assert_eq!(snapshot.buckets, 2);
}

#[test]
fn exported_text_carries_gauges() {
    let mut summary = StreamSummary::new(4);
    summary.hit_all(["a", "b", "a"]);

    let exporter = PrometheusTextExporter::new("stream", Vec::new());
    exporter.export(&summary.snapshot());
    let text = String::from_utf8(exporter.into_inner()).unwrap();

    assert!(text.contains("stream_hit_calls_total 3\n"));
    assert!(text.contains("stream_monitored_hits_total 1\n"));
    assert!(text.contains("stream_monitored 2\n"));
    assert!(text.contains("stream_capacity 4\n"));
}

#[test]
fn reset_keeps_gauges() {
    let mut summary = StreamSummary::new(4);
    summary.hit_all([7u8, 7, 9]);
    summary.reset_metrics();

    let snapshot = summary.snapshot();
    assert_eq!(snapshot.hit_calls, 0);
    assert_eq!(snapshot.hits, 3);
    assert_eq!(snapshot.monitored, 2);
}
