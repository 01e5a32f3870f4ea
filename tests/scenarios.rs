// ==============================================
// STREAM SUMMARY SCENARIOS (integration)
// ==============================================
//
// End-to-end streams with hand-checked expectations, exercised through the
// public API only.

use hitkit::builder::{Algorithm, HitterBuilder};
use hitkit::summary::StreamSummary;
use hitkit::traits::{Count, HeavyHitters};

const MIXED_STREAM: [i64; 11] = [12, 199997, 30000, 3, 8, 5, 10, 9, 2, 3, 5];

// ==============================================
// Exact Regime With One Eviction
// ==============================================

mod mixed_stream {
    use super::*;

    fn summary() -> StreamSummary<i64> {
        let mut summary = StreamSummary::new(8);
        summary.hit_all(MIXED_STREAM);
        summary
    }

    #[test]
    fn extra_hit_reports_exact_count() {
        let mut summary = summary();
        assert_eq!(summary.hit(5), Count { count: 3, error: 0 });
        assert_eq!(summary.hits(), 12);
    }

    #[test]
    fn evicted_and_inherited_elements() {
        let mut summary = summary();
        summary.hit(5);

        // nine distinct elements for eight slots: 9 was the newest minimum
        assert_eq!(summary.get(&9), None);
        assert_eq!(summary.get(&2), Some(Count { count: 2, error: 1 }));

        for element in [12, 199997, 30000, 8, 10] {
            assert_eq!(summary.get(&element), Some(Count { count: 1, error: 0 }));
        }
        assert_eq!(summary.get(&3), Some(Count { count: 2, error: 0 }));
        assert_eq!(summary.get(&5), Some(Count { count: 3, error: 0 }));
    }

    #[test]
    fn top_two_is_ordered_but_not_guaranteed() {
        let mut summary = summary();
        summary.hit(5);

        let top = summary.top(2);
        assert_eq!(top.elements, vec![5, 2]);
        assert!(top.order);
        assert!(!top.guaranteed);
    }

    #[test]
    fn frequent_tenth_is_guaranteed() {
        let mut summary = summary();
        summary.hit(5);

        let frequent = summary.frequent(0.1);
        assert_eq!(frequent.elements, vec![5]);
        assert!(frequent.guaranteed);
    }

    #[test]
    fn structure_stays_consistent() {
        let mut summary = summary();
        summary.hit(5);
        assert!(summary.check_invariants().is_ok());
        assert_eq!(summary.len(), 8);
        assert_eq!(summary.min_count(), 1);
    }
}

// ==============================================
// Zero-Valued Elements
// ==============================================

mod zero_value {
    use super::*;

    #[test]
    fn zero_is_counted_like_any_element() {
        let mut summary = StreamSummary::new(4);
        summary.hit_all([0, 1, 0]);

        assert_eq!(summary.get(&0), Some(Count { count: 2, error: 0 }));
        assert_eq!(summary.get(&1), Some(Count { count: 1, error: 0 }));
        assert_eq!(summary.top(2).elements, vec![0, 1]);
    }

    #[test]
    fn zero_arriving_after_saturation_is_tracked() {
        let mut summary = StreamSummary::new(2);
        summary.hit_all([7, 8, 0]);

        assert_eq!(summary.get(&0), Some(Count { count: 2, error: 1 }));
        assert_eq!(summary.get(&8), None);
        assert!(summary.check_invariants().is_ok());
    }
}

// ==============================================
// Degenerate Capacities
// ==============================================

mod degenerate_capacity {
    use super::*;

    #[test]
    fn single_slot_inherits_previous_occupant_count() {
        let mut summary = StreamSummary::new(1);
        assert_eq!(summary.hit('a'), Count { count: 1, error: 0 });
        assert_eq!(summary.hit('a'), Count { count: 2, error: 0 });
        assert_eq!(summary.hit('b'), Count { count: 3, error: 2 });
        assert_eq!(summary.hit('c'), Count { count: 4, error: 3 });
        assert_eq!(summary.hit('c'), Count { count: 5, error: 3 });

        assert_eq!(summary.get(&'a'), None);
        assert_eq!(summary.get(&'b'), None);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.bucket_count(), 1);
        assert!(summary.check_invariants().is_ok());
    }

    #[test]
    fn zero_capacity_answers_from_hit_total() {
        let mut summary = StreamSummary::new(0);
        assert_eq!(summary.hit("x"), Count { count: 1, error: 0 });
        assert_eq!(summary.hit("y"), Count { count: 2, error: 1 });
        assert_eq!(summary.get(&"y"), None);
        assert!(summary.top(1).is_empty());
        assert!(summary.frequent(0.0).is_empty());
        assert_eq!(summary.hits(), 2);
    }

    #[test]
    fn k_beyond_monitored_returns_everything() {
        let mut summary = StreamSummary::new(16);
        summary.hit_all(MIXED_STREAM);

        let top = summary.top(100);
        assert_eq!(top.len(), 9);
        assert_eq!(&top.elements[..2], &[3, 5]);
        assert!(!top.guaranteed);
    }

    #[test]
    fn empty_stream_queries() {
        let summary: StreamSummary<u64> = StreamSummary::new(4);
        assert_eq!(summary.hits(), 0);
        assert_eq!(summary.get(&0), None);
        assert!(summary.top(3).is_empty());
        let frequent = summary.frequent(0.5);
        assert!(frequent.is_empty());
        assert!(frequent.guaranteed);
    }
}

// ==============================================
// Every Algorithm On The Same Stream
// ==============================================

mod algorithms {
    use super::*;

    #[test]
    fn exact_regime_agrees_across_algorithms() {
        for algorithm in Algorithm::ALL {
            let mut hitters = HitterBuilder::new(16).build::<i64>(algorithm);
            hitters.hit_all(MIXED_STREAM);

            assert_eq!(hitters.hits(), 11, "{algorithm}");
            assert_eq!(hitters.get(&5), Some(Count { count: 2, error: 0 }), "{algorithm}");
            assert_eq!(hitters.frequent(0.05).elements, vec![3, 5], "{algorithm}");
        }
    }
}
