// ==============================================
// STREAM SUMMARY CONCURRENCY TESTS (integration)
// ==============================================
//
// Several producers feeding one locked summary must leave it in the same
// state as a serial feed of the same multiset, as far as counts go.

#![cfg(feature = "concurrency")]

use std::sync::{Arc, Barrier};
use std::thread;

use hitkit::summary::ConcurrentStreamSummary;
use hitkit::traits::Count;

// ==============================================
// No Lost Hits
// ==============================================

mod lost_hits {
    use super::*;

    #[test]
    fn producers_racing_on_shared_keys_lose_nothing() {
        let threads = 8;
        let per_thread = 2_000u64;
        let summary = Arc::new(ConcurrentStreamSummary::new(4));
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let summary = summary.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..per_thread {
                        summary.hit(i % 4);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let total = threads as u64 * per_thread;
        assert_eq!(summary.hits(), total);
        for key in 0..4 {
            assert_eq!(summary.get(&key), Some(Count::new(total / 4, 0)));
        }
        summary.with_summary(|inner| assert!(inner.check_invariants().is_ok()));
    }

    #[test]
    fn batches_and_queries_interleave_safely() {
        let summary = Arc::new(ConcurrentStreamSummary::new(16));
        let barrier = Arc::new(Barrier::new(3));

        let writer = |offset: u32| {
            let summary = summary.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for round in 0..200u32 {
                    summary.hit_all((0..10).map(|i| (i + offset + round) % 40));
                }
            })
        };
        let a = writer(0);
        let b = writer(7);

        let reader = {
            let summary = summary.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..200 {
                    let top = summary.top(5);
                    assert!(top.len() <= 5);
                    let frequent = summary.frequent(0.05);
                    assert!(frequent.len() <= 16);
                }
            })
        };

        a.join().unwrap();
        b.join().unwrap();
        reader.join().unwrap();

        assert_eq!(summary.hits(), 2 * 200 * 10);
        let inner = Arc::try_unwrap(summary)
            .ok()
            .map(ConcurrentStreamSummary::into_inner)
            .unwrap();
        assert!(inner.check_invariants().is_ok());
        assert_eq!(inner.len(), 16);
    }
}
