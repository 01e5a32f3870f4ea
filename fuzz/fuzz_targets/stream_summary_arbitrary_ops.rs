#![no_main]

use std::collections::HashMap;

use hitkit::summary::StreamSummary;
use hitkit::traits::HeavyHitters;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary hit/query sequences on a StreamSummary
//
// The first byte picks the capacity; the rest are (op, element) pairs. True
// frequencies are tracked alongside so every estimate can be checked against
// its bounds.
fuzz_target!(|data: &[u8]| {
    let Some((&capacity, ops)) = data.split_first() else {
        return;
    };

    let mut summary: StreamSummary<u8> = StreamSummary::new(capacity as usize % 17);
    let mut truth: HashMap<u8, u64> = HashMap::new();

    for pair in ops.chunks_exact(2) {
        let op = pair[0] % 5;
        let element = pair[1] % 32;

        match op {
            0 | 1 => {
                let estimate = summary.hit(element);
                let frequency = truth.entry(element).or_insert(0);
                *frequency += 1;
                assert!(estimate.covers(*frequency));
            },
            2 => {
                if let Some(estimate) = summary.get(&element) {
                    assert!(estimate.covers(truth.get(&element).copied().unwrap_or(0)));
                } else {
                    assert!(truth.get(&element).copied().unwrap_or(0) <= summary.min_count());
                }
            },
            3 => {
                let top = summary.top(element as usize % 8);
                assert!(top.len() <= summary.len());
            },
            4 => {
                let phi = f64::from(element) / 32.0;
                let frequent = summary.frequent(phi);
                if frequent.guaranteed {
                    let threshold = (phi * summary.hits() as f64).ceil() as u64;
                    for key in &frequent.elements {
                        assert!(truth[key] >= threshold);
                    }
                }
            },
            _ => unreachable!(),
        }

        assert_eq!(summary.hits(), truth.values().sum::<u64>());
        summary.debug_validate_invariants();
    }
});
