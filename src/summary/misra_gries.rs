//! Misra-Gries frequent items.
//!
//! Stores at most `capacity` element/value pairs. When an unstored element
//! arrives and the table is full, every stored value is decremented by one and
//! pairs that reach zero are dropped. The number of such decrement rounds `d`
//! bounds the undercount of every stored value, so a stored value `v` reports
//! `Count { count: v + d, error: d }`.
//!
//! ```text
//!   capacity 2, stream a b a c
//!
//!   a      {a:1}            d = 0
//!   b      {a:1, b:1}       d = 0
//!   a      {a:2, b:1}       d = 0
//!   c      full: decrement  {a:1}   (b dropped, c absorbed)   d = 1
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{ConfigError, capacity_for_error_bound};
use crate::traits::{
    Count, Frequent, HeavyHitters, Top, frequency_threshold, rank_frequent, rank_top,
};

/// Misra-Gries counter table.
#[derive(Debug, Clone)]
pub struct MisraGries<K> {
    capacity: usize,
    counts: FxHashMap<K, u64>,
    decrements: u64,
    hits: u64,
}

impl<K> MisraGries<K>
where
    K: Eq + Hash + Ord + Clone,
{
    /// Creates a table holding at most `capacity` elements.
    ///
    /// With `capacity == 0` every hit is a decrement round.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            counts: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            decrements: 0,
            hits: 0,
        }
    }

    /// Like [`new`](Self::new) but rejects a zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("misra-gries capacity must be > 0"));
        }
        Ok(Self::new(capacity))
    }

    /// Creates a table whose error stays below `epsilon * hits`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] unless `0 < epsilon <= 1`.
    pub fn with_epsilon(epsilon: f64) -> Result<Self, ConfigError> {
        Ok(Self::new(capacity_for_error_bound(epsilon)?))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn contains(&self, element: &K) -> bool {
        self.counts.contains_key(element)
    }

    /// Number of decrement rounds so far; also the error of every estimate.
    pub fn decrements(&self) -> u64 {
        self.decrements
    }

    pub fn clear(&mut self) {
        self.counts.clear();
        self.decrements = 0;
        self.hits = 0;
    }

    /// Stored elements with their estimates, descending count, ties by
    /// ascending element.
    pub fn iter_ranked(&self) -> impl Iterator<Item = (&K, Count)> {
        let d = self.decrements;
        let mut ranked: Vec<_> = self.counts.iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        ranked
            .into_iter()
            .map(move |(key, &value)| (key, Count::new(value + d, d)))
    }
}

impl<K> HeavyHitters<K> for MisraGries<K>
where
    K: Eq + Hash + Ord + Clone,
{
    fn hit(&mut self, element: K) -> Count {
        self.hits += 1;
        let d = self.decrements;

        if let Some(value) = self.counts.get_mut(&element) {
            *value += 1;
            return Count::new(*value + d, d);
        }
        if self.counts.len() < self.capacity {
            self.counts.insert(element, 1);
            return Count::new(1 + d, d);
        }

        self.counts.retain(|_, value| {
            *value -= 1;
            *value > 0
        });
        self.decrements += 1;
        Count::new(self.decrements, self.decrements)
    }

    fn hits(&self) -> u64 {
        self.hits
    }

    fn get(&self, element: &K) -> Option<Count> {
        let value = self.counts.get(element)?;
        Some(Count::new(value + self.decrements, self.decrements))
    }

    fn frequent(&self, phi: f64) -> Frequent<K> {
        rank_frequent(self.iter_ranked(), frequency_threshold(phi, self.hits))
    }

    fn top(&self, k: usize) -> Top<K> {
        rank_top(self.iter_ranked(), k)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: stored estimates cover the true frequency; dropped
        /// elements never exceed the decrement count
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_estimates_bound_truth(
            capacity in 1usize..6,
            stream in prop::collection::vec(0u8..12, 0..200)
        ) {
            let mut mg = MisraGries::new(capacity);
            let mut truth = std::collections::HashMap::new();
            for element in stream {
                mg.hit(element);
                *truth.entry(element).or_insert(0u64) += 1;
            }

            prop_assert!(mg.len() <= capacity);
            prop_assert!(mg.decrements() * (capacity as u64 + 1) <= mg.hits());
            for (element, &frequency) in &truth {
                match mg.get(element) {
                    Some(estimate) => prop_assert!(estimate.covers(frequency)),
                    None => prop_assert!(frequency <= mg.decrements()),
                }
            }
        }
    }
}
