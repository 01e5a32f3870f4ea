//! Exact frequency counter.
//!
//! Keeps one map entry per distinct element, so memory grows with the
//! cardinality of the stream. Used as a baseline for benchmarks and as the
//! oracle the approximate summaries are checked against.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::traits::{Count, Frequent, HeavyHitters, Top, frequency_threshold};

/// Hash map of element to exact count.
///
/// # Example
///
/// ```
/// use hitkit::summary::ExactCounter;
/// use hitkit::traits::{Count, HeavyHitters};
///
/// let mut counter = ExactCounter::new();
/// counter.hit_all([3, 1, 3]);
///
/// assert_eq!(counter.get(&3), Some(Count { count: 2, error: 0 }));
/// // unseen elements are known to have frequency zero
/// assert_eq!(counter.get(&9), Some(Count::default()));
/// ```
#[derive(Debug, Clone)]
pub struct ExactCounter<K> {
    counts: FxHashMap<K, u64>,
    hits: u64,
}

impl<K> ExactCounter<K>
where
    K: Eq + Hash + Ord + Clone,
{
    pub fn new() -> Self {
        Self {
            counts: FxHashMap::default(),
            hits: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            hits: 0,
        }
    }

    /// Number of distinct elements seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Exact frequency of `element`.
    pub fn frequency(&self, element: &K) -> u64 {
        self.counts.get(element).copied().unwrap_or(0)
    }

    /// Elements sorted by descending count, ties by ascending element.
    pub fn ranked(&self) -> Vec<(&K, u64)> {
        let mut ranked: Vec<_> = self.counts.iter().map(|(k, &c)| (k, c)).collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    pub fn clear(&mut self) {
        self.counts.clear();
        self.hits = 0;
    }
}

impl<K> Default for ExactCounter<K>
where
    K: Eq + Hash + Ord + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> HeavyHitters<K> for ExactCounter<K>
where
    K: Eq + Hash + Ord + Clone,
{
    fn hit(&mut self, element: K) -> Count {
        self.hits += 1;
        let count = self.counts.entry(element).or_insert(0);
        *count += 1;
        Count::new(*count, 0)
    }

    fn hits(&self) -> u64 {
        self.hits
    }

    fn get(&self, element: &K) -> Option<Count> {
        Some(Count::new(self.frequency(element), 0))
    }

    fn frequent(&self, phi: f64) -> Frequent<K> {
        let threshold = frequency_threshold(phi, self.hits);
        let elements = self
            .ranked()
            .into_iter()
            .take_while(|&(_, count)| count > threshold)
            .map(|(key, _)| key.clone())
            .collect();
        Frequent {
            elements,
            guaranteed: true,
        }
    }

    fn top(&self, k: usize) -> Top<K> {
        let elements = self
            .ranked()
            .into_iter()
            .take(k)
            .map(|(key, _)| key.clone())
            .collect();
        Top {
            elements,
            order: true,
            guaranteed: true,
        }
    }
}
