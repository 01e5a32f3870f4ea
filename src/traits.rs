//! # Heavy Hitter Query Contract
//!
//! Every frequency counter in this crate answers the same five questions about
//! the stream it has consumed. [`HeavyHitters`] is that contract; the Space-Saving
//! [`StreamSummary`](crate::summary::StreamSummary), the
//! [`MisraGries`](crate::summary::MisraGries) table and the
//! [`ExactCounter`](crate::summary::ExactCounter) oracle all implement it, so
//! callers and tests can swap one for another.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌───────────────────────────────────────────┐
//!                  │            HeavyHitters<K>                │
//!                  │                                           │
//!                  │  hit(&mut, K) → Count                     │
//!                  │  hits(&) → u64                            │
//!                  │  get(&, &K) → Option<Count>               │
//!                  │  frequent(&, phi) → Frequent<K>           │
//!                  │  top(&, k) → Top<K>                       │
//!                  │  hit_all(&mut, iter) → u64                │
//!                  └─────────────────────┬─────────────────────┘
//!                                        │
//!          ┌─────────────────────────────┼─────────────────────────────┐
//!          ▼                             ▼                             ▼
//!   ┌──────────────────┐       ┌──────────────────┐       ┌──────────────────┐
//!   │  StreamSummary   │       │   MisraGries     │       │  ExactCounter    │
//!   │  (Space-Saving)  │       │  (decrement-all) │       │  (hash map)      │
//!   │  count ≥ true    │       │  count ≥ true    │       │  count = true    │
//!   └──────────────────┘       └──────────────────┘       └──────────────────┘
//! ```
//!
//! ## Reading a [`Count`]
//!
//! `count` is an upper bound on the true frequency and `count - error` a lower
//! bound. The exact counter always reports `error == 0`.
//!
//! ## Certificates
//!
//! [`Frequent::guaranteed`] and [`Top::guaranteed`] say whether the answer is
//! provably correct given the per-element error bounds, not merely plausible.
//! [`Top::order`] says whether the ranking inside the answer survives the worst
//! case error. The exact counter reports `true` for all three.

/// Estimated frequency of one element.
///
/// `count` never underestimates the true frequency; `count - error` never
/// overestimates it.
///
/// # Example
///
/// ```
/// use hitkit::traits::Count;
///
/// let c = Count { count: 10, error: 3 };
/// assert_eq!(c.lower_bound(), 7);
/// assert_eq!(c.upper_bound(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Count {
    /// Observed count (upper bound on the true frequency).
    pub count: u64,
    /// Maximum overestimation included in `count`.
    pub error: u64,
}

impl Count {
    #[inline]
    pub fn new(count: u64, error: u64) -> Self {
        Self { count, error }
    }

    /// Guaranteed minimum frequency, `count - error`.
    #[inline]
    pub fn lower_bound(&self) -> u64 {
        self.count.saturating_sub(self.error)
    }

    /// Maximum possible frequency, `count`.
    #[inline]
    pub fn upper_bound(&self) -> u64 {
        self.count
    }

    /// Returns `true` if `frequency` lies within `[lower_bound, upper_bound]`.
    #[inline]
    pub fn covers(&self, frequency: u64) -> bool {
        self.lower_bound() <= frequency && frequency <= self.count
    }
}

/// Result of a top-k query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Top<K> {
    /// Elements in descending count order.
    pub elements: Vec<K>,
    /// `true` if the lower bounds of `elements` are non-increasing.
    pub order: bool,
    /// `true` if no excluded element can outrank the weakest included one.
    pub guaranteed: bool,
}

impl<K> Top<K> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<K> Default for Top<K> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            order: true,
            guaranteed: false,
        }
    }
}

/// Result of a frequent-elements query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frequent<K> {
    /// Elements above the threshold, descending count order.
    pub elements: Vec<K>,
    /// `true` if every element's lower bound reaches the threshold.
    pub guaranteed: bool,
}

impl<K> Frequent<K> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<K> Default for Frequent<K> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            guaranteed: true,
        }
    }
}

/// Frequency estimation over a stream of `K`.
///
/// # Example
///
/// ```
/// use hitkit::summary::{ExactCounter, StreamSummary};
/// use hitkit::traits::HeavyHitters;
///
/// fn busiest<H: HeavyHitters<&'static str>>(counter: &mut H) -> Vec<&'static str> {
///     counter.hit_all(["a", "b", "a", "c", "a", "b"]);
///     counter.top(2).elements
/// }
///
/// assert_eq!(busiest(&mut StreamSummary::new(8)), vec!["a", "b"]);
/// assert_eq!(busiest(&mut ExactCounter::new()), vec!["a", "b"]);
/// ```
pub trait HeavyHitters<K> {
    /// Records one occurrence of `element` and returns its updated estimate.
    fn hit(&mut self, element: K) -> Count;

    /// Total number of `hit` calls since construction.
    fn hits(&self) -> u64;

    /// Current estimate for `element`, or `None` if it is not tracked.
    fn get(&self, element: &K) -> Option<Count>;

    /// Elements whose count exceeds `ceil(phi * hits)`.
    ///
    /// `phi` is not validated; values `<= 0` use a threshold of zero.
    fn frequent(&self, phi: f64) -> Frequent<K>;

    /// Up to `k` elements with the highest counts.
    fn top(&self, k: usize) -> Top<K>;

    /// Records every element of `elements`, returning the new `hits()`.
    fn hit_all<I>(&mut self, elements: I) -> u64
    where
        I: IntoIterator<Item = K>,
        Self: Sized,
    {
        for element in elements {
            self.hit(element);
        }
        self.hits()
    }
}

/// Marker for counters that can be shared across threads.
///
/// Implemented by [`ConcurrentStreamSummary`](crate::summary::ConcurrentStreamSummary)
/// when the `concurrency` feature is enabled.
pub trait ConcurrentHeavyHitters: Send + Sync {}

/// Frequency threshold for `frequent(phi)`: `ceil(phi * hits)`, clamped to `u64`.
#[inline]
pub(crate) fn frequency_threshold(phi: f64, hits: u64) -> u64 {
    // `as` saturates and maps NaN to zero
    (phi * hits as f64).ceil() as u64
}

/// Builds a top-k answer from `(element, estimate)` pairs in descending
/// count order, excluding zero counts.
///
/// `guaranteed` is decided by the first pair past the `k` collected ones; if
/// the input runs out first it stays `false`.
pub(crate) fn rank_top<'a, K, I>(ranked: I, k: usize) -> Top<K>
where
    K: Clone + 'a,
    I: IntoIterator<Item = (&'a K, Count)>,
{
    let mut elements = Vec::with_capacity(k.min(64));
    let mut order = true;
    let mut guaranteed = false;
    let mut min_lower = u64::MAX;
    let mut previous_lower = u64::MAX;

    for (key, estimate) in ranked {
        if elements.len() == k {
            guaranteed = estimate.count <= min_lower;
            break;
        }
        let lower = estimate.lower_bound();
        if lower > previous_lower {
            order = false;
        }
        previous_lower = lower;
        min_lower = min_lower.min(lower);
        elements.push(key.clone());
    }

    Top {
        elements,
        order,
        guaranteed,
    }
}

/// Builds a frequent-elements answer from `(element, estimate)` pairs in
/// descending count order; the walk ends at the first count `<= threshold`.
pub(crate) fn rank_frequent<'a, K, I>(ranked: I, threshold: u64) -> Frequent<K>
where
    K: Clone + 'a,
    I: IntoIterator<Item = (&'a K, Count)>,
{
    let mut elements = Vec::new();
    let mut guaranteed = true;
    for (key, estimate) in ranked {
        if estimate.count <= threshold {
            break;
        }
        guaranteed &= estimate.lower_bound() >= threshold;
        elements.push(key.clone());
    }
    Frequent {
        elements,
        guaranteed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(pairs: &[(u32, u64, u64)]) -> Vec<(u32, Count)> {
        pairs
            .iter()
            .map(|&(k, count, error)| (k, Count::new(count, error)))
            .collect()
    }

    #[test]
    fn count_bounds() {
        let c = Count::new(5, 2);
        assert_eq!(c.lower_bound(), 3);
        assert!(c.covers(3));
        assert!(c.covers(5));
        assert!(!c.covers(2));
        assert!(!c.covers(6));
        assert_eq!(Count::default(), Count::new(0, 0));
    }

    #[test]
    fn threshold_is_ceiling_and_saturates() {
        assert_eq!(frequency_threshold(0.1, 12), 2);
        assert_eq!(frequency_threshold(0.5, 10), 5);
        assert_eq!(frequency_threshold(0.0, 10), 0);
        assert_eq!(frequency_threshold(-1.0, 10), 0);
        assert_eq!(frequency_threshold(f64::NAN, 10), 0);
        assert_eq!(frequency_threshold(f64::INFINITY, 10), u64::MAX);
    }

    #[test]
    fn rank_top_checks_the_next_candidate() {
        let pairs = ranked(&[(1, 10, 0), (2, 8, 1), (3, 6, 0)]);
        let top = rank_top(pairs.iter().map(|(k, c)| (k, *c)), 2);
        assert_eq!(top.elements, vec![1, 2]);
        assert!(top.order);
        assert!(top.guaranteed);

        let pairs = ranked(&[(1, 10, 0), (2, 8, 1), (3, 8, 0)]);
        let top = rank_top(pairs.iter().map(|(k, c)| (k, *c)), 2);
        assert!(!top.guaranteed);
    }

    #[test]
    fn rank_top_short_input_is_not_guaranteed() {
        let pairs = ranked(&[(1, 3, 0)]);
        let top = rank_top(pairs.iter().map(|(k, c)| (k, *c)), 2);
        assert_eq!(top.elements, vec![1]);
        assert!(top.order);
        assert!(!top.guaranteed);
    }

    #[test]
    fn rank_top_detects_order_inversion() {
        // equal counts but the second has the larger lower bound
        let pairs = ranked(&[(1, 5, 3), (2, 5, 0)]);
        let top = rank_top(pairs.iter().map(|(k, c)| (k, *c)), 2);
        assert_eq!(top.elements, vec![1, 2]);
        assert!(!top.order);
    }

    #[test]
    fn rank_frequent_stops_at_threshold() {
        let pairs = ranked(&[(1, 10, 0), (2, 4, 3), (3, 3, 0), (4, 2, 0)]);
        let frequent = rank_frequent(pairs.iter().map(|(k, c)| (k, *c)), 3);
        assert_eq!(frequent.elements, vec![1, 2]);
        assert!(!frequent.guaranteed);

        let frequent = rank_frequent(pairs.iter().map(|(k, c)| (k, *c)), 10);
        assert!(frequent.is_empty());
        assert!(frequent.guaranteed);
    }
}
