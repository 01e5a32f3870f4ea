//! Unified builder for every frequency counter in the crate.
//!
//! Hides which concrete counter is in use behind one [`Hitters`] type, so a
//! caller can pick the algorithm at runtime (for example from a CLI flag).
//!
//! ## Example
//!
//! ```rust
//! use hitkit::builder::{Algorithm, HitterBuilder};
//! use hitkit::traits::HeavyHitters;
//!
//! let mut hitters = HitterBuilder::new(100).build::<u64>(Algorithm::SpaceSaving);
//! hitters.hit_all([1, 2, 1]);
//! assert_eq!(hitters.top(1).elements, vec![1]);
//! ```

use std::fmt;
use std::hash::Hash;

use crate::error::{ConfigError, capacity_for_error_bound};
use crate::summary::exact::ExactCounter;
use crate::summary::misra_gries::MisraGries;
use crate::summary::space_saving::StreamSummary;
use crate::traits::{Count, Frequent, HeavyHitters, Top};

/// Available counting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Space-Saving over a stream summary.
    SpaceSaving,
    /// Misra-Gries decrement-all table.
    MisraGries,
    /// Exact hash map counting, unbounded memory.
    Exact,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::SpaceSaving,
        Algorithm::MisraGries,
        Algorithm::Exact,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::SpaceSaving => "space-saving",
            Algorithm::MisraGries => "misra-gries",
            Algorithm::Exact => "exact",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Counter wrapper with a consistent API regardless of algorithm.
#[derive(Debug, Clone)]
pub struct Hitters<K> {
    inner: HittersInner<K>,
}

#[derive(Debug, Clone)]
enum HittersInner<K> {
    SpaceSaving(StreamSummary<K>),
    MisraGries(MisraGries<K>),
    Exact(ExactCounter<K>),
}

impl<K> Hitters<K>
where
    K: Eq + Hash + Ord + Clone,
{
    pub fn algorithm(&self) -> Algorithm {
        match &self.inner {
            HittersInner::SpaceSaving(_) => Algorithm::SpaceSaving,
            HittersInner::MisraGries(_) => Algorithm::MisraGries,
            HittersInner::Exact(_) => Algorithm::Exact,
        }
    }

    /// Maximum number of tracked elements; `None` for the exact counter.
    pub fn capacity(&self) -> Option<usize> {
        match &self.inner {
            HittersInner::SpaceSaving(summary) => Some(summary.capacity()),
            HittersInner::MisraGries(mg) => Some(mg.capacity()),
            HittersInner::Exact(_) => None,
        }
    }

    /// Number of tracked elements.
    pub fn len(&self) -> usize {
        match &self.inner {
            HittersInner::SpaceSaving(summary) => summary.len(),
            HittersInner::MisraGries(mg) => mg.len(),
            HittersInner::Exact(exact) => exact.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        match &mut self.inner {
            HittersInner::SpaceSaving(summary) => summary.clear(),
            HittersInner::MisraGries(mg) => mg.clear(),
            HittersInner::Exact(exact) => exact.clear(),
        }
    }
}

impl<K> HeavyHitters<K> for Hitters<K>
where
    K: Eq + Hash + Ord + Clone,
{
    fn hit(&mut self, element: K) -> Count {
        match &mut self.inner {
            HittersInner::SpaceSaving(summary) => summary.hit(element),
            HittersInner::MisraGries(mg) => mg.hit(element),
            HittersInner::Exact(exact) => exact.hit(element),
        }
    }

    fn hits(&self) -> u64 {
        match &self.inner {
            HittersInner::SpaceSaving(summary) => summary.hits(),
            HittersInner::MisraGries(mg) => mg.hits(),
            HittersInner::Exact(exact) => exact.hits(),
        }
    }

    fn get(&self, element: &K) -> Option<Count> {
        match &self.inner {
            HittersInner::SpaceSaving(summary) => summary.get(element),
            HittersInner::MisraGries(mg) => mg.get(element),
            HittersInner::Exact(exact) => exact.get(element),
        }
    }

    fn frequent(&self, phi: f64) -> Frequent<K> {
        match &self.inner {
            HittersInner::SpaceSaving(summary) => summary.frequent(phi),
            HittersInner::MisraGries(mg) => mg.frequent(phi),
            HittersInner::Exact(exact) => exact.frequent(phi),
        }
    }

    fn top(&self, k: usize) -> Top<K> {
        match &self.inner {
            HittersInner::SpaceSaving(summary) => summary.top(k),
            HittersInner::MisraGries(mg) => mg.top(k),
            HittersInner::Exact(exact) => exact.top(k),
        }
    }
}

/// Builder for [`Hitters`] instances.
#[derive(Debug, Clone, Copy)]
pub struct HitterBuilder {
    capacity: usize,
    epsilon: Option<f64>,
}

impl HitterBuilder {
    /// Create a builder for counters tracking at most `capacity` elements.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            epsilon: None,
        }
    }

    /// Derive the capacity from an error bound instead, `ceil(1 / epsilon)`.
    ///
    /// Validated by [`try_build`](Self::try_build).
    pub fn error_bound(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Build a counter with the given algorithm.
    ///
    /// An invalid error bound falls back to the plain capacity; use
    /// [`try_build`](Self::try_build) to have it rejected.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hitkit::builder::{Algorithm, HitterBuilder};
    ///
    /// let summary = HitterBuilder::new(64).build::<String>(Algorithm::SpaceSaving);
    /// let table = HitterBuilder::new(64).build::<String>(Algorithm::MisraGries);
    /// let exact = HitterBuilder::new(0).build::<String>(Algorithm::Exact);
    /// assert_eq!(exact.capacity(), None);
    /// ```
    pub fn build<K>(self, algorithm: Algorithm) -> Hitters<K>
    where
        K: Eq + Hash + Ord + Clone,
    {
        let capacity = self
            .epsilon
            .and_then(|epsilon| capacity_for_error_bound(epsilon).ok())
            .unwrap_or(self.capacity);
        Self::assemble(capacity, algorithm)
    }

    /// Build a counter, validating the configuration first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the error bound is outside `(0, 1]` or a
    /// Misra-Gries table would have zero capacity.
    pub fn try_build<K>(self, algorithm: Algorithm) -> Result<Hitters<K>, ConfigError>
    where
        K: Eq + Hash + Ord + Clone,
    {
        let capacity = match self.epsilon {
            Some(epsilon) => capacity_for_error_bound(epsilon)?,
            None => self.capacity,
        };
        if algorithm == Algorithm::MisraGries && capacity == 0 {
            return Err(ConfigError::new("misra-gries capacity must be > 0"));
        }
        Ok(Self::assemble(capacity, algorithm))
    }

    fn assemble<K>(capacity: usize, algorithm: Algorithm) -> Hitters<K>
    where
        K: Eq + Hash + Ord + Clone,
    {
        let inner = match algorithm {
            Algorithm::SpaceSaving => HittersInner::SpaceSaving(StreamSummary::new(capacity)),
            Algorithm::MisraGries => HittersInner::MisraGries(MisraGries::new(capacity)),
            Algorithm::Exact => HittersInner::Exact(ExactCounter::new()),
        };
        Hitters { inner }
    }
}
