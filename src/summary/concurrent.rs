//! Lock-wrapped stream summary for shared access.
//!
//! The summary itself is single-writer. `ConcurrentStreamSummary` serialises
//! every call behind a `parking_lot::Mutex` so several producers can feed one
//! stream. Queries bump `&self` metric cells when the `metrics` feature is on,
//! so the inner summary is `Send` but not `Sync`.

use std::hash::Hash;

use parking_lot::Mutex;

use crate::error::ConfigError;
use crate::summary::space_saving::StreamSummary;
use crate::traits::{ConcurrentHeavyHitters, Count, Frequent, HeavyHitters, Top};

/// Thread-safe wrapper around [`StreamSummary`].
///
/// # Example
///
/// ```
/// use hitkit::summary::ConcurrentStreamSummary;
///
/// let summary = ConcurrentStreamSummary::new(16);
/// std::thread::scope(|scope| {
///     for worker in 0..4u64 {
///         let summary = &summary;
///         scope.spawn(move || {
///             for i in 0..100 {
///                 summary.hit(i % (worker + 1));
///             }
///         });
///     }
/// });
/// assert_eq!(summary.hits(), 400);
/// ```
#[derive(Debug)]
pub struct ConcurrentStreamSummary<K> {
    inner: Mutex<StreamSummary<K>>,
}

impl<K> ConcurrentStreamSummary<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(StreamSummary::new(capacity)),
        }
    }

    /// See [`StreamSummary::with_error_bound`].
    pub fn with_error_bound(epsilon: f64) -> Result<Self, ConfigError> {
        Ok(Self::from(StreamSummary::with_error_bound(epsilon)?))
    }

    pub fn hit(&self, element: K) -> Count {
        self.inner.lock().hit(element)
    }

    /// Records `element` only if the lock is free.
    pub fn try_hit(&self, element: K) -> Option<Count> {
        let mut summary = self.inner.try_lock()?;
        Some(summary.hit(element))
    }

    /// Records a batch under a single lock acquisition.
    pub fn hit_all<I>(&self, elements: I) -> u64
    where
        I: IntoIterator<Item = K>,
    {
        self.inner.lock().hit_all(elements)
    }

    pub fn hits(&self) -> u64 {
        self.inner.lock().hits()
    }

    pub fn get(&self, element: &K) -> Option<Count> {
        self.inner.lock().get(element)
    }

    pub fn frequent(&self, phi: f64) -> Frequent<K> {
        self.inner.lock().frequent(phi)
    }

    pub fn top(&self, k: usize) -> Top<K> {
        self.inner.lock().top(k)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Runs `f` against the summary while holding the lock.
    pub fn with_summary<R>(&self, f: impl FnOnce(&StreamSummary<K>) -> R) -> R {
        f(&self.inner.lock())
    }

    pub fn into_inner(self) -> StreamSummary<K> {
        self.inner.into_inner()
    }
}

impl<K> From<StreamSummary<K>> for ConcurrentStreamSummary<K> {
    fn from(summary: StreamSummary<K>) -> Self {
        Self {
            inner: Mutex::new(summary),
        }
    }
}

impl<K: Send> ConcurrentHeavyHitters for ConcurrentStreamSummary<K> {}
