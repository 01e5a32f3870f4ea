//! # Space-Saving Stream Summary
//!
//! Tracks the approximate frequency of at most `capacity` distinct elements of
//! an unbounded stream. Every monitored element carries a count that never
//! underestimates its true frequency and an error that bounds the
//! overestimation, so `count - error <= true frequency <= count`.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                        StreamSummary<K>                                  │
//!   │                                                                          │
//!   │   index: FxHashMap<K, SlotId>  ──────────────┐                           │
//!   │                                              │ (non-owning)              │
//!   │   ledger: IntrusiveList<Bucket>              ▼                           │
//!   │                                                                          │
//!   │   head ─► [count 9] ◄──► [count 4] ◄──► [count 1] ◄──► [count 0] ◄─ tail │
//!   │              │              │              │              │              │
//!   │              ▼              ▼              ▼              ▼              │
//!   │            ( a )          ( c )──( d )   ( e )          ( _ )──( _ )     │
//!   │                                                          placeholders    │
//!   │                                                                          │
//!   │   counters: ListArena<Counter<K>>  (one list per bucket, one arena)      │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Buckets are ordered by strictly decreasing count from head to tail. Each
//! counter sits in the bucket whose count equals its own and points back at
//! that bucket. Counters that have never monitored an element have no key and
//! live in the count-0 bucket at the tail until claimed.
//!
//! ## Hit Flow
//!
//! ```text
//!   hit(e)
//!     │
//!     ├─ e monitored? ── yes ──────────────────────────────────────┐
//!     │                                                            │
//!     no                                                           │
//!     │                                                            │
//!     ▼                                                            │
//!   claim tail counter of tail bucket (minimum count)              │
//!     forget its old key, error := its count, key := e             │
//!     │                                                            │
//!     ▼                                                            ▼
//!   promote: count += 1
//!     previous bucket has count + 1?  join its tail
//!     otherwise                        insert a new bucket in between
//!     old bucket empty?                drop it from the ledger
//! ```
//!
//! Every step is O(1); `hit` never walks the ledger.
//!
//! ## Operations
//!
//! | Method           | Complexity | Description                                  |
//! |------------------|------------|----------------------------------------------|
//! | `new(capacity)`  | O(c)       | Seeds `capacity` placeholder counters        |
//! | `hit(e)`         | O(1)       | Records one occurrence                       |
//! | `get(&e)`        | O(1)       | Estimate for a monitored element             |
//! | `top(k)`         | O(k)       | Highest counts plus certificates             |
//! | `frequent(phi)`  | O(r)       | Elements above `ceil(phi * hits)`            |
//! | `iter()`         | O(c)       | Monitored elements, descending count         |
//!
//! ## Example
//!
//! ```
//! use hitkit::summary::StreamSummary;
//! use hitkit::traits::{Count, HeavyHitters};
//!
//! let mut summary = StreamSummary::new(2);
//! summary.hit("a");
//! summary.hit("a");
//! summary.hit("b");
//!
//! // "c" displaces "b", the least counted element, and inherits its count.
//! assert_eq!(summary.hit("c"), Count { count: 2, error: 1 });
//! assert_eq!(summary.get(&"b"), None);
//! assert_eq!(summary.top(1).elements, vec!["a"]);
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, ListArena, ListId, SlotId};
use crate::error::{ConfigError, InvariantError, capacity_for_error_bound};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::SummaryMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::SummaryMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsReset, MetricsSnapshotProvider, SummaryMetricsReadRecorder, SummaryMetricsRecorder,
};
use crate::traits::{
    Count, Frequent, HeavyHitters, Top, frequency_threshold, rank_frequent, rank_top,
};

#[derive(Debug, Clone)]
struct Counter<K> {
    /// `None` until the counter first monitors an element.
    key: Option<K>,
    count: u64,
    error: u64,
    bucket: SlotId,
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    count: u64,
    counters: ListId,
}

/// Space-Saving summary over a stream of `K`.
#[derive(Debug, Clone)]
pub struct StreamSummary<K> {
    capacity: usize,
    hits: u64,
    index: FxHashMap<K, SlotId>,
    counters: ListArena<Counter<K>>,
    ledger: IntrusiveList<Bucket>,
    #[cfg(feature = "metrics")]
    metrics: SummaryMetrics,
}

impl<K> StreamSummary<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates a summary monitoring at most `capacity` elements.
    ///
    /// A capacity of zero is accepted: nothing is retained and every hit is
    /// answered from the hit total alone.
    pub fn new(capacity: usize) -> Self {
        let mut summary = Self {
            capacity,
            hits: 0,
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            counters: ListArena::with_capacity(capacity),
            ledger: IntrusiveList::new(),
            #[cfg(feature = "metrics")]
            metrics: SummaryMetrics::default(),
        };
        summary.seed_placeholders();
        summary
    }

    /// Creates a summary whose per-element error stays below
    /// `epsilon * hits`, i.e. with capacity `ceil(1 / epsilon)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] unless `0 < epsilon <= 1`.
    ///
    /// # Example
    ///
    /// ```
    /// use hitkit::summary::StreamSummary;
    ///
    /// let summary = StreamSummary::<u32>::with_error_bound(0.25).unwrap();
    /// assert_eq!(summary.capacity(), 4);
    /// assert!(StreamSummary::<u32>::with_error_bound(1.5).is_err());
    /// ```
    pub fn with_error_bound(epsilon: f64) -> Result<Self, ConfigError> {
        Ok(Self::new(capacity_for_error_bound(epsilon)?))
    }

    fn seed_placeholders(&mut self) {
        if self.capacity == 0 {
            return;
        }
        let list = self.counters.new_list();
        let bucket = self.ledger.push_head(Bucket {
            count: 0,
            counters: list,
        });
        for _ in 0..self.capacity {
            self.counters.push_tail(
                list,
                Counter {
                    key: None,
                    count: 0,
                    error: 0,
                    bucket,
                },
            );
        }
    }

    /// Maximum number of monitored elements.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of elements currently monitored.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if `element` is currently monitored.
    pub fn contains(&self, element: &K) -> bool {
        self.index.contains_key(element)
    }

    /// Number of distinct counts present, including the placeholder bucket.
    pub fn bucket_count(&self) -> usize {
        self.ledger.len()
    }

    /// Smallest count in the summary.
    ///
    /// No unmonitored element can have a true frequency above this value.
    pub fn min_count(&self) -> u64 {
        match self.ledger.tail().and_then(|id| self.ledger.get(id)) {
            Some(bucket) => bucket.count,
            None => self.hits,
        }
    }

    /// Worst-case overestimation of any count, `hits / capacity`.
    pub fn error_bound(&self) -> u64 {
        match self.capacity {
            0 => self.hits,
            capacity => self.hits / capacity as u64,
        }
    }

    /// Iterates monitored elements from the highest count to the lowest.
    ///
    /// Elements with equal counts come out in the order they reached that
    /// count.
    pub fn iter(&self) -> impl Iterator<Item = (&K, Count)> {
        self.ledger
            .iter()
            .take_while(|bucket| bucket.count > 0)
            .flat_map(|bucket| self.counters.iter(bucket.counters))
            .filter_map(|counter| {
                let key = counter.key.as_ref()?;
                Some((key, Count::new(counter.count, counter.error)))
            })
    }

    /// Forgets every element and resets the hit total.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.hits = 0;
        self.index.clear();
        self.counters.clear();
        self.ledger.clear();
        self.seed_placeholders();
    }

    /// Takes over the minimum counter for an unmonitored `element`.
    fn claim_slot(&mut self, element: K) -> Option<SlotId> {
        let tail = self.ledger.tail()?;
        let list = self.ledger.get(tail)?.counters;
        let id = self.counters.tail(list)?;

        let counter = self.counters.get_mut(id)?;
        let previous = counter.key.replace(element.clone());
        counter.error = counter.count;

        match previous {
            Some(evicted) => {
                self.index.remove(&evicted);
                #[cfg(feature = "metrics")]
                self.metrics.record_eviction();
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_placeholder_claim();
            },
        }
        self.index.insert(element, id);
        Some(id)
    }

    /// Moves counter `id` up by one into the matching bucket.
    fn promote(&mut self, id: SlotId) -> Option<Count> {
        let (old_bucket, count, error) = {
            let counter = self.counters.get(id)?;
            (counter.bucket, counter.count + 1, counter.error)
        };
        let old_list = self.ledger.get(old_bucket)?.counters;

        let neighbour = self.ledger.previous(old_bucket);
        let target = match neighbour {
            Some(prev) if self.ledger.get(prev).map(|b| b.count) == Some(count) => prev,
            _ => {
                let counters = self.counters.new_list();
                #[cfg(feature = "metrics")]
                self.metrics.record_bucket_created();
                self.ledger
                    .insert_previous(old_bucket, Bucket { count, counters })?
            },
        };

        let target_list = self.ledger.get(target)?.counters;
        if !self.counters.push_tail_node(target_list, id) {
            return None;
        }
        let counter = self.counters.get_mut(id)?;
        counter.count = count;
        counter.bucket = target;

        if self.counters.is_empty(old_list) {
            self.ledger.remove(old_bucket);
            self.counters.drop_list(old_list);
            #[cfg(feature = "metrics")]
            self.metrics.record_bucket_removed();
        }
        Some(Count::new(count, error))
    }

    fn ranked(&self) -> impl Iterator<Item = (&K, Count)> {
        self.iter().inspect(|_| {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_ledger_scan_step();
        })
    }

    /// Checks the structural invariants of the ledger and lookup table.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: bucket order, counter placement,
    /// back-references, placeholder state, lookup table consistency, or the
    /// conservation of hits across counters.
    ///
    /// A zero-capacity summary only checks that it holds no counters; with
    /// nothing retained, conservation of hits cannot be checked.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.capacity == 0 {
            if !self.ledger.is_empty() || !self.index.is_empty() {
                return Err(InvariantError::new(
                    "zero-capacity summary holds counters",
                ));
            }
            return Ok(());
        }

        let mut previous_count: Option<u64> = None;
        let mut counters = 0usize;
        let mut monitored = 0usize;
        let mut total: u64 = 0;

        for (bucket_id, bucket) in self.ledger.iter_entries() {
            if let Some(previous) = previous_count {
                if bucket.count >= previous {
                    return Err(InvariantError::new(format!(
                        "bucket count {} follows {}, ledger must strictly decrease",
                        bucket.count, previous
                    )));
                }
            }
            previous_count = Some(bucket.count);

            if self.counters.is_empty(bucket.counters) {
                return Err(InvariantError::new(format!(
                    "bucket with count {} is empty",
                    bucket.count
                )));
            }

            for (id, counter) in self.counters.iter_entries(bucket.counters) {
                counters += 1;
                if counter.bucket != bucket_id {
                    return Err(InvariantError::new(format!(
                        "counter {:?} points at {:?}, lives in {:?}",
                        id, counter.bucket, bucket_id
                    )));
                }
                if counter.count != bucket.count {
                    return Err(InvariantError::new(format!(
                        "counter {:?} has count {} inside bucket {}",
                        id, counter.count, bucket.count
                    )));
                }
                match &counter.key {
                    Some(key) => {
                        monitored += 1;
                        if counter.count == 0 || counter.error >= counter.count {
                            return Err(InvariantError::new(format!(
                                "counter {:?} has count {} and error {}",
                                id, counter.count, counter.error
                            )));
                        }
                        if self.index.get(key) != Some(&id) {
                            return Err(InvariantError::new(format!(
                                "lookup table does not map counter {:?}",
                                id
                            )));
                        }
                    },
                    None => {
                        if counter.count != 0 || counter.error != 0 {
                            return Err(InvariantError::new(format!(
                                "placeholder {:?} has count {}",
                                id, counter.count
                            )));
                        }
                    },
                }
                total += counter.count;
            }
        }

        if counters != self.capacity {
            return Err(InvariantError::new(format!(
                "{} counters reachable, capacity is {}",
                counters, self.capacity
            )));
        }
        if monitored != self.index.len() {
            return Err(InvariantError::new(format!(
                "{} monitored counters, lookup table has {} entries",
                monitored,
                self.index.len()
            )));
        }
        if total != self.hits {
            return Err(InvariantError::new(format!(
                "counts sum to {}, hits is {}",
                total, self.hits
            )));
        }
        if self.counters.list_count() != self.ledger.len() {
            return Err(InvariantError::new(format!(
                "{} counter lists for {} buckets",
                self.counters.list_count(),
                self.ledger.len()
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.ledger.debug_validate_invariants();
        self.counters.debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("stream summary invariant violated: {err}");
        }
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> SummaryMetricsSnapshot {
        SummaryMetricsSnapshot {
            hit_calls: self.metrics.hit_calls,
            monitored_hits: self.metrics.monitored_hits,
            unmonitored_hits: self.metrics.unmonitored_hits,
            placeholder_claims: self.metrics.placeholder_claims,
            evictions: self.metrics.evictions,
            buckets_created: self.metrics.buckets_created,
            buckets_removed: self.metrics.buckets_removed,
            clear_calls: self.metrics.clear_calls,
            get_calls: self.metrics.get_calls.get(),
            get_found: self.metrics.get_found.get(),
            top_calls: self.metrics.top_calls.get(),
            frequent_calls: self.metrics.frequent_calls.get(),
            ledger_scan_steps: self.metrics.ledger_scan_steps.get(),
            hits: self.hits,
            monitored: self.index.len(),
            buckets: self.ledger.len(),
            capacity: self.capacity,
        }
    }
}

impl<K> HeavyHitters<K> for StreamSummary<K>
where
    K: Eq + Hash + Clone,
{
    fn hit(&mut self, element: K) -> Count {
        #[cfg(feature = "metrics")]
        self.metrics.record_hit_call();
        self.hits += 1;

        let id = match self.index.get(&element) {
            Some(&id) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_monitored_hit();
                id
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_unmonitored_hit();
                match self.claim_slot(element) {
                    Some(id) => id,
                    // nothing to claim: the element is forgotten immediately
                    None => return Count::new(self.hits, self.hits - 1),
                }
            },
        };

        let estimate = self.promote(id);
        debug_assert!(estimate.is_some(), "counter {id:?} detached from ledger");
        // unreachable while the ledger invariants hold
        estimate.unwrap_or_default()
    }

    fn hits(&self) -> u64 {
        self.hits
    }

    fn get(&self, element: &K) -> Option<Count> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_get_call();

        let id = self.index.get(element)?;
        let counter = self.counters.get(*id)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_get_found();
        Some(Count::new(counter.count, counter.error))
    }

    fn frequent(&self, phi: f64) -> Frequent<K> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_frequent_call();

        rank_frequent(self.ranked(), frequency_threshold(phi, self.hits))
    }

    fn top(&self, k: usize) -> Top<K> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_top_call();

        rank_top(self.ranked(), k)
    }
}

impl<K> Extend<K> for StreamSummary<K>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for element in iter {
            self.hit(element);
        }
    }
}

#[cfg(feature = "metrics")]
impl<K> MetricsSnapshotProvider<SummaryMetricsSnapshot> for StreamSummary<K>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> SummaryMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K> MetricsReset for StreamSummary<K> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}
