//! hitkit: bounded-memory heavy hitter and top-k estimation.
//!
//! The core is [`StreamSummary`](summary::StreamSummary), a Space-Saving
//! counter table kept in a bucket ledger of intrusive lists so that every
//! `hit` is O(1). All counters answer the
//! [`HeavyHitters`](traits::HeavyHitters) contract.
//!
//! ```
//! use hitkit::prelude::*;
//!
//! let mut summary = StreamSummary::new(8);
//! summary.hit_all("the cat and the dog and the bird".split(' '));
//!
//! let top = summary.top(2);
//! assert_eq!(top.elements, vec!["the", "and"]);
//! assert_eq!(summary.get(&"the"), Some(Count { count: 3, error: 0 }));
//! ```

pub mod builder;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod summary;
pub mod traits;
