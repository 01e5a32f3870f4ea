//! Frequency counters implementing [`HeavyHitters`](crate::traits::HeavyHitters).
//!
//! | Type                      | Memory        | Estimates                 |
//! |---------------------------|---------------|---------------------------|
//! | [`StreamSummary`]         | `capacity`    | Space-Saving, overcounts  |
//! | [`MisraGries`]            | `capacity`    | decrement-all, bounded    |
//! | [`ExactCounter`]          | distinct keys | exact                     |
//! | `ConcurrentStreamSummary` | `capacity`    | locked `StreamSummary`    |

pub mod exact;
pub mod misra_gries;
pub mod space_saving;

#[cfg(feature = "concurrency")]
pub mod concurrent;

#[cfg(feature = "concurrency")]
pub use concurrent::ConcurrentStreamSummary;
pub use exact::ExactCounter;
pub use misra_gries::MisraGries;
pub use space_saving::StreamSummary;
