pub use crate::builder::{Algorithm, HitterBuilder, Hitters};
pub use crate::ds::{IntrusiveList, ListArena, ListId, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::SummaryMetricsSnapshot;
#[cfg(feature = "concurrency")]
pub use crate::summary::ConcurrentStreamSummary;
pub use crate::summary::{ExactCounter, MisraGries, StreamSummary};
pub use crate::traits::{ConcurrentHeavyHitters, Count, Frequent, HeavyHitters, Top};
