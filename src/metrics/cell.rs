use std::cell::Cell;

/// A counter that can be bumped through `&self`.
///
/// Used for query paths (`get`, `top`, `frequent`) that only borrow the
/// summary. Not `Sync`; shared access goes through
/// [`ConcurrentStreamSummary`](crate::summary::ConcurrentStreamSummary), which
/// serialises callers behind a lock.
#[repr(transparent)]
#[derive(Debug, Default, Clone)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incr_counts_through_shared_reference() {
        let cell = MetricsCell::new();
        let shared = &cell;
        shared.incr();
        shared.incr();
        assert_eq!(cell.get(), 2);
        assert_eq!(MetricsCell::default().get(), 0);
    }
}
