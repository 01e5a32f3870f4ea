//! Error types for the hitkit library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned when the internal structure of a summary is
//!   inconsistent (`check_invariants` methods).
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. an error bound outside `(0, 1]`, a zero-capacity Misra-Gries table).
//!
//! Looking up an element that is not monitored is not an error; queries return
//! `Option` for that.
//!
//! ## Example Usage
//!
//! ```
//! use hitkit::error::ConfigError;
//! use hitkit::summary::StreamSummary;
//!
//! let summary: Result<StreamSummary<u64>, ConfigError> = StreamSummary::with_error_bound(0.01);
//! assert_eq!(summary.unwrap().capacity(), 100);
//!
//! let bad = StreamSummary::<u64>::with_error_bound(0.0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when a summary's internal invariants are violated.
///
/// Produced by [`StreamSummary::check_invariants`](crate::summary::StreamSummary::check_invariants).
/// Carries a description of the first broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`StreamSummary::with_error_bound`](crate::summary::StreamSummary::with_error_bound)
/// and [`HitterBuilder::try_build`](crate::builder::HitterBuilder::try_build).
///
/// # Example
///
/// ```
/// use hitkit::error::ConfigError;
/// use hitkit::summary::MisraGries;
///
/// let err: ConfigError = MisraGries::<u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Validates an error bound and converts it into a table capacity.
pub(crate) fn capacity_for_error_bound(epsilon: f64) -> Result<usize, ConfigError> {
    if !(epsilon > 0.0 && epsilon <= 1.0) {
        return Err(ConfigError::new(format!(
            "error bound must be in (0, 1], got {epsilon}"
        )));
    }
    Ok((1.0 / epsilon).ceil() as usize)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_error_carries_its_message() {
        let err = InvariantError::new("bucket order broken");
        assert_eq!(err.to_string(), "bucket order broken");
        assert_eq!(err.message(), "bucket order broken");
        assert!(format!("{err:?}").contains("bucket order"));
    }

    #[test]
    fn config_error_carries_its_message() {
        let err = ConfigError::new("misra-gries capacity must be > 0");
        assert_eq!(err.to_string(), "misra-gries capacity must be > 0");
        assert_eq!(err.clone(), err);
    }

    #[test]
    fn both_are_std_errors() {
        fn boxed<E: std::error::Error + 'static>(err: E) -> Box<dyn std::error::Error> {
            Box::new(err)
        }
        assert_eq!(boxed(InvariantError::new("a")).to_string(), "a");
        assert_eq!(boxed(ConfigError::new("b")).to_string(), "b");
    }

    #[test]
    fn error_bound_maps_to_ceiling_capacity() {
        assert_eq!(capacity_for_error_bound(1.0), Ok(1));
        assert_eq!(capacity_for_error_bound(0.5), Ok(2));
        assert_eq!(capacity_for_error_bound(0.3), Ok(4));
        assert_eq!(capacity_for_error_bound(0.001), Ok(1000));
    }

    #[test]
    fn error_bound_rejects_out_of_range() {
        for bad in [0.0, -0.1, 1.5, f64::NAN, f64::INFINITY] {
            let err = capacity_for_error_bound(bad).unwrap_err();
            assert!(err.message().contains("error bound"));
        }
    }
}
