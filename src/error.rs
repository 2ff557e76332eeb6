//! Error types for collection operations.
//!
//! Most operations on [`Collection`](crate::Collection) are total and never
//! fail. The exceptions are the destructive and selecting operations that
//! require at least one entry (`pop`, `random`) and the positional pairing
//! of two collections (`combine`), which requires equal lengths.
//!
//! Lookup-style operations (`first`, `last`, `max`, `reduce`, ...) report
//! absence through `Option` rather than an error type.

use std::fmt;

/// Error returned when an operation requires a non-empty collection.
///
/// Returned by [`pop`](crate::Collection::pop) and
/// [`random`](crate::Collection::random).
///
/// # Examples
///
/// ```rust
/// use fluentseq::{Collection, error::EmptyCollectionError};
///
/// let mut empty: Collection<usize, i32> = Collection::new();
/// assert_eq!(empty.pop(), Err(EmptyCollectionError));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyCollectionError;

impl fmt::Display for EmptyCollectionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "operation requires a non-empty collection")
    }
}

impl std::error::Error for EmptyCollectionError {}

/// Error returned when two collections of different lengths are paired
/// positionally.
///
/// Returned by [`combine`](crate::Collection::combine), which has no
/// meaningful result when a key would be left without a value or vice
/// versa.
///
/// # Examples
///
/// ```rust
/// use fluentseq::Collection;
///
/// let keys = Collection::from_values(["name", "car"]);
/// let values = Collection::from_values(["Eko"]);
/// let error = keys.combine(&values).unwrap_err();
/// assert_eq!(error.left, 2);
/// assert_eq!(error.right, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatchError {
    /// Number of entries in the receiving collection.
    pub left: usize,
    /// Number of entries in the other collection.
    pub right: usize,
}

impl fmt::Display for LengthMismatchError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "collections must have equal lengths: {} != {}",
            self.left, self.right
        )
    }
}

impl std::error::Error for LengthMismatchError {}

#[cfg(test)]
mod tests {
    use super::{EmptyCollectionError, LengthMismatchError};

    #[test]
    fn empty_collection_error_display() {
        assert_eq!(
            EmptyCollectionError.to_string(),
            "operation requires a non-empty collection"
        );
    }

    #[test]
    fn length_mismatch_error_display() {
        let error = LengthMismatchError { left: 2, right: 3 };
        assert_eq!(
            error.to_string(),
            "collections must have equal lengths: 2 != 3"
        );
    }
}
