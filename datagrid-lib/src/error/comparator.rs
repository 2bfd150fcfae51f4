//! ComparatorError for per-column comparator overrides

/// Error raised by a column's comparator override.
///
/// The filter pass contains these per row: the failing rule counts as a
/// non-match and the pass continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ComparatorError {
    message: String,
}

impl ComparatorError {
    /// Creates a new comparator error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates a comparator error from any displayable error.
    pub fn from_display(err: impl std::fmt::Display) -> Self {
        Self {
            message: err.to_string(),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
