//! Error types for sequencing operations.

use thiserror::Error;

/// Errors raised while scoring or sorting a sequence.
///
/// Running out of search budget is not an error: solvers always return
/// their best ordering and report the budget through
/// [`SearchStatus`](crate::SearchStatus).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SequencingError {
    /// Two endpoints with a different number of coordinates were compared.
    #[error("endpoint dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Coordinates of the left operand.
        left: usize,
        /// Coordinates of the right operand.
        right: usize,
    },

    /// The metric produced a negative or non-finite distance.
    #[error("invalid distance {value} between item {from} and item {to}")]
    InvalidDistance {
        /// Index of the item whose end was measured.
        from: usize,
        /// Index of the item whose start was measured.
        to: usize,
        /// The offending value.
        value: f64,
    },

    /// Failure reported by a user-supplied metric.
    #[error("metric error: {0}")]
    Metric(String),

    /// A solver configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for sequencing operations.
pub type Result<T> = std::result::Result<T, SequencingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SequencingError::DimensionMismatch { left: 2, right: 3 };
        assert_eq!(err.to_string(), "endpoint dimension mismatch: 2 vs 3");

        let err = SequencingError::InvalidConfig("tolerance must be non-negative".into());
        assert!(err.to_string().starts_with("invalid configuration: "));
    }
}
