//! Error types for the climaqc-impute crate.

/// Error type for all fallible operations in the climaqc-impute crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImputeError {
    /// Returned when the iteration count is zero.
    #[error("iterations must be at least 1, got {value}")]
    InvalidIterations {
        /// The offending iteration count.
        value: usize,
    },

    /// Returned when a bound is not finite or `min > max`.
    #[error("invalid bounds: min={min:?}, max={max:?}")]
    InvalidBounds {
        /// Lower bound.
        min: Option<f64>,
        /// Upper bound.
        max: Option<f64>,
    },

    /// Returned when the convergence tolerance is negative or not finite.
    #[error("tolerance must be a non-negative finite number, got {value}")]
    InvalidTolerance {
        /// The offending tolerance.
        value: f64,
    },

    /// Returned when the value column has no observed entries to learn from.
    #[error("cannot impute: no observed values in the series")]
    NoObservedValues,

    /// Returned when a matrix column is entirely missing.
    #[error("column {column} has no observed values")]
    EmptyColumn {
        /// Index of the empty column.
        column: usize,
    },

    /// Returned when the imputer output does not match the input shape.
    #[error("imputer returned shape {got:?}, expected {expected:?}")]
    ShapeMismatch {
        /// Input `(rows, cols)`.
        expected: (usize, usize),
        /// Output `(rows, cols)`.
        got: (usize, usize),
    },

    /// Returned when the imputer produced a non-finite value for a missing cell.
    #[error("imputer produced a non-finite estimate for record {row}")]
    NonFiniteEstimate {
        /// Record index.
        row: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_iterations() {
        let err = ImputeError::InvalidIterations { value: 0 };
        assert_eq!(err.to_string(), "iterations must be at least 1, got 0");
    }

    #[test]
    fn display_invalid_bounds() {
        let err = ImputeError::InvalidBounds {
            min: Some(5.0),
            max: Some(1.0),
        };
        assert_eq!(err.to_string(), "invalid bounds: min=Some(5.0), max=Some(1.0)");
    }

    #[test]
    fn display_shape_mismatch() {
        let err = ImputeError::ShapeMismatch {
            expected: (10, 4),
            got: (10, 3),
        };
        assert_eq!(
            err.to_string(),
            "imputer returned shape (10, 3), expected (10, 4)"
        );
    }

    #[test]
    fn display_no_observed_values() {
        assert_eq!(
            ImputeError::NoObservedValues.to_string(),
            "cannot impute: no observed values in the series"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<ImputeError>();
    }
}
