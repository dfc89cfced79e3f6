//! Error types for the climaqc-outlier crate.

/// Error type for all fallible operations in the climaqc-outlier crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OutlierError {
    /// Returned when contamination is outside the open interval (0, 0.5).
    #[error("contamination must be in (0, 0.5), got {value}")]
    InvalidContamination {
        /// The offending contamination fraction.
        value: f64,
    },

    /// Returned when the forest is configured with zero trees or zero samples.
    #[error("invalid forest parameter {name}: {reason}")]
    InvalidForestParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when fitting on a matrix with no rows.
    #[error("cannot fit anomaly scorer on an empty matrix")]
    EmptyTrainingSet,

    /// Returned when the input contains NaN or infinite entries.
    #[error("feature matrix contains a non-finite value at row {row}, column {column}")]
    NonFiniteFeature {
        /// Row index of the offending cell.
        row: usize,
        /// Column index of the offending cell.
        column: usize,
    },

    /// Returned when scoring before fitting.
    #[error("anomaly scorer has not been fitted")]
    NotFitted,

    /// Returned when the scored matrix has a different width than the training one.
    #[error("feature count mismatch: fitted on {expected}, got {got}")]
    FeatureMismatch {
        /// Number of columns seen during fitting.
        expected: usize,
        /// Number of columns in the scored matrix.
        got: usize,
    },

    /// Returned when a scorer yields a different number of scores or flags
    /// than there are observed rows.
    #[error("scorer returned {found} {what} for {expected} observed rows")]
    ScoreLengthMismatch {
        /// `"scores"` or `"flags"`.
        what: &'static str,
        /// Number of observed rows that were scored.
        expected: usize,
        /// Number of entries the scorer returned.
        found: usize,
    },
}
