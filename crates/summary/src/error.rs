//! Error types for the climaqc-summary crate.

use climaqc_series::SeriesError;

/// Error type for all fallible operations in the climaqc-summary crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SummaryError {
    /// Returned when a requested percentile is outside `[0, 100]`.
    #[error("percentile must be in [0, 100], got {value}")]
    InvalidPercentile {
        /// The offending percentile.
        value: f64,
    },

    /// Returned when the series fails its date-validity re-check.
    #[error(transparent)]
    Series(#[from] SeriesError),
}
