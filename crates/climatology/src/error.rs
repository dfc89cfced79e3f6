//! Error types for the climaqc-climatology crate.

use climaqc_calendar::NaiveDate;

/// Error type for all fallible operations in the climaqc-climatology crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClimatologyError {
    /// Returned for an aggregation name other than `mean` or `sum`.
    #[error("unknown aggregation '{name}' (expected 'mean' or 'sum')")]
    UnknownAggregation {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when the baseline start is after its end.
    #[error("baseline start {start} is after baseline end {end}")]
    InvalidBaselineWindow {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },

    /// Returned when no record falls inside the baseline window.
    #[error("no records between {start} and {end}")]
    EmptyBaseline {
        /// Baseline start date.
        start: NaiveDate,
        /// Baseline end date.
        end: NaiveDate,
    },

    /// Returned when the baseline covers too few distinct years.
    #[error("baseline covers {years} distinct year(s); at least {required} are required")]
    InsufficientBaseline {
        /// Distinct calendar years found in the window.
        years: usize,
        /// Minimum required.
        required: usize,
    },
}
