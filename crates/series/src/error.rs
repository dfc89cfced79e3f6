//! Error types for the climaqc-series crate.

/// Error type for all fallible operations in the climaqc-series crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when one or more required columns are absent.
    #[error("missing required column(s) {missing:?}; available columns: {available:?}")]
    MissingColumns {
        /// Every required column that was not found.
        missing: Vec<String>,
        /// The columns present in the table.
        available: Vec<String>,
    },

    /// Returned when any value in the date column cannot be parsed.
    #[error(
        "{count} unparseable date(s) in column '{column}' (first: {first_bad:?}); \
         check the date format or the day-first setting"
    )]
    UnparseableDates {
        /// Name of the date column.
        column: String,
        /// Number of values that failed to parse.
        count: usize,
        /// The first offending raw value, for diagnostics.
        first_bad: String,
    },

    /// Returned when a table row has a different width than the header.
    #[error("row {row} has {got} field(s), expected {expected}")]
    RaggedRow {
        /// Zero-based data row index.
        row: usize,
        /// Number of header columns.
        expected: usize,
        /// Number of fields in the row.
        got: usize,
    },

    /// Returned when a table header names the same column twice.
    #[error("duplicate column name '{name}'")]
    DuplicateColumn {
        /// The repeated column name.
        name: String,
    },

    /// Returned when the schema configuration is inconsistent.
    #[error("invalid schema configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when record dates are not strictly increasing.
    #[error("dates are not strictly increasing at record {position}")]
    UnorderedDates {
        /// Index of the first record that is not after its predecessor.
        position: usize,
    },

    /// Returned when a QC flag label is not recognised.
    #[error("unknown QC flag '{label}' (expected OK, SUSPECT or CORRECTED)")]
    UnknownFlag {
        /// The unrecognised label.
        label: String,
    },
}
