//! Error types for climaqc-io.

use std::path::PathBuf;

use climaqc_series::SeriesError;

/// Error type for all fallible operations in the climaqc-io crate.
///
/// Covers file-system failures, CSV and JSON encoding problems, text
/// decoding, configuration validation, and the schema errors raised while
/// turning a table into a series.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when an input file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a file-system error.
    #[error("i/o error on {}: {reason}", path.display())]
    FileSystem {
        /// Path being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the CSV library.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps an error originating from the JSON serializer.
    #[error("json error: {reason}")]
    Json {
        /// Description of the underlying JSON failure.
        reason: String,
    },

    /// Returned for an encoding label other than UTF-8 or Latin-1.
    #[error("unsupported encoding '{label}' (expected utf-8 or latin-1)")]
    UnsupportedEncoding {
        /// The unrecognised label.
        label: String,
    },

    /// Returned when input bytes are not valid in the configured encoding.
    #[error("cannot decode {} as {encoding}: {reason}", path.display())]
    Decode {
        /// Path of the input file.
        path: PathBuf,
        /// Encoding that was attempted.
        encoding: String,
        /// Description of the decoding failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Wraps a table or schema error.
    #[error(transparent)]
    Series(#[from] SeriesError),
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json {
            reason: e.to_string(),
        }
    }
}
