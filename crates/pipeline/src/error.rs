//! Error types for the climaqc-pipeline crate.

use climaqc_climatology::ClimatologyError;
use climaqc_impute::ImputeError;
use climaqc_io::IoError;
use climaqc_outlier::OutlierError;
use climaqc_series::SeriesError;
use climaqc_summary::SummaryError;

/// Error type for a pipeline run.
///
/// Configuration and schema problems are reported before any model is
/// fitted; stage errors are forwarded unchanged.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Returned when the pipeline configuration is inconsistent.
    #[error("invalid pipeline configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when an input column would be shadowed by an output
    /// annotation column.
    #[error("input column '{name}' collides with an output annotation column")]
    ReservedColumn {
        /// The clashing column name.
        name: String,
    },

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error(transparent)]
    Outlier(#[from] OutlierError),

    #[error(transparent)]
    Impute(#[from] ImputeError),

    #[error(transparent)]
    Climatology(#[from] ClimatologyError),

    #[error(transparent)]
    Io(#[from] IoError),
}
