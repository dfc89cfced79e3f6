//! Names of the annotation columns appended to an enriched series.

/// Boolean outlier determination; empty before the flagger runs.
pub const IS_OUTLIER_COLUMN: &str = "is_outlier";

/// Anomaly decision score; empty when the record was not scored.
pub const OUTLIER_SCORE_COLUMN: &str = "outlier_score";

/// Estimate for an originally missing value.
pub const IMPUTED_VALUE_COLUMN: &str = "imputed_value";

/// Terminal `OK`/`SUSPECT`/`CORRECTED` status.
pub const QC_FLAG_COLUMN: &str = "qc_flag";

/// Date format of the date column in every written series.
pub const SERIES_DATE_FORMAT: &str = "%Y-%m-%d";

/// Annotation columns in output order.
pub const ANNOTATION_COLUMNS: [&str; 4] = [
    IS_OUTLIER_COLUMN,
    OUTLIER_SCORE_COLUMN,
    IMPUTED_VALUE_COLUMN,
    QC_FLAG_COLUMN,
];
