//! # climaqc-io
//!
//! Delimited-text input and CSV/JSON output for daily QC series. Reads
//! comma- or semicolon-separated tables in UTF-8 or Latin-1 into the raw
//! [`climaqc_series::Table`] model, and persists enriched series, summary
//! reports and climatology tables.
//!
//! ```mermaid
//! graph LR
//!     CSV[input file] -->|read_table| T[Table]
//!     T -->|normalize_dates| S[DailySeries]
//!     S -->|write_series_csv| OUT[enriched csv]
//!     OUT -->|read_series_csv| S
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `reader` | [`ReaderConfig`], [`read_table`], [`read_series_csv`] |
//! | `writer` | [`WriterConfig`], [`write_series_csv`], [`write_records_csv`], [`write_json`] |
//! | `encoding` | [`TextEncoding`] |
//! | `columns` | Annotation column names |
//! | `error` | Error types |

mod columns;
mod encoding;
mod error;
mod reader;
mod validate;
mod writer;

pub use columns::{
    ANNOTATION_COLUMNS, IMPUTED_VALUE_COLUMN, IS_OUTLIER_COLUMN, OUTLIER_SCORE_COLUMN,
    QC_FLAG_COLUMN, SERIES_DATE_FORMAT,
};
pub use encoding::TextEncoding;
pub use error::IoError;
pub use reader::{ReaderConfig, read_series_csv, read_table};
pub use writer::{WriterConfig, to_json_string, write_json, write_records_csv, write_series_csv};
