//! # climaqc-series
//!
//! Data model for a single daily climate series and the first pipeline
//! stage: schema validation and date normalization.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["Table (raw text)"] -->|"validate_schema()"| B["column indices"]
//!     A -->|"normalize_dates()"| C["DailySeries"]
//!     C --> D["DailyRecord x n"]
//!     D -->|"QcFlag::apply(FlagEvent)"| D
//! ```
//!
//! Normalization is strict on dates and lenient on values: a single
//! unparseable date fails the whole call, while a non-numeric value simply
//! becomes missing.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `table` | Raw delimited-text table |
//! | `record` | One annotated day |
//! | `series` | Ordered collection of records |
//! | `flag` | QC flag enumeration and transition function |
//! | `schema` | Column validation, date parsing, sort and deduplication |
//! | `error` | Error types |

mod error;
mod flag;
mod record;
mod schema;
mod series;
mod table;

pub use climaqc_calendar::NaiveDate;
pub use error::SeriesError;
pub use flag::{FlagEvent, QcFlag};
pub use record::DailyRecord;
pub use schema::{
    ColumnIndices, DEFAULT_DATE_FIELD, DEFAULT_VALUE_FIELD, SchemaConfig, normalize_dates,
    parse_value, validate_schema,
};
pub use series::DailySeries;
pub use table::Table;
