//! # climaqc-summary
//!
//! Exploratory summary of a [`DailySeries`](climaqc_series::DailySeries):
//! date range, counts, distribution statistics, per-year availability and
//! shape statistics. Also derives the calendar side-features consumed by the
//! outlier flagger and the imputation engine.
//!
//! ## Quick Start
//!
//! ```
//! use climaqc_series::{SchemaConfig, Table, normalize_dates};
//! use climaqc_summary::{SummaryConfig, summarize};
//!
//! let table = Table::from_strs(
//!     &["fecha", "valor"],
//!     &[&["2020-01-01", "1.0"], &["2020-01-02", ""], &["2020-01-03", "3.0"]],
//! )
//! .unwrap();
//! let series = normalize_dates(&table, &SchemaConfig::default()).unwrap();
//! let report = summarize(&series, &SummaryConfig::default()).unwrap();
//!
//! assert_eq!(report.n_rows, 3);
//! assert_eq!(report.n_missing, 1);
//! assert_eq!(report.stats.mean, Some(2.0));
//! assert_eq!(report.skewness, None); // fewer than 3 values
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | Percentile selection |
//! | `report` | [`SeriesSummary`] and [`summarize`] |
//! | `features` | Calendar features and quarterly grouping |
//! | `error` | Error types |

mod config;
mod error;
mod features;
mod report;

pub use config::{DEFAULT_PERCENTILES, SummaryConfig};
pub use error::SummaryError;
pub use features::{derive_calendar_features, quarterly_values};
pub use report::{DescriptiveStats, PercentileValue, SeriesSummary, summarize};
