//! # climaqc-climatology
//!
//! Monthly climatological normals over a reference baseline. A baseline must
//! span at least [`MIN_BASELINE_YEARS`] distinct calendar years; shorter or
//! empty windows are rejected before anything is aggregated.
//!
//! ## Quick Start
//!
//! ```
//! use climaqc_climatology::{Aggregation, compute_monthly_climatology};
//! use climaqc_series::{DailyRecord, DailySeries, NaiveDate};
//!
//! let records = (1991..=2020)
//!     .map(|y| DailyRecord::new(NaiveDate::from_ymd_opt(y, 7, 1).unwrap(), Some(2.0)))
//!     .collect();
//! let series = DailySeries::new("fecha", "valor", Vec::new(), records);
//!
//! let normals = compute_monthly_climatology(
//!     &series,
//!     NaiveDate::from_ymd_opt(1991, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
//!     Aggregation::Sum,
//! )
//! .unwrap();
//! assert_eq!(normals.len(), 12);
//! assert_eq!(normals[6].aggregate_value, Some(2.0));
//! assert_eq!(normals[0].aggregate_value, None);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `baseline` | [`Baseline`] window, sufficiency check, [`Aggregation`] |
//! | `monthly` | [`compute_monthly_climatology`] |
//! | `error` | Error types |

mod baseline;
mod error;
mod monthly;

pub use baseline::{Aggregation, Baseline, MIN_BASELINE_YEARS};
pub use error::ClimatologyError;
pub use monthly::{ClimatologyConfig, ClimatologyRecord, climatology, compute_monthly_climatology};
