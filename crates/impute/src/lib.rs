//! # climaqc-impute
//!
//! Fills gaps in a daily series with a bounded iterative imputer. Only
//! originally missing values are filled; observed data is never
//! overwritten.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A[DailySeries] -->|"imputation_features()"| B["[value, month, doy, dow] with NaN gaps"]
//!     B -->|"IterativeImputer::fit_transform"| C[completed matrix]
//!     C -->|"clamp + fill_missing()"| D["DailySeries (CORRECTED gaps)"]
//! ```
//!
//! [`ChainedImputer`] is the built-in backend: chained equations with a
//! standardised ridge regression per incomplete column.
//!
//! ## Quick Start
//!
//! ```
//! use climaqc_impute::{ImputeConfig, impute};
//! use climaqc_series::{DailyRecord, DailySeries, NaiveDate, QcFlag};
//!
//! let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
//! let records = start
//!     .iter_days()
//!     .take(30)
//!     .enumerate()
//!     .map(|(i, d)| DailyRecord::new(d, (i != 10).then_some(i as f64)))
//!     .collect();
//! let series = DailySeries::new("fecha", "valor", Vec::new(), records);
//!
//! let config = ImputeConfig::new().with_min_value(Some(0.0));
//! let filled = impute(&series, &config).unwrap();
//! let gap = &filled.records()[10];
//! assert_eq!(gap.flag(), QcFlag::Corrected);
//! assert!(gap.imputed_value().unwrap() >= 0.0);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `chained` | [`IterativeImputer`] trait and [`ChainedImputer`] |
//! | `engine` | Feature matrix, clamping and series annotation |
//! | `ridge` | Per-column regression (internal) |
//! | `error` | Error types |

mod chained;
mod engine;
mod error;
mod ridge;

pub use chained::{
    ChainedImputer, DEFAULT_ALPHA, DEFAULT_MAX_ITER, DEFAULT_TOL, ImputationOrder,
    IterativeImputer,
};
pub use engine::{DEFAULT_SEED, ImputeConfig, impute, impute_with, imputation_features};
pub use error::ImputeError;
