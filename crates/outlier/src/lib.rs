//! # climaqc-outlier
//!
//! Flags anomalous observations in a daily series without removing them.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A[DailySeries] -->|"outlier_features()"| B["[value, month, doy] matrix"]
//!     B -->|"AnomalyScorer::fit/score/classify"| C[scores + flags]
//!     C -->|"mark_outlier()"| D["DailySeries (annotated)"]
//! ```
//!
//! The detector is any [`AnomalyScorer`]; [`IsolationForest`] is the
//! built-in backend. Only observed values are scored, and series with fewer
//! than [`MIN_OBSERVED_ROWS`] observed values are left undetermined.
//!
//! ## Quick Start
//!
//! ```
//! use climaqc_outlier::{OutlierConfig, flag_outliers};
//! use climaqc_series::{DailyRecord, DailySeries, NaiveDate, QcFlag};
//!
//! let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
//! let records = start
//!     .iter_days()
//!     .take(60)
//!     .enumerate()
//!     .map(|(i, d)| {
//!         let v = if i == 30 { 250.0 } else { (i % 5) as f64 };
//!         DailyRecord::new(d, Some(v))
//!     })
//!     .collect();
//! let series = DailySeries::new("fecha", "valor", Vec::new(), records);
//!
//! let config = OutlierConfig::new().with_contamination(0.02);
//! let flagged = flag_outliers(&series, &config).unwrap();
//! assert_eq!(flagged.records()[30].flag(), QcFlag::Suspect);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `scorer` | [`AnomalyScorer`] trait |
//! | `forest` | Seeded, parallel isolation forest |
//! | `flagger` | Feature matrix and series annotation |
//! | `error` | Error types |

mod error;
mod flagger;
mod forest;
mod scorer;

pub use error::OutlierError;
pub use flagger::{
    DEFAULT_CONTAMINATION, MIN_OBSERVED_ROWS, OutlierConfig, flag_outliers, flag_outliers_with,
    outlier_features,
};
pub use forest::{DEFAULT_MAX_SAMPLES, DEFAULT_N_ESTIMATORS, DEFAULT_SEED, IsolationForest};
pub use scorer::AnomalyScorer;
