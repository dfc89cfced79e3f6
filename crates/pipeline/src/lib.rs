//! # climaqc-pipeline
//!
//! End-to-end quality control of a single daily series. One synchronous call
//! normalizes a raw table, summarizes it, flags outliers, fills gaps and,
//! when a baseline is configured, computes monthly normals of the result.
//!
//! ```mermaid
//! graph LR
//!     T[Table] --> N[normalize_dates]
//!     N --> S[summarize]
//!     N --> F[flag_outliers]
//!     F --> I[impute]
//!     I --> C[climatology]
//!     I --> OUT[PipelineOutput]
//!     S --> OUT
//!     C --> OUT
//! ```
//!
//! Every configuration, schema, date and baseline check runs before the
//! first estimator is fitted, so a failing run produces no output.
//!
//! ## Quick Start
//!
//! ```
//! use climaqc_pipeline::{PipelineConfig, run_daily_pipeline};
//! use climaqc_series::{QcFlag, Table};
//!
//! let dates: Vec<String> = (1..=28).map(|d| format!("2021-02-{d:02}")).collect();
//! let values: Vec<String> = (1..=28)
//!     .map(|d| if d == 14 { String::new() } else { format!("{}", d % 5) })
//!     .collect();
//! let rows = dates
//!     .into_iter()
//!     .zip(values)
//!     .map(|(d, v)| vec![d, v])
//!     .collect();
//! let table = Table::new(vec!["fecha".into(), "valor".into()], rows).unwrap();
//!
//! let out = run_daily_pipeline(&table, &PipelineConfig::default()).unwrap();
//! assert_eq!(out.series.len(), 28);
//! assert_eq!(out.series.records()[13].flag(), QcFlag::Corrected);
//! assert_eq!(out.summary.n_missing, 1);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | [`PipelineConfig`], [`infer_log_transform`] |
//! | `run` | [`run_daily_pipeline`], [`run_daily_pipeline_with`], [`run_daily_pipeline_csv`] |
//! | `error` | Error types |

mod config;
mod error;
mod run;

pub use config::{DEFAULT_VARIABLE_LABEL, PipelineConfig, infer_log_transform};
pub use error::PipelineError;
pub use run::{PipelineOutput, run_daily_pipeline, run_daily_pipeline_csv, run_daily_pipeline_with};
