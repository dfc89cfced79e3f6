use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level climaqc configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ClimaqcConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Input/output settings.
    #[serde(default)]
    pub io: IoToml,

    /// Outlier detection settings.
    #[serde(default)]
    pub qc: QcToml,

    /// Gap-filling settings.
    #[serde(default)]
    pub impute: ImputeToml,

    /// Exploratory summary settings.
    #[serde(default)]
    pub summary: SummaryToml,

    /// Monthly normals; computed by `run` only when present.
    #[serde(default)]
    pub climatology: Option<ClimatologyToml>,
}

impl ClimaqcConfig {
    /// Reads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default = "default_encoding")]
    pub encoding: String,
    #[serde(default = "default_date_field")]
    pub date_field: String,
    #[serde(default = "default_value_field")]
    pub value_field: String,
    #[serde(default)]
    pub date_format: Option<String>,
    #[serde(default)]
    pub day_first: bool,
    #[serde(default = "default_variable_label")]
    pub variable_label: String,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            separator: default_separator(),
            encoding: default_encoding(),
            date_field: default_date_field(),
            value_field: default_value_field(),
            date_format: None,
            day_first: false,
            variable_label: default_variable_label(),
        }
    }
}

fn default_separator() -> String {
    ",".to_string()
}
fn default_encoding() -> String {
    "utf-8".to_string()
}
fn default_date_field() -> String {
    climaqc_series::DEFAULT_DATE_FIELD.to_string()
}
fn default_value_field() -> String {
    climaqc_series::DEFAULT_VALUE_FIELD.to_string()
}
fn default_variable_label() -> String {
    climaqc_pipeline::DEFAULT_VARIABLE_LABEL.to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QcToml {
    #[serde(default = "default_contamination")]
    pub contamination: f64,
    /// Forces the log transform; inferred from `io.variable_label` if unset.
    #[serde(default)]
    pub log_transform: Option<bool>,
    #[serde(default = "default_n_estimators")]
    pub n_estimators: usize,
}

impl Default for QcToml {
    fn default() -> Self {
        Self {
            contamination: default_contamination(),
            log_transform: None,
            n_estimators: default_n_estimators(),
        }
    }
}

fn default_contamination() -> f64 {
    climaqc_outlier::DEFAULT_CONTAMINATION
}
fn default_n_estimators() -> usize {
    climaqc_outlier::DEFAULT_N_ESTIMATORS
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImputeToml {
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default = "default_true")]
    pub use_calendar_features: bool,
    #[serde(default = "default_tol")]
    pub tol: f64,
    #[serde(default = "default_order")]
    pub order: String,
}

impl Default for ImputeToml {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            min_value: None,
            max_value: None,
            use_calendar_features: true,
            tol: default_tol(),
            order: default_order(),
        }
    }
}

fn default_iterations() -> usize {
    climaqc_impute::DEFAULT_MAX_ITER
}
fn default_true() -> bool {
    true
}
fn default_tol() -> f64 {
    climaqc_impute::DEFAULT_TOL
}
fn default_order() -> String {
    "ascending".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryToml {
    #[serde(default = "default_percentiles")]
    pub percentiles: Vec<f64>,
}

impl Default for SummaryToml {
    fn default() -> Self {
        Self {
            percentiles: default_percentiles(),
        }
    }
}

fn default_percentiles() -> Vec<f64> {
    climaqc_summary::DEFAULT_PERCENTILES.to_vec()
}

/// Baseline dates are quoted `YYYY-MM-DD` strings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimatologyToml {
    #[serde(default = "default_baseline_start")]
    pub baseline_start: String,
    #[serde(default = "default_baseline_end")]
    pub baseline_end: String,
    #[serde(default = "default_aggregation")]
    pub aggregation: String,
    pub output: Option<PathBuf>,
}

impl Default for ClimatologyToml {
    fn default() -> Self {
        Self {
            baseline_start: default_baseline_start(),
            baseline_end: default_baseline_end(),
            aggregation: default_aggregation(),
            output: None,
        }
    }
}

fn default_baseline_start() -> String {
    "1991-01-01".to_string()
}
fn default_baseline_end() -> String {
    "2020-12-31".to_string()
}
fn default_aggregation() -> String {
    "mean".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let c: ClimaqcConfig = toml::from_str("").unwrap();
        assert_eq!(c.seed, None);
        assert_eq!(c.io.separator, ",");
        assert_eq!(c.io.date_field, "fecha");
        assert_eq!(c.io.value_field, "valor");
        assert_eq!(c.io.variable_label, "precipitacion_diaria");
        assert_eq!(c.qc.contamination, 0.01);
        assert_eq!(c.qc.n_estimators, 300);
        assert_eq!(c.impute.iterations, 20);
        assert!(c.impute.use_calendar_features);
        assert_eq!(c.summary.percentiles.len(), 11);
        assert!(c.climatology.is_none());
    }

    #[test]
    fn full_file_parses() {
        let c: ClimaqcConfig = toml::from_str(
            r#"
            seed = 7

            [io]
            input = "data/station.csv"
            separator = ";"
            encoding = "latin-1"
            value_field = "precipitacion"
            day_first = true

            [qc]
            contamination = 0.02
            log_transform = false

            [impute]
            iterations = 10
            min_value = 0.0
            order = "random"

            [climatology]
            aggregation = "sum"
            "#,
        )
        .unwrap();
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.io.input, Some(PathBuf::from("data/station.csv")));
        assert_eq!(c.io.encoding, "latin-1");
        assert!(c.io.day_first);
        assert_eq!(c.qc.log_transform, Some(false));
        assert_eq!(c.impute.min_value, Some(0.0));
        assert_eq!(c.impute.max_value, None);
        let clim = c.climatology.unwrap();
        assert_eq!(clim.aggregation, "sum");
        assert_eq!(clim.baseline_start, "1991-01-01");
    }

    #[test]
    fn unknown_field_rejected() {
        let err = toml::from_str::<ClimaqcConfig>("[qc]\ncontamintion = 0.1\n").unwrap_err();
        assert!(err.to_string().contains("contamintion"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ClimaqcConfig::load(Some(Path::new("/tmp/climaqc_no_such_config.toml")))
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
        assert!(ClimaqcConfig::load(None).is_ok());
    }
}
