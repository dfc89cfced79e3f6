//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use crate::config::*;

use climaqc_climatology::{Aggregation, Baseline, ClimatologyConfig};
use climaqc_impute::{ImputationOrder, ImputeConfig};
use climaqc_io::{ReaderConfig, SERIES_DATE_FORMAT, TextEncoding, WriterConfig};
use climaqc_outlier::OutlierConfig;
use climaqc_pipeline::PipelineConfig;
use climaqc_series::SchemaConfig;
use climaqc_summary::SummaryConfig;

/// Parses a one-character field separator; `\t` and `tab` mean a tab.
pub fn parse_separator(s: &str) -> Result<u8> {
    match s {
        "\\t" | "tab" => return Ok(b'\t'),
        _ => {}
    }
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => bail!("separator must be a single ASCII character, got {s:?}"),
    }
}

/// Parses an imputation order name into the corresponding enum variant.
pub fn parse_imputation_order(s: &str) -> Result<ImputationOrder> {
    match s.to_lowercase().as_str() {
        "ascending" => Ok(ImputationOrder::Ascending),
        "random" => Ok(ImputationOrder::Random),
        other => bail!("unknown imputation order: {other:?}"),
    }
}

/// Parses a `YYYY-MM-DD` baseline bound.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid baseline date {s:?} (expected YYYY-MM-DD)"))
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> Result<ReaderConfig> {
    let encoding: TextEncoding = io.encoding.parse()?;
    Ok(ReaderConfig::default()
        .with_separator(parse_separator(&io.separator)?)
        .with_encoding(encoding))
}

/// Builds a [`WriterConfig`]; output uses the input separator.
pub fn build_writer_config(io: &IoToml) -> Result<WriterConfig> {
    Ok(WriterConfig::default().with_separator(parse_separator(&io.separator)?))
}

/// Builds a [`SchemaConfig`] from the TOML I/O configuration.
pub fn build_schema_config(io: &IoToml) -> SchemaConfig {
    SchemaConfig::new()
        .with_date_field(&io.date_field)
        .with_value_field(&io.value_field)
        .with_date_format(io.date_format.clone())
        .with_day_first(io.day_first)
}

/// Schema for a series written by `climaqc run`.
///
/// Column names follow the config; dates are always [`SERIES_DATE_FORMAT`]
/// because the writer normalizes them.
pub fn build_processed_schema_config(io: &IoToml) -> SchemaConfig {
    build_schema_config(io)
        .with_date_format(Some(SERIES_DATE_FORMAT.to_string()))
        .with_day_first(false)
}

/// Builds an [`OutlierConfig`]; the log transform is resolved by the
/// pipeline.
pub fn build_outlier_config(qc: &QcToml, seed: Option<u64>) -> OutlierConfig {
    let mut cfg = OutlierConfig::new()
        .with_contamination(qc.contamination)
        .with_n_estimators(qc.n_estimators);
    if let Some(s) = seed {
        cfg = cfg.with_seed(s);
    }
    cfg
}

/// Builds an [`ImputeConfig`] from the TOML imputation configuration.
pub fn build_impute_config(impute: &ImputeToml, seed: Option<u64>) -> Result<ImputeConfig> {
    let mut cfg = ImputeConfig::new()
        .with_iterations(impute.iterations)
        .with_min_value(impute.min_value)
        .with_max_value(impute.max_value)
        .with_calendar_features(impute.use_calendar_features)
        .with_tol(impute.tol)
        .with_order(parse_imputation_order(&impute.order)?);
    if let Some(s) = seed {
        cfg = cfg.with_seed(s);
    }
    Ok(cfg)
}

/// Builds a [`SummaryConfig`] from the TOML summary configuration.
pub fn build_summary_config(summary: &SummaryToml) -> SummaryConfig {
    SummaryConfig::new().with_percentiles(summary.percentiles.clone())
}

/// Builds a [`ClimatologyConfig`] from the TOML climatology configuration.
pub fn build_climatology_config(clim: &ClimatologyToml) -> Result<ClimatologyConfig> {
    let baseline = Baseline::new(parse_date(&clim.baseline_start)?, parse_date(&clim.baseline_end)?)?;
    let aggregation: Aggregation = clim.aggregation.parse()?;
    Ok(ClimatologyConfig::new()
        .with_baseline(baseline)
        .with_aggregation(aggregation))
}

/// Builds the full [`PipelineConfig`].
///
/// `seed` takes precedence over the file's global seed.
pub fn build_pipeline_config(config: &ClimaqcConfig, seed: Option<u64>) -> Result<PipelineConfig> {
    let seed = seed.or(config.seed);
    let climatology = config
        .climatology
        .as_ref()
        .map(build_climatology_config)
        .transpose()?;
    Ok(PipelineConfig::new()
        .with_schema(build_schema_config(&config.io))
        .with_summary(build_summary_config(&config.summary))
        .with_outlier(build_outlier_config(&config.qc, seed))
        .with_impute(build_impute_config(&config.impute, seed)?)
        .with_climatology(climatology)
        .with_variable_label(&config.io.variable_label)
        .with_log_transform(config.qc.log_transform))
}
