//! Pipeline execution.

use std::path::Path;

use climaqc_climatology::{ClimatologyRecord, climatology};
use climaqc_impute::{IterativeImputer, impute_with};
use climaqc_io::{ANNOTATION_COLUMNS, ReaderConfig, read_table};
use climaqc_outlier::{AnomalyScorer, flag_outliers_with};
use climaqc_series::{DailySeries, QcFlag, Table, normalize_dates};
use climaqc_summary::{SeriesSummary, summarize};
use tracing::{info, info_span};

use crate::config::PipelineConfig;
use crate::error::PipelineError;

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Enriched series: every input date, annotated by both QC stages.
    pub series: DailySeries,
    /// Summary of the normalized series before QC.
    pub summary: SeriesSummary,
    /// Monthly normals of the final series, when configured.
    pub climatology: Option<Vec<ClimatologyRecord>>,
    /// Whether the outlier stage used the log transform.
    pub use_log_transform: bool,
}

/// Runs the full pipeline with the built-in isolation forest and chained
/// imputer.
///
/// See [`run_daily_pipeline_with`].
pub fn run_daily_pipeline(table: &Table, config: &PipelineConfig) -> Result<PipelineOutput, PipelineError> {
    let outlier = config.resolved_outlier();
    let mut scorer = outlier.forest();
    let mut imputer = config.impute().imputer();
    run_daily_pipeline_with(table, config, &mut scorer, &mut imputer)
}

/// Reads `path` and runs [`run_daily_pipeline`] on it.
///
/// # Errors
///
/// [`PipelineError::Io`] for read failures, otherwise as
/// [`run_daily_pipeline_with`].
pub fn run_daily_pipeline_csv(
    path: &Path,
    reader: &ReaderConfig,
    config: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    config.validate()?;
    let table = read_table(path, reader)?;
    run_daily_pipeline(&table, config)
}

/// Runs normalize, summarize, flag outliers, impute and, optionally,
/// climatology with caller-supplied estimators.
///
/// The summary describes the normalized input and does not feed back into
/// QC. Outlier flags are set before imputation, so a record that is both
/// ends `CORRECTED`.
///
/// # Errors
///
/// Configuration, schema, date and baseline problems are all reported
/// before either estimator is fitted. Estimator failures are forwarded.
pub fn run_daily_pipeline_with<S, I>(
    table: &Table,
    config: &PipelineConfig,
    scorer: &mut S,
    imputer: &mut I,
) -> Result<PipelineOutput, PipelineError>
where
    S: AnomalyScorer + ?Sized,
    I: IterativeImputer + ?Sized,
{
    let _run = info_span!("pipeline", n_rows = table.n_rows()).entered();
    config.validate()?;

    if let Some(name) = table
        .headers()
        .iter()
        .find(|h| ANNOTATION_COLUMNS.contains(&h.as_str()))
    {
        return Err(PipelineError::ReservedColumn { name: name.clone() });
    }

    let series = {
        let _stage = info_span!("normalize").entered();
        normalize_dates(table, config.schema())?
    };
    if let Some(clim) = config.climatology() {
        clim.baseline().check(&series)?;
    }

    let summary = {
        let _stage = info_span!("summarize").entered();
        summarize(&series, config.summary())?
    };

    let outlier = config.resolved_outlier();
    let flagged = {
        let _stage = info_span!("flag_outliers").entered();
        flag_outliers_with(&series, &outlier, scorer)?
    };

    let filled = {
        let _stage = info_span!("impute").entered();
        impute_with(&flagged, config.impute(), imputer)?
    };

    let normals = match config.climatology() {
        Some(clim) => {
            let _stage = info_span!("climatology").entered();
            Some(climatology(&filled, clim)?)
        }
        None => None,
    };

    let counts = FlagCounts::of(&filled);
    info!(
        n_records = filled.len(),
        n_ok = counts.ok,
        n_suspect = counts.suspect,
        n_corrected = counts.corrected,
        log_transform = outlier.use_log_transform(),
        "pipeline finished"
    );

    Ok(PipelineOutput {
        series: filled,
        summary,
        climatology: normals,
        use_log_transform: outlier.use_log_transform(),
    })
}

#[derive(Debug, Default, PartialEq, Eq)]
struct FlagCounts {
    ok: usize,
    suspect: usize,
    corrected: usize,
}

impl FlagCounts {
    fn of(series: &DailySeries) -> Self {
        let mut c = Self::default();
        for r in series.records() {
            match r.flag() {
                QcFlag::Ok => c.ok += 1,
                QcFlag::Suspect => c.suspect += 1,
                QcFlag::Corrected => c.corrected += 1,
            }
        }
        c
    }
}
