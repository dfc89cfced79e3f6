//! Descriptive summary report.

use std::collections::{BTreeMap, BTreeSet};

use climaqc_calendar::{Datelike, NaiveDate};
use climaqc_series::DailySeries;
use serde::Serialize;
use tracing::debug;

use crate::config::SummaryConfig;
use crate::error::SummaryError;

/// Distribution statistics of the non-missing values.
///
/// Every field except `count` is `None` when there are no values; `std`
/// (N-1 denominator) additionally needs two values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// One requested percentile and its type-7 value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileValue {
    pub percentile: f64,
    pub value: Option<f64>,
}

/// Exploratory summary of a daily series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub n_rows: usize,
    pub n_missing: usize,
    pub n_unique_dates: usize,
    pub stats: DescriptiveStats,
    pub percentiles: Vec<PercentileValue>,
    /// Non-missing value count per calendar year, including years with none.
    pub availability_by_year: BTreeMap<i32, usize>,
    /// Adjusted Fisher-Pearson skewness; `None` below 3 values.
    pub skewness: Option<f64>,
    /// Excess kurtosis; `None` below 4 values.
    pub kurtosis: Option<f64>,
}

/// Summarizes `series`.
///
/// Sparse series are not an error: statistics that need more values than
/// are available come back as `None`.
///
/// # Errors
///
/// Returns [`SummaryError::InvalidPercentile`] for a bad configuration.
pub fn summarize(series: &DailySeries, config: &SummaryConfig) -> Result<SeriesSummary, SummaryError> {
    config.validate()?;

    let observed = series.observed();
    let sorted = climaqc_stats::sorted_finite(&observed);

    let start = series.dates().min();
    let end = series.dates().max();
    let n_unique_dates = series.dates().collect::<BTreeSet<_>>().len();

    let mut availability_by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for r in series.records() {
        let slot = availability_by_year.entry(r.date().year()).or_insert(0);
        if r.value().is_some() {
            *slot += 1;
        }
    }

    let stats = DescriptiveStats {
        count: sorted.len(),
        mean: (!sorted.is_empty()).then(|| climaqc_stats::mean(&sorted)),
        std: (sorted.len() >= 2).then(|| climaqc_stats::sd(&sorted)),
        min: sorted.first().copied(),
        max: sorted.last().copied(),
    };

    let percentiles = config
        .percentiles()
        .iter()
        .map(|&p| PercentileValue {
            percentile: p,
            value: (!sorted.is_empty()).then(|| climaqc_stats::quantile_type7(&sorted, p / 100.0)),
        })
        .collect();

    let skewness = climaqc_stats::skewness(&sorted);
    let kurtosis = climaqc_stats::kurtosis(&sorted);
    if skewness.is_none() || kurtosis.is_none() {
        debug!(count = sorted.len(), "too few values for shape statistics");
    }

    Ok(SeriesSummary {
        start,
        end,
        n_rows: series.len(),
        n_missing: series.n_missing(),
        n_unique_dates,
        stats,
        percentiles,
        availability_by_year,
        skewness,
        kurtosis,
    })
}
