//! Monthly climatology.

use std::collections::BTreeMap;

use climaqc_calendar::{Datelike, NaiveDate};
use climaqc_series::DailySeries;
use serde::Serialize;
use tracing::info;

use crate::baseline::{Aggregation, Baseline};
use crate::error::ClimatologyError;

/// Climatological value of one calendar month.
///
/// `aggregate_value` is `None` when the baseline has no usable value in
/// that month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClimatologyRecord {
    pub month: u32,
    pub aggregate_value: Option<f64>,
}

/// Baseline window and aggregation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClimatologyConfig {
    baseline: Baseline,
    aggregation: Aggregation,
}

impl ClimatologyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }
}

/// Computes the 12-month climatology of `series` over
/// `[baseline_start, baseline_end]`.
///
/// Each record contributes its observed value, or its imputed value when
/// the observation is missing; records with neither are skipped.
///
/// * [`Aggregation::Mean`] averages all daily values of each month.
/// * [`Aggregation::Sum`] first sums each (year, month), then averages those
///   sums across years.
///
/// # Errors
///
/// Fails if the window is reversed, empty, or spans fewer than 30
/// distinct years.
pub fn compute_monthly_climatology(
    series: &DailySeries,
    baseline_start: NaiveDate,
    baseline_end: NaiveDate,
    aggregation: Aggregation,
) -> Result<Vec<ClimatologyRecord>, ClimatologyError> {
    let baseline = Baseline::new(baseline_start, baseline_end)?;
    let config = ClimatologyConfig::new()
        .with_baseline(baseline)
        .with_aggregation(aggregation);
    climatology(series, &config)
}

/// [`compute_monthly_climatology`] driven by a [`ClimatologyConfig`].
#[tracing::instrument(skip_all, fields(aggregation = %config.aggregation()))]
pub fn climatology(
    series: &DailySeries,
    config: &ClimatologyConfig,
) -> Result<Vec<ClimatologyRecord>, ClimatologyError> {
    let baseline = config.baseline();
    let n_years = baseline.check(series)?;

    let values = baseline
        .select(series)
        .filter_map(|r| r.filled_value().map(|v| (r.date(), v)));

    let by_month: BTreeMap<u32, Vec<f64>> = match config.aggregation() {
        Aggregation::Mean => {
            let mut by_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
            for (date, v) in values {
                by_month.entry(date.month()).or_default().push(v);
            }
            by_month
        }
        Aggregation::Sum => {
            let mut by_year_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
            for (date, v) in values {
                *by_year_month.entry((date.year(), date.month())).or_insert(0.0) += v;
            }
            let mut by_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
            for ((_, month), total) in by_year_month {
                by_month.entry(month).or_default().push(total);
            }
            by_month
        }
    };

    let records: Vec<ClimatologyRecord> = (1..=12)
        .map(|month| ClimatologyRecord {
            month,
            aggregate_value: by_month
                .get(&month)
                .filter(|v| !v.is_empty())
                .map(|v| v.iter().sum::<f64>() / v.len() as f64),
        })
        .collect();

    info!(
        n_years,
        start = %baseline.start(),
        end = %baseline.end(),
        n_months_defined = records.iter().filter(|r| r.aggregate_value.is_some()).count(),
        "computed monthly climatology"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use climaqc_series::DailyRecord;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(records: Vec<DailyRecord>) -> DailySeries {
        DailySeries::new("fecha", "valor", Vec::new(), records)
    }

    /// 30 Januaries: even years hold [10, 20], odd years [30, 40].
    fn alternating_januaries() -> DailySeries {
        let mut records = Vec::new();
        for y in 1991..=2020 {
            let (a, b) = if y % 2 == 0 { (10.0, 20.0) } else { (30.0, 40.0) };
            records.push(DailyRecord::new(ymd(y, 1, 1), Some(a)));
            records.push(DailyRecord::new(ymd(y, 1, 2), Some(b)));
        }
        series(records)
    }

    #[test]
    fn sum_averages_annual_totals() {
        let out = compute_monthly_climatology(
            &alternating_januaries(),
            ymd(1991, 1, 1),
            ymd(2020, 12, 31),
            Aggregation::Sum,
        )
        .unwrap();
        assert_eq!(out.len(), 12);
        assert_relative_eq!(out[0].aggregate_value.unwrap(), 50.0, epsilon = 1e-12);
        assert!(out[1..].iter().all(|r| r.aggregate_value.is_none()));
    }

    #[test]
    fn sum_skips_year_months_without_values() {
        let mut records = Vec::new();
        for y in 1991..=2020 {
            let v = (y % 2 == 0).then_some(5.0);
            records.push(DailyRecord::new(ymd(y, 2, 1), v));
        }
        let out = compute_monthly_climatology(
            &series(records),
            ymd(1991, 1, 1),
            ymd(2020, 12, 31),
            Aggregation::Sum,
        )
        .unwrap();
        assert_relative_eq!(out[1].aggregate_value.unwrap(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn mean_averages_daily_values() {
        let out = compute_monthly_climatology(
            &alternating_januaries(),
            ymd(1991, 1, 1),
            ymd(2020, 12, 31),
            Aggregation::Mean,
        )
        .unwrap();
        assert_relative_eq!(out[0].aggregate_value.unwrap(), 25.0, epsilon = 1e-12);
    }

    #[test]
    fn months_are_one_to_twelve() {
        let out = climatology(&alternating_januaries(), &ClimatologyConfig::default()).unwrap();
        let months: Vec<u32> = out.iter().map(|r| r.month).collect();
        assert_eq!(months, (1..=12).collect::<Vec<u32>>());
    }

    #[test]
    fn imputed_values_are_used_when_observation_missing() {
        let mut records = Vec::new();
        for y in 1991..=2020 {
            let mut r = DailyRecord::new(ymd(y, 3, 1), None);
            r.fill_missing(6.0);
            records.push(r);
            records.push(DailyRecord::new(ymd(y, 3, 2), None));
        }
        let out = climatology(&series(records), &ClimatologyConfig::default()).unwrap();
        assert_relative_eq!(out[2].aggregate_value.unwrap(), 6.0);
    }

    #[test]
    fn records_outside_window_are_ignored() {
        let mut s = alternating_januaries().records().to_vec();
        s.push(DailyRecord::new(ymd(2021, 1, 1), Some(1000.0)));
        let out = climatology(&series(s), &ClimatologyConfig::default()).unwrap();
        assert_relative_eq!(out[0].aggregate_value.unwrap(), 25.0, epsilon = 1e-12);
    }

    #[test]
    fn short_baseline_fails() {
        let err = compute_monthly_climatology(
            &alternating_januaries(),
            ymd(2001, 1, 1),
            ymd(2020, 12, 31),
            Aggregation::Mean,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ClimatologyError::InsufficientBaseline {
                years: 20,
                required: 30
            }
        );
    }

    #[test]
    fn reversed_window_fails() {
        assert!(matches!(
            compute_monthly_climatology(
                &alternating_januaries(),
                ymd(2020, 12, 31),
                ymd(1991, 1, 1),
                Aggregation::Mean,
            ),
            Err(ClimatologyError::InvalidBaselineWindow { .. })
        ));
    }

    #[test]
    fn serializes_records() {
        let r = ClimatologyRecord {
            month: 2,
            aggregate_value: None,
        };
        assert_eq!(
            serde_json::to_string(&r).unwrap(),
            "{\"month\":2,\"aggregate_value\":null}"
        );
    }
}
