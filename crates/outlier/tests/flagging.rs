//! Integration test: flag synthetic daily precipitation with injected spikes.

use climaqc_outlier::{
    AnomalyScorer, OutlierConfig, OutlierError, flag_outliers, flag_outliers_with,
};
use climaqc_series::{DailyRecord, DailySeries, NaiveDate, QcFlag};
use ndarray::{Array1, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Gamma};

const SPIKES: [usize; 4] = [100, 400, 700, 1000];

/// Three years of gamma-distributed wet days, ~60% dry, 5% missing, and
/// four physically implausible spikes.
fn synthetic_precip() -> DailySeries {
    let mut rng = StdRng::seed_from_u64(2024);
    let gamma = Gamma::new(0.8, 6.0).unwrap();
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let records = start
        .iter_days()
        .take(1096)
        .enumerate()
        .map(|(i, d)| {
            let value = if SPIKES.contains(&i) {
                Some(900.0)
            } else if rng.random_bool(0.05) {
                None
            } else if rng.random_bool(0.6) {
                Some(0.0)
            } else {
                Some(gamma.sample(&mut rng))
            };
            DailyRecord::new(d, value)
        })
        .collect();
    DailySeries::new("fecha", "valor", Vec::new(), records)
}

#[test]
fn spikes_are_flagged_suspect_and_kept() {
    let series = synthetic_precip();
    let config = OutlierConfig::new().with_contamination(0.01);
    let out = flag_outliers(&series, &config).unwrap();

    for &i in &SPIKES {
        let r = &out.records()[i];
        assert_eq!(r.is_outlier(), Some(true), "spike at {i}");
        assert_eq!(r.flag(), QcFlag::Suspect);
        assert_eq!(r.value(), Some(900.0));
        assert!(r.outlier_score().unwrap() < 0.0);
    }
}

#[test]
fn every_record_gets_a_determination() {
    let out = flag_outliers(&synthetic_precip(), &OutlierConfig::default()).unwrap();
    assert_eq!(out.len(), 1096);
    for r in out.records() {
        assert!(r.is_outlier().is_some());
        assert_eq!(r.outlier_score().is_some(), r.value().is_some());
        if r.value().is_none() {
            assert_eq!(r.is_outlier(), Some(false));
        }
    }
    let n_flagged = out.records().iter().filter(|r| r.is_outlier() == Some(true)).count();
    assert!(n_flagged >= SPIKES.len());
    assert!(n_flagged <= 30, "flagged {n_flagged}");
}

#[test]
fn repeated_runs_are_identical() {
    let series = synthetic_precip();
    let config = OutlierConfig::new().with_log_transform(true).with_seed(5);
    let a = flag_outliers(&series, &config).unwrap();
    let b = flag_outliers(&series, &config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn five_observed_rows_are_not_evaluated() {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let records = start
        .iter_days()
        .take(8)
        .enumerate()
        .map(|(i, d)| DailyRecord::new(d, (i < 5).then_some(i as f64 * 100.0)))
        .collect();
    let series = DailySeries::new("fecha", "valor", Vec::new(), records);

    let out = flag_outliers(&series, &OutlierConfig::default()).unwrap();
    assert!(out.records().iter().all(|r| r.is_outlier() == Some(false)));
    assert!(out.records().iter().all(|r| r.outlier_score().is_none()));
}

#[test]
fn contamination_out_of_range_is_rejected() {
    let err = flag_outliers(&synthetic_precip(), &OutlierConfig::new().with_contamination(0.6))
        .unwrap_err();
    assert_eq!(err, OutlierError::InvalidContamination { value: 0.6 });
}

fn daily(values: &[Option<f64>]) -> DailySeries {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let records = start
        .iter_days()
        .zip(values)
        .map(|(d, &v)| DailyRecord::new(d, v))
        .collect();
    DailySeries::new("fecha", "valor", Vec::new(), records)
}

#[test]
fn extreme_finite_values_are_scored() {
    let mut values: Vec<Option<f64>> = (0..20).map(|i| Some((i % 4) as f64)).collect();
    values[3] = Some(-1e308);
    values[7] = Some(1e308);
    let config = OutlierConfig::new()
        .with_log_transform(false)
        .with_contamination(0.1)
        .with_n_estimators(50);
    let out = flag_outliers(&daily(&values), &config).unwrap();

    for r in out.records() {
        assert!(r.is_outlier().is_some());
        assert!(r.outlier_score().unwrap().is_finite());
    }
    assert_eq!(out.records()[3].value(), Some(-1e308));
}

/// Scorer that always returns a single score, whatever the input height.
struct SingleScore;

impl AnomalyScorer for SingleScore {
    fn fit(&mut self, _x: ArrayView2<'_, f64>) -> Result<(), OutlierError> {
        Ok(())
    }

    fn score(&self, _x: ArrayView2<'_, f64>) -> Result<Array1<f64>, OutlierError> {
        Ok(Array1::from_vec(vec![-1.0]))
    }
}

#[test]
fn short_scorer_output_is_rejected() {
    let values: Vec<Option<f64>> = (0..20).map(|i| Some(i as f64)).collect();
    let err = flag_outliers_with(&daily(&values), &OutlierConfig::default(), &mut SingleScore)
        .unwrap_err();
    assert_eq!(
        err,
        OutlierError::ScoreLengthMismatch {
            what: "scores",
            expected: 20,
            found: 1
        }
    );
}
