//! Integration test: gap-fill a seasonal temperature series.

use climaqc_impute::{ImputationOrder, ImputeConfig, ImputeError, impute};
use climaqc_series::{DailyRecord, DailySeries, NaiveDate, QcFlag};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Two years of daily max temperature with a seasonal cycle, noise and
/// ~10% random gaps plus one two-week outage.
fn seasonal_with_gaps() -> DailySeries {
    let mut rng = StdRng::seed_from_u64(31);
    let noise = Normal::new(0.0, 1.5).unwrap();
    let start = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
    let records = start
        .iter_days()
        .take(730)
        .enumerate()
        .map(|(i, d)| {
            let outage = (200..214).contains(&i);
            let value = if outage || rng.random_bool(0.1) {
                None
            } else {
                let phase = 2.0 * std::f64::consts::PI * i as f64 / 365.0;
                Some(18.0 - 8.0 * phase.cos() + noise.sample(&mut rng))
            };
            DailyRecord::new(d, value)
        })
        .collect();
    DailySeries::new("fecha", "tmax", Vec::new(), records)
}

#[test]
fn fills_exactly_the_gaps() {
    let series = seasonal_with_gaps();
    let out = impute(&series, &ImputeConfig::default()).unwrap();

    assert_eq!(out.len(), series.len());
    for (before, after) in series.records().iter().zip(out.records()) {
        assert_eq!(after.imputed_value().is_some(), before.value().is_none());
        match before.value() {
            Some(v) => {
                assert_eq!(after.value().map(f64::to_bits), Some(v.to_bits()));
                assert_eq!(after.flag(), QcFlag::Ok);
            }
            None => {
                assert_eq!(after.value(), None);
                assert_eq!(after.flag(), QcFlag::Corrected);
            }
        }
    }
}

#[test]
fn bounds_are_respected() {
    let series = seasonal_with_gaps();
    let config = ImputeConfig::new()
        .with_min_value(Some(15.0))
        .with_max_value(Some(20.0));
    let out = impute(&series, &config).unwrap();
    for r in out.records() {
        if let Some(v) = r.imputed_value() {
            assert!((15.0..=20.0).contains(&v), "imputed {v}");
        }
    }
}

#[test]
fn estimates_stay_in_observed_range() {
    let series = seasonal_with_gaps();
    let observed = series.observed();
    let lo = observed.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = observed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let out = impute(&series, &ImputeConfig::default()).unwrap();
    for r in out.records() {
        if let Some(v) = r.imputed_value() {
            assert!(v >= lo && v <= hi, "imputed {v} outside [{lo}, {hi}]");
        }
    }
}

#[test]
fn deterministic_for_same_config() {
    let series = seasonal_with_gaps();
    let config = ImputeConfig::new().with_order(ImputationOrder::Random).with_seed(4);
    assert_eq!(impute(&series, &config).unwrap(), impute(&series, &config).unwrap());
}

#[test]
fn zero_iterations_rejected_before_fitting() {
    let err = impute(&seasonal_with_gaps(), &ImputeConfig::new().with_iterations(0)).unwrap_err();
    assert_eq!(err, ImputeError::InvalidIterations { value: 0 });
}
