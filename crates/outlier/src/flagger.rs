//! Outlier flagging of a daily series.

use climaqc_calendar::CalendarFeatures;
use climaqc_series::DailySeries;
use ndarray::Array2;
use tracing::{info, warn};

use crate::error::OutlierError;
use crate::forest::{DEFAULT_N_ESTIMATORS, DEFAULT_SEED, IsolationForest};
use crate::scorer::AnomalyScorer;

/// Below this many observed values the detector is not run.
pub const MIN_OBSERVED_ROWS: usize = 10;

/// Default expected fraction of anomalous rows.
pub const DEFAULT_CONTAMINATION: f64 = 0.01;

/// Configuration for [`flag_outliers`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierConfig {
    contamination: f64,
    use_log_transform: bool,
    n_estimators: usize,
    seed: u64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            contamination: DEFAULT_CONTAMINATION,
            use_log_transform: false,
            n_estimators: DEFAULT_N_ESTIMATORS,
            seed: DEFAULT_SEED,
        }
    }
}

impl OutlierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contamination(mut self, contamination: f64) -> Self {
        self.contamination = contamination;
        self
    }

    /// Applies `ln(1 + max(v, 0))` to the value feature.
    pub fn with_log_transform(mut self, use_log_transform: bool) -> Self {
        self.use_log_transform = use_log_transform;
        self
    }

    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn contamination(&self) -> f64 {
        self.contamination
    }

    pub fn use_log_transform(&self) -> bool {
        self.use_log_transform
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Checks `0 < contamination < 0.5` and a non-zero forest size.
    pub fn validate(&self) -> Result<(), OutlierError> {
        self.forest().validate()
    }

    /// Isolation forest described by this configuration.
    pub fn forest(&self) -> IsolationForest {
        IsolationForest::new(self.contamination)
            .with_n_estimators(self.n_estimators)
            .with_seed(self.seed)
    }
}

/// Builds the `[value, month, day_of_year]` matrix over observed records.
///
/// Returns the matrix together with the record index of each row.
pub fn outlier_features(series: &DailySeries, use_log_transform: bool) -> (Array2<f64>, Vec<usize>) {
    let rows: Vec<(usize, f64, CalendarFeatures)> = series
        .records()
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.value().map(|v| (i, v, CalendarFeatures::from_date(r.date()))))
        .collect();

    let mut x = Array2::zeros((rows.len(), 3));
    for (k, (_, v, cal)) in rows.iter().enumerate() {
        x[[k, 0]] = if use_log_transform { v.max(0.0).ln_1p() } else { *v };
        x[[k, 1]] = f64::from(cal.month());
        x[[k, 2]] = f64::from(cal.day_of_year());
    }
    (x, rows.into_iter().map(|(i, _, _)| i).collect())
}

/// Flags outliers with the isolation forest described by `config`.
///
/// See [`flag_outliers_with`] for the annotation rules.
pub fn flag_outliers(series: &DailySeries, config: &OutlierConfig) -> Result<DailySeries, OutlierError> {
    let mut forest = config.forest();
    flag_outliers_with(series, config, &mut forest)
}

/// Flags outliers using any [`AnomalyScorer`].
///
/// Returns a new series in which every record carries an outlier
/// determination. Records without an observed value are never scored
/// (`is_outlier = false`, no score). With fewer than
/// [`MIN_OBSERVED_ROWS`] observed values the detector is skipped and every
/// record is marked not-outlier. Outliers are flagged `SUSPECT` but keep
/// their value.
///
/// # Errors
///
/// Configuration is validated before anything is fitted; scorer failures
/// are propagated. A scorer that returns fewer or more scores or flags
/// than observed rows yields [`OutlierError::ScoreLengthMismatch`].
#[tracing::instrument(skip_all, fields(n_records = series.len()))]
pub fn flag_outliers_with<S: AnomalyScorer + ?Sized>(
    series: &DailySeries,
    config: &OutlierConfig,
    scorer: &mut S,
) -> Result<DailySeries, OutlierError> {
    config.validate()?;

    let mut out = series.clone();
    for r in out.records_mut() {
        r.mark_not_evaluated();
    }

    let (x, rows) = outlier_features(series, config.use_log_transform());
    if rows.len() < MIN_OBSERVED_ROWS {
        warn!(
            n_observed = rows.len(),
            min_required = MIN_OBSERVED_ROWS,
            "too few observed values for outlier detection; skipping"
        );
        return Ok(out);
    }

    scorer.fit(x.view())?;
    let scores = scorer.score(x.view())?;
    let flags = scorer.classify(x.view())?;
    for (what, found) in [("scores", scores.len()), ("flags", flags.len())] {
        if found != rows.len() {
            return Err(OutlierError::ScoreLengthMismatch {
                what,
                expected: rows.len(),
                found,
            });
        }
    }

    let records = out.records_mut();
    for ((&i, &score), &flag) in rows.iter().zip(scores.iter()).zip(flags.iter()) {
        records[i].mark_outlier(flag, score);
    }

    info!(
        n_observed = rows.len(),
        n_outliers = flags.iter().filter(|&&f| f).count(),
        contamination = config.contamination(),
        log_transform = config.use_log_transform(),
        "flagged outliers"
    );
    Ok(out)
}
