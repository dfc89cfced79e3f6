//! Gap-filling of a daily series.

use climaqc_calendar::CalendarFeatures;
use climaqc_series::DailySeries;
use ndarray::Array2;
use tracing::info;

use crate::chained::{
    ChainedImputer, DEFAULT_MAX_ITER, DEFAULT_TOL, ImputationOrder, IterativeImputer,
};
use crate::error::ImputeError;

/// Default seed for the chained imputer.
pub const DEFAULT_SEED: u64 = 42;

/// Configuration for [`impute`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImputeConfig {
    iterations: usize,
    min_value: Option<f64>,
    max_value: Option<f64>,
    use_calendar_features: bool,
    order: ImputationOrder,
    seed: u64,
    tol: f64,
}

impl Default for ImputeConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_MAX_ITER,
            min_value: None,
            max_value: None,
            use_calendar_features: true,
            order: ImputationOrder::Ascending,
            seed: DEFAULT_SEED,
            tol: DEFAULT_TOL,
        }
    }
}

impl ImputeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of imputation rounds.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Lower clamp for imputed values.
    pub fn with_min_value(mut self, min_value: Option<f64>) -> Self {
        self.min_value = min_value;
        self
    }

    /// Upper clamp for imputed values.
    pub fn with_max_value(mut self, max_value: Option<f64>) -> Self {
        self.max_value = max_value;
        self
    }

    /// Adds month, day-of-year and day-of-week as predictor columns.
    pub fn with_calendar_features(mut self, use_calendar_features: bool) -> Self {
        self.use_calendar_features = use_calendar_features;
        self
    }

    pub fn with_order(mut self, order: ImputationOrder) -> Self {
        self.order = order;
        self
    }

    /// Seed for [`ImputationOrder::Random`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn min_value(&self) -> Option<f64> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    pub fn use_calendar_features(&self) -> bool {
        self.use_calendar_features
    }

    pub fn order(&self) -> ImputationOrder {
        self.order
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Checks iterations, tolerance and bounds.
    pub fn validate(&self) -> Result<(), ImputeError> {
        if self.iterations == 0 {
            return Err(ImputeError::InvalidIterations {
                value: self.iterations,
            });
        }
        if !(self.tol.is_finite() && self.tol >= 0.0) {
            return Err(ImputeError::InvalidTolerance { value: self.tol });
        }
        let finite = |b: Option<f64>| b.is_none_or(f64::is_finite);
        let ordered = match (self.min_value, self.max_value) {
            (Some(lo), Some(hi)) => lo <= hi,
            _ => true,
        };
        if !(finite(self.min_value) && finite(self.max_value) && ordered) {
            return Err(ImputeError::InvalidBounds {
                min: self.min_value,
                max: self.max_value,
            });
        }
        Ok(())
    }

    /// Chained imputer described by this configuration.
    pub fn imputer(&self) -> ChainedImputer {
        ChainedImputer::new()
            .with_max_iter(self.iterations)
            .with_tol(self.tol)
            .with_order(self.order)
            .with_seed(self.seed)
    }

    fn clamp(&self, v: f64) -> f64 {
        let v = self.min_value.map_or(v, |lo| v.max(lo));
        self.max_value.map_or(v, |hi| v.min(hi))
    }
}

/// Builds the imputation matrix: value (NaN when missing) followed by
/// month, day-of-year and day-of-week when calendar features are enabled.
pub fn imputation_features(series: &DailySeries, use_calendar_features: bool) -> Array2<f64> {
    let p = if use_calendar_features { 4 } else { 1 };
    let mut x = Array2::zeros((series.len(), p));
    for (i, r) in series.records().iter().enumerate() {
        x[[i, 0]] = r.value().unwrap_or(f64::NAN);
        if use_calendar_features {
            let cal = CalendarFeatures::from_date(r.date());
            x[[i, 1]] = f64::from(cal.month());
            x[[i, 2]] = f64::from(cal.day_of_year());
            x[[i, 3]] = f64::from(cal.day_of_week());
        }
    }
    x
}

/// Fills missing values with the chained imputer described by `config`.
///
/// See [`impute_with`] for the annotation rules.
pub fn impute(series: &DailySeries, config: &ImputeConfig) -> Result<DailySeries, ImputeError> {
    let mut imputer = config.imputer();
    impute_with(series, config, &mut imputer)
}

/// Fills missing values using any [`IterativeImputer`].
///
/// Returns a new series where every originally missing record carries a
/// clamped `imputed_value` and flag `CORRECTED`. Observed values are left
/// untouched whatever the model would estimate for them. A series without
/// gaps is returned as-is without running the model.
///
/// # Errors
///
/// Configuration is validated first. Fails with
/// [`ImputeError::NoObservedValues`] if the series has gaps but no
/// observed value to learn from.
#[tracing::instrument(skip_all, fields(n_records = series.len()))]
pub fn impute_with<I: IterativeImputer + ?Sized>(
    series: &DailySeries,
    config: &ImputeConfig,
    imputer: &mut I,
) -> Result<DailySeries, ImputeError> {
    config.validate()?;

    let mut out = series.clone();
    let n_missing = series.n_missing();
    if n_missing == 0 {
        info!("no missing values; imputation skipped");
        return Ok(out);
    }
    if n_missing == series.len() {
        return Err(ImputeError::NoObservedValues);
    }

    let x = imputation_features(series, config.use_calendar_features());
    let completed = imputer.fit_transform(x.view())?;
    if completed.dim() != x.dim() {
        return Err(ImputeError::ShapeMismatch {
            expected: x.dim(),
            got: completed.dim(),
        });
    }

    let mut n_clamped = 0usize;
    for (i, r) in out.records_mut().iter_mut().enumerate() {
        if r.value().is_some() {
            continue;
        }
        let estimate = completed[[i, 0]];
        if !estimate.is_finite() {
            return Err(ImputeError::NonFiniteEstimate { row: i });
        }
        let bounded = config.clamp(estimate);
        if bounded != estimate {
            n_clamped += 1;
        }
        r.fill_missing(bounded);
    }

    info!(
        n_imputed = n_missing,
        n_clamped,
        iterations = config.iterations(),
        calendar_features = config.use_calendar_features(),
        "imputed missing values"
    );
    Ok(out)
}
