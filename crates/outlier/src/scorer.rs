//! Anomaly-scoring capability consumed by the flagger.

use ndarray::{Array1, ArrayView2};

use crate::error::OutlierError;

/// A fit/score/classify anomaly detector over a feature matrix.
///
/// Rows are observations and columns are features. Scores follow the
/// "higher is more normal" convention, and the default [`classify`]
/// treats strictly negative scores as outliers, so implementations should
/// centre their decision threshold on zero.
///
/// [`classify`]: AnomalyScorer::classify
pub trait AnomalyScorer {
    /// Fits the detector to `x`.
    fn fit(&mut self, x: ArrayView2<'_, f64>) -> Result<(), OutlierError>;

    /// Continuous decision score per row of `x`.
    fn score(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, OutlierError>;

    /// Outlier determination per row of `x`.
    fn classify(&self, x: ArrayView2<'_, f64>) -> Result<Vec<bool>, OutlierError> {
        Ok(self.score(x)?.iter().map(|&s| s < 0.0).collect())
    }
}
