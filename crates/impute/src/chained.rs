//! Chained-equation iterative imputer.
//!
//! Missing cells (NaN) start at their column mean. Each round then visits
//! every incomplete column, regresses it on all other columns over the rows
//! where it is observed, and overwrites its missing cells with the
//! predictions. Rounds stop after `max_iter` or once the largest change
//! between rounds drops below `tol * max|observed|`.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::ImputeError;
use crate::ridge::Ridge;

/// Default number of imputation rounds.
pub const DEFAULT_MAX_ITER: usize = 20;

/// Default relative convergence tolerance.
pub const DEFAULT_TOL: f64 = 1e-3;

/// Default ridge penalty on standardised predictors.
pub const DEFAULT_ALPHA: f64 = 1e-3;

/// A fill-in-the-gaps estimator over a matrix whose missing cells are NaN.
pub trait IterativeImputer {
    /// Returns a copy of `x` with every NaN replaced by an estimate.
    ///
    /// Observed cells must come back unchanged.
    fn fit_transform(&mut self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, ImputeError>;
}

/// Order in which incomplete columns are visited within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImputationOrder {
    /// Fewest missing values first.
    #[default]
    Ascending,
    /// Seeded shuffle, redrawn every round.
    Random,
}

/// Chained-equation imputer with ridge regression per column.
#[derive(Debug, Clone)]
pub struct ChainedImputer {
    max_iter: usize,
    tol: f64,
    alpha: f64,
    order: ImputationOrder,
    seed: u64,
    n_iter: usize,
}

impl Default for ChainedImputer {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
            alpha: DEFAULT_ALPHA,
            order: ImputationOrder::Ascending,
            seed: 0,
            n_iter: 0,
        }
    }
}

impl ChainedImputer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
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

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Rounds performed by the last [`fit_transform`](IterativeImputer::fit_transform).
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    fn validate(&self) -> Result<(), ImputeError> {
        if self.max_iter == 0 {
            return Err(ImputeError::InvalidIterations {
                value: self.max_iter,
            });
        }
        if !(self.tol.is_finite() && self.tol >= 0.0) {
            return Err(ImputeError::InvalidTolerance { value: self.tol });
        }
        Ok(())
    }
}

impl IterativeImputer for ChainedImputer {
    fn fit_transform(&mut self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, ImputeError> {
        self.validate()?;
        self.n_iter = 0;
        let (n, p) = x.dim();
        let missing = x.mapv(|v| !v.is_finite());

        let mut filled = x.to_owned();
        let mut missing_per_col = Vec::with_capacity(p);
        for (j, mut col) in filled.axis_iter_mut(Axis(1)).enumerate() {
            let observed: Vec<f64> = col.iter().copied().filter(|v| v.is_finite()).collect();
            if observed.is_empty() && n > 0 {
                return Err(ImputeError::EmptyColumn { column: j });
            }
            let n_missing = n - observed.len();
            if n_missing > 0 {
                let mean = observed.iter().sum::<f64>() / observed.len() as f64;
                col.mapv_inplace(|v| if v.is_finite() { v } else { mean });
            }
            missing_per_col.push(n_missing);
        }

        let mut order: Vec<usize> = (0..p).filter(|&j| missing_per_col[j] > 0).collect();
        if order.is_empty() {
            return Ok(filled);
        }
        order.sort_by_key(|&j| missing_per_col[j]);

        let max_abs_observed = x
            .iter()
            .filter(|v| v.is_finite())
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let threshold = self.tol * max_abs_observed;
        let mut rng = StdRng::seed_from_u64(self.seed);

        for round in 1..=self.max_iter {
            let previous = filled.clone();
            if self.order == ImputationOrder::Random {
                order.shuffle(&mut rng);
            }
            for &j in &order {
                impute_column(&mut filled, &missing, j, self.alpha);
            }
            self.n_iter = round;

            let change = (&filled - &previous)
                .iter()
                .fold(0.0_f64, |acc, d| acc.max(d.abs()));
            debug!(round, change, threshold, "imputation round");
            if change < threshold {
                debug!(round, "imputation converged");
                break;
            }
        }
        Ok(filled)
    }
}

/// Re-estimates the missing cells of column `j` from every other column.
fn impute_column(filled: &mut Array2<f64>, missing: &Array2<bool>, j: usize, alpha: f64) {
    let (n, p) = filled.dim();
    let predictors: Vec<usize> = (0..p).filter(|&c| c != j).collect();
    let train_rows: Vec<usize> = (0..n).filter(|&i| !missing[[i, j]]).collect();

    let x_train = Array2::from_shape_fn((train_rows.len(), predictors.len()), |(r, c)| {
        filled[[train_rows[r], predictors[c]]]
    });
    let y_train = Array1::from_shape_fn(train_rows.len(), |r| filled[[train_rows[r], j]]);
    let model = Ridge::fit(x_train.view(), y_train.view(), alpha);

    for i in (0..n).filter(|&i| missing[[i, j]]) {
        let row = Array1::from_shape_fn(predictors.len(), |c| filled[[i, predictors[c]]]);
        filled[[i, j]] = model.predict(row.view());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn complete_matrix_is_returned_unchanged() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let mut imp = ChainedImputer::new();
        let out = imp.fit_transform(x.view()).unwrap();
        assert_eq!(out, x);
        assert_eq!(imp.n_iter(), 0);
    }

    #[test]
    fn single_column_falls_back_to_mean() {
        let x = array![[1.0], [f64::NAN], [5.0]];
        let out = ChainedImputer::new().fit_transform(x.view()).unwrap();
        assert_abs_diff_eq!(out[[1, 0]], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn learns_from_correlated_column() {
        // y = 2x exactly; the gap at x = 7 should come back close to 14.
        let mut x = Array2::from_shape_fn((20, 2), |(i, j)| if j == 0 { i as f64 } else { 2.0 * i as f64 });
        x[[7, 1]] = f64::NAN;
        let out = ChainedImputer::new().fit_transform(x.view()).unwrap();
        assert_abs_diff_eq!(out[[7, 1]], 14.0, epsilon = 0.05);
    }

    #[test]
    fn observed_cells_are_untouched() {
        let mut x = Array2::from_shape_fn((30, 3), |(i, j)| ((i * (j + 1)) % 11) as f64);
        x[[2, 0]] = f64::NAN;
        x[[5, 1]] = f64::NAN;
        x[[9, 0]] = f64::NAN;
        let out = ChainedImputer::new().fit_transform(x.view()).unwrap();
        for ((i, j), &v) in x.indexed_iter() {
            if v.is_finite() {
                assert_eq!(out[[i, j]].to_bits(), v.to_bits());
            } else {
                assert!(out[[i, j]].is_finite());
            }
        }
    }

    #[test]
    fn stops_early_when_converged() {
        let mut x = Array2::from_shape_fn((20, 2), |(i, j)| if j == 0 { i as f64 } else { 2.0 * i as f64 });
        x[[3, 1]] = f64::NAN;
        let mut imp = ChainedImputer::new().with_max_iter(50);
        imp.fit_transform(x.view()).unwrap();
        assert!(imp.n_iter() < 50);
    }

    #[test]
    fn random_order_is_seeded() {
        let mut x = Array2::from_shape_fn((25, 3), |(i, j)| ((i + 3 * j) % 9) as f64);
        x[[1, 0]] = f64::NAN;
        x[[4, 1]] = f64::NAN;
        x[[8, 2]] = f64::NAN;
        let run = |seed| {
            ChainedImputer::new()
                .with_order(ImputationOrder::Random)
                .with_seed(seed)
                .fit_transform(x.view())
                .unwrap()
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn empty_column_is_rejected() {
        let x = array![[1.0, f64::NAN], [2.0, f64::NAN]];
        assert_eq!(
            ChainedImputer::new().fit_transform(x.view()).unwrap_err(),
            ImputeError::EmptyColumn { column: 1 }
        );
    }

    #[test]
    fn zero_iterations_rejected() {
        let x = array![[1.0]];
        assert_eq!(
            ChainedImputer::new().with_max_iter(0).fit_transform(x.view()).unwrap_err(),
            ImputeError::InvalidIterations { value: 0 }
        );
    }

    #[test]
    fn negative_tolerance_rejected() {
        let x = array![[1.0]];
        assert!(matches!(
            ChainedImputer::new().with_tol(-1.0).fit_transform(x.view()),
            Err(ImputeError::InvalidTolerance { .. })
        ));
    }
}
