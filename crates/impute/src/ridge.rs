//! Standardised ridge regression used as the per-column estimator.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Fitted linear model `y = intercept + sum(coef[k] * (x[k] - mean[k]) / scale[k])`.
#[derive(Debug, Clone)]
pub(crate) struct Ridge {
    intercept: f64,
    mean: Vec<f64>,
    scale: Vec<f64>,
    coef: Vec<f64>,
}

impl Ridge {
    /// Fits on rows of `x` against `y` with L2 penalty `alpha`.
    ///
    /// Constant features get a zero coefficient. If the normal equations
    /// cannot be factorised the model falls back to the mean of `y`.
    pub(crate) fn fit(x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>, alpha: f64) -> Self {
        let n = x.nrows();
        let k = x.ncols();
        let nf = n.max(1) as f64;
        let y_mean = y.sum() / nf;

        let mean: Vec<f64> = (0..k).map(|j| x.column(j).sum() / nf).collect();
        let scale: Vec<f64> = (0..k)
            .map(|j| {
                let var = x.column(j).iter().map(|v| (v - mean[j]).powi(2)).sum::<f64>() / nf;
                if var > 0.0 { var.sqrt() } else { 1.0 }
            })
            .collect();

        let z = Array2::from_shape_fn((n, k), |(i, j)| (x[[i, j]] - mean[j]) / scale[j]);
        let yc = y.mapv(|v| v - y_mean);

        let mut gram = z.t().dot(&z);
        for d in 0..k {
            gram[[d, d]] += alpha;
        }
        let rhs = z.t().dot(&yc);

        let coef = match cholesky_solve(gram, rhs) {
            Some(beta) => beta.to_vec(),
            None => vec![0.0; k],
        };
        Self {
            intercept: y_mean,
            mean,
            scale,
            coef,
        }
    }

    pub(crate) fn predict(&self, row: ArrayView1<'_, f64>) -> f64 {
        self.intercept
            + row
                .iter()
                .zip(&self.mean)
                .zip(&self.scale)
                .zip(&self.coef)
                .map(|(((v, m), s), c)| c * (v - m) / s)
                .sum::<f64>()
    }
}

/// Solves `a * x = b` for symmetric positive-definite `a`.
///
/// Returns `None` if `a` is not positive definite.
pub(crate) fn cholesky_solve(a: Array2<f64>, b: Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[[i, j]];
            for p in 0..j {
                sum -= l[[i, p]] * l[[j, p]];
            }
            if i == j {
                if sum <= 0.0 || !sum.is_finite() {
                    return None;
                }
                l[[i, i]] = sum.sqrt();
            } else {
                l[[i, j]] = sum / l[[j, j]];
            }
        }
    }

    // Forward substitution: L y = b.
    let mut y = Array1::<f64>::zeros(n);
    for i in 0..n {
        let s: f64 = (0..i).map(|p| l[[i, p]] * y[p]).sum();
        y[i] = (b[i] - s) / l[[i, i]];
    }
    // Back substitution: L^T x = y.
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let s: f64 = (i + 1..n).map(|p| l[[p, i]] * x[p]).sum();
        x[i] = (y[i] - s) / l[[i, i]];
    }
    Some(x)
}
