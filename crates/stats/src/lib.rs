//! Statistical helper functions for daily climate series.
//!
//! All functions take plain `&[f64]` slices. Callers strip missing values
//! before calling; [`sorted_finite`] does that and sorts in one step.
//!
//! The moment helpers ([`mean`], [`variance`], [`sd`]) and the type-7
//! [`quantile_type7`] back the summary and the forest offset. The shape
//! statistics [`skewness`] and [`kurtosis`] exist for the summary report.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Linear-interpolation quantile (type 7, the numpy/pandas default).
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Copies the finite values of `data` and sorts them ascending.
pub fn sorted_finite(data: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Sum of `(x - mean)^k` over the slice.
fn central_moment_sum(data: &[f64], mean: f64, k: i32) -> f64 {
    data.iter().map(|&x| (x - mean).powi(k)).sum()
}

/// Bias-adjusted sample skewness (adjusted Fisher-Pearson, G1).
///
/// Returns `None` for fewer than 3 values and `Some(0.0)` for constant
/// input.
pub fn skewness(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 3 {
        return None;
    }
    let nf = n as f64;
    let m = mean(data);
    let m2 = central_moment_sum(data, m, 2) / nf;
    if m2 <= f64::EPSILON * m.abs().max(1.0) {
        return Some(0.0);
    }
    let m3 = central_moment_sum(data, m, 3) / nf;
    let g1 = m3 / m2.powf(1.5);
    Some(g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0))
}

/// Bias-adjusted excess kurtosis (Fisher, G2; normal = 0).
///
/// Returns `None` for fewer than 4 values and `Some(0.0)` for constant
/// input.
pub fn kurtosis(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 4 {
        return None;
    }
    let nf = n as f64;
    let m = mean(data);
    let s2 = central_moment_sum(data, m, 2);
    if s2 / nf <= f64::EPSILON * m.abs().max(1.0) {
        return Some(0.0);
    }
    let s4 = central_moment_sum(data, m, 4);
    let numerator = nf * (nf + 1.0) * (nf - 1.0) * s4;
    let denominator = (nf - 2.0) * (nf - 3.0) * s2 * s2;
    let adjustment = 3.0 * (nf - 1.0).powi(2) / ((nf - 2.0) * (nf - 3.0));
    Some(numerator / denominator - adjustment)
}
