//! Seeded isolation forest.
//!
//! Each tree isolates a random subsample by recursive random splits; points
//! that are isolated in few splits are anomalous. The decision score is the
//! raw anomaly score shifted by its `contamination` percentile over the
//! training data, so negative scores mark outliers and higher scores mean
//! more normal.

use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::error::OutlierError;
use crate::scorer::AnomalyScorer;

/// Default number of trees.
pub const DEFAULT_N_ESTIMATORS: usize = 300;

/// Default subsample size per tree (capped at the number of rows).
pub const DEFAULT_MAX_SAMPLES: usize = 256;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Average path length of an unsuccessful binary-search-tree lookup over
/// `n` points, used to normalise depths.
pub(crate) fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let nf = n as f64;
            2.0 * ((nf - 1.0).ln() + EULER_GAMMA) - 2.0 * (nf - 1.0) / nf
        }
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// One isolation tree stored as a flat node arena; node 0 is the root.
#[derive(Debug, Clone)]
struct IsolationTree {
    nodes: Vec<Node>,
}

impl IsolationTree {
    fn fit(x: ArrayView2<'_, f64>, sample: &mut [usize], max_depth: usize, rng: &mut StdRng) -> Self {
        let mut nodes = Vec::with_capacity(2 * sample.len());
        grow(x, sample, 0, max_depth, rng, &mut nodes);
        Self { nodes }
    }

    /// Depth at which `row` lands, plus the expected remaining depth of its leaf.
    fn path_length(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut node = 0;
        let mut depth = 0usize;
        loop {
            match self.nodes[node] {
                Node::Leaf { size } => return depth as f64 + average_path_length(size),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[feature] <= threshold { left } else { right };
                    depth += 1;
                }
            }
        }
    }
}

/// Grows the subtree for `rows` and returns its node index.
fn grow(
    x: ArrayView2<'_, f64>,
    rows: &mut [usize],
    depth: usize,
    max_depth: usize,
    rng: &mut StdRng,
    nodes: &mut Vec<Node>,
) -> usize {
    let id = nodes.len();
    nodes.push(Node::Leaf { size: rows.len() });
    if depth >= max_depth || rows.len() <= 1 {
        return id;
    }

    // Only features that still vary within this node can split it.
    let candidates: Vec<(usize, f64, f64)> = (0..x.ncols())
        .filter_map(|f| {
            let (lo, hi) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &i| {
                (lo.min(x[[i, f]]), hi.max(x[[i, f]]))
            });
            (hi > lo).then_some((f, lo, hi))
        })
        .collect();
    if candidates.is_empty() {
        return id;
    }

    let (feature, lo, hi) = candidates[rng.random_range(0..candidates.len())];
    let mut threshold = split_threshold(lo, hi, rng);
    if threshold >= hi {
        threshold = lo;
    }

    let mut split = 0;
    for k in 0..rows.len() {
        if x[[rows[k], feature]] <= threshold {
            rows.swap(k, split);
            split += 1;
        }
    }
    let (left_rows, right_rows) = rows.split_at_mut(split);
    let left = grow(x, left_rows, depth + 1, max_depth, rng, nodes);
    let right = grow(x, right_rows, depth + 1, max_depth, rng, nodes);
    nodes[id] = Node::Split {
        feature,
        threshold,
        left,
        right,
    };
    id
}

/// Uniform split point in `[lo, hi)`.
///
/// Finite bounds can still have an infinite span (`-1e308..1e308`); such
/// nodes split at the midpoint instead.
fn split_threshold(lo: f64, hi: f64, rng: &mut StdRng) -> f64 {
    let span = hi - lo;
    if span.is_finite() {
        lo + rng.random::<f64>() * span
    } else {
        lo / 2.0 + hi / 2.0
    }
}

// ---------------------------------------------------------------------------
// Forest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct FittedForest {
    trees: Vec<IsolationTree>,
    sample_size: usize,
    n_features: usize,
    offset: f64,
}

impl FittedForest {
    /// Raw anomaly score per row in `[-1, 0)`; more negative is more anomalous.
    fn raw_scores(&self, x: ArrayView2<'_, f64>) -> Vec<f64> {
        let norm = average_path_length(self.sample_size).max(1.0);
        let n_trees = self.trees.len() as f64;
        (0..x.nrows())
            .into_par_iter()
            .map(|i| {
                let row = x.row(i);
                let mean_depth = self.trees.iter().map(|t| t.path_length(row)).sum::<f64>() / n_trees;
                -(2.0_f64).powf(-mean_depth / norm)
            })
            .collect()
    }
}

/// Isolation forest anomaly scorer.
///
/// Trees are grown in parallel, each from its own seed drawn up-front from
/// the master seed, so results do not depend on thread scheduling.
///
/// # Example
///
/// ```
/// use climaqc_outlier::{AnomalyScorer, IsolationForest};
/// use ndarray::Array2;
///
/// let mut x = Array2::<f64>::zeros((50, 1));
/// for i in 0..49 {
///     x[[i, 0]] = (i % 7) as f64;
/// }
/// x[[49, 0]] = 1000.0;
///
/// let mut forest = IsolationForest::new(0.02).with_n_estimators(100);
/// forest.fit(x.view()).unwrap();
/// let flags = forest.classify(x.view()).unwrap();
/// assert!(flags[49]);
/// ```
#[derive(Debug, Clone)]
pub struct IsolationForest {
    contamination: f64,
    n_estimators: usize,
    max_samples: usize,
    seed: u64,
    fitted: Option<FittedForest>,
}

impl IsolationForest {
    /// Creates an unfitted forest with default size and seed.
    pub fn new(contamination: f64) -> Self {
        Self {
            contamination,
            n_estimators: DEFAULT_N_ESTIMATORS,
            max_samples: DEFAULT_MAX_SAMPLES,
            seed: DEFAULT_SEED,
            fitted: None,
        }
    }

    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn contamination(&self) -> f64 {
        self.contamination
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Decision threshold on the raw score, once fitted.
    pub fn offset(&self) -> Option<f64> {
        self.fitted.as_ref().map(|f| f.offset)
    }

    /// Checks contamination and forest size.
    pub fn validate(&self) -> Result<(), OutlierError> {
        if !(self.contamination > 0.0 && self.contamination < 0.5) {
            return Err(OutlierError::InvalidContamination {
                value: self.contamination,
            });
        }
        if self.n_estimators == 0 {
            return Err(OutlierError::InvalidForestParameter {
                name: "n_estimators",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_samples == 0 {
            return Err(OutlierError::InvalidForestParameter {
                name: "max_samples",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Raw anomaly scores in `[-1, 0)`, before the contamination offset.
    pub fn score_samples(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, OutlierError> {
        let fitted = self.fitted.as_ref().ok_or(OutlierError::NotFitted)?;
        if x.ncols() != fitted.n_features {
            return Err(OutlierError::FeatureMismatch {
                expected: fitted.n_features,
                got: x.ncols(),
            });
        }
        check_finite(x)?;
        Ok(Array1::from_vec(fitted.raw_scores(x)))
    }
}

fn check_finite(x: ArrayView2<'_, f64>) -> Result<(), OutlierError> {
    match x.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, column), _)) => Err(OutlierError::NonFiniteFeature { row, column }),
        None => Ok(()),
    }
}

impl AnomalyScorer for IsolationForest {
    fn fit(&mut self, x: ArrayView2<'_, f64>) -> Result<(), OutlierError> {
        self.validate()?;
        let n = x.nrows();
        if n == 0 {
            return Err(OutlierError::EmptyTrainingSet);
        }
        check_finite(x)?;

        let sample_size = self.max_samples.min(n);
        let max_depth = (sample_size as f64).log2().ceil() as usize;

        let mut master = StdRng::seed_from_u64(self.seed);
        let tree_seeds: Vec<u64> = (0..self.n_estimators).map(|_| master.random()).collect();
        let trees: Vec<IsolationTree> = tree_seeds
            .par_iter()
            .map(|&seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut sample = index::sample(&mut rng, n, sample_size).into_vec();
                IsolationTree::fit(x, &mut sample, max_depth, &mut rng)
            })
            .collect();

        let mut fitted = FittedForest {
            trees,
            sample_size,
            n_features: x.ncols(),
            offset: 0.0,
        };
        let mut training = fitted.raw_scores(x);
        training.sort_by(f64::total_cmp);
        fitted.offset = climaqc_stats::quantile_type7(&training, self.contamination);

        debug!(
            n_rows = n,
            n_trees = fitted.trees.len(),
            sample_size,
            max_depth,
            offset = fitted.offset,
            "fitted isolation forest"
        );
        self.fitted = Some(fitted);
        Ok(())
    }

    fn score(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, OutlierError> {
        let offset = self.offset().ok_or(OutlierError::NotFitted)?;
        Ok(self.score_samples(x)? - offset)
    }
}
