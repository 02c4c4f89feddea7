use rayon::prelude::*;

use crate::error::{AucError, Result};
use crate::common::utils;


/// Struct `Sample` holds a dense batch sample with binary labels.
/// Each row is a feature vector of fixed dimension `n_feature`
/// and each target is either `+1` or `-1`.
///
/// Optimizers borrow a `Sample` read-only for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    // Row-major feature matrix of shape `(n_sample, n_feature)`.
    data: Vec<f64>,
    target: Vec<f64>,
    n_sample: usize,
    n_feature: usize,
}


impl Sample {
    /// Construct a new `Sample` from the rows and labels.
    /// Returns `Err` if the rows are ragged
    /// or the number of rows differs from the number of labels.
    pub fn from_rows(rows: Vec<Vec<f64>>, target: Vec<f64>) -> Result<Self> {
        let n_sample = rows.len();
        if n_sample != target.len() {
            return Err(AucError::sample(format!(
                "{n_sample} rows but {} labels", target.len()
            )));
        }

        let n_feature = rows.first().map(|row| row.len()).unwrap_or(0);
        if let Some(i) = rows.iter().position(|row| row.len() != n_feature) {
            return Err(AucError::sample(format!(
                "row {i} has {} features, expected {n_feature}",
                rows[i].len(),
            )));
        }

        let data = rows.into_iter().flatten().collect::<Vec<_>>();
        Ok(Self { data, target, n_sample, n_feature })
    }


    /// Construct a new `Sample` from a row-major buffer.
    pub fn from_flat(data: Vec<f64>, n_feature: usize, target: Vec<f64>)
        -> Result<Self>
    {
        if n_feature == 0 {
            return Err(AucError::sample("the sample has no feature"));
        }
        if data.len() % n_feature != 0 {
            return Err(AucError::sample(format!(
                "buffer of length {} is not a multiple of {n_feature}",
                data.len(),
            )));
        }
        let n_sample = data.len() / n_feature;
        if n_sample != target.len() {
            return Err(AucError::sample(format!(
                "{n_sample} rows but {} labels", target.len()
            )));
        }
        Ok(Self { data, target, n_sample, n_feature })
    }


    /// Returns the pair of the number of examples and
    /// the number of features.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns the slice of target values.
    pub fn target(&self) -> &[f64] {
        &self.target[..]
    }


    /// Returns the `i`-th feature vector.
    /// Panics if `i` is out of range.
    #[inline(always)]
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.n_feature;
        &self.data[start..start + self.n_feature]
    }


    /// Returns an iterator over the feature vectors.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.n_feature.max(1))
            .take(self.n_sample)
    }


    /// Returns the row-major feature buffer.
    pub(crate) fn data(&self) -> &[f64] {
        &self.data[..]
    }


    /// Returns the number of positive and negative examples.
    pub fn class_counts(&self) -> (usize, usize) {
        let n_pos = self.target.iter()
            .filter(|&&y| y > 0f64)
            .count();
        (n_pos, self.n_sample - n_pos)
    }


    /// Returns the largest Euclidean norm over the feature vectors.
    /// This is the data-dependent choice of `kappa`.
    pub fn max_row_norm(&self) -> f64 {
        self.data.par_chunks(self.n_feature.max(1))
            .map(utils::l2_norm)
            .reduce(|| 0f64, f64::max)
    }


    /// Rescales every non-zero row to unit Euclidean norm.
    pub fn normalize_rows(mut self) -> Self {
        self.data.par_chunks_mut(self.n_feature.max(1))
            .for_each(|row| {
                let norm = utils::l2_norm(row);
                if norm > 0f64 {
                    row.iter_mut().for_each(|x| { *x /= norm; });
                }
            });
        self
    }


    /// Check whether `self` is a valid binary sample:
    /// non-empty, at least one feature, every feature value finite,
    /// and every label in `{-1, +1}`.
    pub fn is_valid_binary_instance(&self) -> Result<()> {
        if self.n_sample == 0 {
            return Err(AucError::sample("the sample is empty"));
        }
        if self.n_feature == 0 {
            return Err(AucError::sample("the sample has no feature"));
        }
        if let Some(k) = self.data.iter().position(|x| !x.is_finite()) {
            let (i, j) = (k / self.n_feature, k % self.n_feature);
            return Err(AucError::sample(format!(
                "feature {j} of example {i} is {}, expected a finite value",
                self.data[k],
            )));
        }
        if let Some(i) = self.target.iter().position(|&y| y != 1f64 && y != -1f64) {
            return Err(AucError::sample(format!(
                "label of example {i} is {}, expected +1 or -1",
                self.target[i],
            )));
        }
        Ok(())
    }
}
