use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::utils;
use crate::sample::Sample;


/// A linear scoring function `x ↦ ⟨w, x⟩`.
/// Only the order of the scores matters for the AUC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearScorer {
    weights: Vec<f64>,
}


impl LinearScorer {
    /// Construct a new `LinearScorer` from a weight vector.
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }


    /// Returns the weight vector.
    pub fn weights(&self) -> &[f64] {
        &self.weights[..]
    }


    /// Returns the score of a single feature vector.
    #[inline(always)]
    pub fn confidence(&self, x: &[f64]) -> f64 {
        utils::inner_product(&self.weights, x)
    }


    /// Returns the scores of all the examples in `sample`.
    ///
    /// Time complexity: `O(nd)`, spread over the `rayon` thread pool.
    pub fn confidence_all(&self, sample: &Sample) -> Vec<f64> {
        let n_feature = sample.shape().1;
        sample.data()
            .par_chunks(n_feature.max(1))
            .map(|row| self.confidence(row))
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_all() {
        let rows = vec![vec![1.0, 2.0], vec![-1.0, 0.5], vec![0.0, 0.0]];
        let sample = Sample::from_rows(rows, vec![1.0, -1.0, 1.0]).unwrap();
        let scorer = LinearScorer::new(vec![2.0, -1.0]);
        assert_eq!(scorer.confidence_all(&sample), vec![0.0, -2.5, 0.0]);
        assert_eq!(scorer.confidence(&[1.0, 1.0]), 1.0);
    }
}
