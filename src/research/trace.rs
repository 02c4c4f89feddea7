use serde::{Deserialize, Serialize};

use crate::error::Result;


/// Scores recorded during a run of [`Logger`](super::Logger).
///
/// `iterations`, `elapsed` and `scores` are parallel sequences.
/// A recording point whose predictions were not finite is skipped,
/// so `len()` may be smaller than `n_scheduled()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    iterations: Vec<usize>,
    elapsed: Vec<f64>,
    scores: Vec<f64>,
    n_scheduled: usize,
    n_skipped: usize,
}


impl Trace {
    pub(crate) fn new(n_scheduled: usize) -> Self {
        Self {
            iterations: Vec::with_capacity(n_scheduled),
            elapsed: Vec::with_capacity(n_scheduled),
            scores: Vec::with_capacity(n_scheduled),
            n_scheduled,
            n_skipped: 0,
        }
    }


    pub(crate) fn push(&mut self, iteration: usize, elapsed: f64, score: f64) {
        self.iterations.push(iteration);
        self.elapsed.push(elapsed);
        self.scores.push(score);
    }


    pub(crate) fn skip(&mut self) {
        self.n_skipped += 1;
    }


    /// Inner-step indices (1-indexed) of the recorded samples.
    pub fn iterations(&self) -> &[usize] {
        &self.iterations[..]
    }


    /// Elapsed seconds at each recorded sample, evaluation time excluded.
    pub fn elapsed(&self) -> &[f64] {
        &self.elapsed[..]
    }


    /// Held-out scores of the recorded samples.
    pub fn scores(&self) -> &[f64] {
        &self.scores[..]
    }


    /// The last recorded score, if any.
    pub fn last_score(&self) -> Option<f64> {
        self.scores.last().copied()
    }


    /// Number of recording points of a complete run.
    pub fn n_scheduled(&self) -> usize {
        self.n_scheduled
    }


    /// Number of recording points skipped for non-finite predictions.
    pub fn n_skipped(&self) -> usize {
        self.n_skipped
    }


    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.scores.len()
    }


    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }


    /// Serializes the trace as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
