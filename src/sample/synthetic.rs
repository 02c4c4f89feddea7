use rand::prelude::*;
use rand_distr::Normal;

use crate::error::{AucError, Result};
use super::Sample;


/// Draws two Gaussian clusters with labels `+1` and `-1`.
/// The positive cluster is centered at `+separation / 2 · 1/√d`,
/// the negative one at the opposite point, and each coordinate has
/// standard deviation `spread` (non-negative).
/// Labels alternate so that a round-robin traversal sees both classes.
pub fn gaussian_clusters(
    n_sample: usize,
    n_feature: usize,
    separation: f64,
    spread: f64,
    seed: u64,
) -> Result<Sample>
{
    if n_sample == 0 || n_feature == 0 {
        return Err(AucError::sample("cannot draw an empty sample"));
    }
    if !(spread.is_finite() && spread >= 0f64) {
        return Err(AucError::config(format!(
            "`spread` must be a non-negative finite number. got {spread}."
        )));
    }
    let noise = Normal::new(0f64, spread)
        .map_err(|e| AucError::config(format!("spread = {spread}: {e}")))?;

    let mut rng = StdRng::seed_from_u64(seed);
    let offset = separation / (2f64 * (n_feature as f64).sqrt());

    let mut data = Vec::with_capacity(n_sample * n_feature);
    let mut target = Vec::with_capacity(n_sample);
    for i in 0..n_sample {
        let y = if i % 2 == 0 { 1f64 } else { -1f64 };
        data.extend((0..n_feature).map(|_| y * offset + noise.sample(&mut rng)));
        target.push(y);
    }

    Sample::from_flat(data, n_feature, target)
}
