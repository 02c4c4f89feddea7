//! Traversal orders are produced by the caller, never by the optimizers.
//! The functions here are conveniences for experiment drivers.
use rand::prelude::*;


/// Returns `0, 1, ..., n_sample - 1` repeated `n_pass` times.
pub fn sequential_passes(n_sample: usize, n_pass: usize) -> Vec<usize> {
    (0..n_pass).flat_map(|_| 0..n_sample)
        .collect()
}


/// Returns `n_pass` independent permutations of `0..n_sample`,
/// concatenated.
/// The generator is seeded per call, so two calls with the same
/// arguments return the same order.
pub fn shuffled_passes(n_sample: usize, n_pass: usize, seed: u64)
    -> Vec<usize>
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ids = Vec::with_capacity(n_sample * n_pass);
    for _ in 0..n_pass {
        let mut pass = (0..n_sample).collect::<Vec<_>>();
        pass.shuffle(&mut rng);
        ids.extend(pass);
    }
    ids
}
