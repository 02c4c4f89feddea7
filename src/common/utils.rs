//! This file provides small dense linear-algebra helpers.


/// Returns the inner product of `v1` and `v2`.
#[inline(always)]
pub fn inner_product(v1: &[f64], v2: &[f64]) -> f64 {
    v1.iter()
        .zip(v2)
        .map(|(a, b)| a * b)
        .sum::<f64>()
}


/// Returns the `ℓ1`-norm of `v`.
#[inline(always)]
pub fn l1_norm(v: &[f64]) -> f64 {
    v.iter()
        .map(|x| x.abs())
        .sum::<f64>()
}


/// Returns the `ℓ2`-norm of `v`.
#[inline(always)]
pub fn l2_norm(v: &[f64]) -> f64 {
    inner_product(v, v).sqrt()
}


/// Returns `‖v - center‖₂`.
#[inline(always)]
pub fn l2_distance(v: &[f64], center: &[f64]) -> f64 {
    v.iter()
        .zip(center)
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>()
        .sqrt()
}


/// `y ← y + a·x`.
#[inline(always)]
pub fn axpy(y: &mut [f64], a: f64, x: &[f64]) {
    y.iter_mut()
        .zip(x)
        .for_each(|(yi, xi)| { *yi += a * xi; });
}
