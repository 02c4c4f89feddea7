//! Bernstein-polynomial approximation of a pairwise surrogate loss.
//!
//! Let `f` be a surrogate loss on `[0, 1]` and `L` the score bound.
//! The degree-`N` Bernstein polynomial of `f`, written in powers of
//! `u = L/2 + ⟨w, x⁺⟩` and `v = L/2 - ⟨w, x⁻⟩`, splits as
//! ```txt
//! f((u + v) / 2L) ≈ 1/(N+1) · Σ_i  u^i · F_i(v),
//! F_i(v) = Σ_{k≥i} C(N,k)·C(k,i)·(N+1)·Δ^k f(0) / (2L)^k · v^(k-i),
//! ```
//! so the pairwise objective only needs per-example vectors
//! `(u^i)_i` and `(F_i(v))_i` and never materializes pairs.
use serde::Serialize;

use crate::common::{checker, SurrogateLoss};
use crate::error::{AucError, Result};


/// Returns the table `C[n][k] = n! / (k! (n-k)!)` for `0 ≤ k ≤ n ≤ degree`,
/// built with Pascal's rule.
pub fn binomial_table(degree: usize) -> Vec<Vec<f64>> {
    let mut table: Vec<Vec<f64>> = Vec::with_capacity(degree + 1);
    for n in 0..=degree {
        let mut row = vec![1f64; n + 1];
        for k in 1..n {
            row[k] = table[n - 1][k - 1] + table[n - 1][k];
        }
        table.push(row);
    }
    table
}


/// Coefficients of the negative-side polynomials `F_i`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BernsteinCoefficients {
    degree: usize,
    beta: Vec<Vec<f64>>,
    gbeta: Vec<Vec<f64>>,
}


impl BernsteinCoefficients {
    /// Degree `N` of the approximation.
    pub fn degree(&self) -> usize {
        self.degree
    }


    /// `beta[i][j]` is the coefficient of `v^j` in `F_i(v)`.
    pub fn beta(&self) -> &[Vec<f64>] {
        &self.beta[..]
    }


    /// `gbeta[i][j] = j · beta[i][j]`, the coefficients of `F_i'`
    /// shifted by one power.
    pub fn gbeta(&self) -> &[Vec<f64>] {
        &self.gbeta[..]
    }


    /// Returns the approximated loss of the pair whose positive score is
    /// `pos_prod` and whose negative score is `neg_prod`.
    pub fn approximate_loss(&self, pos_prod: f64, neg_prod: f64, l: f64)
        -> f64
    {
        let (fpt, _) = positive_term(self.degree, pos_prod, l);
        let (fnt, _) = negative_term(self.degree, neg_prod, l, self);
        let sum = fpt.iter()
            .zip(&fnt)
            .map(|(p, n)| p * n)
            .sum::<f64>();
        sum / (self.degree + 1) as f64
    }
}


/// Magnitude and curvature bounds of the approximation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct BernsteinBounds {
    /// Bound on `‖(u^i)_i‖`, the radius of the `a` ball.
    pub r1: f64,
    /// Bound on `‖(F_i(v))_i‖`, the radius of the `b` ball.
    pub r2: f64,
    /// Curvature constant used as the proximal weight.
    pub gamma: f64,
}


/// Forward differences `Δ^k f(0) = Σ_j C(k,j) (-1)^(k-j) f(j/N)`.
fn forward_differences(
    degree: usize,
    loss: SurrogateLoss,
    l: f64,
    comb: &[Vec<f64>],
) -> Vec<f64>
{
    let values = (0..=degree)
        .map(|j| loss.eval(j as f64 / degree as f64, l))
        .collect::<Vec<_>>();

    (0..=degree).map(|k| {
            (0..=k).map(|j| {
                    let sign = if (k - j) % 2 == 0 { 1f64 } else { -1f64 };
                    sign * comb[k][j] * values[j]
                })
                .sum::<f64>()
        })
        .collect()
}


fn check_inputs(degree: usize, l: f64, comb: &[Vec<f64>]) -> Result<()> {
    checker::degree(degree)?;
    checker::radius("score bound `L`", l)?;
    if comb.len() <= degree {
        return Err(AucError::config(format!(
            "binomial table of size {} cannot serve degree {degree}",
            comb.len(),
        )));
    }
    Ok(())
}


/// Computes the coefficients `beta[i]` (length `N - i + 1`) and
/// `gbeta[i] = beta[i] · (k - i)` of the degree-`N` approximation of `loss`.
pub fn polynomial_coefficients(
    degree: usize,
    loss: SurrogateLoss,
    l: f64,
    comb: &[Vec<f64>],
) -> Result<BernsteinCoefficients>
{
    check_inputs(degree, l, comb)?;

    let n = degree;
    let delta = forward_differences(n, loss, l, comb);
    let scale = (n + 1) as f64;

    let mut beta = Vec::with_capacity(n + 1);
    let mut gbeta = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let b = (i..=n).map(|k| {
                comb[n][k] * comb[k][i] * scale * delta[k]
                    / (2f64 * l).powi(k as i32)
            })
            .collect::<Vec<_>>();
        let g = b.iter()
            .enumerate()
            .map(|(j, bj)| bj * j as f64)
            .collect::<Vec<_>>();
        beta.push(b);
        gbeta.push(g);
    }

    Ok(BernsteinCoefficients { degree, beta, gbeta })
}


/// Computes `R1`, `R2` and `gamma` for the degree-`N` approximation.
///
/// Division by `L^i` makes the constants explode for small `L`,
/// and `L^N` overflows for huge `L`; the latter yields a non-finite
/// `gamma` that the caller has to tolerate.
pub fn bound_constants(
    degree: usize,
    loss: SurrogateLoss,
    l: f64,
    comb: &[Vec<f64>],
) -> Result<BernsteinBounds>
{
    check_inputs(degree, l, comb)?;

    let n = degree;
    let delta = forward_differences(n, loss, l, comb);
    let scale = (n + 1) as f64;

    let (mut r1, mut r2) = (0f64, 0f64);
    let (mut sp1, mut sp2) = (0f64, 0f64);
    let (mut sm1, mut sm2) = (0f64, 0f64);
    for i in 0..=n {
        let fi = i as f64;
        let exp = i as i32;
        r1 += l.powi(exp);
        sp1 += fi * l.powi(exp - 1);
        sp2 += fi * (fi - 1f64) * l.powi(exp - 2);

        for k in i..=n {
            let common = comb[n][k] * comb[k][i] * scale * delta[k].abs()
                / 2f64.powi(k as i32);
            let gap = (k - i) as f64;
            r2 += common / l.powi(exp);
            sm1 += common * gap / l.powi(exp + 1);
            sm2 += common * gap * (gap - 1f64) / l.powi(exp + 2);
        }
    }

    let gamma = f64::max(
        (2f64 * r1 + r2) * sp2 + sp1.powi(2),
        (2f64 * r2 + r1) * sm2 + sm1.powi(2),
    ) / scale;

    Ok(BernsteinBounds { r1, r2, gamma })
}


/// Returns `(u^i)_i` and `(i · u^(i-1))_i` for `u = L/2 + prod`.
pub fn positive_term(degree: usize, prod: f64, l: f64) -> (Vec<f64>, Vec<f64>) {
    let mut value = vec![0f64; degree + 1];
    let mut grad = vec![0f64; degree + 1];
    positive_term_into(prod, l, &mut value, &mut grad);
    (value, grad)
}


/// Writes `(u^i)_i` into `value` and `(i · u^(i-1))_i` into `grad`
/// for `u = L/2 + prod`.
/// Both slices have length `N + 1`.
#[inline]
pub fn positive_term_into(
    prod: f64,
    l: f64,
    value: &mut [f64],
    grad: &mut [f64],
)
{
    fill_powers(value, l / 2f64 + prod);
    grad.iter_mut()
        .enumerate()
        .for_each(|(i, g)| {
            *g = if i == 0 { 0f64 } else { i as f64 * value[i - 1] };
        });
}


/// Returns `(F_i(v))_i` and `(F_i'(v))_i` for `v = L/2 - prod`.
pub fn negative_term(
    degree: usize,
    prod: f64,
    l: f64,
    coef: &BernsteinCoefficients,
) -> (Vec<f64>, Vec<f64>)
{
    let mut powers = vec![0f64; degree + 1];
    let mut value = vec![0f64; degree + 1];
    let mut grad = vec![0f64; degree + 1];
    negative_term_into(prod, l, coef, &mut powers, &mut value, &mut grad);
    (value, grad)
}


/// Writes `(F_i(v))_i` into `value` and `(F_i'(v))_i` into `grad`
/// for `v = L/2 - prod`.
/// `powers` is scratch space.
/// All three slices have length `N + 1`.
#[inline]
pub fn negative_term_into(
    prod: f64,
    l: f64,
    coef: &BernsteinCoefficients,
    powers: &mut [f64],
    value: &mut [f64],
    grad: &mut [f64],
)
{
    fill_powers(powers, l / 2f64 - prod);
    let powers = &*powers;

    coef.beta.iter()
        .zip(&coef.gbeta)
        .zip(value.iter_mut().zip(grad.iter_mut()))
        .for_each(|((beta, gbeta), (f, g))| {
            *f = beta.iter()
                .zip(powers)
                .map(|(b, p)| b * p)
                .sum::<f64>();
            *g = gbeta.iter()
                .skip(1)
                .zip(powers)
                .map(|(b, p)| b * p)
                .sum::<f64>();
        });
}


#[inline(always)]
fn fill_powers(powers: &mut [f64], base: f64) {
    let mut p = 1f64;
    for x in powers.iter_mut() {
        *x = p;
        p *= base;
    }
}
