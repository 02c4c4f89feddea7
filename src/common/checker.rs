//! This file defines some functions that checks some pre-conditions.
//! E.g., positivity of radii.

use crate::error::{AucError, Result};


/// Check whether the radius parameter is positive and finite.
#[inline(always)]
pub(crate) fn radius(name: &str, r: f64) -> Result<()> {
    if r.is_finite() && r > 0f64 {
        Ok(())
    } else {
        Err(AucError::config(format!(
            "{name} must be a positive finite number. got {r}."
        )))
    }
}


/// Check the step-size scale.
#[inline(always)]
pub(crate) fn step_scale(c: f64) -> Result<()> {
    radius("step scale `c`", c)
}


/// Check the failure probability of the confidence bounds.
#[inline(always)]
pub(crate) fn delta(delta: f64) -> Result<()> {
    if delta > 0f64 && delta < 1f64 {
        Ok(())
    } else {
        Err(AucError::config(format!(
            "`delta` must be in (0, 1). got {delta}."
        )))
    }
}


/// Check the degree of the Bernstein polynomial.
#[inline(always)]
pub(crate) fn degree(n: usize) -> Result<()> {
    if n > 0 {
        Ok(())
    } else {
        Err(AucError::config("the Bernstein degree must be at least 1"))
    }
}


/// Check that every index of the traversal order points into the sample.
#[inline(always)]
pub(crate) fn traversal_order(ids: &[usize], n_sample: usize) -> Result<()> {
    if let Some(pos) = ids.iter().position(|&i| i >= n_sample) {
        return Err(AucError::config(format!(
            "ids[{pos}] = {} is out of range for {n_sample} examples",
            ids[pos],
        )));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_success() {
        assert!(radius("R", 1e-3).is_ok());
        assert!(radius("R", 1e20).is_ok());
    }

    #[test]
    fn test_radius_failure() {
        assert!(radius("R", 0f64).is_err());
        assert!(radius("R", -1f64).is_err());
        assert!(radius("R", f64::NAN).is_err());
        assert!(radius("R", f64::INFINITY).is_err());
    }

    #[test]
    fn test_delta() {
        assert!(delta(0.1).is_ok());
        assert!(delta(0f64).is_err());
        assert!(delta(1f64).is_err());
    }

    #[test]
    fn test_degree() {
        assert!(degree(1).is_ok());
        assert!(degree(0).is_err());
    }

    #[test]
    fn test_traversal_order() {
        assert!(traversal_order(&[0, 1, 2, 1], 3).is_ok());
        assert!(traversal_order(&[0, 3], 3).is_err());
    }
}
