//! The projected primal-dual step shared by the optimizers.
//!
//! Both algorithms solve a saddle-point problem over four blocks:
//! the weight vector `w`, the score centroids `a`, `b` (descent)
//! and the dual variable `alpha` (ascent).
//! They differ only in block sizes and in how each block is projected.

/// The four blocks of a primal-dual iterate.
/// `a`, `b`, `alpha` have length one for FSAUC
/// and `N + 1` for SAUC.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimalDual {
    /// Weight vector.
    pub w: Vec<f64>,
    /// Positive-side auxiliary block.
    pub a: Vec<f64>,
    /// Negative-side auxiliary block.
    pub b: Vec<f64>,
    /// Dual block.
    pub alpha: Vec<f64>,
}


/// Projection applied after every gradient step.
pub trait BlockProjection {
    /// Maps `iterate` back onto the feasible set.
    fn project(&self, iterate: &mut PrimalDual);
}


impl PrimalDual {
    /// An all-zero iterate with `w` of length `dim`
    /// and the other blocks of length `width`.
    pub fn zeros(dim: usize, width: usize) -> Self {
        Self {
            w: vec![0f64; dim],
            a: vec![0f64; width],
            b: vec![0f64; width],
            alpha: vec![0f64; width],
        }
    }


    /// Gradient descent on `w`, `a`, `b`, ascent on `alpha`,
    /// followed by `projection`.
    pub fn step<P>(&mut self, grad: &PrimalDual, eta: f64, projection: &P)
        where P: BlockProjection + ?Sized,
    {
        descend(&mut self.w, &grad.w, eta);
        descend(&mut self.a, &grad.a, eta);
        descend(&mut self.b, &grad.b, eta);
        descend(&mut self.alpha, &grad.alpha, -eta);
        projection.project(self);
    }


    /// `self += other`, block-wise.
    pub fn accumulate(&mut self, other: &PrimalDual) {
        self.zip_blocks(other, |x, y| x + y);
    }


    /// `self *= s`, block-wise.
    pub fn scale(&mut self, s: f64) {
        self.blocks_mut()
            .for_each(|block| block.iter_mut().for_each(|x| { *x *= s; }));
    }


    /// Running average: `self = (t · self + iterate) / (t + 1)`.
    pub fn cesaro(&mut self, iterate: &PrimalDual, t: usize) {
        let t = t as f64;
        self.zip_blocks(iterate, |x, y| (t * x + y) / (t + 1f64));
    }


    /// Overwrites `self` with `other` without reallocating.
    pub fn copy_from(&mut self, other: &PrimalDual) {
        self.zip_blocks(other, |_, y| y);
    }


    /// Sets every entry to zero.
    pub fn clear(&mut self) {
        self.blocks_mut()
            .for_each(|block| block.iter_mut().for_each(|x| { *x = 0f64; }));
    }


    fn blocks_mut(&mut self) -> impl Iterator<Item = &mut Vec<f64>> {
        [&mut self.w, &mut self.a, &mut self.b, &mut self.alpha].into_iter()
    }


    fn zip_blocks<F>(&mut self, other: &PrimalDual, f: F)
        where F: Fn(f64, f64) -> f64,
    {
        let others = [&other.w, &other.a, &other.b, &other.alpha];
        self.blocks_mut()
            .zip(others)
            .for_each(|(block, src)| {
                block.iter_mut()
                    .zip(src)
                    .for_each(|(x, y)| { *x = f(*x, *y); });
            });
    }
}


#[inline(always)]
fn descend(x: &mut [f64], g: &[f64], eta: f64) {
    x.iter_mut()
        .zip(g)
        .for_each(|(xi, gi)| { *xi -= eta * gi; });
}


#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;
    impl BlockProjection for Identity {
        fn project(&self, _: &mut PrimalDual) {}
    }

    struct Zero;
    impl BlockProjection for Zero {
        fn project(&self, iterate: &mut PrimalDual) {
            iterate.clear();
        }
    }

    #[test]
    fn test_step_descends_primal_and_ascends_dual() {
        let mut iterate = PrimalDual::zeros(2, 1);
        let grad = PrimalDual {
            w: vec![1.0, -2.0],
            a: vec![1.0],
            b: vec![-1.0],
            alpha: vec![4.0],
        };
        iterate.step(&grad, 0.5, &Identity);
        assert_eq!(iterate.w, vec![-0.5, 1.0]);
        assert_eq!(iterate.a, vec![-0.5]);
        assert_eq!(iterate.b, vec![0.5]);
        assert_eq!(iterate.alpha, vec![2.0]);

        iterate.step(&grad, 0.5, &Zero);
        assert_eq!(iterate, PrimalDual::zeros(2, 1));
    }

    #[test]
    fn test_cesaro_matches_arithmetic_mean() {
        let points = [1.0, 2.0, 6.0, -3.0];
        let mut average = PrimalDual::zeros(1, 1);
        average.w[0] = points[0];
        for (t, p) in points.iter().enumerate().skip(1) {
            let mut iterate = PrimalDual::zeros(1, 1);
            iterate.w[0] = *p;
            average.cesaro(&iterate, t);
        }
        assert!((average.w[0] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_accumulate_then_scale() {
        let mut sum = PrimalDual::zeros(1, 2);
        let mut x = PrimalDual::zeros(1, 2);
        x.a = vec![1.0, 3.0];
        sum.accumulate(&x);
        sum.accumulate(&x);
        sum.scale(0.5);
        assert_eq!(sum.a, vec![1.0, 3.0]);

        let mut copy = PrimalDual::zeros(1, 2);
        copy.copy_from(&sum);
        assert_eq!(copy, sum);
    }
}
