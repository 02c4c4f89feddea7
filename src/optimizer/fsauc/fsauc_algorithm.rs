//! Provides `FSAUC` by Liu, Zhang, Chen, Yang and Yang, 2018.
use serde::Serialize;

use crate::common::{checker, utils};
use crate::common::projection::{DualRegion, PrimalRegion};
use crate::constants::VACUOUS_BOUND_SENTINEL;
use crate::error::{AucError, Result};
use crate::hypothesis::LinearScorer;
use crate::optimizer::{BlockProjection, Optimizer, PrimalDual, Recorder};
use crate::sample::Sample;

use super::FsaucParams;

use std::ops::ControlFlow;


/// Constants in effect during one epoch of [`FSAUC`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EpochContext {
    /// Radius `r` of the `ℓ2` ball around the epoch's starting point.
    pub radius: f64,
    /// Radius `D` of the dual `ℓ2` ball around the dual anchor.
    pub width: f64,
    /// Curvature constant `beta`.
    pub beta: f64,
    /// Step size `eta`.
    pub eta: f64,
}


/// The feasible set of one epoch:
/// the primal region around `[W, A, B]` and the dual region
/// around the anchor.
struct EpochBall<'a> {
    primal: PrimalRegion<'a>,
    dual: DualRegion<'a>,
}


impl BlockProjection for EpochBall<'_> {
    fn project(&self, iterate: &mut PrimalDual) {
        let PrimalDual { w, a, b, alpha } = iterate;
        self.primal.project(w, &mut a[0], &mut b[0]);
        self.dual.project(alpha);
    }
}


/// The Fast Stochastic AUC maximization algorithm (FSAUC).
///
/// FSAUC restarts a projected primal-dual stochastic gradient method
/// `m = ⌊log2(2n / log2 n) / 2⌋ - 1` times.
/// Each epoch runs `n0 = ⌊n / m⌋` steps inside an `ℓ2` ball around
/// the previous epoch's average, and the ball radius is halved
/// after every epoch.
/// Examples are visited in round-robin order.
///
/// # Example
/// ```no_run
/// use miniauc::prelude::*;
///
/// let train = gaussian_clusters(200, 2, 4.0, 0.5, 0).unwrap();
/// let mut fsauc = FSAUC::init(&train)
///     .radius(1.0)
///     .delta(0.1)
///     .n_iter(1_000);
/// let scorer = fsauc.run().unwrap();
/// let scores = scorer.confidence_all(&train);
/// assert!(roc_auc(&scores, train.target()) > 0.9);
/// ```
pub struct FSAUC<'a> {
    // Training sample
    sample: &'a Sample,

    params: FsaucParams,

    // Number of epochs `m` and steps per epoch `n0`.
    n_epochs: usize,
    epoch_len: usize,

    // Gradient bound `G`.
    lipschitz: f64,

    // Constants of the upcoming epoch.
    context: EpochContext,
    history: Vec<EpochContext>,

    // `[W, A, B]` of the epoch start and the dual anchor in `alpha`.
    start: PrimalDual,
    iterate: PrimalDual,
    average: PrimalDual,
    grad: PrimalDual,

    // Class sums of the current epoch.
    pos_sum: Vec<f64>,
    neg_sum: Vec<f64>,

    iteration: usize,
}


impl<'a> FSAUC<'a> {
    /// Constructs a new instance of `FSAUC` with default parameters.
    ///
    /// Time complexity: `O(1)`.
    #[inline]
    pub fn init(sample: &'a Sample) -> Self {
        let context = EpochContext {
            radius: 0f64, width: 0f64, beta: 0f64, eta: 0f64,
        };
        Self {
            sample,
            params: FsaucParams::default(),

            n_epochs: 0,
            epoch_len: 0,
            lipschitz: 0f64,

            context,
            history: Vec::new(),

            start: PrimalDual::zeros(0, 1),
            iterate: PrimalDual::zeros(0, 1),
            average: PrimalDual::zeros(0, 1),
            grad: PrimalDual::zeros(0, 1),

            pos_sum: Vec::new(),
            neg_sum: Vec::new(),

            iteration: 0,
        }
    }


    /// Set the radius `R` of the `ℓ1` ball.
    #[inline]
    pub fn radius(mut self, radius: f64) -> Self {
        self.params.radius = radius;
        self
    }


    /// Set the scale `c` of the gradient bound.
    #[inline]
    pub fn step_scale(mut self, c: f64) -> Self {
        self.params.step_scale = c;
        self
    }


    /// Set the failure probability of the concentration bounds.
    #[inline]
    pub fn delta(mut self, delta: f64) -> Self {
        self.params.delta = delta;
        self
    }


    /// Set the total number of inner steps.
    #[inline]
    pub fn n_iter(mut self, n_iter: usize) -> Self {
        self.params.n_iter = n_iter;
        self
    }


    /// Set the bound on the example norms.
    #[inline]
    pub fn kappa(mut self, kappa: f64) -> Self {
        self.params.kappa = kappa;
        self
    }


    /// Set `kappa` to the largest example norm of the training sample.
    ///
    /// Time complexity: `O(nd)`.
    #[inline]
    pub fn estimate_kappa(mut self) -> Self {
        self.params.kappa = self.sample.max_row_norm();
        self
    }


    /// Replace all the hyperparameters at once.
    #[inline]
    pub fn params(mut self, params: FsaucParams) -> Self {
        self.params = params;
        self
    }


    /// Returns the constants of the upcoming epoch,
    /// or of the epoch after the last one once the run is over.
    pub fn epoch_context(&self) -> EpochContext {
        self.context
    }


    /// Returns the constants used by every finished epoch.
    pub fn epoch_history(&self) -> &[EpochContext] {
        &self.history[..]
    }


    /// Returns the length `n0` of an epoch.
    pub fn epoch_len(&self) -> usize {
        self.epoch_len
    }


    /// Number of epochs for a budget of `n_iter` steps,
    /// `⌊log2(2n / log2 n) / 2⌋ - 1`.
    /// Returns `None` if the budget cannot fill a single epoch.
    pub fn epochs_for(n_iter: usize) -> Option<usize> {
        if n_iter < 2 { return None; }
        let n = n_iter as f64;
        let m = ((2f64 * n / n.log2()).log2() / 2f64).floor() - 1f64;
        (m >= 1f64).then_some(m as usize)
    }


    fn check_params(&self) -> Result<()> {
        let p = &self.params;
        checker::radius("`R`", p.radius)?;
        checker::step_scale(p.step_scale)?;
        checker::delta(p.delta)?;
        checker::radius("`kappa`", p.kappa)?;
        Ok(())
    }


    /// Concentration-bound width `D` of the next dual ball.
    fn next_width(&self, pt: f64) -> f64 {
        let FsaucParams { radius, delta, kappa, .. } = self.params;
        let n0 = self.epoch_len as f64;
        let log_term = (12f64 / delta).ln();

        let tmp = pt.min(1f64 - pt) * n0 - (2f64 * n0 * log_term).sqrt();
        if tmp <= 0f64 { return VACUOUS_BOUND_SENTINEL; }

        2f64 * 2f64.sqrt() * kappa * self.context.radius
            + 4f64 * 2f64.sqrt() * kappa
            * (2f64 + (2f64 * log_term).sqrt())
            * (1f64 + 2f64 * kappa) * radius
            / tmp.sqrt()
    }


    /// Concentration-bound curvature `beta` of the next epoch.
    fn next_beta(&self, pt: f64) -> f64 {
        let FsaucParams { delta, kappa, .. } = self.params;
        let n0 = self.epoch_len as f64;
        let log_term = (12f64 / delta).ln();

        let tmp = pt.min(1f64 - pt) - (2f64 * log_term / n0).sqrt();
        if tmp <= 0f64 { return VACUOUS_BOUND_SENTINEL; }

        (1f64 + 8f64 * kappa.powi(2))
            + 32f64 * kappa.powi(2) * (1f64 + 2f64 * kappa).powi(2)
            * (2f64 + (2f64 * log_term).sqrt()).powi(2)
            / tmp
    }
}


impl Optimizer for FSAUC<'_> {
    fn name(&self) -> &str {
        "FSAUC"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let (n_examples, n_feature) = self.sample.shape();
        let p = &self.params;
        let info = Vec::from([
            ("# of examples", format!("{n_examples}")),
            ("# of features", format!("{n_feature}")),
            ("R", format!("{}", p.radius)),
            ("c", format!("{}", p.step_scale)),
            ("delta", format!("{}", p.delta)),
            ("kappa", format!("{}", p.kappa)),
            ("Max iteration", format!("{}", p.n_iter)),
            ("# of epochs", format!("{}", self.n_epochs)),
            ("Epoch length", format!("{}", self.epoch_len)),
        ]);
        Some(info)
    }


    fn preprocess(&mut self) -> Result<()> {
        self.sample.is_valid_binary_instance()?;
        self.check_params()?;

        let n_iter = self.params.n_iter;
        self.n_epochs = Self::epochs_for(n_iter)
            .ok_or_else(|| AucError::config(format!(
                "`T` = {n_iter} is too small to form a single epoch"
            )))?;
        self.epoch_len = n_iter / self.n_epochs;

        let FsaucParams { radius, step_scale, kappa, .. } = self.params;
        self.lipschitz = step_scale * [
            (1f64 + 4f64 * kappa) * kappa * (radius + 1f64),
            2f64 * kappa * (2f64 * radius + 1f64 + 2f64 * radius * kappa),
            2f64 * kappa * (4f64 * kappa * radius + 11f64 * radius + 1f64),
        ].into_iter().fold(f64::MIN, f64::max);

        let r = 2f64 * (1f64 + 2f64 * kappa.powi(2)).sqrt() * radius;
        self.context = EpochContext {
            radius: r,
            width: 2f64 * 2f64.sqrt() * kappa * r,
            beta: 1f64 + 8f64 * kappa.powi(2),
            eta: 0f64,
        };
        self.history = Vec::with_capacity(self.n_epochs);

        let dim = self.sample.shape().1;
        self.start = PrimalDual::zeros(dim, 1);
        self.iterate = PrimalDual::zeros(dim, 1);
        self.average = PrimalDual::zeros(dim, 1);
        self.grad = PrimalDual::zeros(dim, 1);
        self.pos_sum = vec![0f64; dim];
        self.neg_sum = vec![0f64; dim];

        self.iteration = 0;
        Ok(())
    }


    fn dimension(&self) -> usize {
        self.sample.shape().1
    }


    fn n_epochs(&self) -> usize {
        self.n_epochs
    }


    fn n_iterations(&self) -> usize {
        self.n_epochs * self.epoch_len
    }


    fn epoch<R>(&mut self, epoch: usize, recorder: &mut R)
        -> ControlFlow<usize>
        where R: Recorder,
    {
        if epoch > self.n_epochs {
            return ControlFlow::Break(self.iteration);
        }

        let sample = self.sample;
        let n_sample = sample.shape().0;
        let target = sample.target();
        let n0 = self.epoch_len;
        let offset = (epoch - 1) * n0;

        let FsaucParams { radius, kappa, .. } = self.params;
        self.context.eta = self.context.beta.sqrt()
            / ((3f64 * n0 as f64).sqrt() * self.lipschitz)
            * self.context.radius;
        let eta = self.context.eta;

        let mut center = self.start.w.clone();
        center.push(self.start.a[0]);
        center.push(self.start.b[0]);
        let anchor = [self.start.alpha[0]];
        let ball = EpochBall {
            primal: PrimalRegion {
                center: &center,
                radius: self.context.radius,
                bound: radius,
                kappa,
            },
            dual: DualRegion {
                center: &anchor,
                width: self.context.width,
                bound: radius,
                kappa,
            },
        };

        self.iterate.copy_from(&self.start);
        self.average.copy_from(&self.start);
        self.pos_sum.iter_mut().for_each(|s| { *s = 0f64; });
        self.neg_sum.iter_mut().for_each(|s| { *s = 0f64; });
        let (mut n_pos, mut n_neg) = (0usize, 0usize);
        let mut pt = 0f64;

        for t in 1..=n0 {
            let idx = (offset + t) % n_sample;
            let x = sample.row(idx);

            let prod = utils::inner_product(&self.iterate.w, x);
            let a = self.iterate.a[0];
            let b = self.iterate.b[0];
            let alpha = self.iterate.alpha[0];

            let (gw, ga, gb, galpha);
            if target[idx] > 0f64 {
                utils::axpy(&mut self.pos_sum, 1f64, x);
                n_pos += 1;
                pt = n_pos as f64 / (n_pos + n_neg) as f64;
                let q = 1f64 - pt;

                gw = 2f64 * q * (prod - a) - 2f64 * (1f64 + alpha) * q;
                ga = 2f64 * q * (a - prod);
                gb = 0f64;
                galpha = -2f64 * q * prod - 2f64 * pt * q * alpha;
            } else {
                utils::axpy(&mut self.neg_sum, 1f64, x);
                n_neg += 1;
                pt = n_pos as f64 / (n_pos + n_neg) as f64;

                gw = 2f64 * pt * (prod - b) + 2f64 * (1f64 + alpha) * pt;
                ga = 0f64;
                gb = 2f64 * pt * (b - prod);
                galpha = 2f64 * pt * prod - 2f64 * pt * (1f64 - pt) * alpha;
            }

            self.grad.w.iter_mut()
                .zip(x)
                .for_each(|(g, xi)| { *g = gw * xi; });
            self.grad.a[0] = ga;
            self.grad.b[0] = gb;
            self.grad.alpha[0] = galpha;

            self.iterate.step(&self.grad, eta, &ball);
            self.average.cesaro(&self.iterate, t);

            self.iteration += 1;
            recorder.record(self.iteration, &self.average.w);
        }

        // The averaged iterate is the next starting point.
        let anchor = self.start.alpha[0];
        self.start.copy_from(&self.average);
        self.start.alpha[0] = if n_pos > 0 && n_neg > 0 {
            let (tp, tm) = (n_pos as f64, n_neg as f64);
            self.neg_sum.iter()
                .zip(&self.pos_sum)
                .zip(&self.average.w)
                .map(|((m, p), w)| (m / tm - p / tp) * w)
                .sum::<f64>()
        } else {
            anchor
        };

        self.history.push(self.context);
        self.context.radius /= 2f64;
        self.context.width = self.next_width(pt);
        self.context.beta = self.next_beta(pt);

        recorder.finish_epoch(epoch, self.iteration, &self.start.w);
        ControlFlow::Continue(())
    }


    fn postprocess(&mut self) -> LinearScorer {
        LinearScorer::new(self.start.w.clone())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn toy_sample() -> Sample {
        let rows = vec![
            vec![ 1.0,  0.2], vec![-1.0, -0.1],
            vec![ 0.8, -0.1], vec![-0.9,  0.3],
        ];
        Sample::from_rows(rows, vec![1.0, -1.0, 1.0, -1.0]).unwrap()
    }

    #[test]
    fn test_epochs_for() {
        assert_eq!(FSAUC::epochs_for(0), None);
        assert_eq!(FSAUC::epochs_for(10), None);
        assert_eq!(FSAUC::epochs_for(50), Some(1));
        assert_eq!(FSAUC::epochs_for(1_000), Some(2));
    }

    #[test]
    fn test_initial_context() {
        let sample = toy_sample();
        let mut fsauc = FSAUC::init(&sample).n_iter(50);
        fsauc.preprocess().unwrap();
        let ctx = fsauc.epoch_context();
        assert!((ctx.radius - 2f64 * 3f64.sqrt()).abs() < 1e-12);
        assert!((ctx.width - 2f64 * 2f64.sqrt() * ctx.radius).abs() < 1e-12);
        assert_eq!(ctx.beta, 9.0);
        assert_eq!(fsauc.epoch_len(), 50);
        // G = max(10, 10, 32).
        assert_eq!(fsauc.lipschitz, 32.0);
    }

    #[test]
    fn test_iterates_stay_in_l2_ball() {
        let sample = toy_sample();
        let mut fsauc = FSAUC::init(&sample).radius(0.5).n_iter(50);
        fsauc.preprocess().unwrap();

        struct Norms(Vec<f64>);
        impl Recorder for Norms {
            fn record(&mut self, _: usize, weights: &[f64]) {
                self.0.push(utils::l2_norm(weights));
            }
        }
        let mut norms = Norms(Vec::new());
        let flow = fsauc.epoch(1, &mut norms);
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(norms.0.len(), 50);

        // Starting from the origin, averages stay within `r`.
        let r = fsauc.epoch_history()[0].radius;
        assert!(norms.0.iter().all(|&n| n <= r + 1e-9));
        assert_eq!(fsauc.epoch(2, &mut norms), ControlFlow::Break(50));
    }

    #[test]
    fn test_rejects_bad_params() {
        let sample = toy_sample();
        assert!(FSAUC::init(&sample).radius(0.0).run().is_err());
        assert!(FSAUC::init(&sample).delta(1.5).run().is_err());
        assert!(FSAUC::init(&sample).n_iter(10).run().is_err());
        assert!(FSAUC::init(&sample).kappa(-1.0).run().is_err());
    }
}
