//! Provides `SAUC`, stochastic AUC maximization with
//! Bernstein-polynomial surrogates (Yang et al., 2019).
use crate::common::{checker, utils, SurrogateLoss};
use crate::common::bernstein::{
    self,
    BernsteinBounds,
    BernsteinCoefficients,
};
use crate::common::projection::project_onto_centered_l2_ball;
use crate::error::{AucError, Result};
use crate::hypothesis::LinearScorer;
use crate::optimizer::{BlockProjection, Optimizer, PrimalDual, Recorder};
use crate::research::RecordSchedule;
use crate::sample::Sample;

use super::SaucParams;

use std::ops::ControlFlow;


/// Independent origin-centered `ℓ2` balls for `w`, `a`, `b`, `alpha`.
struct BallProjection {
    radii: [f64; 4],
}


impl BlockProjection for BallProjection {
    fn project(&self, iterate: &mut PrimalDual) {
        let [rw, ra, rb, ralpha] = self.radii;
        project_onto_centered_l2_ball(&mut iterate.w, rw);
        project_onto_centered_l2_ball(&mut iterate.a, ra);
        project_onto_centered_l2_ball(&mut iterate.b, rb);
        project_onto_centered_l2_ball(&mut iterate.alpha, ralpha);
    }
}


/// Stochastic AUC maximization with a degree-`N` Bernstein
/// approximation of a surrogate loss.
///
/// The traversal order `ids` is supplied by the caller.
/// Epoch `t = 1, ..., T` consumes the next `t` entries of `ids` with
/// step size `c / √t / gamma`, where
/// `T = ⌊(-1 + √(1 + 8|ids|)) / 2⌋ - 1`.
/// A proximal term `gamma · (w - W)` pulls `w` towards the epoch's
/// starting point `W`, which is the previous epoch's average.
/// The returned weight vector is the average of the epoch averages.
///
/// # Example
/// ```no_run
/// use miniauc::prelude::*;
///
/// let train = gaussian_clusters(200, 2, 4.0, 0.5, 0).unwrap();
/// let ids = shuffled_passes(200, 5, 0);
/// let mut sauc = SAUC::init(&train, ids)
///     .radius(1.0)
///     .degree(5)
///     .loss(SurrogateLoss::Logistic);
/// let scorer = sauc.run().unwrap();
/// let scores = scorer.confidence_all(&train);
/// assert!(roc_auc(&scores, train.target()) > 0.9);
/// ```
pub struct SAUC<'a> {
    // Training sample
    sample: &'a Sample,

    params: SaucParams,

    n_epochs: usize,

    // Score bound `L = 2R`.
    score_bound: f64,

    coef: BernsteinCoefficients,
    bounds: BernsteinBounds,

    // Epoch starting point, current iterate and running epoch sum.
    start: PrimalDual,
    iterate: PrimalDual,
    sum: PrimalDual,
    grad: PrimalDual,

    // Per-step polynomial terms and their gradients.
    term: Vec<f64>,
    term_grad: Vec<f64>,
    powers: Vec<f64>,

    // Average of the epoch averages of `w`.
    average: Vec<f64>,

    iteration: usize,
}


impl<'a> SAUC<'a> {
    /// Constructs a new instance of `SAUC`
    /// that visits the examples in the order `ids`.
    ///
    /// Time complexity: `O(1)`.
    #[inline]
    pub fn init(sample: &'a Sample, ids: Vec<usize>) -> Self {
        let params = SaucParams { ids, ..SaucParams::default() };
        Self {
            sample,
            params,

            n_epochs: 0,
            score_bound: 0f64,

            coef: BernsteinCoefficients::default(),
            bounds: BernsteinBounds::default(),

            start: PrimalDual::zeros(0, 0),
            iterate: PrimalDual::zeros(0, 0),
            sum: PrimalDual::zeros(0, 0),
            grad: PrimalDual::zeros(0, 0),

            term: Vec::new(),
            term_grad: Vec::new(),
            powers: Vec::new(),

            average: Vec::new(),

            iteration: 0,
        }
    }


    /// Set the radius `R` of the ball containing `w`.
    #[inline]
    pub fn radius(mut self, radius: f64) -> Self {
        self.params.radius = radius;
        self
    }


    /// Set the step-size scale `c`.
    #[inline]
    pub fn step_scale(mut self, c: f64) -> Self {
        self.params.step_scale = c;
        self
    }


    /// Set the degree `N` of the Bernstein approximation.
    #[inline]
    pub fn degree(mut self, degree: usize) -> Self {
        self.params.degree = degree;
        self
    }


    /// Set the surrogate loss.
    #[inline]
    pub fn loss(mut self, loss: SurrogateLoss) -> Self {
        self.params.loss = loss;
        self
    }


    /// Replace all the hyperparameters at once,
    /// including the traversal order.
    #[inline]
    pub fn params(mut self, params: SaucParams) -> Self {
        self.params = params;
        self
    }


    /// Returns `R1`, `R2` and `gamma`.
    /// Valid after [`Optimizer::preprocess`].
    pub fn bounds(&self) -> BernsteinBounds {
        self.bounds
    }


    /// Number of epochs that a traversal order of length `n_ids` feeds,
    /// `⌊(-1 + √(1 + 8 n_ids)) / 2⌋ - 1`.
    pub fn epochs_for(n_ids: usize) -> usize {
        let n = n_ids as f64;
        let t = ((-1f64 + (1f64 + 8f64 * n).sqrt()) / 2f64).floor();
        (t as usize).saturating_sub(1)
    }


    fn check_params(&self) -> Result<()> {
        let p = &self.params;
        checker::radius("`R`", p.radius)?;
        checker::step_scale(p.step_scale)?;
        checker::degree(p.degree)?;
        checker::traversal_order(&p.ids, self.sample.shape().0)?;
        Ok(())
    }
}


impl Optimizer for SAUC<'_> {
    fn name(&self) -> &str {
        "SAUC"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let (n_examples, n_feature) = self.sample.shape();
        let p = &self.params;
        let info = Vec::from([
            ("# of examples", format!("{n_examples}")),
            ("# of features", format!("{n_feature}")),
            ("R", format!("{}", p.radius)),
            ("c", format!("{}", p.step_scale)),
            ("Degree", format!("{}", p.degree)),
            ("Loss", format!("{}", p.loss)),
            ("# of ids", format!("{}", p.ids.len())),
            ("# of epochs", format!("{}", self.n_epochs)),
            ("gamma", format!("{}", self.bounds.gamma)),
        ]);
        Some(info)
    }


    fn default_schedule(&self) -> RecordSchedule {
        RecordSchedule::EpochEnd
    }


    fn preprocess(&mut self) -> Result<()> {
        self.sample.is_valid_binary_instance()?;
        self.check_params()?;

        let n_ids = self.params.ids.len();
        self.n_epochs = Self::epochs_for(n_ids);
        if self.n_epochs == 0 {
            return Err(AucError::config(format!(
                "{n_ids} ids are too few to form a single epoch"
            )));
        }

        let SaucParams { radius, degree, loss, .. } = self.params;
        self.score_bound = 2f64 * radius;
        let comb = bernstein::binomial_table(degree);
        self.coef = bernstein::polynomial_coefficients(
            degree, loss, self.score_bound, &comb,
        )?;
        self.bounds = bernstein::bound_constants(
            degree, loss, self.score_bound, &comb,
        )?;

        let dim = self.sample.shape().1;
        let width = degree + 1;
        self.start = PrimalDual::zeros(dim, width);
        self.iterate = PrimalDual::zeros(dim, width);
        self.sum = PrimalDual::zeros(dim, width);
        self.grad = PrimalDual::zeros(dim, width);
        self.term = vec![0f64; width];
        self.term_grad = vec![0f64; width];
        self.powers = vec![0f64; width];
        self.average = vec![0f64; dim];

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
        self.n_epochs * (self.n_epochs + 1) / 2
    }


    fn epoch<R>(&mut self, epoch: usize, recorder: &mut R)
        -> ControlFlow<usize>
        where R: Recorder,
    {
        if epoch > self.n_epochs {
            return ControlFlow::Break(self.iteration);
        }

        let sample = self.sample;
        let target = sample.target();
        let degree = self.params.degree;
        let l = self.score_bound;
        let BernsteinBounds { r1, r2, gamma } = self.bounds;
        let scale = 2f64 * (degree + 1) as f64;
        let eta = self.params.step_scale / (epoch as f64).sqrt() / gamma;
        let balls = BallProjection {
            radii: [self.params.radius, r1, r2, r1 + r2],
        };

        self.iterate.copy_from(&self.start);
        self.sum.clear();

        for _ in 0..epoch {
            let idx = self.params.ids[self.iteration];
            let x = sample.row(idx);
            let y = target[idx];
            let prod = utils::inner_product(x, &self.iterate.w);

            let PrimalDual { a, b, alpha, .. } = &self.iterate;
            let gw = if y > 0f64 {
                bernstein::positive_term_into(
                    prod, l, &mut self.term, &mut self.term_grad,
                );
                let (fpt, gfpt) = (&self.term, &self.term_grad);
                for i in 0..=degree {
                    self.grad.a[i] = 2f64 * (a[i] - fpt[i]);
                    self.grad.b[i] = 2f64 * b[i];
                    self.grad.alpha[i] = -2f64 * (alpha[i] - fpt[i]);
                }
                2f64 * (0..=degree)
                    .map(|i| (alpha[i] - a[i]) * gfpt[i])
                    .sum::<f64>()
            } else {
                bernstein::negative_term_into(
                    prod,
                    l,
                    &self.coef,
                    &mut self.powers,
                    &mut self.term,
                    &mut self.term_grad,
                );
                let (fnt, gfnt) = (&self.term, &self.term_grad);
                for i in 0..=degree {
                    self.grad.a[i] = 2f64 * a[i];
                    self.grad.b[i] = 2f64 * (b[i] - fnt[i]);
                    self.grad.alpha[i] = -2f64 * (alpha[i] - fnt[i]);
                }
                2f64 * (0..=degree)
                    .map(|i| (alpha[i] - b[i]) * gfnt[i])
                    .sum::<f64>()
            };

            let coef = gw * y / scale;
            self.grad.w.iter_mut()
                .zip(x)
                .zip(self.iterate.w.iter().zip(&self.start.w))
                .for_each(|((g, xi), (w, w0))| {
                    *g = coef * xi + gamma * (w - w0);
                });
            for block in [&mut self.grad.a, &mut self.grad.b, &mut self.grad.alpha] {
                block.iter_mut().for_each(|g| { *g /= scale; });
            }

            self.iterate.step(&self.grad, eta, &balls);
            self.sum.accumulate(&self.iterate);

            self.iteration += 1;
            recorder.record(self.iteration, &self.average);
        }

        let t = epoch as f64;
        self.sum.scale(1f64 / t);
        self.start.copy_from(&self.sum);
        self.average.iter_mut()
            .zip(&self.start.w)
            .for_each(|(avg, w)| { *avg = ((t - 1f64) * *avg + w) / t; });

        recorder.finish_epoch(epoch, self.iteration, &self.average);
        ControlFlow::Continue(())
    }


    fn postprocess(&mut self) -> LinearScorer {
        LinearScorer::new(self.average.clone())
    }
}
