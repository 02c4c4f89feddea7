//! Provides `Optimizer` and `Recorder` traits.

use crate::error::Result;
use crate::hypothesis::LinearScorer;
use crate::research::RecordSchedule;

use std::ops::ControlFlow;


/// The trait [`Optimizer`] defines the standard framework of
/// online AUC maximization.
/// Here, the **standard framework** is an outer loop over epochs
/// of the following form:
///
/// In each epoch `k = 1, 2, ...`,
/// 1. The optimizer fixes per-epoch constants
///    (radii, step size, ...) from the statistics of the previous epoch.
/// 2. It runs projected stochastic primal-dual steps over the training
///    examples and averages the iterates.
///
/// After the last epoch, the averaged weight vector is returned
/// as a [`LinearScorer`].
///
/// # Required Methods
/// - [`Optimizer::name`]
/// - [`Optimizer::preprocess`]
/// - [`Optimizer::dimension`]
/// - [`Optimizer::n_epochs`]
/// - [`Optimizer::n_iterations`]
/// - [`Optimizer::epoch`]
/// - [`Optimizer::postprocess`]
/// - [`Optimizer::info`] ... optional.
/// - [`Optimizer::default_schedule`] ... optional.
///
/// # Provided Methods
/// - [`Optimizer::run`]
pub trait Optimizer {
    /// Returns the name of the optimizer.
    fn name(&self) -> &str;


    /// Returns the information of the optimizer as key/value pairs.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// The recording cadence used by
    /// [`Logger`](crate::research::Logger) unless one is given.
    fn default_schedule(&self) -> RecordSchedule {
        RecordSchedule::EveryStep
    }


    /// A main function that runs the optimizer without evaluation.
    fn run(&mut self) -> Result<LinearScorer> {
        self.preprocess()?;

        let _ = (1..).try_for_each(|epoch| {
            self.epoch(epoch, &mut ())
        });

        Ok(self.postprocess())
    }


    /// Pre-processing for `self`.
    /// Validates the configuration and resets the state,
    /// so that a run does not depend on a previous one.
    fn preprocess(&mut self) -> Result<()>;


    /// Number of features of the training sample,
    /// i.e., the length of the returned weight vector.
    fn dimension(&self) -> usize;


    /// Number of epochs of a full run.
    /// Valid after [`Optimizer::preprocess`].
    fn n_epochs(&self) -> usize;


    /// Number of inner steps of a full run.
    /// Valid after [`Optimizer::preprocess`].
    fn n_iterations(&self) -> usize;


    /// Runs the `epoch`-th epoch (1-indexed).
    /// This method returns
    /// `ControlFlow::Continue(())` while epochs remain,
    /// `ControlFlow::Break(iterations)` once the run is over,
    /// where `iterations` is the number of inner steps performed.
    fn epoch<R>(&mut self, epoch: usize, recorder: &mut R)
        -> ControlFlow<usize>
        where R: Recorder;


    /// Post-processing.
    /// Returns the model built from the last averaged iterate.
    fn postprocess(&mut self) -> LinearScorer;
}


/// Observer of an optimizer run.
///
/// Optimizers call [`Recorder::record`] after every inner step
/// with the weight vector they would return at that point,
/// and [`Recorder::finish_epoch`] after every epoch.
pub trait Recorder {
    /// Called after the `iteration`-th inner step (1-indexed).
    fn record(&mut self, iteration: usize, weights: &[f64]);


    /// Called after the `epoch`-th epoch (1-indexed),
    /// which ended at inner step `iteration`.
    fn finish_epoch(&mut self, epoch: usize, iteration: usize, weights: &[f64]) {
        let _ = (epoch, iteration, weights);
    }
}


impl Recorder for () {
    #[inline(always)]
    fn record(&mut self, _: usize, _: &[f64]) {}
}
