use crate::error::{AucError, Result};
use crate::sample::Sample;

use super::{roc_auc, Logger, RecordSchedule};

const DEFAULT_ROUND: usize = 100;
const DEFAULT_TIMELIMIT_MILLIS: u128 = u128::MAX;


/// `LoggerBuilder` is a struct to construct `Logger.`
/// You need to specify the followings:
///
/// - Optimizer,
/// - Test examples,
///
/// and optionally
///
/// - Score function (defaults to [`roc_auc`]),
/// - Recording schedule (defaults to [`Optimizer::default_schedule`]),
/// - Time limit for force quit, and
/// - Round (The log text is shown for recorded iterations
///   that are multiples of **round**).
///
/// [`Optimizer::default_schedule`]: crate::Optimizer::default_schedule
///
/// # Example
/// ```no_run
/// use miniauc::prelude::*;
/// use miniauc::research::{LoggerBuilder, RecordSchedule};
///
/// let train = gaussian_clusters(1_000, 5, 3.0, 1.0, 0).unwrap();
/// let test = gaussian_clusters(500, 5, 3.0, 1.0, 1).unwrap();
///
/// let fsauc = FSAUC::init(&train)
///     .radius(1.0)
///     .n_iter(10_000)
///     .estimate_kappa();
///
/// let mut logger = LoggerBuilder::new()
///     .optimizer(fsauc)
///     .test_sample(&test)
///     .record(RecordSchedule::Geometric { rec: 0.5 })
///     .print_every(1)
///     .time_limit_as_secs(60)
///     .build()
///     .unwrap();
///
/// let (scorer, trace) = logger.run().unwrap();
/// println!("{}", trace.to_json().unwrap());
/// ```
pub struct LoggerBuilder<'a, O> {
    optimizer: Option<O>,
    test: Option<&'a Sample>,
    score_func: fn(&[f64], &[f64]) -> f64,
    schedule: Option<RecordSchedule>,
    time_limit: u128,
    round: usize,
}


impl<O> Default for LoggerBuilder<'_, O> {
    fn default() -> Self {
        Self::new()
    }
}


impl<'a, O> LoggerBuilder<'a, O> {
    /// Construct a new instance of `LoggerBuilder.`
    pub fn new() -> Self {
        Self {
            optimizer: None,
            test: None,
            score_func: roc_auc,
            schedule: None,
            time_limit: DEFAULT_TIMELIMIT_MILLIS,
            round: DEFAULT_ROUND,
        }
    }


    /// Set the optimizer.
    pub fn optimizer(mut self, optimizer: O) -> Self {
        self.optimizer = Some(optimizer);
        self
    }


    /// Set the test sample.
    pub fn test_sample(mut self, test: &'a Sample) -> Self {
        self.test = Some(test);
        self
    }


    /// Set the score function, called as `f(predictions, target)`.
    pub fn score_function(mut self, f: fn(&[f64], &[f64]) -> f64) -> Self {
        self.score_func = f;
        self
    }


    /// Set the recording schedule.
    pub fn record(mut self, schedule: RecordSchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }


    /// Set the time limit for the optimizer as milliseconds.
    /// If the optimizer reaches this limit,
    /// breaks after the current epoch.
    #[inline(always)]
    pub fn time_limit_as_millis(mut self, time_limit: u128) -> Self {
        self.time_limit = time_limit;
        self
    }


    /// Set the time limit for the optimizer as seconds.
    /// If the optimizer reaches this limit,
    /// breaks after the current epoch.
    #[inline(always)]
    pub fn time_limit_as_secs(mut self, time_limit: u64) -> Self {
        self.time_limit = (time_limit as u128).saturating_mul(1_000);
        self
    }


    /// Set the time limit for the optimizer as minutes.
    /// If the optimizer reaches this limit,
    /// breaks after the current epoch.
    #[inline(always)]
    pub fn time_limit_as_mins(mut self, time_limit: u64) -> Self {
        self.time_limit = (time_limit as u128).saturating_mul(60_000);
        self
    }


    /// Set the interval to print the current status.
    /// By default, the method `run` prints its status every `100` iterations.
    /// If you don't want to print the log,
    /// set `usize::MAX`.
    #[inline(always)]
    pub fn print_every(mut self, round: usize) -> Self {
        self.round = round;
        self
    }


    /// Build [`Logger`] from the given components.
    pub fn build(self) -> Result<Logger<'a, O>> {
        let optimizer = self.optimizer
            .ok_or_else(|| AucError::config("optimizer is not specified"))?;
        let test = self.test
            .ok_or_else(|| AucError::config("test sample is not specified"))?;
        if let Some(schedule) = &self.schedule {
            schedule.validate()?;
        }
        if self.round == 0 {
            return Err(AucError::config(
                "the printing interval must be at least 1"
            ));
        }

        Ok(Logger {
            optimizer,
            test,
            score_func: self.score_func,
            schedule: self.schedule,
            time_limit: self.time_limit,
            round: self.round,
        })
    }
}
