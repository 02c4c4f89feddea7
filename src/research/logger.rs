use colored::Colorize;
use rayon::prelude::*;

use crate::common::utils;
use crate::error::{AucError, Result};
use crate::hypothesis::LinearScorer;
use crate::optimizer::{Optimizer, Recorder};
use crate::sample::Sample;

use super::{RecordSchedule, Trace};
use super::schedule::Plan;

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

const WIDTH: usize = 9;
const PREC_WIDTH: usize = 6;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;


/// Struct `Logger` runs an optimizer and scores the current model
/// on a held-out sample at the recording points of a
/// [`RecordSchedule`].
///
/// Build it with [`LoggerBuilder`](super::LoggerBuilder).
pub struct Logger<'a, O> {
    pub(super) optimizer: O,
    pub(super) test: &'a Sample,
    pub(super) score_func: fn(&[f64], &[f64]) -> f64,
    pub(super) schedule: Option<RecordSchedule>,
    pub(super) time_limit: u128,
    pub(super) round: usize,
}


// Recorder handed to the optimizer during `Logger::run`.
struct Session<'a> {
    test: &'a Sample,
    score_func: fn(&[f64], &[f64]) -> f64,
    plan: Plan,
    clock: Stopwatch,
    trace: Trace,
    round: usize,
}


// Wall clock that can be paused while evaluating.
struct Stopwatch {
    acc: Duration,
    since: Option<Instant>,
}


impl Stopwatch {
    fn new() -> Self {
        Self { acc: Duration::ZERO, since: None }
    }


    fn resume(&mut self) {
        if self.since.is_none() {
            self.since = Some(Instant::now());
        }
    }


    fn pause(&mut self) {
        if let Some(since) = self.since.take() {
            self.acc += since.elapsed();
        }
    }


    fn elapsed(&self) -> Duration {
        self.acc + self.since.map_or(Duration::ZERO, |s| s.elapsed())
    }
}


impl Session<'_> {
    fn evaluate(&mut self, iteration: usize, weights: &[f64]) {
        self.clock.pause();

        let n_feature = self.test.shape().1;
        let predictions = self.test.data()
            .par_chunks(n_feature)
            .map(|row| utils::inner_product(weights, row))
            .collect::<Vec<_>>();

        if predictions.iter().all(|p| p.is_finite()) {
            let score = (self.score_func)(&predictions, self.test.target());
            let elapsed = self.clock.elapsed();
            self.trace.push(iteration, elapsed.as_secs_f64(), score);

            if self.round != usize::MAX && iteration % self.round == 0 {
                println!(
                    "{} {}\t\t{}\t{}",
                    "[LOG]".bold().magenta(),
                    format!("{:>WIDTH$}", iteration).red(),
                    format!("{:>WIDTH$.PREC_WIDTH$}", score).yellow(),
                    time_format(elapsed).bold().cyan(),
                );
            }
        } else {
            self.trace.skip();
        }

        self.clock.resume();
    }
}


impl Recorder for Session<'_> {
    fn record(&mut self, iteration: usize, weights: &[f64]) {
        if self.plan.due_at_step(iteration) {
            self.evaluate(iteration, weights);
        }
    }


    fn finish_epoch(&mut self, _: usize, iteration: usize, weights: &[f64]) {
        if self.plan.due_at_epoch_end() {
            self.evaluate(iteration, weights);
        }
    }
}


impl<O> Logger<'_, O>
    where O: Optimizer,
{
    /// Run the optimizer with evaluation.
    /// Note that this method is almost the same as [`Optimizer::run`].
    /// The elapsed time excludes the time spent on evaluation,
    /// and the time limit is checked between epochs.
    pub fn run(&mut self) -> Result<(LinearScorer, Trace)> {
        // ---------------------------------------------------------------------
        // Pre-processing
        self.optimizer.preprocess()?;
        self.test.is_valid_binary_instance()?;
        let (n_pos, n_neg) = self.test.class_counts();
        if n_pos == 0 || n_neg == 0 {
            return Err(AucError::config(
                "the test sample must contain both classes"
            ));
        }
        let (n_feature, dim) = (self.test.shape().1, self.optimizer.dimension());
        if n_feature != dim {
            return Err(AucError::sample(format!(
                "the test sample has {n_feature} features, \
                but the optimizer is trained on {dim} features"
            )));
        }

        let schedule = self.schedule
            .unwrap_or_else(|| self.optimizer.default_schedule());
        let plan = Plan::new(
            &schedule,
            self.optimizer.n_iterations(),
            self.optimizer.n_epochs(),
        )?;
        if self.round != usize::MAX { self.print_stats(&schedule); }

        let mut session = Session {
            test: self.test,
            score_func: self.score_func,
            trace: Trace::new(plan.n_scheduled()),
            plan,
            clock: Stopwatch::new(),
            round: self.round,
        };

        // ---------------------------------------------------------------------
        // Epochs
        if self.round != usize::MAX { print_log_header(); }
        let (round, time_limit) = (self.round, self.time_limit);
        let optimizer = &mut self.optimizer;
        let _ = (1..).try_for_each(|epoch| {
            session.clock.resume();
            let flow = optimizer.epoch(epoch, &mut session);
            session.clock.pause();

            let elapsed = session.clock.elapsed();
            if let ControlFlow::Break(iteration) = flow {
                if round != usize::MAX {
                    print_last("[FIN]".bold().bright_green(), iteration, &session.trace, elapsed);
                }
                return flow;
            }

            if elapsed.as_millis() > time_limit {
                if round != usize::MAX {
                    let last = session.trace.iterations()
                        .last()
                        .copied()
                        .unwrap_or(0);
                    print_last("[TLE]".bold().bright_red(), last, &session.trace, elapsed);
                }
                return ControlFlow::Break(epoch);
            }
            ControlFlow::Continue(())
        });

        let f = self.optimizer.postprocess();
        Ok((f, session.trace))
    }


    /// print current settings.
    #[inline(always)]
    fn print_stats(&self, schedule: &RecordSchedule) {
        let limit = if self.time_limit != u128::MAX {
            let millis = u64::try_from(self.time_limit).unwrap_or(u64::MAX);
            time_format(Duration::from_millis(millis))
        } else {
            "Nothing".into()
        };
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        println!(
            "\n{header}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Optimizer".bold(),
            self.optimizer.name().bold().green(),
        );

        if let Some(info) = self.optimizer.info() {
            let line = info.into_iter()
                .map(|(key, val)| {
                    format!(
                        "    + {:<STAT_WIDTH$}\t{:>width$}",
                        key,
                        val.bold().yellow(),
                        width = STAT_WIDTH - 8
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            println!("{line}");
        }
        println!(
            "\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            {:=^FULL_WIDTH$}\n\
            ",
            "Recording".bold(),
            schedule.to_string().bold().green(),
            "Time Limit".bold(),
            limit.bold().green(),
            "".bold(),
        );
    }
}


#[inline(always)]
fn print_log_header() {
    println!(
        "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}",
        "".bold().red(),
        "TEST".bold().yellow(),
        "".bold().cyan(),
    );
    println!(
        "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\n",
        "ITER".bold().red(),
        "SCORE".bold().yellow(),
        "TIME".bold().cyan(),
    );
}


fn print_last<T>(tag: T, at: usize, trace: &Trace, elapsed: Duration)
    where T: std::fmt::Display,
{
    let score = trace.last_score().unwrap_or(f64::NAN);
    println!(
        "{} {}\t\t{}\t{}\n",
        tag,
        format!("{:>WIDTH$}", at).red(),
        format!("{:>WIDTH$.PREC_WIDTH$}", score).bold().yellow(),
        time_format(elapsed).bold().cyan(),
    );
}


fn time_format(elapsed: Duration) -> String {
    let millisec = elapsed.as_millis();
    if millisec < 1_000 {
        return format!("  0.{:0>3}s", millisec);
    }
    let sec = millisec / 1_000;
    let millisec = millisec % 1_000;
    if sec < 60 {
        return format!(" {:0>2}.{:0>3}s", sec, millisec);
    }
    let min = sec / 60;
    let sec = sec % 60;
    if min < 60 {
        return format!(" {:0>2}m {:0>2}s", min, sec);
    }
    let hours = min / 60;
    let min = min % 60;
    format!(" {:0>2}h {:0>2}m", hours, min)
}
