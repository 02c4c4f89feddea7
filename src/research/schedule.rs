use serde::{Deserialize, Serialize};

use crate::constants::GEOMETRIC_START_EXP;
use crate::error::{AucError, Result};

use std::fmt;


/// When the harness evaluates the current model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RecordSchedule {
    /// After every inner step.
    EveryStep,
    /// After every `k`-th inner step.
    Every(usize),
    /// At the inner steps `⌊2^(4 + j·rec)⌋` below the total number of
    /// steps; the last point is moved to the final step.
    Geometric {
        /// Exponent increment between two consecutive points.
        rec: f64,
    },
    /// After every epoch.
    EpochEnd,
}


impl RecordSchedule {
    /// Check the cadence parameters.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Every(0) => Err(AucError::config(
                "the recording interval must be at least 1"
            )),
            Self::Geometric { rec } if !(rec.is_finite() && rec > 0f64) => {
                Err(AucError::config(format!(
                    "`rec` must be a positive finite number. got {rec}."
                )))
            },
            _ => Ok(()),
        }
    }
}


impl fmt::Display for RecordSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EveryStep => write!(f, "every step"),
            Self::Every(k) => write!(f, "every {k} steps"),
            Self::Geometric { rec } => write!(f, "geometric (rec = {rec})"),
            Self::EpochEnd => write!(f, "every epoch"),
        }
    }
}


/// Geometric recording points for a run of `total` inner steps.
///
/// ```
/// use miniauc::research::geometric_points;
///
/// assert_eq!(geometric_points(100, 1.0), vec![16, 32, 100]);
/// assert_eq!(geometric_points(10, 1.0), vec![10]);
/// ```
pub fn geometric_points(total: usize, rec: f64) -> Vec<usize> {
    if total == 0 { return Vec::new(); }

    let limit = (total as f64).log2();
    let mut points = Vec::new();
    let mut j = 0usize;
    loop {
        let exp = GEOMETRIC_START_EXP + j as f64 * rec;
        if exp >= limit { break; }
        points.push(2f64.powf(exp).floor() as usize);
        j += 1;
    }

    match points.last_mut() {
        Some(last) => { *last = total; },
        None => { points.push(total); },
    }
    points.dedup();
    points
}


/// A schedule resolved against the length of a run.
#[derive(Debug, Clone)]
pub(crate) struct Plan {
    cadence: Cadence,
    n_scheduled: usize,
}


#[derive(Debug, Clone)]
enum Cadence {
    Every(usize),
    Points { points: Vec<usize>, next: usize },
    EpochEnd,
}


impl Plan {
    pub(crate) fn new(
        schedule: &RecordSchedule,
        n_iterations: usize,
        n_epochs: usize,
    ) -> Result<Self>
    {
        schedule.validate()?;
        let plan = match *schedule {
            RecordSchedule::EveryStep => Self {
                cadence: Cadence::Every(1),
                n_scheduled: n_iterations,
            },
            RecordSchedule::Every(k) => Self {
                cadence: Cadence::Every(k),
                n_scheduled: n_iterations / k,
            },
            RecordSchedule::Geometric { rec } => {
                let points = geometric_points(n_iterations, rec);
                let n_scheduled = points.len();
                Self {
                    cadence: Cadence::Points { points, next: 0 },
                    n_scheduled,
                }
            },
            RecordSchedule::EpochEnd => Self {
                cadence: Cadence::EpochEnd,
                n_scheduled: n_epochs,
            },
        };
        Ok(plan)
    }


    /// Number of recording points of a complete run.
    pub(crate) fn n_scheduled(&self) -> usize {
        self.n_scheduled
    }


    /// Returns `true` if the `iteration`-th step is a recording point.
    /// Steps must be queried in increasing order.
    pub(crate) fn due_at_step(&mut self, iteration: usize) -> bool {
        match &mut self.cadence {
            Cadence::Every(k) => iteration % *k == 0,
            Cadence::Points { points, next } => {
                if points.get(*next) == Some(&iteration) {
                    *next += 1;
                    true
                } else {
                    false
                }
            },
            Cadence::EpochEnd => false,
        }
    }


    /// Returns `true` if epoch ends are recording points.
    pub(crate) fn due_at_epoch_end(&self) -> bool {
        matches!(self.cadence, Cadence::EpochEnd)
    }
}
