//! This directory provides some features for research.
//! Measure the followings of an optimizer per recording point
//! - Running time (evaluation excluded)
//! - Held-out score (AUC by default)

/// Provides `Logger`, which runs an optimizer with evaluation.
pub mod logger;

/// Provides the builder of `Logger`.
pub mod logger_builder;

/// Defines the recording schedules.
pub mod schedule;

/// Defines the recorded scores.
pub mod trace;

/// Defines scoring metrics.
pub mod metrics;


pub use logger::Logger;
pub use logger_builder::LoggerBuilder;
pub use schedule::{RecordSchedule, geometric_points};
pub use trace::Trace;
pub use metrics::roc_auc;
