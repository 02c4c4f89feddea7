//! Error types of this crate.

use thiserror::Error;

/// Result type used throughout `miniauc`.
pub type Result<T> = std::result::Result<T, AucError>;

/// Errors that can occur while configuring or running an optimizer.
///
/// Numerical degradation during held-out scoring is **not** an error;
/// the harness skips that sample and counts it in
/// [`Trace::n_skipped`](crate::research::Trace::n_skipped).
#[derive(Debug, Error)]
pub enum AucError {
    /// A hyperparameter is out of its admissible range,
    /// or the loss name is unknown.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The in-memory sample is malformed.
    #[error("invalid sample: {0}")]
    InvalidSample(String),

    /// A configuration record could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl AucError {
    pub(crate) fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration(message.into())
    }

    pub(crate) fn sample<S: Into<String>>(message: S) -> Self {
        Self::InvalidSample(message.into())
    }
}
