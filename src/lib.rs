#![warn(missing_docs)]

//! 
//! A crate that provides online AUC maximization algorithms.
//! Every algorithm in this crate solves the square-loss (or a
//! Bernstein-approximated surrogate) AUC objective as a
//! stochastic saddle-point problem,
//! so it never enumerates positive/negative pairs.
//! 
//! This crate includes two algorithms.
//! 
//! - [`FSAUC`]
//!     Restarts a projected primal-dual method over epochs
//!     of equal length inside shrinking balls.
//!     The step size is fixed within an epoch.
//! 
//! 
//! - [`SAUC`]
//!     Approximates a hinge or logistic pairwise loss by a
//!     Bernstein polynomial and runs epochs of growing length
//!     with a proximal term and a decreasing step size.
//! 
//! Both implement [`Optimizer`].
//! [`research::Logger`] runs an optimizer while scoring the current
//! model on a held-out sample, and returns a [`research::Trace`].

pub mod sample;
pub mod common;
pub mod optimizer;
pub mod hypothesis;
pub mod research;
pub mod error;
pub mod constants;
pub mod prelude;


pub use sample::Sample;
pub use error::{AucError, Result};

pub use optimizer::{
    Optimizer,
    Recorder,
    FSAUC,
    FsaucParams,
    EpochContext,
    SAUC,
    SaucParams,
};

pub use hypothesis::LinearScorer;

pub use common::{
    SurrogateLoss,
    loss_function,
};
