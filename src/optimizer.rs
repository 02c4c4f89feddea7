//! Provides online AUC maximization algorithms
//! and the traits they implement.

/// Defines `Optimizer` and `Recorder` traits.
pub mod core;

/// Defines the projected primal-dual step shared by the optimizers.
pub mod primal_dual;

/// FSAUC, the epoch-restart primal-dual method.
pub mod fsauc;

/// SAUC, the Bernstein-approximated primal-dual method.
pub mod sauc;


pub use self::core::{
    Optimizer,
    Recorder,
};

pub use primal_dual::{
    PrimalDual,
    BlockProjection,
};

pub use fsauc::{FSAUC, FsaucParams, EpochContext};
pub use sauc::{SAUC, SaucParams};
