//! Defines some common functions used in this library.

/// Defines the surrogate losses approximated by Bernstein polynomials.
pub mod loss_functions;

/// Defines the Euclidean projections used by the optimizers.
pub mod projection;

/// Defines the Bernstein-polynomial approximation of a pairwise loss.
pub mod bernstein;

/// Defines some useful functions such as inner products.
pub mod utils;

/// Defines some checker functions.
pub(crate) mod checker;


pub use loss_functions::{
    SurrogateLoss,
    loss_function,
};
