//! Provides the model returned by the optimizers.

pub(crate) mod linear_scorer;


pub use linear_scorer::LinearScorer;
