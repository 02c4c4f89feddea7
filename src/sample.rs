//! Struct `Sample` represents an in-memory batch of labeled examples.

// Provides sample struct.
pub(crate) mod sample_struct;

/// Provides helpers that build traversal orders for the optimizers.
pub mod traversal;

/// Provides synthetic samples.
pub mod synthetic;


pub use sample_struct::Sample;
pub use traversal::{
    sequential_passes,
    shuffled_passes,
};
pub use synthetic::gaussian_clusters;
