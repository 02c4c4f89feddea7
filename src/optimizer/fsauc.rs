//! FSAUC module.
pub mod fsauc_algorithm;
mod params;

pub use fsauc_algorithm::{FSAUC, EpochContext};
pub use params::FsaucParams;
