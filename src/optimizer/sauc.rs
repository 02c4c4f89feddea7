//! SAUC module.
pub mod sauc_algorithm;
mod params;

pub use sauc_algorithm::SAUC;
pub use params::SaucParams;
