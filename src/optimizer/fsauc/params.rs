use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::Result;


/// Hyperparameters of [`FSAUC`](crate::FSAUC).
///
/// The serialized form uses the short option keys
/// `R`, `c`, `delta`, `T`, `kappa`; missing keys take their defaults.
/// ```
/// use miniauc::FsaucParams;
///
/// let params = FsaucParams::from_json(r#"{"R": 2.0, "T": 500}"#).unwrap();
/// assert_eq!(params.radius, 2.0);
/// assert_eq!(params.n_iter, 500);
/// assert_eq!(params.delta, 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsaucParams {
    /// Radius `R` of the `ℓ1` ball containing `w`.
    #[serde(rename = "R")]
    pub radius: f64,

    /// Scale `c` of the gradient bound `G`.
    #[serde(rename = "c")]
    pub step_scale: f64,

    /// Failure probability of the concentration bounds.
    pub delta: f64,

    /// Total number of inner steps `T`.
    #[serde(rename = "T")]
    pub n_iter: usize,

    /// Bound on the Euclidean norm of the examples.
    pub kappa: f64,
}


impl Default for FsaucParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            step_scale: DEFAULT_STEP_SCALE,
            delta: DEFAULT_DELTA,
            n_iter: DEFAULT_N_ITER,
            kappa: DEFAULT_KAPPA,
        }
    }
}


impl FsaucParams {
    /// Parses a JSON configuration record.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
