use serde::{Deserialize, Serialize};

use crate::common::SurrogateLoss;
use crate::constants::*;
use crate::error::{AucError, Result};


/// Hyperparameters of [`SAUC`](crate::SAUC).
///
/// The serialized form uses the short option keys
/// `R`, `c`, `m` (or `N`), `name`, `ids`.
/// An unknown loss `name` is a configuration error.
/// ```
/// use miniauc::{SaucParams, SurrogateLoss};
///
/// let json = r#"{"R": 0.5, "N": 3, "name": "logistic", "ids": [0, 1, 2]}"#;
/// let params = SaucParams::from_json(json).unwrap();
/// assert_eq!(params.degree, 3);
/// assert_eq!(params.loss, SurrogateLoss::Logistic);
/// assert_eq!(params.ids, vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSaucParams")]
pub struct SaucParams {
    /// Radius `R` of the `ℓ2` ball containing `w`.
    /// The score bound is `L = 2R`.
    #[serde(rename = "R")]
    pub radius: f64,

    /// Scale `c` of the step size `c / √t / gamma`.
    #[serde(rename = "c")]
    pub step_scale: f64,

    /// Degree `N` of the Bernstein approximation.
    #[serde(rename = "m")]
    pub degree: usize,

    /// Surrogate loss to approximate.
    #[serde(rename = "name")]
    pub loss: SurrogateLoss,

    /// Traversal order over the training examples.
    pub ids: Vec<usize>,
}


// Mirrors `SaucParams` with the loss kept as a plain name,
// so that an unknown name surfaces as `AucError::Configuration`.
#[derive(Deserialize)]
#[serde(default)]
struct RawSaucParams {
    #[serde(rename = "R")]
    radius: f64,
    #[serde(rename = "c")]
    step_scale: f64,
    #[serde(rename = "m", alias = "N")]
    degree: usize,
    name: String,
    ids: Vec<usize>,
}


impl Default for RawSaucParams {
    fn default() -> Self {
        let params = SaucParams::default();
        Self {
            radius: params.radius,
            step_scale: params.step_scale,
            degree: params.degree,
            name: params.loss.name().to_string(),
            ids: params.ids,
        }
    }
}


impl TryFrom<RawSaucParams> for SaucParams {
    type Error = AucError;

    fn try_from(raw: RawSaucParams) -> Result<Self> {
        Ok(Self {
            radius: raw.radius,
            step_scale: raw.step_scale,
            degree: raw.degree,
            loss: raw.name.parse()?,
            ids: raw.ids,
        })
    }
}


impl Default for SaucParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            step_scale: DEFAULT_STEP_SCALE,
            degree: DEFAULT_DEGREE,
            loss: SurrogateLoss::Hinge,
            ids: Vec::new(),
        }
    }
}


impl SaucParams {
    /// Parses a JSON configuration record.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawSaucParams = serde_json::from_str(json)?;
        Self::try_from(raw)
    }
}
