use serde::{Deserialize, Serialize};

use crate::error::{AucError, Result};

use std::fmt;
use std::str::FromStr;


/// Surrogate losses of the pairwise ranking objective.
///
/// Each variant maps a point `x ∈ [0, 1]` to the loss of the pair
/// whose rescaled score difference is `x`.
/// For a bound `L` on the scores,
/// ```txt
/// hinge:    max(0, 1 + L - 2Lx)
/// logistic: log(1 + exp(L - 2Lx))
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurrogateLoss {
    /// Hinge loss.
    Hinge,
    /// Logistic loss.
    Logistic,
}


impl SurrogateLoss {
    /// The name of the loss function.
    pub fn name(&self) -> &str {
        match self {
            Self::Hinge => "hinge",
            Self::Logistic => "logistic",
        }
    }


    /// Loss value at `x` for the score bound `l`.
    #[inline(always)]
    pub fn eval(&self, x: f64, l: f64) -> f64 {
        let z = l - 2f64 * l * x;
        match self {
            Self::Hinge => (1f64 + z).max(0f64),
            // log(1 + e^z), written to stay finite for large `z`.
            Self::Logistic => {
                if z > 0f64 {
                    z + (-z).exp().ln_1p()
                } else {
                    z.exp().ln_1p()
                }
            },
        }
    }
}


impl FromStr for SurrogateLoss {
    type Err = AucError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "hinge" => Ok(Self::Hinge),
            "logistic" => Ok(Self::Logistic),
            _ => Err(AucError::config(format!(
                "unknown loss function `{name}`. expected `hinge` or `logistic`"
            ))),
        }
    }
}


impl fmt::Display for SurrogateLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}


/// Returns the scalar loss named `name` with score bound `l`.
pub fn loss_function(name: &str, l: f64) -> Result<impl Fn(f64) -> f64> {
    let loss = name.parse::<SurrogateLoss>()?;
    Ok(move |x| loss.eval(x, l))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hinge_values() {
        let loss = SurrogateLoss::Hinge;
        assert_eq!(loss.eval(0.0, 1.0), 2.0);
        assert_eq!(loss.eval(1.0, 1.0), 0.0);
        assert_eq!(loss.eval(1.0, 2.0), 0.0);
    }

    #[test]
    fn test_logistic_values() {
        let loss = SurrogateLoss::Logistic;
        assert!((loss.eval(0.5, 1.0) - 2f64.ln()).abs() < 1e-12);
        let big = loss.eval(0.0, 1_000.0);
        assert!((big - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_name() {
        let err = loss_function("squared", 1.0).err();
        assert!(matches!(err, Some(AucError::Configuration(_))));
        let f = loss_function("logistic", 1.0).unwrap();
        assert!((f(0.5) - 2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_by_name() {
        let loss: SurrogateLoss = serde_json::from_str("\"hinge\"").unwrap();
        assert_eq!(loss, SurrogateLoss::Hinge);
    }
}
