//! Input distributions for Monte Carlo variables.
//!
//! On the wire a distribution is `{"distribution": <kind>, "parameters": [..]}`:
//!
//! | kind         | parameters            |
//! |--------------|-----------------------|
//! | `uniform`    | `[min, max]`          |
//! | `normal`     | `[mean, std]`         |
//! | `triangular` | `[min, mode, max]`    |

use crate::error::RiskError;
use econ_core::math::distributions::norm_cdf;
use serde::{Deserialize, Serialize};

/// Distribution family names used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    /// Continuous uniform
    Uniform,
    /// Gaussian
    Normal,
    /// Triangular
    Triangular,
}

impl DistributionKind {
    /// Lowercase family name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionKind::Uniform => "uniform",
            DistributionKind::Normal => "normal",
            DistributionKind::Triangular => "triangular",
        }
    }
}

/// Serialised form of a [`Distribution`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSpec {
    /// Family
    pub distribution: DistributionKind,
    /// Positional parameters
    pub parameters: Vec<f64>,
}

/// A validated univariate distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DistributionSpec", into = "DistributionSpec")]
pub enum Distribution {
    /// Uniform on `[min, max)`
    Uniform {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
    /// Normal with the given mean and standard deviation
    Normal {
        /// Mean
        mean: f64,
        /// Standard deviation
        std_dev: f64,
    },
    /// Triangular on `[min, max]` peaking at `mode`
    Triangular {
        /// Lower bound
        min: f64,
        /// Most likely value
        mode: f64,
        /// Upper bound
        max: f64,
    },
}

impl Distribution {
    /// Uniform distribution, validated.
    pub fn uniform(min: f64, max: f64) -> Result<Self, RiskError> {
        let d = Self::Uniform { min, max };
        d.validate()?;
        Ok(d)
    }

    /// Normal distribution, validated.
    pub fn normal(mean: f64, std_dev: f64) -> Result<Self, RiskError> {
        let d = Self::Normal { mean, std_dev };
        d.validate()?;
        Ok(d)
    }

    /// Triangular distribution, validated.
    pub fn triangular(min: f64, mode: f64, max: f64) -> Result<Self, RiskError> {
        let d = Self::Triangular { min, mode, max };
        d.validate()?;
        Ok(d)
    }

    /// Check the parameter constraints of the family.
    pub fn validate(&self) -> Result<(), RiskError> {
        let invalid = |reason: &str| -> Result<(), RiskError> {
            Err(RiskError::invalid_distribution("", reason))
        };
        match *self {
            Distribution::Uniform { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    return invalid("uniform bounds must be finite");
                }
                if min >= max {
                    return invalid("uniform requires min < max");
                }
            }
            Distribution::Normal { mean, std_dev } => {
                if !mean.is_finite() || !std_dev.is_finite() {
                    return invalid("normal parameters must be finite");
                }
                if std_dev < 0.0 {
                    return invalid("normal requires std >= 0");
                }
            }
            Distribution::Triangular { min, mode, max } => {
                if !min.is_finite() || !mode.is_finite() || !max.is_finite() {
                    return invalid("triangular parameters must be finite");
                }
                if min >= max || mode < min || mode > max {
                    return invalid("triangular requires min <= mode <= max and min < max");
                }
            }
        }
        Ok(())
    }

    /// Wire family of this distribution.
    pub fn kind(&self) -> DistributionKind {
        match self {
            Distribution::Uniform { .. } => DistributionKind::Uniform,
            Distribution::Normal { .. } => DistributionKind::Normal,
            Distribution::Triangular { .. } => DistributionKind::Triangular,
        }
    }

    /// Map a uniform variate `u` in `[0, 1]` to this distribution.
    ///
    /// Exact inverse CDF for uniform and triangular. Normal variates should go
    /// through [`Distribution::from_standard_normal`] instead; here the normal
    /// case collapses to its mean.
    pub fn inverse_cdf(&self, u: f64) -> f64 {
        let u = u.clamp(0.0, 1.0);
        match *self {
            Distribution::Uniform { min, max } => min + u * (max - min),
            Distribution::Normal { mean, .. } => mean,
            Distribution::Triangular { min, mode, max } => {
                let width = max - min;
                let split = (mode - min) / width;
                if u < split {
                    min + (u * width * (mode - min)).sqrt()
                } else {
                    max - ((1.0 - u) * width * (max - mode)).sqrt()
                }
            }
        }
    }

    /// Map a standard normal variate `z` to this distribution.
    ///
    /// Normal marginals scale directly; the others go through `Φ(z)` and the
    /// inverse CDF (Gaussian copula).
    pub fn from_standard_normal(&self, z: f64) -> f64 {
        match *self {
            Distribution::Normal { mean, std_dev } => mean + std_dev * z,
            _ => self.inverse_cdf(norm_cdf(z)),
        }
    }
}

impl TryFrom<DistributionSpec> for Distribution {
    type Error = RiskError;

    fn try_from(spec: DistributionSpec) -> Result<Self, Self::Error> {
        let p = &spec.parameters;
        let arity = match spec.distribution {
            DistributionKind::Uniform | DistributionKind::Normal => 2,
            DistributionKind::Triangular => 3,
        };
        if p.len() != arity {
            return Err(RiskError::invalid_distribution(
                "",
                format!(
                    "{} takes {} parameters, got {}",
                    spec.distribution.as_str(),
                    arity,
                    p.len()
                ),
            ));
        }
        match spec.distribution {
            DistributionKind::Uniform => Self::uniform(p[0], p[1]),
            DistributionKind::Normal => Self::normal(p[0], p[1]),
            DistributionKind::Triangular => Self::triangular(p[0], p[1], p[2]),
        }
    }
}

impl From<Distribution> for DistributionSpec {
    fn from(d: Distribution) -> Self {
        let parameters = match d {
            Distribution::Uniform { min, max } => vec![min, max],
            Distribution::Normal { mean, std_dev } => vec![mean, std_dev],
            Distribution::Triangular { min, mode, max } => vec![min, mode, max],
        };
        Self {
            distribution: d.kind(),
            parameters,
        }
    }
}
