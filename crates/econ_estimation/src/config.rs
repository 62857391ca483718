//! Tunable constants of the estimators.
//!
//! Deserialised from the `[estimation]` table of the server configuration;
//! every field has a default so partial tables are accepted.

use crate::methods::delphi::DEFAULT_TRIM_FRACTION;
use econ_core::types::EstimationError;
use serde::{Deserialize, Serialize};

/// Function point productivity settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionPointConfig {
    /// Hours of work per adjusted function point (average productivity)
    pub hours_per_fp: f64,
    /// Working hours in one person-month
    pub hours_per_person_month: f64,
    /// Hours per function point for the high-productivity (low effort) variant
    pub low_hours_per_fp: f64,
    /// Hours per function point for the low-productivity (high effort) variant
    pub high_hours_per_fp: f64,
}

impl Default for FunctionPointConfig {
    fn default() -> Self {
        Self {
            hours_per_fp: 14.0,
            hours_per_person_month: 152.0,
            low_hours_per_fp: 8.0,
            high_hours_per_fp: 20.0,
        }
    }
}

impl FunctionPointConfig {
    /// Check that all rates are positive and the band brackets the average.
    pub fn validate(&self) -> Result<(), EstimationError> {
        for (name, value) in [
            ("hours_per_fp", self.hours_per_fp),
            ("hours_per_person_month", self.hours_per_person_month),
            ("low_hours_per_fp", self.low_hours_per_fp),
            ("high_hours_per_fp", self.high_hours_per_fp),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(EstimationError::invalid_input(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.low_hours_per_fp > self.hours_per_fp || self.hours_per_fp > self.high_hours_per_fp {
            return Err(EstimationError::invalid_input(format!(
                "productivity band must satisfy low <= average <= high, got {} / {} / {}",
                self.low_hours_per_fp, self.hours_per_fp, self.high_hours_per_fp
            )));
        }
        Ok(())
    }
}

/// Historically fitted linear effort model `effort = intercept + slope * size`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionConfig {
    /// Effort at zero size (person-months)
    pub intercept: f64,
    /// Effort per unit of size (person-months)
    pub slope: f64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            intercept: 1.2,
            slope: 0.35,
        }
    }
}

impl RegressionConfig {
    /// Check that both coefficients are finite.
    pub fn validate(&self) -> Result<(), EstimationError> {
        if !self.intercept.is_finite() || !self.slope.is_finite() {
            return Err(EstimationError::invalid_input(
                "regression coefficients must be finite",
            ));
        }
        Ok(())
    }
}

/// Delphi consensus settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelphiConfig {
    /// Fraction of estimates dropped from each end before averaging
    pub trim_fraction: f64,
}

impl Default for DelphiConfig {
    fn default() -> Self {
        Self {
            trim_fraction: DEFAULT_TRIM_FRACTION,
        }
    }
}

impl DelphiConfig {
    /// Check that the trim fraction lies in `[0, 0.5]`.
    pub fn validate(&self) -> Result<(), EstimationError> {
        if !(0.0..=0.5).contains(&self.trim_fraction) {
            return Err(EstimationError::invalid_input(format!(
                "delphi trim_fraction must be within [0, 0.5], got {}",
                self.trim_fraction
            )));
        }
        Ok(())
    }
}

/// Configuration for all estimators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    /// Function point productivity
    pub function_points: FunctionPointConfig,
    /// Regression coefficients
    pub regression: RegressionConfig,
    /// Delphi trimming
    pub delphi: DelphiConfig,
}

impl EstimationConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), EstimationError> {
        self.function_points.validate()?;
        self.regression.validate()?;
        self.delphi.validate()
    }
}
