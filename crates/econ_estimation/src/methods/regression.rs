//! Linear regression effort model.

use crate::config::RegressionConfig;
use crate::result::{EstimationDetail, EstimationResult, MethodId};
use econ_core::types::EstimationError;
use serde::{Deserialize, Serialize};

/// Equation and inputs behind a regression estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionDetail {
    /// Display form of the fitted line
    pub equation: String,
    /// Intercept
    pub intercept: f64,
    /// Slope
    pub slope: f64,
    /// Size driver supplied
    pub size: f64,
}

/// Estimator applying `effort = intercept + slope * size`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegressionEstimator {
    config: RegressionConfig,
}

impl RegressionEstimator {
    /// Create an estimator with the given coefficients.
    pub fn new(config: RegressionConfig) -> Self {
        Self { config }
    }

    /// Display form of the equation, e.g. `effort = 1.20 + 0.35 * size`.
    pub fn equation(&self) -> String {
        let RegressionConfig { intercept, slope } = self.config;
        if slope < 0.0 {
            format!("effort = {:.2} - {:.2} * size", intercept, slope.abs())
        } else {
            format!("effort = {:.2} + {:.2} * size", intercept, slope)
        }
    }

    /// Estimate effort for a non-negative size.
    ///
    /// # Errors
    ///
    /// [`EstimationError::InvalidInput`] when `size` is negative or not finite.
    pub fn estimate(&self, size: f64) -> Result<EstimationResult, EstimationError> {
        self.config.validate()?;
        if !(size.is_finite() && size >= 0.0) {
            return Err(EstimationError::invalid_input(format!(
                "size must be a non-negative finite number, got {}",
                size
            )));
        }

        let effort = self.config.intercept + self.config.slope * size;
        Ok(EstimationResult {
            method: MethodId::Regression,
            effort_person_months: effort,
            metadata: EstimationDetail::Regression(RegressionDetail {
                equation: self.equation(),
                intercept: self.config.intercept,
                slope: self.config.slope,
                size,
            }),
        })
    }
}
