//! Combined estimation request.

use serde::{Deserialize, Serialize};

/// Optional inputs for every estimation method.
///
/// A method runs only when all of its fields are present. The COCOMO mode is
/// kept as free text so an unrecognised mode only disables that method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationInput {
    /// Software size in thousands of lines of code (COCOMO)
    pub size_kloc: Option<f64>,
    /// COCOMO development mode (`organic`, `semi_detached`, `embedded`)
    pub mode: Option<String>,
    /// Unadjusted function points
    pub ufp: Option<f64>,
    /// Complexity adjustment factor
    pub caf: Option<f64>,
    /// Raw expert estimates in person-months
    pub expert_estimates: Option<Vec<f64>>,
    /// Size driver for the regression model
    pub regression_size: Option<f64>,
}

impl EstimationInput {
    /// Enable COCOMO with the given size and mode.
    pub fn with_cocomo(mut self, size_kloc: f64, mode: impl Into<String>) -> Self {
        self.size_kloc = Some(size_kloc);
        self.mode = Some(mode.into());
        self
    }

    /// Enable Function Points with the given counts.
    pub fn with_function_points(mut self, ufp: f64, caf: f64) -> Self {
        self.ufp = Some(ufp);
        self.caf = Some(caf);
        self
    }

    /// Enable Expert Judgment and Delphi with the given raw estimates.
    pub fn with_expert_estimates(mut self, estimates: Vec<f64>) -> Self {
        self.expert_estimates = Some(estimates);
        self
    }

    /// Enable Regression with the given size.
    pub fn with_regression_size(mut self, size: f64) -> Self {
        self.regression_size = Some(size);
        self
    }
}
