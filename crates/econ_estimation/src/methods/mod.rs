//! Individual estimation methods.
//!
//! Every estimator is a plain value holding its constants; `estimate` is a
//! pure function of the inputs.

pub mod cocomo;
pub mod delphi;
pub mod expert;
pub mod function_points;
pub mod regression;

use econ_core::types::EstimationError;

/// Fail unless `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &str, value: f64) -> Result<f64, EstimationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EstimationError::invalid_input(format!(
            "{} must be a positive finite number, got {}",
            name, value
        )))
    }
}
