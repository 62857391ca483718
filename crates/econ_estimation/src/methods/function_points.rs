//! Function point effort estimation.
//!
//! Adjusted function points are converted to effort through an hours-per-FP
//! productivity rate and the number of working hours in a person-month. The
//! low and high rates give an effort band around the average.

use super::require_positive;
use crate::config::FunctionPointConfig;
use crate::result::{EstimationDetail, EstimationResult, MethodId};
use econ_core::types::EstimationError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Range of CAF values considered plausible; values outside are flagged.
pub const RECOMMENDED_CAF_RANGE: RangeInclusive<f64> = 0.65..=1.35;

/// Counts and effort band behind a function point estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionPointDetail {
    /// Unadjusted function points
    pub unadjusted_fp: f64,
    /// Complexity adjustment factor
    pub complexity_adjustment_factor: f64,
    /// `ufp * caf`
    pub adjusted_fp: f64,
    /// Whether the CAF lies in 0.65..=1.35
    pub caf_in_recommended_range: bool,
    /// Hours per function point used for the average effort
    pub hours_per_fp: f64,
    /// Effort at the high-productivity rate
    pub low_effort: f64,
    /// Effort at the average rate
    pub average_effort: f64,
    /// Effort at the low-productivity rate
    pub high_effort: f64,
}

/// Function point estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionPointEstimator {
    config: FunctionPointConfig,
}

impl FunctionPointEstimator {
    /// Create an estimator with the given productivity settings.
    pub fn new(config: FunctionPointConfig) -> Self {
        Self { config }
    }

    /// Productivity settings in use.
    pub fn config(&self) -> &FunctionPointConfig {
        &self.config
    }

    fn effort_at(&self, adjusted_fp: f64, hours_per_fp: f64) -> f64 {
        adjusted_fp * hours_per_fp / self.config.hours_per_person_month
    }

    /// Estimate effort from unadjusted function points and the CAF.
    ///
    /// # Errors
    ///
    /// [`EstimationError::InvalidInput`] when either count is not positive and
    /// finite, or the productivity settings are invalid.
    pub fn estimate(&self, ufp: f64, caf: f64) -> Result<EstimationResult, EstimationError> {
        self.config.validate()?;
        let ufp = require_positive("ufp", ufp)?;
        let caf = require_positive("caf", caf)?;

        let adjusted_fp = ufp * caf;
        let average_effort = self.effort_at(adjusted_fp, self.config.hours_per_fp);

        Ok(EstimationResult {
            method: MethodId::FunctionPoints,
            effort_person_months: average_effort,
            metadata: EstimationDetail::FunctionPoints(FunctionPointDetail {
                unadjusted_fp: ufp,
                complexity_adjustment_factor: caf,
                adjusted_fp,
                caf_in_recommended_range: RECOMMENDED_CAF_RANGE.contains(&caf),
                hours_per_fp: self.config.hours_per_fp,
                low_effort: self.effort_at(adjusted_fp, self.config.low_hours_per_fp),
                average_effort,
                high_effort: self.effort_at(adjusted_fp, self.config.high_hours_per_fp),
            }),
        })
    }
}
