//! Expert judgment aggregation.

use crate::result::{EstimationDetail, EstimationResult, MethodId};
use econ_core::math::statistics::{confidence_interval_95, mean, median, sample_std_dev};
use econ_core::types::EstimationError;
use serde::{Deserialize, Serialize};

/// Symmetric confidence interval around a mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
}

/// Summary statistics over a set of expert estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertSummary {
    /// Number of estimates
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Median
    pub median: f64,
    /// Sample standard deviation (0 for a single estimate)
    pub std_dev: f64,
    /// 95% normal-approximation interval for the mean
    pub confidence_interval_95: ConfidenceInterval,
}

impl ExpertSummary {
    /// Wrap the summary in a result whose effort is the mean.
    pub fn into_result(self) -> EstimationResult {
        EstimationResult {
            method: MethodId::ExpertJudgment,
            effort_person_months: self.mean,
            metadata: EstimationDetail::ExpertJudgment(self),
        }
    }
}

/// Keep only the finite, strictly positive estimates.
pub fn filter_estimates(estimates: &[f64]) -> Vec<f64> {
    estimates
        .iter()
        .copied()
        .filter(|e| e.is_finite() && *e > 0.0)
        .collect()
}

pub(crate) fn validate_estimates(estimates: &[f64]) -> Result<(), EstimationError> {
    if estimates.is_empty() {
        return Err(EstimationError::empty_input("no expert estimates"));
    }
    if let Some(bad) = estimates.iter().find(|e| !(e.is_finite() && **e > 0.0)) {
        return Err(EstimationError::invalid_input(format!(
            "expert estimates must be positive finite numbers, got {}",
            bad
        )));
    }
    Ok(())
}

/// Aggregates independent expert estimates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpertJudgmentAggregator;

impl ExpertJudgmentAggregator {
    /// Create an aggregator.
    pub fn new() -> Self {
        Self
    }

    /// Compute mean, median, standard deviation and the 95% interval.
    ///
    /// # Errors
    ///
    /// * [`EstimationError::EmptyInput`] - no estimates
    /// * [`EstimationError::InvalidInput`] - an estimate is not positive and finite
    pub fn aggregate(&self, estimates: &[f64]) -> Result<ExpertSummary, EstimationError> {
        validate_estimates(estimates)?;

        let empty = || EstimationError::empty_input("no expert estimates");
        let m = mean(estimates).ok_or_else(empty)?;
        let med = median(estimates).ok_or_else(empty)?;
        let sd = sample_std_dev(estimates).ok_or_else(empty)?;
        let (lower, upper) = confidence_interval_95(m, sd, estimates.len());

        Ok(ExpertSummary {
            count: estimates.len(),
            mean: m,
            median: med,
            std_dev: sd,
            confidence_interval_95: ConfidenceInterval { lower, upper },
        })
    }

    /// Aggregate and wrap as an [`EstimationResult`] with `effort = mean`.
    pub fn estimate(&self, estimates: &[f64]) -> Result<EstimationResult, EstimationError> {
        Ok(self.aggregate(estimates)?.into_result())
    }
}
