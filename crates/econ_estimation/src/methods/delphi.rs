//! Single-round Delphi consensus.
//!
//! The extreme estimates at both ends are discarded before averaging, and the
//! agreement among the rest is scored from their coefficient of variation.

use super::expert::validate_estimates;
use crate::result::{EstimationDetail, EstimationResult, MethodId};
use econ_core::math::statistics::{mean, sample_std_dev, sorted_copy};
use econ_core::types::EstimationError;
use serde::{Deserialize, Serialize};

/// Default fraction of estimates dropped from each end.
pub const DEFAULT_TRIM_FRACTION: f64 = 0.1;

/// Qualitative label for a consensus level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusConfidence {
    /// Consensus level at least 0.8
    High,
    /// Consensus level at least 0.6
    Medium,
    /// Anything lower
    Low,
}

impl ConsensusConfidence {
    /// Classify a consensus level in `[0, 1]`.
    pub fn from_level(level: f64) -> Self {
        if level >= 0.8 {
            ConsensusConfidence::High
        } else if level >= 0.6 {
            ConsensusConfidence::Medium
        } else {
            ConsensusConfidence::Low
        }
    }
}

/// Result of a Delphi round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelphiOutcome {
    /// Mean of the retained estimates
    pub final_estimate: f64,
    /// `clamp(1 - std_dev / mean, 0, 1)` over the retained estimates
    pub consensus_level: f64,
    /// Label derived from the consensus level
    pub confidence_label: ConsensusConfidence,
    /// Number of estimates dropped from each end
    pub trimmed_per_side: usize,
    /// Number of estimates kept
    pub retained_count: usize,
}

impl DelphiOutcome {
    /// Wrap the outcome in a result whose effort is the final estimate.
    pub fn into_result(self) -> EstimationResult {
        EstimationResult {
            method: MethodId::Delphi,
            effort_person_months: self.final_estimate,
            metadata: EstimationDetail::Delphi(self),
        }
    }
}

/// Delphi consensus estimator.
#[derive(Debug, Clone, Copy)]
pub struct DelphiConsensusEstimator {
    trim_fraction: f64,
}

impl Default for DelphiConsensusEstimator {
    fn default() -> Self {
        Self {
            trim_fraction: DEFAULT_TRIM_FRACTION,
        }
    }
}

impl DelphiConsensusEstimator {
    /// Create an estimator with the default 10% trim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the trim fraction, clamped to `[0, 0.5]`.
    pub fn with_trim_fraction(mut self, fraction: f64) -> Self {
        self.trim_fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 0.5)
        } else {
            DEFAULT_TRIM_FRACTION
        };
        self
    }

    /// Run one consensus round over the estimates.
    ///
    /// # Errors
    ///
    /// * [`EstimationError::EmptyInput`] - no estimates
    /// * [`EstimationError::InvalidInput`] - an estimate is not positive and finite
    ///
    /// # Examples
    ///
    /// ```
    /// use econ_estimation::DelphiConsensusEstimator;
    ///
    /// let outcome = DelphiConsensusEstimator::new()
    ///     .estimate(&[10.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0, 100.0])
    ///     .unwrap();
    /// assert!((outcome.final_estimate - 15.5).abs() < 1e-12);
    /// ```
    pub fn estimate(&self, estimates: &[f64]) -> Result<DelphiOutcome, EstimationError> {
        validate_estimates(estimates)?;

        let sorted = sorted_copy(estimates);
        let n = sorted.len();
        let trim = (n as f64 * self.trim_fraction).floor() as usize;
        let retained: &[f64] = if n > 2 * trim {
            &sorted[trim..n - trim]
        } else {
            &sorted
        };

        let empty = || EstimationError::empty_input("no expert estimates");
        let final_estimate = mean(retained).ok_or_else(empty)?;
        let sd = sample_std_dev(retained).ok_or_else(empty)?;
        let consensus_level = if final_estimate == 0.0 {
            1.0
        } else {
            (1.0 - sd / final_estimate).clamp(0.0, 1.0)
        };

        Ok(DelphiOutcome {
            final_estimate,
            consensus_level,
            confidence_label: ConsensusConfidence::from_level(consensus_level),
            trimmed_per_side: if n > 2 * trim { trim } else { 0 },
            retained_count: retained.len(),
        })
    }

    /// Run a round and wrap it as an [`EstimationResult`].
    pub fn estimate_result(&self, estimates: &[f64]) -> Result<EstimationResult, EstimationError> {
        Ok(self.estimate(estimates)?.into_result())
    }
}
