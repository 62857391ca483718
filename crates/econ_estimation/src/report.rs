//! Combined estimation report.
//!
//! Runs every method whose inputs are present, absorbs per-method failures
//! and summarises the surviving estimates.

use crate::config::EstimationConfig;
use crate::input::EstimationInput;
use crate::methods::cocomo::CocomoEstimator;
use crate::methods::delphi::DelphiConsensusEstimator;
use crate::methods::expert::{filter_estimates, ExpertJudgmentAggregator};
use crate::methods::function_points::FunctionPointEstimator;
use crate::methods::regression::RegressionEstimator;
use crate::result::{EstimationResult, MethodId};
use econ_core::types::EstimationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fewest valid expert estimates for which the report runs a Delphi round.
pub const MIN_DELPHI_PANEL: usize = 3;

/// Aggregate over the valid estimates of a report.
///
/// Statistics are `None` when no method produced an estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimationSummary {
    /// Number of methods that produced an estimate
    pub valid_count: usize,
    /// Mean effort across methods
    pub average: Option<f64>,
    /// Smallest effort
    pub min: Option<f64>,
    /// Largest effort
    pub max: Option<f64>,
    /// `max - min`
    pub range: Option<f64>,
}

impl EstimationSummary {
    fn from_efforts(efforts: &[f64]) -> Self {
        if efforts.is_empty() {
            return Self::default();
        }
        let min = efforts.iter().copied().fold(f64::INFINITY, f64::min);
        let max = efforts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            valid_count: efforts.len(),
            average: Some(efforts.iter().sum::<f64>() / efforts.len() as f64),
            min: Some(min),
            max: Some(max),
            range: Some(max - min),
        }
    }
}

/// Estimates of every method that ran, plus their summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimationReport {
    /// Successful results keyed by method
    pub results: BTreeMap<MethodId, EstimationResult>,
    /// Summary over `results`
    pub summary: EstimationSummary,
}

impl EstimationReport {
    /// Result of one method, if it ran successfully.
    pub fn get(&self, method: MethodId) -> Option<&EstimationResult> {
        self.results.get(&method)
    }

    /// True when no method produced an estimate.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Builds an [`EstimationReport`] from an [`EstimationInput`].
#[derive(Debug, Clone, Default)]
pub struct EstimationReportBuilder {
    cocomo: CocomoEstimator,
    function_points: FunctionPointEstimator,
    expert: ExpertJudgmentAggregator,
    delphi: DelphiConsensusEstimator,
    regression: RegressionEstimator,
}

impl EstimationReportBuilder {
    /// Create a builder whose estimators use `config`.
    pub fn new(config: &EstimationConfig) -> Self {
        Self {
            cocomo: CocomoEstimator::new(),
            function_points: FunctionPointEstimator::new(config.function_points),
            expert: ExpertJudgmentAggregator::new(),
            delphi: DelphiConsensusEstimator::new().with_trim_fraction(config.delphi.trim_fraction),
            regression: RegressionEstimator::new(config.regression),
        }
    }

    /// Run every gated method and summarise the successful ones.
    ///
    /// Never fails: methods with missing inputs are not run, methods whose
    /// inputs are invalid are logged at debug level and left out.
    pub fn build(&self, input: &EstimationInput) -> EstimationReport {
        let mut results = BTreeMap::new();
        let mut record = |method: MethodId, outcome: Result<EstimationResult, EstimationError>| {
            match outcome {
                Ok(result) => {
                    results.insert(method, result);
                }
                Err(err) => {
                    tracing::debug!(method = %method, error = %err, "estimation method skipped");
                }
            }
        };

        if let (Some(size), Some(mode)) = (input.size_kloc, input.mode.as_deref()) {
            record(MethodId::Cocomo, self.cocomo.estimate(size, mode));
        }

        if let (Some(ufp), Some(caf)) = (input.ufp, input.caf) {
            record(
                MethodId::FunctionPoints,
                self.function_points.estimate(ufp, caf),
            );
        }

        if let Some(raw) = &input.expert_estimates {
            let estimates = filter_estimates(raw);
            if estimates.len() < raw.len() {
                tracing::debug!(
                    dropped = raw.len() - estimates.len(),
                    "ignoring non-positive expert estimates"
                );
            }
            if !estimates.is_empty() {
                record(MethodId::ExpertJudgment, self.expert.estimate(&estimates));
            }
            if estimates.len() >= MIN_DELPHI_PANEL {
                record(MethodId::Delphi, self.delphi.estimate_result(&estimates));
            } else if !estimates.is_empty() {
                tracing::debug!(
                    count = estimates.len(),
                    "skipping delphi: panel smaller than {}",
                    MIN_DELPHI_PANEL
                );
            }
        }

        if let Some(size) = input.regression_size {
            record(MethodId::Regression, self.regression.estimate(size));
        }

        let efforts: Vec<f64> = results.values().map(|r| r.effort_person_months).collect();
        EstimationReport {
            summary: EstimationSummary::from_efforts(&efforts),
            results,
        }
    }
}
