//! Uniform result record shared by all estimators.

use crate::methods::cocomo::CocomoDetail;
use crate::methods::delphi::DelphiOutcome;
use crate::methods::expert::ExpertSummary;
use crate::methods::function_points::FunctionPointDetail;
use crate::methods::regression::RegressionDetail;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an estimation method.
///
/// Ordering follows the report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodId {
    /// Basic COCOMO
    Cocomo,
    /// Function point analysis
    FunctionPoints,
    /// Statistical aggregation of expert estimates
    ExpertJudgment,
    /// Trimmed-mean Delphi consensus
    Delphi,
    /// Linear regression on size
    Regression,
}

impl MethodId {
    /// All methods in report order.
    pub const ALL: [MethodId; 5] = [
        MethodId::Cocomo,
        MethodId::FunctionPoints,
        MethodId::ExpertJudgment,
        MethodId::Delphi,
        MethodId::Regression,
    ];

    /// Human-readable method name.
    pub fn name(&self) -> &'static str {
        match self {
            MethodId::Cocomo => "COCOMO",
            MethodId::FunctionPoints => "Function Points",
            MethodId::ExpertJudgment => "Expert Judgment",
            MethodId::Delphi => "Delphi",
            MethodId::Regression => "Regression",
        }
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Method-specific metadata attached to an [`EstimationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimationDetail {
    /// COCOMO schedule and coefficients
    Cocomo(CocomoDetail),
    /// Function point counts and effort band
    FunctionPoints(FunctionPointDetail),
    /// Expert statistics
    ExpertJudgment(ExpertSummary),
    /// Delphi consensus
    Delphi(DelphiOutcome),
    /// Regression equation
    Regression(RegressionDetail),
}

/// Effort estimate produced by one method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    /// Method that produced the estimate
    pub method: MethodId,
    /// Estimated effort in person-months
    pub effort_person_months: f64,
    /// Method-specific detail
    pub metadata: EstimationDetail,
}
