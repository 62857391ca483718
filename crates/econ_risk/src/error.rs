//! Error types for risk analysis.

use econ_core::math::correlation::CorrelationError;
use thiserror::Error;

/// Errors from sensitivity analysis, simulation and decision trees.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// Out-of-domain input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Distribution parameters are malformed.
    #[error("Invalid distribution for '{variable}': {reason}")]
    InvalidDistribution {
        /// Variable name (empty when not yet bound to a variable)
        variable: String,
        /// What is wrong with the parameters
        reason: String,
    },

    /// Correlation matrix rejected.
    #[error("Correlation error: {0}")]
    Correlation(#[from] CorrelationError),
}

impl RiskError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invalid distribution error
    pub fn invalid_distribution(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDistribution {
            variable: variable.into(),
            reason: reason.into(),
        }
    }

    /// Attach a variable name to a distribution error raised before binding.
    pub(crate) fn for_variable(self, name: &str) -> Self {
        match self {
            Self::InvalidDistribution { reason, .. } => Self::InvalidDistribution {
                variable: name.to_string(),
                reason,
            },
            other => other,
        }
    }
}
