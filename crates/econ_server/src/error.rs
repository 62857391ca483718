//! HTTP error mapping
//!
//! Engine errors become `422 Unprocessable Entity` with a `{error, message}`
//! body; anything the engine did not produce becomes `500`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use econ_core::types::EstimationError;
use econ_finance::FinanceError;
use econ_risk::RiskError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable description
    pub message: String,
}

/// Errors returned by the API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Estimation(#[from] EstimationError),

    #[error(transparent)]
    Finance(#[from] FinanceError),

    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error("Requested {requested} iterations exceeds the limit of {max}")]
    IterationLimit { requested: usize, max: usize },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Stable error code used in the response body
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Estimation(EstimationError::InvalidInput(_)) => "invalid_input",
            ApiError::Estimation(EstimationError::InvalidMode(_)) => "invalid_mode",
            ApiError::Estimation(EstimationError::EmptyInput(_)) => "empty_input",
            ApiError::Finance(FinanceError::InvalidInput(_)) => "invalid_input",
            ApiError::Finance(FinanceError::EmptyInput(_)) => "empty_input",
            ApiError::Finance(FinanceError::EmptyLedger) => "empty_ledger",
            ApiError::Risk(RiskError::InvalidInput(_)) => "invalid_input",
            ApiError::Risk(RiskError::InvalidDistribution { .. }) => "invalid_distribution",
            ApiError::Risk(RiskError::Correlation(_)) => "invalid_correlation",
            ApiError::IterationLimit { .. } => "iteration_limit",
            ApiError::Internal(_) => "internal_error",
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, code = self.code(), "Request rejected");
        }

        let body = ErrorBody {
            error: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
