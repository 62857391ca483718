//! Effort estimation endpoints
//!
//! The combined report absorbs per-method failures; the single-method
//! endpoints propagate them as `422`.

use axum::{extract::State, response::Json, routing::post, Router};
use econ_estimation::{
    CocomoEstimator, DelphiConsensusEstimator, DelphiOutcome, EstimationInput, EstimationReport,
    EstimationReportBuilder, EstimationResult, ExpertJudgmentAggregator, ExpertSummary,
    FunctionPointEstimator, RegressionEstimator,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

/// COCOMO request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CocomoRequest {
    /// Size in thousands of lines of code
    pub size_kloc: f64,
    /// `organic`, `semi_detached` or `embedded`
    pub mode: String,
}

/// Function point request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionPointRequest {
    /// Unadjusted function points
    pub ufp: f64,
    /// Complexity adjustment factor
    pub caf: f64,
}

/// Expert panel request body, shared by expert judgment and Delphi
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertRequest {
    /// Person-month estimates from each expert
    pub expert_estimates: Vec<f64>,
}

/// Regression request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionRequest {
    /// Size in the model's unit
    pub size: f64,
}

/// Build the estimation routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/estimates", post(report_handler))
        .route("/api/v1/estimates/cocomo", post(cocomo_handler))
        .route("/api/v1/estimates/function-points", post(function_points_handler))
        .route("/api/v1/estimates/expert-judgment", post(expert_handler))
        .route("/api/v1/estimates/delphi", post(delphi_handler))
        .route("/api/v1/estimates/regression", post(regression_handler))
}

/// POST /api/v1/estimates - Every method the input allows, plus a summary
async fn report_handler(
    State(state): State<AppState>,
    Json(input): Json<EstimationInput>,
) -> Json<EstimationReport> {
    let report = EstimationReportBuilder::new(&state.config.estimation).build(&input);
    tracing::debug!(
        valid_count = report.summary.valid_count,
        "Estimation report built"
    );
    Json(report)
}

/// POST /api/v1/estimates/cocomo
async fn cocomo_handler(
    Json(request): Json<CocomoRequest>,
) -> Result<Json<EstimationResult>, ApiError> {
    let result = CocomoEstimator::new().estimate(request.size_kloc, &request.mode)?;
    Ok(Json(result))
}

/// POST /api/v1/estimates/function-points
async fn function_points_handler(
    State(state): State<AppState>,
    Json(request): Json<FunctionPointRequest>,
) -> Result<Json<EstimationResult>, ApiError> {
    let estimator = FunctionPointEstimator::new(state.config.estimation.function_points);
    Ok(Json(estimator.estimate(request.ufp, request.caf)?))
}

/// POST /api/v1/estimates/expert-judgment
async fn expert_handler(
    Json(request): Json<ExpertRequest>,
) -> Result<Json<ExpertSummary>, ApiError> {
    let summary = ExpertJudgmentAggregator::new().aggregate(&request.expert_estimates)?;
    Ok(Json(summary))
}

/// POST /api/v1/estimates/delphi
async fn delphi_handler(
    State(state): State<AppState>,
    Json(request): Json<ExpertRequest>,
) -> Result<Json<DelphiOutcome>, ApiError> {
    let outcome = DelphiConsensusEstimator::new()
        .with_trim_fraction(state.config.estimation.delphi.trim_fraction)
        .estimate(&request.expert_estimates)?;
    Ok(Json(outcome))
}

/// POST /api/v1/estimates/regression
async fn regression_handler(
    State(state): State<AppState>,
    Json(request): Json<RegressionRequest>,
) -> Result<Json<EstimationResult>, ApiError> {
    let estimator = RegressionEstimator::new(state.config.estimation.regression);
    Ok(Json(estimator.estimate(request.size)?))
}
