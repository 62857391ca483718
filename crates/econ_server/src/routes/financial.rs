//! Investment metrics and budget analysis endpoints

use axum::{response::Json, routing::post, Router};
use econ_finance::{
    BudgetAnalysis, BudgetEntry, BudgetLedger, FinancialInput, FinancialMetrics,
    FinancialMetricsCalculator,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

/// Budget analysis request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetAnalysisRequest {
    /// Planned budget; variance is omitted without it
    #[serde(default)]
    pub initial_budget: Option<f64>,
    /// Recorded costs
    pub entries: Vec<BudgetEntry>,
}

/// Build the financial routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/financials", post(financials_handler))
        .route("/api/v1/budget/analysis", post(budget_analysis_handler))
}

/// POST /api/v1/financials - ROI, NPV, IRR and payback period
async fn financials_handler(
    Json(input): Json<FinancialInput>,
) -> Result<Json<FinancialMetrics>, ApiError> {
    let metrics = FinancialMetricsCalculator::default().compute(&input)?;
    Ok(Json(metrics))
}

/// POST /api/v1/budget/analysis - Totals, variance, per-category split and forecast
async fn budget_analysis_handler(
    Json(request): Json<BudgetAnalysisRequest>,
) -> Result<Json<BudgetAnalysis>, ApiError> {
    let ledger = BudgetLedger::from_entries(request.entries)?;
    Ok(Json(ledger.analyze(request.initial_budget)?))
}
