//! Risk analysis endpoints
//!
//! Simulation runs on the blocking pool so the rayon batches never stall
//! the async workers.

use axum::{extract::State, response::Json, routing::post, Router};
use econ_risk::{
    evaluate, DecisionNode, DistributionSampler, MonteCarloInput, MonteCarloResult,
    MonteCarloSimulator, NodeEvaluation, SensitivityAnalyzer, SensitivityInput, SensitivityReport,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

/// Monte Carlo request body: the simulation input plus an optional seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloRequest {
    /// Trials, variables and correlation
    #[serde(flatten)]
    pub input: MonteCarloInput,
    /// Base seed; the configured seed, then a random one, when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Build the risk routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/risk/sensitivity", post(sensitivity_handler))
        .route("/api/v1/risk/monte-carlo", post(monte_carlo_handler))
        .route("/api/v1/risk/decision-tree", post(decision_tree_handler))
}

/// POST /api/v1/risk/sensitivity - Tornado ranking with each bound as the outcome
async fn sensitivity_handler(
    Json(input): Json<SensitivityInput>,
) -> Result<Json<SensitivityReport>, ApiError> {
    Ok(Json(SensitivityAnalyzer::new().analyze_direct(&input)?))
}

/// POST /api/v1/risk/monte-carlo - Seeded batch-parallel simulation
async fn monte_carlo_handler(
    State(state): State<AppState>,
    Json(request): Json<MonteCarloRequest>,
) -> Result<Json<MonteCarloResult>, ApiError> {
    let max = state.config.monte_carlo_max_iterations;
    if request.input.iterations > max {
        return Err(ApiError::IterationLimit {
            requested: request.input.iterations,
            max,
        });
    }

    let seed = request
        .seed
        .or(state.config.monte_carlo_seed)
        .unwrap_or_else(|| DistributionSampler::from_entropy().seed());
    tracing::debug!(
        iterations = request.input.iterations,
        variables = request.input.variables.len(),
        seed,
        "Monte Carlo request accepted"
    );

    let input = request.input;
    let result = tokio::task::spawn_blocking(move || {
        MonteCarloSimulator::default().simulate_parallel(&input, seed)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("simulation task failed: {}", e)))??;

    Ok(Json(result))
}

/// POST /api/v1/risk/decision-tree - Expected values and optimal choices
async fn decision_tree_handler(
    Json(tree): Json<DecisionNode>,
) -> Result<Json<NodeEvaluation>, ApiError> {
    Ok(Json(evaluate(&tree)?))
}
