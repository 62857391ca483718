//! # econ_risk: Project Risk Analysis (L3)
//!
//! Quantifies uncertainty around an estimate or a financial outcome.
//!
//! ## Features
//!
//! - **Sensitivity**: one-at-a-time impacts ranked for a tornado diagram
//! - **Monte Carlo**: uniform, normal and triangular inputs, optional
//!   Gaussian-copula correlation, seeded batches on the rayon pool
//! - **Decision trees**: expected value, best/worst case and optimal choice
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────┐
//! │ SensitivityAnalyzer │ MonteCarloSimulator │ decision_tree    │
//! │ (injected evaluate) │ (injected Sampler)  │ (recursive EV)   │
//! └──────────────────┘ └──────────────────┘ └──────────────────┘
//!                         ↓
//! ┌──────────────────────────────────────────────────────────┐
//! │  econ_core (L1): statistics, norm_cdf, CorrelationMatrix │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod decision_tree;
pub mod error;
pub mod monte_carlo;
pub mod sensitivity;

pub use decision_tree::{evaluate, Alternative, DecisionNode, NodeAnalysis, NodeEvaluation, NodeKind};
pub use error::RiskError;
pub use monte_carlo::{
    Distribution, DistributionSampler, MonteCarloInput, MonteCarloResult, MonteCarloSimulator,
    Sampler, SimulationConfig,
};
pub use sensitivity::{
    SensitivityAnalyzer, SensitivityInput, SensitivityReport, SensitivityResult, VariableRange,
};
