//! REST API server for the project economics estimation engine
//!
//! Exposes the effort estimators, financial metrics, budget analysis and
//! risk tools of the `econ_*` crates as JSON endpoints.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

// Re-export engine crates for integration
pub use econ_estimation;
pub use econ_finance;
pub use econ_risk;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
