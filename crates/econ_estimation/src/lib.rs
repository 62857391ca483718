//! # econ_estimation: Software Effort Estimation (L2)
//!
//! Five independent, side-effect-free estimators and the report builder that
//! combines them.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │              EstimationReportBuilder               │
//! │   gated calls, per-method failures absorbed        │
//! ├──────────┬──────────┬──────────┬────────┬──────────┤
//! │ COCOMO   │ Function │ Expert   │ Delphi │Regression│
//! │          │ Points   │ Judgment │        │          │
//! └──────────┴──────────┴──────────┴────────┴──────────┘
//!                         ↓
//! ┌────────────────────────────────────────────────────┐
//! │     econ_core (L1): statistics, EstimationError    │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! Each estimator invoked directly propagates its [`EstimationError`]; the
//! report builder skips a failing method and summarises the rest.
//!
//! ## Example
//!
//! ```
//! use econ_estimation::{EstimationConfig, EstimationInput, EstimationReportBuilder, MethodId};
//!
//! let input = EstimationInput::default()
//!     .with_cocomo(32.0, "organic")
//!     .with_regression_size(100.0);
//!
//! let builder = EstimationReportBuilder::new(&EstimationConfig::default());
//! let report = builder.build(&input);
//!
//! assert_eq!(report.summary.valid_count, 2);
//! assert!(report.get(MethodId::Cocomo).is_some());
//! assert!(report.get(MethodId::Delphi).is_none());
//! ```
//!
//! [`EstimationError`]: econ_core::types::EstimationError

#![warn(missing_docs)]

pub mod config;
pub mod input;
pub mod methods;
pub mod report;
pub mod result;

pub use config::{DelphiConfig, EstimationConfig, FunctionPointConfig, RegressionConfig};
pub use input::EstimationInput;
pub use methods::cocomo::{CocomoDetail, CocomoEstimator, DevelopmentMode};
pub use methods::delphi::{ConsensusConfidence, DelphiConsensusEstimator, DelphiOutcome};
pub use methods::expert::{ConfidenceInterval, ExpertJudgmentAggregator, ExpertSummary};
pub use methods::function_points::{FunctionPointDetail, FunctionPointEstimator};
pub use methods::regression::{RegressionDetail, RegressionEstimator};
pub use report::{EstimationReport, EstimationReportBuilder, EstimationSummary};
pub use result::{EstimationDetail, EstimationResult, MethodId};
