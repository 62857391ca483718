//! # econ_finance: Investment Metrics and Budget Tracking (L2)
//!
//! - [`FinancialMetricsCalculator`]: ROI, NPV, IRR (Brent root-finding on the
//!   NPV curve) and the interpolated payback period
//! - [`BudgetLedger`]: actual spend by period and category, variance against a
//!   planned budget, and a three-period linear forecast
//!
//! Every metric is computed independently; a metric that is undefined for the
//! input (IRR without a sign change, payback never reached) is `None` rather
//! than an error.

#![warn(missing_docs)]

pub mod budget;
pub mod cash_flow;
pub mod error;

pub use budget::{BudgetAnalysis, BudgetEntry, BudgetLedger, BudgetVariance, CategoryAnalysis};
pub use cash_flow::{FinancialDetails, FinancialInput, FinancialMetrics, FinancialMetricsCalculator};
pub use error::FinanceError;
