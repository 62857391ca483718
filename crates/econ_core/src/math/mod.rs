//! Mathematical building blocks.
//!
//! - [`statistics`]: descriptive statistics and least-squares line fitting
//! - [`distributions`]: standard normal CDF
//! - [`correlation`]: correlation matrices and Cholesky factors
//! - [`solvers`]: root-finding algorithms

pub mod correlation;
pub mod distributions;
pub mod solvers;
pub mod statistics;
