//! Error types for structured error handling.
//!
//! This module provides:
//! - `EstimationError`: Errors from effort estimators and aggregators
//! - `SolverError`: Errors from root-finding solvers

use thiserror::Error;

/// Categorised estimation errors.
///
/// Raised when an estimator is invoked directly with inputs outside its
/// domain. The report builder absorbs these and omits the method instead.
///
/// # Variants
/// - `InvalidInput`: Malformed or out-of-domain scalar (e.g. `size_kloc <= 0`)
/// - `InvalidMode`: Unknown COCOMO development mode
/// - `EmptyInput`: Required collection is empty (e.g. no expert estimates)
///
/// # Examples
/// ```
/// use econ_core::types::EstimationError;
///
/// let err = EstimationError::InvalidInput("size_kloc must be positive".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: size_kloc must be positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimationError {
    /// Invalid scalar input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unknown development mode.
    #[error("Invalid mode: {0}. Must be one of: organic, semi_detached, embedded")]
    InvalidMode(String),

    /// Required collection is empty.
    #[error("Empty input: {0}")]
    EmptyInput(String),
}

impl EstimationError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an empty input error
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }
}

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `NumericalInstability`: Non-finite function value encountered
///
/// # Examples
/// ```
/// use econ_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}
