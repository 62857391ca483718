//! Error types for financial calculations.

use thiserror::Error;

/// Errors from investment metrics and budget analysis.
///
/// # Examples
/// ```
/// use econ_finance::FinanceError;
///
/// let err = FinanceError::invalid_input("initial investment must be non-negative");
/// assert_eq!(
///     err.to_string(),
///     "Invalid input: initial investment must be non-negative"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FinanceError {
    /// Out-of-domain scalar input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Required collection is empty.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Budget analysis requested before any spend was recorded.
    #[error("No budget tracking data available")]
    EmptyLedger,
}

impl FinanceError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an empty input error
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }
}
