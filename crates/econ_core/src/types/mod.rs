//! Core error types shared by every calculator.
//!
//! This module provides:
//! - `error`: Structured error types for estimation inputs and root-finding solvers
//!
//! # Re-exports
//!
//! - [`EstimationError`], [`SolverError`] from `error`

pub mod error;

pub use error::{EstimationError, SolverError};
