//! # econ_core: Numerical Foundation for Project Economics
//!
//! ## Layer 1 (Foundation) Role
//!
//! econ_core is the bottom layer of the estimation workspace, providing:
//! - Descriptive statistics: mean, median, sample standard deviation,
//!   interpolated percentiles, least-squares line fitting (`math::statistics`)
//! - Standard normal CDF (`math::distributions`)
//! - Correlation matrices with Cholesky factorisation (`math::correlation`)
//! - Root-finding solvers used by the IRR computation (`math::solvers`)
//! - Error types: `EstimationError`, `SolverError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other econ_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation of summary values
//!
//! ## Usage Examples
//!
//! ```rust
//! use econ_core::math::statistics::{mean, median, sample_std_dev};
//! use econ_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! let estimates = [12.0, 15.0, 18.0, 14.0, 16.0];
//! assert_eq!(mean(&estimates), Some(15.0));
//! assert_eq!(median(&estimates), Some(15.0));
//! assert!(sample_std_dev(&estimates).unwrap() > 2.0);
//!
//! let solver = BrentSolver::new(SolverConfig::default());
//! let root = solver.find_root(|x: f64| x * x - 4.0, 0.0, 5.0).unwrap();
//! # assert!((root - 2.0_f64).abs() < 1e-8);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
