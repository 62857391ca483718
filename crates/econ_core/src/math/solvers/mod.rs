//! Root-finding solvers.
//!
//! - [`BrentSolver`]: robust bracketing method without derivative requirement,
//!   plus a grid scan for locating a sign change inside a wide interval
//!
//! Solvers use [`SolverConfig`] for the convergence tolerance and the
//! iteration cap (default 1e-10 and 100).
//!
//! ```
//! use econ_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! // NPV of -1000 now and +1100 in one period is zero at a 10% rate
//! let npv = |r: f64| -1000.0 + 1100.0 / (1.0 + r);
//! let solver = BrentSolver::new(SolverConfig::default());
//! let (lo, hi) = solver.find_bracket(npv, -0.99, 10.0, 1000).unwrap();
//! let rate = solver.find_root(npv, lo, hi).unwrap();
//! assert!((rate - 0.10).abs() < 1e-8);
//! ```

mod brent;
mod config;

pub use brent::BrentSolver;
pub use config::SolverConfig;
