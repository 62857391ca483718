//! Convergence settings for the root finders.

use num_traits::Float;

/// Iteration budget used by [`SolverConfig::default`].
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Tolerance and iteration budget of a root finder.
///
/// # Example
///
/// ```
/// use econ_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert_eq!(config.max_iterations, 100);
///
/// // Out-of-range settings are pulled back to usable values
/// let clamped = SolverConfig::new(-1.0_f64, 0);
/// assert_eq!(clamped.tolerance, f64::EPSILON);
/// assert_eq!(clamped.max_iterations, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Stop once `|f(x)|` or the bracket half-width falls below this.
    pub tolerance: T,
    /// Exhausting the budget yields `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap_or_else(T::epsilon),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Settings with a custom tolerance and budget.
    ///
    /// A tolerance that is not strictly positive (NaN included) becomes
    /// machine epsilon; a zero budget becomes one iteration.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        let tolerance = if tolerance > T::zero() {
            tolerance
        } else {
            T::epsilon()
        };
        Self {
            tolerance,
            max_iterations: max_iterations.max(1),
        }
    }
}
