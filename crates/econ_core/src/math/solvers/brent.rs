//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder.
///
/// Switches between inverse quadratic interpolation, the secant step and
/// bisection; guaranteed to converge for a continuous function on a valid
/// bracket.
///
/// # Example
///
/// ```
/// use econ_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!(f(root).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Scan `[lo, hi]` on an evenly spaced grid of `steps` intervals and return
    /// the first sub-interval whose endpoint values change sign.
    ///
    /// Grid points where `f` is not finite are skipped. Returns `None` when no
    /// sign change is found.
    pub fn find_bracket<F>(&self, f: F, lo: T, hi: T, steps: usize) -> Option<(T, T)>
    where
        F: Fn(T) -> T,
    {
        let steps = steps.max(1);
        let n = T::from(steps)?;
        let width = (hi - lo) / n;

        let mut prev: Option<(T, T)> = None;
        for i in 0..=steps {
            let x = lo + width * T::from(i)?;
            let fx = f(x);
            if !fx.is_finite() {
                prev = None;
                continue;
            }
            if fx == T::zero() {
                return Some((x, x));
            }
            if let Some((px, pfx)) = prev {
                if pfx * fx < T::zero() {
                    return Some((px, x));
                }
            }
            prev = Some((x, fx));
        }
        None
    }

    /// Find a root of `f` in the bracket `[a, b]`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance` or the bracket collapsed below tolerance
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have the same sign
    /// * `Err(SolverError::NumericalInstability)` - `f` returned a non-finite value
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let two = T::one() + T::one();
        let three = two + T::one();
        let half = T::one() / two;
        let tol = self.config.tolerance;

        let (mut a, mut b) = (a, b);
        let (mut fa, mut fb) = (f(a), f(b));

        if !fa.is_finite() || !fb.is_finite() {
            return Err(SolverError::NumericalInstability(
                "non-finite function value at bracket endpoint".to_string(),
            ));
        }
        if fa * fb > T::zero() {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        let (mut c, mut fc) = (b, fb);
        let mut d = b - a;
        let mut e = d;

        for _ in 0..self.config.max_iterations {
            // Re-establish the bracket [b, c]
            if (fb > T::zero() && fc > T::zero()) || (fb < T::zero() && fc < T::zero()) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            // Keep b as the best estimate
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol1 = two * T::epsilon() * b.abs() + half * tol;
            let xm = half * (c - b);
            if xm.abs() <= tol1 || fb.abs() < tol {
                return Ok(b);
            }

            if e.abs() >= tol1 && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    // Secant step
                    (two * xm * s, T::one() - s)
                } else {
                    // Inverse quadratic interpolation
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (two * xm * q * (q - r) - (b - a) * (r - T::one())),
                        (q - T::one()) * (r - T::one()) * (s - T::one()),
                    )
                };
                if p > T::zero() {
                    q = -q;
                }
                p = p.abs();

                let min1 = three * xm * q - (tol1 * q).abs();
                let min2 = (e * q).abs();
                if two * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = xm;
                    e = d;
                }
            } else {
                d = xm;
                e = d;
            }

            a = b;
            fa = fb;
            b = if d.abs() > tol1 {
                b + d
            } else if xm > T::zero() {
                b + tol1
            } else {
                b - tol1
            };
            fb = f(b);
            if !fb.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "non-finite function value during iteration".to_string(),
                ));
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_sqrt_2() {
        let solver = BrentSolver::new(SolverConfig::default());
        let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    }

    #[test]
    fn test_bracket_reversed() {
        let solver = BrentSolver::<f64>::with_defaults();
        let root = solver.find_root(|x| x * x - 2.0, 2.0, 0.0).unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    }

    #[test]
    fn test_find_exp_root() {
        let solver = BrentSolver::<f64>::with_defaults();
        let root = solver.find_root(|x| x.exp() - 2.0, 0.0, 1.0).unwrap();
        assert!((root - 2.0_f64.ln()).abs() < 1e-10);
    }

    #[test]
    fn test_root_at_endpoint() {
        let solver = BrentSolver::<f64>::with_defaults();
        let root = solver.find_root(|x| x - 1.0, 1.0, 3.0).unwrap();
        assert_eq!(root, 1.0);
    }

    #[test]
    fn test_no_bracket() {
        let solver = BrentSolver::<f64>::with_defaults();
        match solver.find_root(|x| x * x + 1.0, -1.0, 1.0) {
            Err(SolverError::NoBracket { a, b }) => {
                assert_eq!(a, -1.0);
                assert_eq!(b, 1.0);
            }
            other => panic!("Expected NoBracket error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_endpoint() {
        let solver = BrentSolver::<f64>::with_defaults();
        let result = solver.find_root(|x| 1.0 / x, 0.0, 1.0);
        assert!(matches!(
            result,
            Err(SolverError::NumericalInstability(_))
        ));
    }

    #[test]
    fn test_max_iterations_exceeded() {
        let solver = BrentSolver::new(SolverConfig::new(1e-300, 2));
        let result = solver.find_root(|x: f64| x.powi(3) - 0.5, 0.0, 10.0);
        assert_eq!(
            result,
            Err(SolverError::MaxIterationsExceeded { iterations: 2 })
        );
    }

    #[test]
    fn test_find_bracket_locates_sign_change() {
        let solver = BrentSolver::<f64>::with_defaults();
        let (lo, hi) = solver.find_bracket(|x| x - 3.3, 0.0, 10.0, 100).unwrap();
        assert!(lo < 3.3 && hi > 3.3);
        assert!(hi - lo <= 0.1 + 1e-12);
    }

    #[test]
    fn test_find_bracket_skips_non_finite_points() {
        let solver = BrentSolver::<f64>::with_defaults();
        // Pole at x = 0 must not be mistaken for a root
        let bracket = solver.find_bracket(|x| 1.0 / x, -1.0, 1.0, 2);
        assert!(bracket.is_none());
    }

    #[test]
    fn test_find_bracket_none_without_sign_change() {
        let solver = BrentSolver::<f64>::with_defaults();
        assert!(solver.find_bracket(|x| x * x + 1.0, -5.0, 5.0, 50).is_none());
    }
}
