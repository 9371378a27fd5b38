//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;

/// Brent's method root finder.
///
/// Keeps a bracket `[b, c]` with a sign change and at each step takes an
/// inverse quadratic (or secant) step when it lands well inside the bracket,
/// falling back to bisection otherwise. Convergence is guaranteed for
/// continuous functions with a valid bracket.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!(f(root).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BrentSolver {
    config: SolverConfig,
}

impl BrentSolver {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Find a root of `f` in the bracket `[lo, hi]`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root to within the configured tolerance
    /// * `Err(SolverError::NoBracket)` - `f(lo)` and `f(hi)` have the same sign
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    pub fn find_root<F>(&self, f: F, lo: f64, hi: f64) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        let (mut a, mut b) = (lo, hi);
        let (mut fa, mut fb) = (f(a), f(b));

        if fa == 0.0 {
            return Ok(a);
        }
        if fb == 0.0 {
            return Ok(b);
        }
        if fa.signum() == fb.signum() {
            return Err(SolverError::NoBracket { a: lo, b: hi });
        }

        // c is the contrapoint: f(b) and f(c) always bracket the root
        let (mut c, mut fc) = (a, fa);
        let mut step = b - a;
        let mut prev_step = step;

        for _ in 0..self.config.max_iterations {
            if fb.signum() == fc.signum() {
                c = a;
                fc = fa;
                step = b - a;
                prev_step = step;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * self.config.tolerance;
            let half_width = 0.5 * (c - b);

            if half_width.abs() <= tol || fb.abs() < self.config.tolerance {
                return Ok(b);
            }

            if prev_step.abs() >= tol && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    (2.0 * half_width * s, 1.0 - s)
                } else {
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (2.0 * half_width * q * (q - r) - (b - a) * (r - 1.0)),
                        (q - 1.0) * (r - 1.0) * (s - 1.0),
                    )
                };
                if p > 0.0 {
                    q = -q;
                } else {
                    p = -p;
                }

                let interpolation_limit = 3.0 * half_width * q - (tol * q).abs();
                if 2.0 * p < interpolation_limit.min((prev_step * q).abs()) {
                    prev_step = step;
                    step = p / q;
                } else {
                    step = half_width;
                    prev_step = step;
                }
            } else {
                step = half_width;
                prev_step = step;
            }

            a = b;
            fa = fb;
            b += if step.abs() > tol {
                step
            } else {
                tol.copysign(half_width)
            };
            fb = f(b);
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }
}
