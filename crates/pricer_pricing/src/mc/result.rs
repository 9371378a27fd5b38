//! Simulation output.

use std::time::Duration;

/// Non-fatal notice that the estimate has not converged to the requested
/// tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConvergenceAdvisory {
    /// `std_error / |price|`, or the absolute standard error when the price is 0.
    pub relative_error: f64,
    /// The tolerance that was exceeded.
    pub tolerance: f64,
}

impl ConvergenceAdvisory {
    /// Advisory for `price ± std_error` if it exceeds `tolerance`.
    pub fn check(price: f64, std_error: f64, tolerance: f64) -> Option<Self> {
        let relative_error = if price == 0.0 {
            std_error
        } else {
            std_error / price.abs()
        };
        (relative_error > tolerance).then_some(Self {
            relative_error,
            tolerance,
        })
    }
}

/// Monte Carlo estimate with its sampling error.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use pricer_pricing::mc::SimulationResult;
///
/// let result = SimulationResult {
///     price: 10.5,
///     std_error: 0.05,
///     n_paths: 10_000,
///     seed: 42,
///     elapsed: Duration::from_millis(12),
///     advisory: None,
/// };
///
/// let (lo, hi) = result.confidence_interval();
/// assert!((hi - lo - 2.0 * 1.96 * 0.05).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationResult {
    /// Discounted mean payoff.
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Seed that reproduces this run.
    pub seed: u64,
    /// Wall-clock simulation time.
    pub elapsed: Duration,
    /// Set when the relative error exceeds the configured tolerance.
    pub advisory: Option<ConvergenceAdvisory>,
}

impl SimulationResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 95% confidence interval `(lower, upper)`.
    #[inline]
    pub fn confidence_interval(&self) -> (f64, f64) {
        let half_width = self.confidence_95();
        (self.price - half_width, self.price + half_width)
    }
}
