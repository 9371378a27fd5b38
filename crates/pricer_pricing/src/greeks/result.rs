//! Greeks calculation result type.

use std::fmt;

use pricer_core::types::DAYS_PER_YEAR;
use pricer_models::analytical::Greeks;

/// How a set of Greeks was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GreeksMethod {
    /// Closed-form derivatives of Black-Scholes-Merton.
    Analytical,
    /// Finite differences of a pricing function.
    Numerical,
}

impl fmt::Display for GreeksMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Analytical => "analytical",
            Self::Numerical => "numerical",
        })
    }
}

/// First- and second-order sensitivities of one option.
///
/// Values are stored per unit of the underlying variable:
///
/// - `delta`: ∂V/∂S
/// - `gamma`: ∂²V/∂S²
/// - `vega`: ∂V/∂σ per 1.00 of volatility
/// - `theta`: ∂V/∂t per year of calendar time
/// - `rho`: ∂V/∂r per 1.00 of rate
///
/// The `*_per_*` helpers give the market-quoting conventions.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::greeks::{GreeksMethod, GreeksResult};
///
/// let greeks = GreeksResult {
///     delta: 0.55,
///     gamma: 0.02,
///     vega: 38.0,
///     theta: -6.5,
///     rho: 45.0,
///     method: GreeksMethod::Analytical,
/// };
///
/// assert!((greeks.vega_per_vol_point() - 0.38).abs() < 1e-12);
/// assert!((greeks.theta_per_day() - (-6.5 / 365.0)).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GreeksResult {
    /// Delta: ∂V/∂S.
    pub delta: f64,
    /// Gamma: ∂²V/∂S².
    pub gamma: f64,
    /// Vega: ∂V/∂σ.
    pub vega: f64,
    /// Theta: ∂V/∂t, per year.
    pub theta: f64,
    /// Rho: ∂V/∂r.
    pub rho: f64,
    /// Source of the values.
    pub method: GreeksMethod,
}

impl GreeksResult {
    /// All-zero Greeks tagged with `method`.
    pub fn zero(method: GreeksMethod) -> Self {
        Self {
            delta: 0.0,
            gamma: 0.0,
            vega: 0.0,
            theta: 0.0,
            rho: 0.0,
            method,
        }
    }

    /// Closed-form Greeks from the analytical model.
    pub fn from_analytical(greeks: Greeks<f64>) -> Self {
        Self {
            delta: greeks.delta,
            gamma: greeks.gamma,
            vega: greeks.vega,
            theta: greeks.theta,
            rho: greeks.rho,
            method: GreeksMethod::Analytical,
        }
    }

    /// Every Greek multiplied by `quantity`; the method tag is kept.
    pub fn scaled(&self, quantity: f64) -> Self {
        Self {
            delta: self.delta * quantity,
            gamma: self.gamma * quantity,
            vega: self.vega * quantity,
            theta: self.theta * quantity,
            rho: self.rho * quantity,
            method: self.method,
        }
    }

    /// Vega per one volatility point (σ + 0.01).
    #[inline]
    pub fn vega_per_vol_point(&self) -> f64 {
        self.vega / 100.0
    }

    /// Theta per calendar day.
    #[inline]
    pub fn theta_per_day(&self) -> f64 {
        self.theta / DAYS_PER_YEAR
    }

    /// Rho per one rate point (r + 0.01).
    #[inline]
    pub fn rho_per_rate_point(&self) -> f64 {
        self.rho / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_keeps_method() {
        let g = GreeksResult {
            delta: 0.5,
            gamma: 0.01,
            vega: 20.0,
            theta: -3.0,
            rho: 10.0,
            method: GreeksMethod::Numerical,
        };
        let short = g.scaled(-2.0);
        assert_eq!(short.delta, -1.0);
        assert_eq!(short.gamma, -0.02);
        assert_eq!(short.vega, -40.0);
        assert_eq!(short.theta, 6.0);
        assert_eq!(short.rho, -20.0);
        assert_eq!(short.method, GreeksMethod::Numerical);
    }

    #[test]
    fn test_from_analytical() {
        let g = GreeksResult::from_analytical(Greeks {
            delta: 0.6,
            gamma: 0.02,
            vega: 30.0,
            theta: -5.0,
            rho: 40.0,
        });
        assert_eq!(g.method, GreeksMethod::Analytical);
        assert_eq!(g.rho_per_rate_point(), 0.4);
    }

    #[test]
    fn test_zero() {
        let g = GreeksResult::zero(GreeksMethod::Analytical);
        assert_eq!(g.delta + g.gamma + g.vega + g.theta + g.rho, 0.0);
        assert_eq!(GreeksMethod::Analytical.to_string(), "analytical");
    }
}
