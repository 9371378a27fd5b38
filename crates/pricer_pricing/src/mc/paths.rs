//! Geometric Brownian Motion path generation.
//!
//! Paths are evolved in log space, which is exact for GBM on any grid:
//!
//! ```text
//! S(t+dt) = S(t) × exp((r - q - σ²/2)·dt + σ·√dt × Z)
//! ```
//!
//! Sample 0 of every path is the initial spot, followed by `n_steps`
//! simulated samples. Samples are streamed into a
//! [`PathObserver`](crate::path_dependent::PathObserver) rather than stored.

use pricer_core::contract::Contract;

use crate::path_dependent::PathObserver;

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams {
///     spot: 100.0,
///     rate: 0.05,
///     dividend_yield: 0.0,
///     volatility: 0.2,
///     maturity: 1.0,
/// };
/// assert!(params.is_valid());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-free rate (r), annualised.
    pub rate: f64,
    /// Continuous dividend yield (q), annualised.
    pub dividend_yield: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Time to maturity (T) in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Market parameters of `contract` over `maturity` years.
    pub fn from_contract(contract: &Contract, maturity: f64) -> Self {
        Self {
            spot: contract.spot(),
            rate: contract.rate(),
            dividend_yield: contract.dividend_yield(),
            volatility: contract.volatility(),
            maturity,
        }
    }

    /// `true` if all parameters are finite, with positive spot and maturity
    /// and non-negative volatility.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.spot > 0.0
            && self.spot.is_finite()
            && self.rate.is_finite()
            && self.dividend_yield.is_finite()
            && self.volatility >= 0.0
            && self.volatility.is_finite()
            && self.maturity > 0.0
            && self.maturity.is_finite()
    }

    /// Discount factor `e^(-rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }
}

/// Per-step constants of a discretised GBM.
///
/// `drift_dt = (r - q - σ²/2)·dt` and `vol_sqrt_dt = σ·√dt` are computed once
/// per simulation, outside the path loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmStepper {
    spot: f64,
    drift_dt: f64,
    vol_sqrt_dt: f64,
}

impl GbmStepper {
    /// Stepper for `params` on a uniform grid of `n_steps` intervals.
    pub fn new(params: &GbmParams, n_steps: usize) -> Self {
        let dt = params.maturity / n_steps as f64;
        let sigma = params.volatility;
        Self {
            spot: params.spot,
            drift_dt: (params.rate - params.dividend_yield - 0.5 * sigma * sigma) * dt,
            vol_sqrt_dt: sigma * dt.sqrt(),
        }
    }

    /// Log-drift per step.
    #[inline]
    pub fn drift_dt(&self) -> f64 {
        self.drift_dt
    }

    /// Diffusion scale per step.
    #[inline]
    pub fn vol_sqrt_dt(&self) -> f64 {
        self.vol_sqrt_dt
    }

    /// Streams one path driven by `normals` (one draw per step) into
    /// `observer`, which is reset first.
    #[inline]
    pub fn simulate_into(&self, normals: &[f64], observer: &mut PathObserver) {
        observer.reset();
        let mut price = self.spot;
        observer.observe(price);
        for &z in normals {
            price *= (self.drift_dt + self.vol_sqrt_dt * z).exp();
            observer.observe(price);
        }
    }
}
