//! Black-Scholes-Merton model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! The formulas are singular at T = 0 and σ = 0. This model evaluates them for
//! strictly positive volatility and expiry; contract-level degenerate handling
//! lives in [`AnalyticalPricer`](super::AnalyticalPricer).

use num_traits::Float;
use pricer_core::contract::OptionKind;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;

#[inline]
fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

/// The five first-order sensitivities (plus gamma) of an option value.
///
/// Units: vega per 1.00 of volatility, theta per year of calendar time,
/// rho per 1.00 of rate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks<T: Float> {
    /// ∂V/∂S
    pub delta: T,
    /// ∂²V/∂S²
    pub gamma: T,
    /// ∂V/∂σ
    pub vega: T,
    /// ∂V/∂t (calendar time, so typically negative)
    pub theta: T,
    /// ∂V/∂r
    pub rho: T,
}

/// Black-Scholes-Merton model with continuous dividend yield.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0);
/// let put = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K·e^(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    dividend_yield: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.0, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, dividend_yield: T, volatility: T) -> Result<Self, AnalyticalError> {
        if !(spot > T::zero()) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(volatility > T::zero()) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// Skips validation for inputs a validated contract already guarantees.
    pub(crate) fn from_validated(spot: T, rate: T, dividend_yield: T, volatility: T) -> Self {
        Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        }
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    ///
    /// `expiry` must be positive.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let drift = self.rate - self.dividend_yield + lit::<T>(0.5) * self.volatility * self.volatility;
        ((self.spot / strike).ln() + drift * expiry) / vol_sqrt_t
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// S·e^(-qT), the dividend-adjusted spot.
    #[inline]
    fn carried_spot(&self, expiry: T) -> T {
        self.spot * (-self.dividend_yield * expiry).exp()
    }

    /// K·e^(-rT), the discounted strike.
    #[inline]
    fn discounted_strike(&self, strike: T, expiry: T) -> T {
        strike * (-self.rate * expiry).exp()
    }

    /// European call price. Returns intrinsic value for `expiry <= 0`.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
    /// assert!((bs.price_call(100.0, 1.0) - 10.4506).abs() < 1e-3);
    /// ```
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return (self.spot - strike).max(T::zero());
        }
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * expiry.sqrt();
        self.carried_spot(expiry) * norm_cdf(d1)
            - self.discounted_strike(strike, expiry) * norm_cdf(d2)
    }

    /// European put price. Returns intrinsic value for `expiry <= 0`.
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return (strike - self.spot).max(T::zero());
        }
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * expiry.sqrt();
        self.discounted_strike(strike, expiry) * norm_cdf(-d2)
            - self.carried_spot(expiry) * norm_cdf(-d1)
    }

    /// Price for either kind.
    #[inline]
    pub fn price(&self, kind: OptionKind, strike: T, expiry: T) -> T {
        match kind {
            OptionKind::Call => self.price_call(strike, expiry),
            OptionKind::Put => self.price_put(strike, expiry),
        }
    }

    /// Delta: e^(-qT)·N(d₁) for a call, e^(-qT)·(N(d₁) - 1) for a put.
    pub fn delta(&self, kind: OptionKind, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return expiry_delta(kind, self.spot, strike);
        }
        let carry = (-self.dividend_yield * expiry).exp();
        let n_d1 = norm_cdf(self.d1(strike, expiry));
        match kind {
            OptionKind::Call => carry * n_d1,
            OptionKind::Put => carry * (n_d1 - T::one()),
        }
    }

    /// Gamma: e^(-qT)·φ(d₁) / (S·σ·√T), identical for calls and puts.
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }
        let carry = (-self.dividend_yield * expiry).exp();
        carry * norm_pdf(self.d1(strike, expiry)) / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Vega: S·e^(-qT)·φ(d₁)·√T, identical for calls and puts.
    pub fn vega(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }
        self.carried_spot(expiry) * norm_pdf(self.d1(strike, expiry)) * expiry.sqrt()
    }

    /// Theta (calendar time decay).
    ///
    /// - Call: -S·e^(-qT)·φ(d₁)·σ/(2√T) + q·S·e^(-qT)·N(d₁) - r·K·e^(-rT)·N(d₂)
    /// - Put: -S·e^(-qT)·φ(d₁)·σ/(2√T) - q·S·e^(-qT)·N(-d₁) + r·K·e^(-rT)·N(-d₂)
    pub fn theta(&self, kind: OptionKind, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }
        let sqrt_t = expiry.sqrt();
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * sqrt_t;
        let fwd_spot = self.carried_spot(expiry);
        let disc_strike = self.discounted_strike(strike, expiry);

        let decay = -fwd_spot * norm_pdf(d1) * self.volatility / (lit::<T>(2.0) * sqrt_t);
        match kind {
            OptionKind::Call => {
                decay + self.dividend_yield * fwd_spot * norm_cdf(d1)
                    - self.rate * disc_strike * norm_cdf(d2)
            }
            OptionKind::Put => {
                decay - self.dividend_yield * fwd_spot * norm_cdf(-d1)
                    + self.rate * disc_strike * norm_cdf(-d2)
            }
        }
    }

    /// Rho: K·T·e^(-rT)·N(d₂) for a call, -K·T·e^(-rT)·N(-d₂) for a put.
    pub fn rho(&self, kind: OptionKind, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }
        let d2 = self.d2(strike, expiry);
        let scaled = expiry * self.discounted_strike(strike, expiry);
        match kind {
            OptionKind::Call => scaled * norm_cdf(d2),
            OptionKind::Put => -scaled * norm_cdf(-d2),
        }
    }

    /// All Greeks in one pass.
    pub fn greeks(&self, kind: OptionKind, strike: T, expiry: T) -> Greeks<T> {
        Greeks {
            delta: self.delta(kind, strike, expiry),
            gamma: self.gamma(strike, expiry),
            vega: self.vega(strike, expiry),
            theta: self.theta(kind, strike, expiry),
            rho: self.rho(kind, strike, expiry),
        }
    }
}

/// Delta at expiry: the exercise indicator (0 at the money).
#[inline]
pub fn expiry_delta<T: Float>(kind: OptionKind, spot: T, strike: T) -> T {
    match kind {
        OptionKind::Call if spot > strike => T::one(),
        OptionKind::Put if spot < strike => -T::one(),
        _ => T::zero(),
    }
}
