//! Contract-level closed-form pricer.
//!
//! [`AnalyticalPricer`] reads a [`Contract`] once (including a single reading
//! of the valuation clock), decides which branch of the degenerate-input
//! policy applies, and only evaluates the Black-Scholes-Merton formulas when
//! they are well defined.
//!
//! | Regime | Condition | Price | Greeks |
//! |--------|-----------|-------|--------|
//! | `Expiring` | T < threshold | `max(S-K,0)` / `max(K-S,0)` | Δ ∈ {0, ±1}, rest 0 |
//! | `ZeroVolatility` | σ = 0 | `max(0, S·e^(-qT) - K·e^(-rT))` (call) | σ → 0 limits, Γ = ν = 0 |
//! | `Regular` | otherwise | closed form | closed form |

use pricer_core::contract::{Contract, OptionKind};
use pricer_core::traits::PricingFunction;
use pricer_core::types::{PricingError, DEFAULT_MIN_TIME_TO_EXPIRY};
use tracing::{debug, warn};

use super::black_scholes::{expiry_delta, BlackScholes, Greeks};
use super::error::AnalyticalError;

/// Branch of the degenerate-input policy applied to a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Time to expiration below the threshold: intrinsic value, boundary Greeks.
    Expiring,
    /// Zero volatility: deterministic forward value.
    ZeroVolatility,
    /// Closed form applies.
    Regular,
}

/// Stateless Black-Scholes-Merton pricer for [`Contract`]s.
///
/// # Examples
/// ```
/// use pricer_core::contract::{Contract, OptionKind};
/// use pricer_models::analytical::AnalyticalPricer;
///
/// let contract = Contract::builder()
///     .kind(OptionKind::Call)
///     .strike(200.0)
///     .spot(195.0)
///     .rate(0.05)
///     .volatility(0.25)
///     .expiry_in_years(90.0 / 365.0)
///     .build()
///     .unwrap();
///
/// let price = AnalyticalPricer::new().price_contract(&contract);
/// assert!((price - 8.4926).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticalPricer {
    min_time_to_expiry: f64,
}

impl Default for AnalyticalPricer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticalPricer {
    /// Pricer with the default one-day threshold.
    pub const fn new() -> Self {
        Self {
            min_time_to_expiry: DEFAULT_MIN_TIME_TO_EXPIRY,
        }
    }

    /// Replaces the degenerate-input threshold (years, `>= 0`).
    pub fn with_min_time_to_expiry(self, years: f64) -> Result<Self, AnalyticalError> {
        if !years.is_finite() || years < 0.0 {
            return Err(AnalyticalError::InvalidThreshold { value: years });
        }
        Ok(Self {
            min_time_to_expiry: years,
        })
    }

    /// Active degenerate-input threshold in years.
    #[inline]
    pub fn min_time_to_expiry(&self) -> f64 {
        self.min_time_to_expiry
    }

    /// Regime for a contract with `expiry` years remaining.
    pub fn regime(&self, contract: &Contract, expiry: f64) -> Regime {
        if expiry < self.min_time_to_expiry || expiry <= 0.0 {
            Regime::Expiring
        } else if contract.volatility() == 0.0 {
            Regime::ZeroVolatility
        } else {
            Regime::Regular
        }
    }

    /// `(d1, d2)` for a contract in the regular regime, `None` otherwise.
    pub fn d1_d2(&self, contract: &Contract) -> Option<(f64, f64)> {
        let expiry = contract.time_to_expiration();
        match self.regime(contract, expiry) {
            Regime::Regular => {
                let model = model(contract);
                let d1 = model.d1(contract.strike(), expiry);
                Some((d1, d1 - contract.volatility() * expiry.sqrt()))
            }
            _ => None,
        }
    }

    /// Present value of the contract.
    pub fn price_contract(&self, contract: &Contract) -> f64 {
        let expiry = contract.time_to_expiration();
        match self.log_regime(contract, expiry) {
            Regime::Expiring => contract.intrinsic_value(),
            Regime::ZeroVolatility => {
                let fwd_spot = contract.spot() * (-contract.dividend_yield() * expiry).exp();
                let disc_strike = contract.strike() * (-contract.rate() * expiry).exp();
                contract.kind().payoff(fwd_spot, disc_strike)
            }
            Regime::Regular => model(contract).price(contract.kind(), contract.strike(), expiry),
        }
    }

    /// Analytical Greeks of the contract.
    pub fn greeks(&self, contract: &Contract) -> Greeks<f64> {
        let expiry = contract.time_to_expiration();
        match self.log_regime(contract, expiry) {
            Regime::Expiring => Greeks {
                delta: expiry_delta(contract.kind(), contract.spot(), contract.strike()),
                ..Greeks::default()
            },
            Regime::ZeroVolatility => zero_volatility_greeks(contract, expiry),
            Regime::Regular => model(contract).greeks(contract.kind(), contract.strike(), expiry),
        }
    }

    fn log_regime(&self, contract: &Contract, expiry: f64) -> Regime {
        let regime = self.regime(contract, expiry);
        match regime {
            Regime::Expiring => warn!(
                underlying = contract.underlying(),
                time_to_expiry = expiry,
                threshold = self.min_time_to_expiry,
                "time to expiry below threshold, using intrinsic value"
            ),
            Regime::ZeroVolatility => debug!(
                underlying = contract.underlying(),
                "zero volatility, using discounted forward intrinsic value"
            ),
            Regime::Regular => {}
        }
        regime
    }
}

impl PricingFunction for AnalyticalPricer {
    fn price(&self, contract: &Contract) -> Result<f64, PricingError> {
        let price = self.price_contract(contract);
        if price.is_finite() {
            Ok(price)
        } else {
            Err(PricingError::NumericalInstability(format!(
                "closed form produced {} for {}",
                price,
                contract.underlying()
            )))
        }
    }

    fn min_time_to_expiry(&self) -> f64 {
        self.min_time_to_expiry
    }
}

/// Closed-form price with the default pricer.
///
/// # Examples
/// ```
/// use pricer_core::contract::{Contract, OptionKind};
/// use pricer_models::analytical::price_analytical;
///
/// let contract = Contract::builder()
///     .kind(OptionKind::Put)
///     .strike(100.0)
///     .spot(100.0)
///     .rate(0.05)
///     .volatility(0.2)
///     .expiry_in_years(1.0)
///     .build()
///     .unwrap();
///
/// assert!((price_analytical(&contract) - 5.5735).abs() < 1e-3);
/// ```
pub fn price_analytical(contract: &Contract) -> f64 {
    AnalyticalPricer::new().price_contract(contract)
}

/// Model for a contract already known to have positive volatility.
fn model(contract: &Contract) -> BlackScholes<f64> {
    BlackScholes::from_validated(
        contract.spot(),
        contract.rate(),
        contract.dividend_yield(),
        contract.volatility(),
    )
}

/// σ → 0 limits: N(d₁) and N(d₂) collapse to the indicator of the forward
/// being in the money (one half exactly at the forward).
fn zero_volatility_greeks(contract: &Contract, expiry: f64) -> Greeks<f64> {
    let carry = (-contract.dividend_yield() * expiry).exp();
    let fwd_spot = contract.spot() * carry;
    let disc_strike = contract.strike() * (-contract.rate() * expiry).exp();
    let (q, r) = (contract.dividend_yield(), contract.rate());

    let call_itm = if fwd_spot > disc_strike {
        1.0
    } else if fwd_spot < disc_strike {
        0.0
    } else {
        0.5
    };

    let (delta, theta, rho) = match contract.kind() {
        OptionKind::Call => {
            let n = call_itm;
            (
                carry * n,
                (q * fwd_spot - r * disc_strike) * n,
                expiry * disc_strike * n,
            )
        }
        OptionKind::Put => {
            let n = 1.0 - call_itm;
            (
                -carry * n,
                (r * disc_strike - q * fwd_spot) * n,
                -expiry * disc_strike * n,
            )
        }
    };

    Greeks {
        delta,
        gamma: 0.0,
        vega: 0.0,
        theta,
        rho,
    }
}
