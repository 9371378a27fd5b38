//! Implied volatility by inverting the closed form.
//!
//! The Black-Scholes-Merton price is strictly increasing in σ, so the inverse
//! is found with a bracketing solver on `[IV_LOWER, IV_UPPER]`.

use pricer_core::contract::{Contract, OptionKind};
use pricer_core::math::solvers::{BrentSolver, SolverConfig};
use pricer_core::types::DEFAULT_MIN_TIME_TO_EXPIRY;
use tracing::debug;

use super::black_scholes::BlackScholes;
use super::error::AnalyticalError;

/// Lower end of the volatility search bracket.
pub const IV_LOWER: f64 = 1e-6;

/// Upper end of the volatility search bracket (500%).
pub const IV_UPPER: f64 = 5.0;

/// Volatility that reproduces `market_price` for `contract`.
///
/// The contract's own volatility is ignored. A price equal to the discounted
/// forward intrinsic value returns 0.
///
/// # Errors
/// - `ExpiredContract` inside the one-day threshold, where price carries no
///   volatility information
/// - `PriceOutOfBounds` outside `[forward intrinsic, upper bound)`, where the
///   upper bound is `S·e^(-qT)` for a call and `K·e^(-rT)` for a put
/// - `NoConvergence` if the price needs a volatility beyond the bracket
///
/// # Examples
/// ```
/// use pricer_core::contract::{Contract, OptionKind};
/// use pricer_models::analytical::{implied_volatility, price_analytical};
///
/// let contract = Contract::builder()
///     .kind(OptionKind::Call)
///     .strike(100.0)
///     .spot(100.0)
///     .rate(0.05)
///     .volatility(0.35)
///     .expiry_in_years(0.5)
///     .build()
///     .unwrap();
///
/// let vol = implied_volatility(&contract, price_analytical(&contract)).unwrap();
/// assert!((vol - 0.35).abs() < 1e-8);
/// ```
pub fn implied_volatility(contract: &Contract, market_price: f64) -> Result<f64, AnalyticalError> {
    let expiry = contract.time_to_expiration();
    if expiry < DEFAULT_MIN_TIME_TO_EXPIRY {
        return Err(AnalyticalError::ExpiredContract {
            time_to_expiry: expiry,
            threshold: DEFAULT_MIN_TIME_TO_EXPIRY,
        });
    }

    let (spot, strike, kind) = (contract.spot(), contract.strike(), contract.kind());
    let fwd_spot = spot * (-contract.dividend_yield() * expiry).exp();
    let disc_strike = strike * (-contract.rate() * expiry).exp();
    let lower = kind.payoff(fwd_spot, disc_strike);
    let upper = match kind {
        OptionKind::Call => fwd_spot,
        OptionKind::Put => disc_strike,
    };

    if !market_price.is_finite() || market_price < lower || market_price >= upper {
        return Err(AnalyticalError::PriceOutOfBounds {
            price: market_price,
            lower,
            upper,
        });
    }
    if market_price == lower {
        return Ok(0.0);
    }

    let objective = |vol: f64| {
        BlackScholes::from_validated(spot, contract.rate(), contract.dividend_yield(), vol)
            .price(kind, strike, expiry)
            - market_price
    };

    let solver = BrentSolver::new(SolverConfig::default());
    let vol = solver.find_root(objective, IV_LOWER, IV_UPPER)?;
    debug!(
        underlying = contract.underlying(),
        market_price, implied_volatility = vol, "implied volatility solved"
    );
    Ok(vol)
}
