//! Finite-difference Greeks against any [`PricingFunction`].
//!
//! | Greek | Scheme | Bump |
//! |-------|--------|------|
//! | Delta | central | `h_S = min(max(bump·S, 1e-4), S/2)` |
//! | Gamma | second central | `h_S` |
//! | Vega | central, one-sided at σ = 0 | `h_σ = max(bump·σ, 1e-4)` |
//! | Theta | forward in calendar time, backward when `T - Δt` crosses the threshold | `Δt = min(bump·T, 1/365)` |
//! | Rho | central | `h_r = max(bump·|r|, 1e-4)` |
//!
//! The valuation clock is pinned before any bump so that every revaluation
//! sees the same time to expiry. Below the pricer's
//! [`min_time_to_expiry`](PricingFunction::min_time_to_expiry) nothing is
//! bumped: delta is the exercise indicator (0 when the contract is worth
//! nothing) and every other Greek is 0. Simulation pricers should carry a fixed seed
//! (see [`MonteCarloPricer::seeded`](crate::mc::MonteCarloPricer::seeded)) so
//! that bumped prices share random numbers.

use pricer_core::contract::Contract;
use pricer_core::traits::PricingFunction;
use pricer_core::types::{PricingError, DAYS_PER_YEAR};
use pricer_models::analytical::expiry_delta;
use tracing::{debug, warn};

use super::{GreeksMethod, GreeksResult};

/// Relative bump size used when none is given.
pub const DEFAULT_BUMP: f64 = 0.01;

/// Absolute floor on spot, volatility and rate bumps.
pub const MIN_ABSOLUTE_BUMP: f64 = 1e-4;

/// Numerical Greeks of `contract` under `pricer`.
///
/// # Errors
/// - `InvalidArgument` if `bump` is not a positive finite fraction below 1
/// - any error returned by `pricer` for a bumped contract
///
/// # Examples
///
/// ```rust
/// use pricer_core::contract::{Contract, OptionKind};
/// use pricer_models::analytical::AnalyticalPricer;
/// use pricer_pricing::greeks::{greeks_analytical, greeks_numerical};
///
/// let contract = Contract::builder()
///     .kind(OptionKind::Put)
///     .strike(100.0)
///     .spot(95.0)
///     .rate(0.03)
///     .volatility(0.25)
///     .expiry_in_years(0.5)
///     .build()
///     .unwrap();
///
/// let fd = greeks_numerical(&AnalyticalPricer::new(), &contract, None).unwrap();
/// let exact = greeks_analytical(&contract);
/// assert!((fd.delta - exact.delta).abs() < 1e-3);
/// ```
pub fn greeks_numerical<P>(
    pricer: &P,
    contract: &Contract,
    bump: Option<f64>,
) -> Result<GreeksResult, PricingError>
where
    P: PricingFunction + ?Sized,
{
    let bump = bump.unwrap_or(DEFAULT_BUMP);
    if !bump.is_finite() || bump <= 0.0 || bump >= 1.0 {
        return Err(PricingError::InvalidArgument(format!(
            "bump must be a fraction in (0, 1), got {}",
            bump
        )));
    }

    let base = contract.pinned();
    let expiry = base.time_to_expiration();
    let threshold = pricer.min_time_to_expiry();
    let price = pricer.price(&base)?;

    if expiry < threshold || expiry <= 0.0 {
        warn!(
            underlying = base.underlying(),
            time_to_expiry = expiry,
            threshold,
            "time to expiry below threshold, using boundary greeks"
        );
        let delta = if price > 0.0 {
            expiry_delta(base.kind(), base.spot(), base.strike())
        } else {
            0.0
        };
        return Ok(GreeksResult {
            delta,
            gamma: 0.0,
            vega: 0.0,
            theta: 0.0,
            rho: 0.0,
            method: GreeksMethod::Numerical,
        });
    }

    // Capped at half the spot so the lower point stays a valid contract
    let spot = base.spot();
    let h_s = (bump * spot).max(MIN_ABSOLUTE_BUMP).min(0.5 * spot);
    let up = pricer.price(&base.with_spot(spot + h_s)?)?;
    let down = pricer.price(&base.with_spot(spot - h_s)?)?;
    let delta = (up - down) / (2.0 * h_s);
    let gamma = (up - 2.0 * price + down) / (h_s * h_s);

    let vol = base.volatility();
    let h_v = (bump * vol).max(MIN_ABSOLUTE_BUMP);
    let vol_lo = (vol - h_v).max(0.0);
    let vol_hi = vol + h_v;
    let vega = (pricer.price(&base.with_volatility(vol_hi)?)?
        - pricer.price(&base.with_volatility(vol_lo)?)?)
        / (vol_hi - vol_lo);

    let rate = base.rate();
    let h_r = (bump * rate.abs()).max(MIN_ABSOLUTE_BUMP);
    let rho = (pricer.price(&base.with_rate(rate + h_r)?)?
        - pricer.price(&base.with_rate(rate - h_r)?)?)
        / (2.0 * h_r);

    let dt = (bump * expiry).min(1.0 / DAYS_PER_YEAR);
    let theta = if expiry - dt >= threshold {
        let later = pricer.price(&base.with_time_to_expiration(expiry - dt)?)?;
        (later - price) / dt
    } else {
        let longer = pricer.price(&base.with_time_to_expiration(expiry + dt)?)?;
        (price - longer) / dt
    };

    debug!(
        underlying = base.underlying(),
        bump, h_s, h_v, h_r, dt, "finite-difference greeks computed"
    );

    Ok(GreeksResult {
        delta,
        gamma,
        vega,
        theta,
        rho,
        method: GreeksMethod::Numerical,
    })
}
