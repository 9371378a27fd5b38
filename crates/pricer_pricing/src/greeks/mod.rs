//! Option sensitivities.
//!
//! - [`greeks_analytical`]: closed-form Black-Scholes-Merton Greeks
//! - [`greeks_numerical`]: finite differences against any
//!   [`PricingFunction`](pricer_core::traits::PricingFunction), including
//!   the Monte Carlo engine

mod analytical;
mod numerical;
mod result;

pub use analytical::{greeks_analytical, greeks_analytical_with};
pub use numerical::{greeks_numerical, DEFAULT_BUMP, MIN_ABSOLUTE_BUMP};
pub use result::{GreeksMethod, GreeksResult};
