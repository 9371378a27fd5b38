//! Analytical pricing formulas for European options.
//!
//! This module provides:
//! - Black-Scholes-Merton closed form with dividend yield (`black_scholes`)
//! - Contract-level pricing with the degenerate-input policy (`pricer`)
//! - Analytical Greeks (Delta, Gamma, Vega, Theta, Rho)
//! - Implied volatility (`implied_vol`)
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`** for the raw formulas
//! - **Symmetric CDF**: N(x) + N(-x) = 1 exactly, so put-call parity holds to
//!   rounding

pub mod black_scholes;
pub mod distributions;
pub mod error;
pub mod implied_vol;
pub mod pricer;

pub use black_scholes::{expiry_delta, BlackScholes, Greeks};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use implied_vol::implied_volatility;
pub use pricer::{price_analytical, AnalyticalPricer, Regime};
