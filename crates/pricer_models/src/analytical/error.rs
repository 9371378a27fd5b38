//! Error types for analytical pricing operations.

use pricer_core::types::{PricingError, SolverError};
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidVolatility`: Non-positive volatility passed to the raw model
/// - `InvalidSpot`: Non-positive spot price passed to the raw model
/// - `InvalidThreshold`: Degenerate-input threshold is negative or non-finite
/// - `ExpiredContract`: Implied volatility requested inside the expiry threshold
/// - `PriceOutOfBounds`: Market price violates no-arbitrage bounds
/// - `NoConvergence`: Implied-volatility root finding failed
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid minimum time-to-expiry threshold.
    #[error("Invalid minimum time to expiry: {value}")]
    InvalidThreshold {
        /// The rejected threshold
        value: f64,
    },

    /// Contract too close to expiry for volatility to be observable.
    #[error("Contract expires in {time_to_expiry} years, below threshold {threshold}")]
    ExpiredContract {
        /// Remaining time in years
        time_to_expiry: f64,
        /// Active threshold in years
        threshold: f64,
    },

    /// Market price outside the no-arbitrage range.
    #[error("Market price {price} outside no-arbitrage bounds [{lower}, {upper}]")]
    PriceOutOfBounds {
        /// The quoted price
        price: f64,
        /// Lower bound (discounted forward intrinsic)
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// Root finding for implied volatility failed.
    #[error("Implied volatility did not converge: {0}")]
    NoConvergence(#[from] SolverError),
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::NoConvergence(_) => PricingError::NumericalInstability(err.to_string()),
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}
