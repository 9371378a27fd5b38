//! Portfolio error types.

use pricer_core::types::PricingError;
use pricer_pricing::mc::SimulationArgumentError;
use thiserror::Error;

/// Errors that can occur while valuing a portfolio.
///
/// Positions are identified by their index in the portfolio.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// A position with quantity 0 carries no risk and is rejected.
    #[error("Position {index} has zero quantity")]
    ZeroQuantity {
        /// Index of the offending position
        index: usize,
    },

    /// Quantity is NaN or infinite.
    #[error("Position {index} has non-finite quantity {quantity}")]
    NonFiniteQuantity {
        /// Index of the offending position
        index: usize,
        /// The rejected quantity
        quantity: f64,
    },

    /// The pricing engine failed for a position.
    #[error("Pricing failed for position {index}: {source}")]
    Pricing {
        /// Index of the failed position
        index: usize,
        /// Underlying pricing error
        #[source]
        source: PricingError,
    },

    /// The simulation request for a position was invalid.
    #[error("Simulation rejected for position {index}: {source}")]
    Simulation {
        /// Index of the failed position
        index: usize,
        /// Underlying simulation error
        #[source]
        source: SimulationArgumentError,
    },
}
