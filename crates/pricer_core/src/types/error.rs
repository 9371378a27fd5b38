//! Error types for structured error handling.
//!
//! This module provides:
//! - `ValidationError`: Malformed contract construction
//! - `PricingError`: Errors from pricing operations
//! - `SolverError`: Errors from root-finding solvers

use std::fmt;
use thiserror::Error;

/// Contract validation errors.
///
/// Raised by [`ContractBuilder::build`](crate::contract::ContractBuilder::build)
/// at the point of detection. Inputs are never clamped or coerced.
///
/// # Examples
/// ```
/// use pricer_core::types::ValidationError;
///
/// let err = ValidationError::InvalidStrike { strike: -1.0 };
/// assert_eq!(format!("{}", err), "Invalid strike: -1 (must be positive)");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Strike price is zero or negative.
    #[error("Invalid strike: {strike} (must be positive)")]
    InvalidStrike {
        /// The rejected strike
        strike: f64,
    },

    /// Spot price is zero or negative.
    #[error("Invalid spot: {spot} (must be positive)")]
    InvalidSpot {
        /// The rejected spot
        spot: f64,
    },

    /// Volatility is negative.
    #[error("Invalid volatility: {volatility} (must be non-negative)")]
    InvalidVolatility {
        /// The rejected volatility
        volatility: f64,
    },

    /// A numeric field is NaN or infinite.
    #[error("Non-finite value for {field}")]
    NonFiniteInput {
        /// Name of the offending field
        field: &'static str,
    },

    /// Expiration lies before the valuation instant.
    #[error("Negative time to expiration: {years} years")]
    NegativeTimeSpan {
        /// Signed year fraction from valuation to expiration
        years: f64,
    },

    /// Option kind string is neither call nor put.
    #[error("Invalid option kind: {0}. Must be one of: call, put")]
    InvalidOptionKind(String),

    /// A required field was never set on the builder.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },
}

/// Categorised pricing errors.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or parameters
/// - `InvalidArgument`: Engine arguments rejected (path counts, styles, barriers)
/// - `NumericalInstability`: Computation failed to produce a finite value
/// - `Validation`: A bumped contract failed validation
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Engine argument rejected
    InvalidArgument(String),

    /// Numerical instability during computation
    NumericalInstability(String),

    /// Contract validation failed
    Validation(ValidationError),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            PricingError::NumericalInstability(msg) => {
                write!(f, "Numerical instability: {}", msg)
            }
            PricingError::Validation(err) => write!(f, "Validation failed: {}", err),
        }
    }
}

impl std::error::Error for PricingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PricingError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for PricingError {
    fn from(err: ValidationError) -> Self {
        PricingError::Validation(err)
    }
}

/// Root-finding errors.
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::InvalidSpot { spot: 0.0 };
        assert_eq!(format!("{}", err), "Invalid spot: 0 (must be positive)");

        let err = ValidationError::NonFiniteInput { field: "rate" };
        assert_eq!(format!("{}", err), "Non-finite value for rate");
    }

    #[test]
    fn test_pricing_error_from_validation() {
        let err: PricingError = ValidationError::InvalidVolatility { volatility: -0.1 }.into();
        assert!(matches!(err, PricingError::Validation(_)));
        assert!(format!("{}", err).starts_with("Validation failed: Invalid volatility"));
    }

    #[test]
    fn test_pricing_error_source() {
        use std::error::Error;

        let err = PricingError::Validation(ValidationError::MissingField { field: "strike" });
        assert!(err.source().is_some());

        let err = PricingError::InvalidArgument("paths".to_string());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_solver_error_display() {
        let err = SolverError::NoBracket { a: 0.0, b: 1.0 };
        assert_eq!(format!("{}", err), "No bracket: f(0) and f(1) have same sign");
    }
}
