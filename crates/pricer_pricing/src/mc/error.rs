//! Error types for the Monte Carlo engine.
//!
//! Every variant is raised before any path is simulated: argument problems
//! are detected up front and returned to the caller unchanged.

use pricer_core::types::PricingError;
use thiserror::Error;

use super::config::{MAX_PATHS, MAX_STEPS};
use crate::path_dependent::OptionStyle;

/// Invalid simulation request.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimulationArgumentError {
    /// Path count outside `[1, MAX_PATHS]`.
    #[error("Invalid path count {0}: must be in range [1, {max}]", max = MAX_PATHS)]
    InvalidPathCount(usize),

    /// Step count outside `[1, MAX_STEPS]`.
    #[error("Invalid step count {0}: must be in range [1, {max}]", max = MAX_STEPS)]
    InvalidStepCount(usize),

    /// Style string that names no known option style.
    #[error("Unknown option style '{0}'")]
    UnknownStyle(String),

    /// Barrier style requested without a barrier.
    #[error("Option style {style} requires a barrier")]
    MissingBarrier {
        /// The barrier style that was requested
        style: OptionStyle,
    },

    /// Barrier level that is not a positive finite number.
    #[error("Invalid barrier level {level}: must be positive and finite")]
    InvalidBarrier {
        /// The rejected level
        level: f64,
    },

    /// Other engine parameter out of range.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the invalid value
        value: String,
    },
}

impl From<SimulationArgumentError> for PricingError {
    fn from(err: SimulationArgumentError) -> Self {
        PricingError::InvalidArgument(err.to_string())
    }
}
