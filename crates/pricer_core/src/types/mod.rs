//! Core time and error types.
//!
//! This module provides:
//! - `time`: ACT/365 Fixed year fractions between instants
//! - `error`: Structured error types for contract validation, pricing and solvers
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`year_fraction`], [`add_years`], [`DEFAULT_MIN_TIME_TO_EXPIRY`] from `time`
//! - [`PricingError`], [`ValidationError`], [`SolverError`] from `error`

pub mod error;
pub mod time;

pub use error::{PricingError, SolverError, ValidationError};
pub use time::{add_years, year_fraction, DEFAULT_MIN_TIME_TO_EXPIRY, DAYS_PER_YEAR};
