//! Core traits shared across pricing engines.
//!
//! This module defines:
//! - Generic floating-point operations (`Float` trait)
//! - The pricing capability (`PricingFunction` trait)
//!
//! Engines are independent implementers of [`PricingFunction`]; consumers such
//! as finite-difference Greeks depend on the capability only.

/// Generic floating-point trait for numeric computations.
///
/// # Examples
/// ```
/// use pricer_core::traits::Float;
///
/// fn compute_discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let discount_f64: f64 = compute_discount(0.05, 1.0);
/// assert!((discount_f64 - 0.951229).abs() < 1e-5);
/// ```
pub use num_traits::Float;

pub mod priceable;

pub use priceable::PricingFunction;
