//! # Pricer Models (L2: Closed-Form Pricing)
//!
//! Analytical Black-Scholes-Merton pricing for European options.
//!
//! This crate provides:
//! - The generic closed-form model (`analytical::BlackScholes`)
//! - A contract-level pricer applying the degenerate-input policy
//!   (`analytical::AnalyticalPricer`)
//! - Analytical Greeks (Delta, Gamma, Vega, Theta, Rho)
//! - Implied volatility by bracketed root finding
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`** for the raw formulas
//! - **Stateless pricers**: every call is a pure function of the contract
//! - **No singular evaluations**: near-expiry and zero-volatility contracts
//!   take limit branches instead of the closed form

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;

pub use analytical::{price_analytical, AnalyticalPricer, BlackScholes, Greeks};
