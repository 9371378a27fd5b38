//! # pricer_core: Foundation for Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the pricing workspace, providing:
//! - The immutable option contract model (`contract`)
//! - The pricing capability consumed by finite-difference Greeks (`traits`)
//! - Year-fraction arithmetic on ACT/365 Fixed (`types::time`)
//! - Error types: `ValidationError`, `PricingError`, `SolverError` (`types::error`)
//! - Root finding for implied volatility (`math::solvers`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Expiration instants and valuation clocks
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::contract::{Contract, OptionKind};
//!
//! let contract = Contract::builder()
//!     .underlying("AAPL")
//!     .kind(OptionKind::Call)
//!     .strike(200.0)
//!     .spot(195.0)
//!     .rate(0.05)
//!     .volatility(0.25)
//!     .expiry_in_years(90.0 / 365.0)
//!     .build()
//!     .unwrap();
//!
//! assert!(!contract.is_in_the_money());
//! assert!((contract.time_to_expiration() - 90.0 / 365.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Contract` and `OptionKind`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod contract;
pub mod math;
pub mod traits;
pub mod types;

pub use contract::{Contract, ContractBuilder, OptionKind};
pub use traits::PricingFunction;
pub use types::{PricingError, SolverError, ValidationError};
