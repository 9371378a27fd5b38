//! # Pricer Pricing: Simulation and Greeks
//!
//! Monte Carlo pricing for European, Asian, and barrier options, plus
//! analytical and finite-difference Greeks over the
//! [`PricingFunction`](pricer_core::traits::PricingFunction) seam.
//!
//! ## Modules
//!
//! - [`rng`]: seeded generators with per-chunk sub-streams
//! - [`mc`]: GBM path simulation, chunked over rayon with an ordered merge
//! - [`path_dependent`]: option styles, barriers and streamed payoffs
//! - [`greeks`]: closed-form and bump-and-revalue sensitivities
//! - [`compare`]: analytical against simulated prices
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::contract::{Contract, OptionKind};
//! use pricer_pricing::greeks::greeks_numerical;
//! use pricer_pricing::mc::{MonteCarloPricer, SimulationConfig};
//! use pricer_pricing::path_dependent::OptionStyle;
//!
//! let contract = Contract::builder()
//!     .underlying("ACME")
//!     .kind(OptionKind::Call)
//!     .strike(100.0)
//!     .spot(100.0)
//!     .rate(0.05)
//!     .volatility(0.2)
//!     .expiry_in_years(1.0)
//!     .build()
//!     .unwrap();
//!
//! let config = SimulationConfig::builder()
//!     .n_paths(5_000)
//!     .n_steps(52)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let asian = MonteCarloPricer::new(config)
//!     .with_style(OptionStyle::Asian, None)
//!     .unwrap();
//!
//! let result = asian.simulate(&contract).unwrap();
//! let greeks = greeks_numerical(&asian, &contract, None).unwrap();
//! assert!(result.price > 0.0 && greeks.delta > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod compare;
pub mod greeks;
pub mod mc;
pub mod path_dependent;
pub mod rng;

pub use compare::{compare_methods, MethodComparison};
pub use greeks::{greeks_analytical, greeks_numerical, GreeksMethod, GreeksResult};
pub use mc::{
    price_simulated, ConvergenceAdvisory, MonteCarloPricer, SimulationArgumentError,
    SimulationConfig, SimulationResult,
};
pub use path_dependent::{BarrierSpec, OptionStyle};
