//! # Random Number Generation
//!
//! Seeded pseudo-random number generation for Monte Carlo simulation.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: Every generator is built from an explicit seed; there
//!   is no process-global random state
//! - **Partitioning**: [`PricerRng::for_stream`] derives independent, seed-stable
//!   streams for parallel workers, so results do not depend on how work is
//!   scheduled across threads
//! - **Efficiency**: Batch operations fill caller-owned `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let mut normals = [0.0; 8];
//! rng.fill_normal(&mut normals);
//! assert!(normals.iter().all(|z| z.is_finite()));
//!
//! // Stream 3 of seed 12345 is the same on every machine and thread
//! let mut a = PricerRng::for_stream(12345, 3);
//! let mut b = PricerRng::for_stream(12345, 3);
//! assert_eq!(a.gen_normal(), b.gen_normal());
//! ```

mod prng;

pub use prng::PricerRng;
