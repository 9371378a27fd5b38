//! Monte Carlo pricing engine.
//!
//! Prices European, Asian, and barrier options by simulating Geometric
//! Brownian Motion paths in log space.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── SimulationConfig   (paths, steps, seed, chunk size, advisory tolerance)
//! ├── PathPayoff         (style-specific payoff from streamed path statistics)
//! └── Orchestration
//!     ├── chunk i ─ PricerRng::for_stream(seed, i) ─ GbmStepper ─ RunningStats
//!     ├── ordered merge of chunk statistics
//!     └── discounting → SimulationResult
//! ```
//!
//! # Estimator
//!
//! ```text
//! price     = e^(-rT) · mean(payoff)
//! std_error = e^(-rT) · stdev(payoff) / √n      (n - 1 denominator)
//! ```

mod config;
mod error;
mod paths;
mod pricer;
mod result;
mod stats;

pub use config::{
    SimulationConfig, SimulationConfigBuilder, DEFAULT_CHUNK_SIZE, DEFAULT_PATHS, DEFAULT_STEPS,
    MAX_PATHS, MAX_STEPS,
};
pub use error::SimulationArgumentError;
pub use paths::{GbmParams, GbmStepper};
pub use pricer::{price_simulated, MonteCarloPricer};
pub use result::{ConvergenceAdvisory, SimulationResult};
pub use stats::RunningStats;
