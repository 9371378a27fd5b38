//! Monte Carlo pricing engine.
//!
//! The [`MonteCarloPricer`] coordinates:
//! 1. Seed resolution (configured, or drawn once from OS entropy)
//! 2. Partitioning paths into fixed-size chunks, each with its own
//!    [`PricerRng`] stream derived from `(seed, chunk_index)`
//! 3. Parallel chunk simulation on rayon, streaming every path through a
//!    [`PathObserver`] and a [`PathPayoff`]
//! 4. Ordered merge of per-chunk statistics, then discounting
//!
//! Because both the random streams and the merge order are fixed by the
//! chunk index, a given seed produces bit-identical results on any number of
//! threads.

use std::time::Instant;

use pricer_core::contract::Contract;
use pricer_core::traits::PricingFunction;
use pricer_core::types::PricingError;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::config::SimulationConfig;
use super::error::SimulationArgumentError;
use super::paths::{GbmParams, GbmStepper};
use super::result::{ConvergenceAdvisory, SimulationResult};
use super::stats::RunningStats;
use crate::path_dependent::{BarrierSpec, OptionStyle, PathObserver, PathPayoff};
use crate::rng::PricerRng;

/// Monte Carlo pricer for one option style.
///
/// The pricer is immutable: every call to [`simulate`](Self::simulate)
/// builds its own random streams, so a single pricer can be shared across
/// threads.
///
/// # Examples
///
/// ```rust
/// use pricer_core::contract::{Contract, OptionKind};
/// use pricer_pricing::mc::{MonteCarloPricer, SimulationConfig};
/// use pricer_pricing::path_dependent::{BarrierSpec, OptionStyle};
///
/// let contract = Contract::builder()
///     .kind(OptionKind::Call)
///     .strike(100.0)
///     .spot(100.0)
///     .rate(0.05)
///     .volatility(0.2)
///     .expiry_in_years(1.0)
///     .build()
///     .unwrap();
///
/// let config = SimulationConfig::builder()
///     .n_paths(20_000)
///     .n_steps(50)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let pricer = MonteCarloPricer::new(config)
///     .with_style(OptionStyle::BarrierKnockOut, Some(BarrierSpec::up(130.0)))
///     .unwrap();
///
/// let result = pricer.simulate(&contract).unwrap();
/// assert!(result.price > 0.0 && result.std_error > 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MonteCarloPricer {
    config: SimulationConfig,
    style: OptionStyle,
    barrier: Option<BarrierSpec>,
}

impl MonteCarloPricer {
    /// European pricer with the given configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            style: OptionStyle::European,
            barrier: None,
        }
    }

    /// Replaces the option style.
    ///
    /// # Errors
    /// - `MissingBarrier` if `style` is a barrier style and `barrier` is `None`
    /// - `InvalidBarrier` if the barrier level is not positive and finite
    pub fn with_style(
        self,
        style: OptionStyle,
        barrier: Option<BarrierSpec>,
    ) -> Result<Self, SimulationArgumentError> {
        if style.is_barrier() {
            barrier
                .ok_or(SimulationArgumentError::MissingBarrier { style })?
                .validate()?;
        }
        Ok(Self {
            style,
            barrier,
            ..self
        })
    }

    /// Copy of this pricer whose seed is fixed.
    ///
    /// An unseeded pricer draws a fresh seed per call; pinning it first makes
    /// repeated revaluations (finite-difference Greeks) share random numbers.
    pub fn seeded(&self) -> Self {
        match self.config.seed() {
            Some(_) => self.clone(),
            None => {
                let seed = PricerRng::entropy_seed();
                info!(seed, "pinned simulation seed from OS entropy");
                Self {
                    config: self.config.with_seed(seed),
                    ..self.clone()
                }
            }
        }
    }

    /// Returns the simulation configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the option style.
    #[inline]
    pub fn style(&self) -> OptionStyle {
        self.style
    }

    /// Returns the barrier, if any.
    #[inline]
    pub fn barrier(&self) -> Option<BarrierSpec> {
        self.barrier
    }

    /// Prices `contract` by simulation.
    ///
    /// Below the expiry threshold the payoff is evaluated on the one-sample
    /// path `[S]` without discounting and the standard error is 0.
    pub fn simulate(&self, contract: &Contract) -> Result<SimulationResult, SimulationArgumentError> {
        let started = Instant::now();
        let payoff = PathPayoff::for_contract(contract, self.style, self.barrier)?;
        let seed = self.resolve_seed();
        let n_paths = self.config.n_paths();
        let maturity = contract.time_to_expiration();

        if maturity < self.config.min_time_to_expiry() || maturity <= 0.0 {
            warn!(
                underlying = contract.underlying(),
                time_to_expiry = maturity,
                threshold = self.config.min_time_to_expiry(),
                "time to expiry below threshold, evaluating payoff at spot"
            );
            let mut observer = PathObserver::new();
            observer.observe(contract.spot());
            return Ok(self.finish(payoff.evaluate(&observer), 0.0, seed, started));
        }

        let params = GbmParams::from_contract(contract, maturity);
        debug_assert!(params.is_valid(), "invalid GBM parameters {:?}", params);
        let n_steps = self.config.n_steps();
        let stepper = GbmStepper::new(&params, n_steps);
        let chunk_size = self.config.chunk_size();
        let n_chunks = n_paths.div_ceil(chunk_size);

        debug!(
            underlying = contract.underlying(),
            style = %self.style,
            n_paths,
            n_steps,
            n_chunks,
            seed,
            "starting simulation"
        );

        let chunk_stats: Vec<RunningStats> = (0..n_chunks)
            .into_par_iter()
            .map(|chunk| {
                let first_path = chunk * chunk_size;
                let len = chunk_size.min(n_paths - first_path);
                let rng = PricerRng::for_stream(seed, chunk as u64);
                simulate_chunk(&stepper, &payoff, n_steps, rng, len)
            })
            .collect();

        let stats = chunk_stats
            .into_iter()
            .fold(RunningStats::new(), RunningStats::merge);

        let discount = params.discount_factor();
        Ok(self.finish(
            discount * stats.mean(),
            discount * stats.std_error(),
            seed,
            started,
        ))
    }

    fn resolve_seed(&self) -> u64 {
        self.config.seed().unwrap_or_else(|| {
            let seed = PricerRng::entropy_seed();
            info!(seed, "no seed configured, drew seed from OS entropy");
            seed
        })
    }

    fn finish(&self, price: f64, std_error: f64, seed: u64, started: Instant) -> SimulationResult {
        let advisory = self
            .config
            .advisory_tolerance()
            .and_then(|tolerance| ConvergenceAdvisory::check(price, std_error, tolerance));
        if let Some(advisory) = advisory {
            warn!(
                relative_error = advisory.relative_error,
                tolerance = advisory.tolerance,
                "simulation has not converged to tolerance"
            );
        }
        let result = SimulationResult {
            price,
            std_error,
            n_paths: self.config.n_paths(),
            seed,
            elapsed: started.elapsed(),
            advisory,
        };
        debug!(
            price = result.price,
            std_error = result.std_error,
            elapsed_ms = result.elapsed.as_secs_f64() * 1e3,
            "simulation finished"
        );
        result
    }
}

/// Simulates `len` paths on one random stream.
fn simulate_chunk(
    stepper: &GbmStepper,
    payoff: &PathPayoff,
    n_steps: usize,
    mut rng: PricerRng,
    len: usize,
) -> RunningStats {
    let mut normals = vec![0.0; n_steps];
    let mut observer = PathObserver::new();
    let mut stats = RunningStats::new();
    for _ in 0..len {
        rng.fill_normal(&mut normals);
        stepper.simulate_into(&normals, &mut observer);
        stats.push(payoff.evaluate(&observer));
    }
    stats
}

impl PricingFunction for MonteCarloPricer {
    fn price(&self, contract: &Contract) -> Result<f64, PricingError> {
        let result = self.simulate(contract)?;
        if result.price.is_finite() {
            Ok(result.price)
        } else {
            Err(PricingError::NumericalInstability(format!(
                "simulation produced {} for {}",
                result.price,
                contract.underlying()
            )))
        }
    }

    fn min_time_to_expiry(&self) -> f64 {
        self.config.min_time_to_expiry()
    }
}

/// Prices `contract` by simulation with the default configuration
/// (252 steps, entropy seed) and `n_paths` paths.
///
/// # Errors
/// - `InvalidPathCount` if `n_paths` is 0 or above `MAX_PATHS`
/// - `MissingBarrier` / `InvalidBarrier` for a bad barrier request
///
/// # Examples
///
/// ```rust
/// use pricer_core::contract::{Contract, OptionKind};
/// use pricer_pricing::mc::price_simulated;
/// use pricer_pricing::path_dependent::OptionStyle;
///
/// let contract = Contract::builder()
///     .kind(OptionKind::Put)
///     .strike(100.0)
///     .spot(100.0)
///     .rate(0.05)
///     .volatility(0.2)
///     .expiry_in_years(1.0)
///     .build()
///     .unwrap();
///
/// let result = price_simulated(&contract, 5_000, OptionStyle::Asian, None).unwrap();
/// assert!(result.price > 0.0);
/// assert!(price_simulated(&contract, 0, OptionStyle::European, None).is_err());
/// ```
pub fn price_simulated(
    contract: &Contract,
    n_paths: usize,
    style: OptionStyle,
    barrier: Option<BarrierSpec>,
) -> Result<SimulationResult, SimulationArgumentError> {
    let config = SimulationConfig::default().with_n_paths(n_paths)?;
    MonteCarloPricer::new(config)
        .with_style(style, barrier)?
        .simulate(contract)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{TimeZone, Utc};
    use pricer_core::contract::OptionKind;

    fn contract(kind: OptionKind, vol: f64, years: f64) -> Contract {
        Contract::builder()
            .underlying("TEST")
            .kind(kind)
            .strike(100.0)
            .spot(100.0)
            .rate(0.05)
            .volatility(vol)
            .valuation_time(Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap())
            .expiry_in_years(years)
            .build()
            .unwrap()
    }

    fn pricer(n_paths: usize, seed: u64) -> MonteCarloPricer {
        MonteCarloPricer::new(
            SimulationConfig::builder()
                .n_paths(n_paths)
                .n_steps(20)
                .seed(seed)
                .chunk_size(256)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_same_seed_same_result() {
        let c = contract(OptionKind::Call, 0.2, 1.0);
        let a = pricer(3_000, 11).simulate(&c).unwrap();
        let b = pricer(3_000, 11).simulate(&c).unwrap();
        assert_eq!(a.price, b.price);
        assert_eq!(a.std_error, b.std_error);
        assert_eq!(a.seed, 11);
    }

    #[test]
    fn test_partial_last_chunk_counts_all_paths() {
        // 1000 paths in chunks of 256: three full chunks and one of 232
        let c = contract(OptionKind::Call, 0.2, 1.0);
        let result = pricer(1_000, 5).simulate(&c).unwrap();
        assert_eq!(result.n_paths, 1_000);
        assert!(result.std_error > 0.0);
    }

    #[test]
    fn test_single_path_has_zero_error() {
        let c = contract(OptionKind::Call, 0.2, 1.0);
        let result = pricer(1, 5).simulate(&c).unwrap();
        assert_eq!(result.std_error, 0.0);
    }

    #[test]
    fn test_zero_volatility_is_exact() {
        let c = contract(OptionKind::Call, 0.0, 1.0);
        let result = pricer(2_000, 9).simulate(&c).unwrap();
        let expected = 100.0 - 100.0 * (-0.05_f64).exp();

        assert_eq!(result.std_error, 0.0);
        assert_abs_diff_eq!(result.price, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_expiring_contract_uses_intrinsic_at_spot() {
        let mut c = contract(OptionKind::Call, 0.3, 0.5 / 365.0);
        c = c.with_spot(104.0).unwrap();
        let result = pricer(1_000, 1).simulate(&c).unwrap();
        assert_eq!(result.price, 4.0);
        assert_eq!(result.std_error, 0.0);

        // Barrier status is read from the spot itself
        let knock_out = pricer(1_000, 1)
            .with_style(OptionStyle::BarrierKnockOut, Some(BarrierSpec::up(104.0)))
            .unwrap();
        assert_eq!(knock_out.simulate(&c).unwrap().price, 0.0);
    }

    #[test]
    fn test_with_style_validates_barrier() {
        let result = pricer(10, 1).with_style(OptionStyle::BarrierKnockIn, None);
        assert!(matches!(
            result,
            Err(SimulationArgumentError::MissingBarrier { .. })
        ));

        let result = pricer(10, 1).with_style(
            OptionStyle::BarrierKnockOut,
            Some(BarrierSpec::down(f64::NAN)),
        );
        assert!(matches!(
            result,
            Err(SimulationArgumentError::InvalidBarrier { .. })
        ));
    }

    #[test]
    fn test_advisory_attached_above_tolerance() {
        let config = SimulationConfig::builder()
            .n_paths(100)
            .n_steps(10)
            .seed(3)
            .advisory_tolerance(1e-6)
            .build()
            .unwrap();
        let c = contract(OptionKind::Call, 0.2, 1.0);
        let result = MonteCarloPricer::new(config).simulate(&c).unwrap();
        assert!(result.advisory.is_some());

        let result = pricer(100, 3).simulate(&c).unwrap();
        assert!(result.advisory.is_none());
    }

    #[test]
    fn test_seeded_pins_seed() {
        let unseeded = MonteCarloPricer::new(SimulationConfig::default());
        let pinned = unseeded.seeded();
        assert!(pinned.config().seed().is_some());
        assert_eq!(pinned.seeded(), pinned);
    }

    #[test]
    fn test_pricing_function_impl() {
        let c = contract(OptionKind::Put, 0.2, 1.0);
        let p = pricer(2_000, 4);
        let via_trait = PricingFunction::price(&p, &c).unwrap();
        assert_eq!(via_trait, p.simulate(&c).unwrap().price);
    }
}
