//! Monte Carlo simulation configuration.
//!
//! [`SimulationConfig`] is immutable once built; the builder validates every
//! field in [`SimulationConfigBuilder::build`].

use pricer_core::types::DEFAULT_MIN_TIME_TO_EXPIRY;

use super::error::SimulationArgumentError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Paths simulated when the builder is not told otherwise.
pub const DEFAULT_PATHS: usize = 10_000;

/// Daily monitoring over a trading year.
pub const DEFAULT_STEPS: usize = 252;

/// Paths per parallel work unit.
pub const DEFAULT_CHUNK_SIZE: usize = 4_096;

/// Monte Carlo simulation configuration.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_paths(50_000)
///     .n_steps(252)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 50_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Number of simulation paths.
    n_paths: usize,
    /// Number of time steps per path.
    n_steps: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Paths per rayon task.
    chunk_size: usize,
    /// Relative standard error above which an advisory is attached.
    advisory_tolerance: Option<f64>,
    /// Time to expiry below which the payoff is evaluated at spot.
    min_time_to_expiry: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            n_steps: DEFAULT_STEPS,
            seed: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            advisory_tolerance: None,
            min_time_to_expiry: DEFAULT_MIN_TIME_TO_EXPIRY,
        }
    }
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the number of paths per parallel chunk.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the convergence advisory tolerance, if any.
    #[inline]
    pub fn advisory_tolerance(&self) -> Option<f64> {
        self.advisory_tolerance
    }

    /// Returns the degenerate-input threshold in years.
    #[inline]
    pub fn min_time_to_expiry(&self) -> f64 {
        self.min_time_to_expiry
    }

    /// Copy of this configuration with a different path count.
    pub fn with_n_paths(&self, n_paths: usize) -> Result<Self, SimulationArgumentError> {
        let config = Self {
            n_paths,
            ..self.clone()
        };
        config.validate()?;
        Ok(config)
    }

    /// Copy of this configuration with a fixed seed.
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self.clone()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SimulationArgumentError` if:
    /// - `n_paths` is 0 or greater than `MAX_PATHS`
    /// - `n_steps` is 0 or greater than `MAX_STEPS`
    /// - `chunk_size` is 0
    /// - the advisory tolerance or expiry threshold is negative or non-finite
    pub fn validate(&self) -> Result<(), SimulationArgumentError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(SimulationArgumentError::InvalidPathCount(self.n_paths));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(SimulationArgumentError::InvalidStepCount(self.n_steps));
        }
        if self.chunk_size == 0 {
            return Err(SimulationArgumentError::InvalidParameter {
                name: "chunk_size",
                value: "must be at least 1".to_string(),
            });
        }
        if let Some(tolerance) = self.advisory_tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(SimulationArgumentError::InvalidParameter {
                    name: "advisory_tolerance",
                    value: format!("{} is not a non-negative number", tolerance),
                });
            }
        }
        if !self.min_time_to_expiry.is_finite() || self.min_time_to_expiry < 0.0 {
            return Err(SimulationArgumentError::InvalidParameter {
                name: "min_time_to_expiry",
                value: format!("{} is not a non-negative number", self.min_time_to_expiry),
            });
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
///
/// Unset fields take the defaults: 10,000 paths, 252 steps, no seed,
/// chunks of 4,096 paths, no advisory and a one-day expiry threshold.
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
    chunk_size: Option<usize>,
    advisory_tolerance: Option<f64>,
    min_time_to_expiry: Option<f64>,
}

impl SimulationConfigBuilder {
    /// Sets the number of simulation paths, in `[1, MAX_PATHS]`.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per path, in `[1, MAX_STEPS]`.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of paths per parallel chunk.
    ///
    /// Results depend on the chunk size (it fixes the random stream layout)
    /// but never on the number of threads.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Attaches a [`ConvergenceAdvisory`](super::ConvergenceAdvisory) when
    /// the relative standard error exceeds `tolerance`.
    #[inline]
    pub fn advisory_tolerance(mut self, tolerance: f64) -> Self {
        self.advisory_tolerance = Some(tolerance);
        self
    }

    /// Sets the degenerate-input threshold in years.
    #[inline]
    pub fn min_time_to_expiry(mut self, years: f64) -> Self {
        self.min_time_to_expiry = Some(years);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// See [`SimulationConfig::validate`].
    pub fn build(self) -> Result<SimulationConfig, SimulationArgumentError> {
        let defaults = SimulationConfig::default();
        let config = SimulationConfig {
            n_paths: self.n_paths.unwrap_or(defaults.n_paths),
            n_steps: self.n_steps.unwrap_or(defaults.n_steps),
            seed: self.seed,
            chunk_size: self.chunk_size.unwrap_or(defaults.chunk_size),
            advisory_tolerance: self.advisory_tolerance,
            min_time_to_expiry: self
                .min_time_to_expiry
                .unwrap_or(defaults.min_time_to_expiry),
        };

        config.validate()?;
        Ok(config)
    }
}
