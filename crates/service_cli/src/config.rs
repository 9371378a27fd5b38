//! `optionlab` configuration.
//!
//! Sources, highest priority first:
//! 1. Command-line flags (applied by each command)
//! 2. `OPTIONLAB_*` environment variables
//! 3. The TOML file (`--config`, or `optionlab.toml` in the working directory)
//! 4. Built-in defaults
//!
//! ```toml
//! log_level = "info"
//!
//! [simulation]
//! paths = 10000
//! steps = 252
//! seed = 42
//! chunk_size = 4096
//! advisory_tolerance = 0.01
//!
//! [greeks]
//! bump = 0.01
//!
//! [pricing]
//! min_time_to_expiry = 0.00274
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_core::types::DEFAULT_MIN_TIME_TO_EXPIRY;
use pricer_models::analytical::AnalyticalPricer;
use pricer_pricing::greeks::DEFAULT_BUMP;
use pricer_pricing::mc::{SimulationConfig, DEFAULT_CHUNK_SIZE, DEFAULT_PATHS, DEFAULT_STEPS};
use serde::Deserialize;

use crate::{CliError, Result};

/// File looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "optionlab.toml";

/// Log levels accepted in the config file and `OPTIONLAB_LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidEnv {
                var: "OPTIONLAB_LOG_LEVEL",
                value: s.to_string(),
            }),
        }
    }
}

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// `[simulation]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    pub paths: usize,
    pub steps: usize,
    pub seed: Option<u64>,
    pub chunk_size: usize,
    pub advisory_tolerance: Option<f64>,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            paths: DEFAULT_PATHS,
            steps: DEFAULT_STEPS,
            seed: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            advisory_tolerance: None,
        }
    }
}

/// `[greeks]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GreeksSection {
    pub bump: f64,
}

impl Default for GreeksSection {
    fn default() -> Self {
        Self { bump: DEFAULT_BUMP }
    }
}

/// `[pricing]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PricingSection {
    pub min_time_to_expiry: f64,
}

impl Default for PricingSection {
    fn default() -> Self {
        Self {
            min_time_to_expiry: DEFAULT_MIN_TIME_TO_EXPIRY,
        }
    }
}

/// Complete `optionlab` configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LogLevel,
    pub simulation: SimulationSection,
    pub greeks: GreeksSection,
    pub pricing: PricingSection,
}

impl AppConfig {
    /// Loads the file (if any), then applies environment overrides.
    ///
    /// An explicit `path` must exist; the implicit `optionlab.toml` is
    /// optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    Self::from_file(implicit)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| CliError::ConfigParse {
            path: PathBuf::from(path),
            source,
        })
    }

    /// Parses TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies `OPTIONLAB_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("OPTIONLAB_LOG_LEVEL") {
            self.log_level = level.parse()?;
        }
        if let Some(paths) = parse_env(&lookup, "OPTIONLAB_PATHS")? {
            self.simulation.paths = paths;
        }
        if let Some(steps) = parse_env(&lookup, "OPTIONLAB_STEPS")? {
            self.simulation.steps = steps;
        }
        if let Some(seed) = parse_env(&lookup, "OPTIONLAB_SEED")? {
            self.simulation.seed = Some(seed);
        }
        if let Some(chunk_size) = parse_env(&lookup, "OPTIONLAB_CHUNK_SIZE")? {
            self.simulation.chunk_size = chunk_size;
        }
        if let Some(tolerance) = parse_env(&lookup, "OPTIONLAB_ADVISORY_TOLERANCE")? {
            self.simulation.advisory_tolerance = Some(tolerance);
        }
        if let Some(bump) = parse_env(&lookup, "OPTIONLAB_BUMP")? {
            self.greeks.bump = bump;
        }
        if let Some(threshold) = parse_env(&lookup, "OPTIONLAB_MIN_TIME_TO_EXPIRY")? {
            self.pricing.min_time_to_expiry = threshold;
        }
        Ok(())
    }

    /// Checks every section by building the engine settings it feeds.
    pub fn validate(&self) -> Result<()> {
        self.simulation_config(None, None)?;
        self.analytical_pricer()?;
        if !(self.greeks.bump > 0.0 && self.greeks.bump < 1.0) {
            return Err(CliError::Config(format!(
                "greeks.bump must lie in (0, 1), got {}",
                self.greeks.bump
            )));
        }
        Ok(())
    }

    /// Simulation settings with optional command-line overrides.
    pub fn simulation_config(
        &self,
        paths: Option<usize>,
        seed: Option<u64>,
    ) -> Result<SimulationConfig> {
        let section = &self.simulation;
        let mut builder = SimulationConfig::builder()
            .n_paths(paths.unwrap_or(section.paths))
            .n_steps(section.steps)
            .chunk_size(section.chunk_size)
            .min_time_to_expiry(self.pricing.min_time_to_expiry);
        if let Some(seed) = seed.or(section.seed) {
            builder = builder.seed(seed);
        }
        if let Some(tolerance) = section.advisory_tolerance {
            builder = builder.advisory_tolerance(tolerance);
        }
        Ok(builder.build()?)
    }

    /// Closed-form pricer with the configured expiry threshold.
    pub fn analytical_pricer(&self) -> Result<AnalyticalPricer> {
        Ok(AnalyticalPricer::new().with_min_time_to_expiry(self.pricing.min_time_to_expiry)?)
    }
}

fn parse_env<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(CliError::InvalidEnv { var, value }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.simulation.paths, 10_000);
        assert_eq!(config.simulation.steps, 252);
        assert_eq!(config.simulation.seed, None);
        assert_eq!(config.greeks.bump, 0.01);
        assert_eq!(config.pricing.min_time_to_expiry, 1.0 / 365.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            log_level = "debug"

            [simulation]
            paths = 50000
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.simulation.paths, 50_000);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.steps, 252);
        assert_eq!(config.greeks, GreeksSection::default());
    }

    #[test]
    fn test_unknown_log_level_rejected_in_toml() {
        assert!(AppConfig::from_toml(r#"log_level = "loud""#).is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = AppConfig::from_toml("[greeks]\nbump = 0.02").unwrap();
        config
            .apply_env(env(&[
                ("OPTIONLAB_BUMP", "0.005"),
                ("OPTIONLAB_SEED", "99"),
                ("OPTIONLAB_LOG_LEVEL", "INFO"),
            ]))
            .unwrap();

        assert_eq!(config.greeks.bump, 0.005);
        assert_eq!(config.simulation.seed, Some(99));
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_bad_env_value() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env(env(&[("OPTIONLAB_PATHS", "many")]))
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidEnv {
                var: "OPTIONLAB_PATHS",
                ..
            }
        ));
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.simulation.paths = 0;
        assert!(matches!(config.validate(), Err(CliError::Simulation(_))));

        let mut config = AppConfig::default();
        config.greeks.bump = 1.5;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));

        let mut config = AppConfig::default();
        config.pricing.min_time_to_expiry = -1.0;
        assert!(matches!(config.validate(), Err(CliError::Simulation(_))));
        assert!(matches!(config.analytical_pricer(), Err(CliError::Analytical(_))));
    }

    #[test]
    fn test_simulation_overrides() {
        let mut config = AppConfig::default();
        config.simulation.seed = Some(1);
        let sim = config.simulation_config(Some(2_000), Some(5)).unwrap();
        assert_eq!(sim.n_paths(), 2_000);
        assert_eq!(sim.seed(), Some(5));

        let sim = config.simulation_config(None, None).unwrap();
        assert_eq!(sim.seed(), Some(1));
    }
}
