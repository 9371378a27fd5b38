//! CLI error types.

use std::path::PathBuf;

use pricer_core::types::{PricingError, ValidationError};
use pricer_models::analytical::AnalyticalError;
use pricer_pricing::mc::SimulationArgumentError;
use pricer_risk::PortfolioError;
use thiserror::Error;

/// Errors surfaced by `optionlab` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for the expected schema.
    #[error("Invalid configuration in {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration value rejected after loading.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Environment override could not be parsed.
    #[error("Invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    /// Portfolio file is not valid JSON for the expected schema.
    #[error("Invalid portfolio file: {0}")]
    PortfolioFile(#[source] serde_json::Error),

    /// Command-line arguments that clap cannot check on its own.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Simulation(#[from] SimulationArgumentError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Analytical(#[from] AnalyticalError),

    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    /// Report serialisation failed.
    #[error("Cannot serialise output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
