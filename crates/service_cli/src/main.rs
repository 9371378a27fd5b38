//! optionlab - Command Line Option Pricing and Risk
//!
//! This is the operational entry point for the pricing workspace.
//!
//! # Commands
//!
//! - `optionlab price` - Price one contract (closed form or Monte Carlo)
//! - `optionlab greeks` - Delta, gamma, vega, theta and rho
//! - `optionlab compare` - Closed form against simulation
//! - `optionlab implied-vol` - Volatility implied by a market price
//! - `optionlab portfolio --file <positions.json>` - Net value, Greeks and hedge
//!
//! # Architecture
//!
//! As the service layer, this crate parses arguments and configuration and
//! renders results; all numerics live in the pricer crates.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::compare::CompareArgs;
use commands::greeks::GreeksArgs;
use commands::implied_vol::ImpliedVolArgs;
use commands::portfolio::PortfolioArgs;
use commands::price::PriceArgs;
use config::AppConfig;

/// Option pricing and risk from the command line
#[derive(Parser, Debug)]
#[command(name = "optionlab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to ./optionlab.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price a single option contract
    Price(PriceArgs),

    /// Compute sensitivities of a single option contract
    Greeks(GreeksArgs),

    /// Compare the closed form with a Monte Carlo estimate
    Compare(CompareArgs),

    /// Solve for the volatility implied by a market price
    ImpliedVol(ImpliedVolArgs),

    /// Aggregate value and Greeks of a portfolio file
    Portfolio(PortfolioArgs),
}

/// `RUST_LOG` wins; otherwise `--verbose`, otherwise the configured level.
fn init_tracing(verbose: bool, config: &AppConfig) {
    let fallback = if verbose {
        "debug"
    } else {
        config.log_level.as_filter_str()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    init_tracing(cli.verbose, &config);
    debug!(?config, "configuration loaded");

    match &cli.command {
        Commands::Price(args) => commands::price::run(args, &config),
        Commands::Greeks(args) => commands::greeks::run(args, &config),
        Commands::Compare(args) => commands::compare::run(args, &config),
        Commands::ImpliedVol(args) => commands::implied_vol::run(args, &config),
        Commands::Portfolio(args) => commands::portfolio::run(args, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_price_command() {
        let cli = Cli::try_parse_from([
            "optionlab",
            "price",
            "--spot",
            "195",
            "--strike",
            "200",
            "--expiry-days",
            "90",
            "--vol",
            "0.25",
            "--style",
            "knock-out",
            "--barrier",
            "230",
            "--method",
            "monte-carlo",
            "--paths",
            "50000",
        ])
        .unwrap();

        match cli.command {
            Commands::Price(args) => {
                assert_eq!(args.market.spot, 195.0);
                assert_eq!(args.market.rate, 0.05);
                assert_eq!(
                    args.style.style,
                    pricer_pricing::path_dependent::OptionStyle::BarrierKnockOut
                );
                assert_eq!(args.style.paths, Some(50_000));
                assert_eq!(args.method, Some(commands::price::Method::MonteCarlo));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_rate_and_put() {
        let cli = Cli::try_parse_from([
            "optionlab",
            "implied-vol",
            "--spot",
            "100",
            "--strike",
            "100",
            "--expiry-days",
            "30",
            "--rate",
            "-0.005",
            "--kind",
            "put",
            "--market-price",
            "2.5",
        ])
        .unwrap();

        match cli.command {
            Commands::ImpliedVol(args) => {
                assert_eq!(args.market.rate, -0.005);
                assert_eq!(args.market.kind, pricer_core::contract::OptionKind::Put);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_missing_volatility_is_rejected() {
        assert!(Cli::try_parse_from([
            "optionlab",
            "price",
            "--spot",
            "100",
            "--strike",
            "100",
            "--expiry-days",
            "30",
        ])
        .is_err());
    }
}
