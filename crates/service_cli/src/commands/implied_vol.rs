//! Implied volatility command implementation

use clap::Args;
use pricer_models::analytical::implied_volatility;
use serde::Serialize;
use tracing::info;

use super::{print_json, print_table, MarketArgs, OutputFormat};
use crate::config::AppConfig;
use crate::Result;

/// Arguments of `optionlab implied-vol`.
#[derive(Args, Debug, Clone)]
pub struct ImpliedVolArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    /// Observed option price
    #[arg(long)]
    pub market_price: f64,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Solved volatility and the closed-form price it reproduces.
#[derive(Debug, Clone, Serialize)]
pub struct ImpliedVolReport {
    pub market_price: f64,
    pub implied_volatility: f64,
    pub model_price: f64,
}

/// Solves for the volatility.
pub fn evaluate(args: &ImpliedVolArgs, config: &AppConfig) -> Result<ImpliedVolReport> {
    // Volatility is the unknown; the placeholder is never read by the solver
    let contract = args.market.contract(0.0)?;
    let vol = implied_volatility(&contract, args.market_price)?;
    let model_price = config
        .analytical_pricer()?
        .price_contract(&contract.with_volatility(vol)?);

    Ok(ImpliedVolReport {
        market_price: args.market_price,
        implied_volatility: vol,
        model_price,
    })
}

/// Run the implied-vol command
pub fn run(args: &ImpliedVolArgs, config: &AppConfig) -> Result<()> {
    let report = evaluate(args, config)?;
    info!(implied_volatility = report.implied_volatility, "solved implied volatility");

    match args.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table => {
            print_table(
                "Implied volatility",
                &[
                    ("Market price", format!("{:.4}", report.market_price)),
                    (
                        "Implied volatility",
                        format!("{:.4}%", report.implied_volatility * 100.0),
                    ),
                    ("Model price", format!("{:.4}", report.model_price)),
                ],
            );
            Ok(())
        }
    }
}
