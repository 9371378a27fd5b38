//! Greeks command implementation

use clap::Args;
use pricer_pricing::greeks::{greeks_analytical_with, greeks_numerical, GreeksResult};
use pricer_pricing::mc::MonteCarloPricer;
use pricer_pricing::path_dependent::OptionStyle;
use serde::Serialize;
use tracing::info;

use super::{print_json, print_table, MarketArgs, OutputFormat, StyleArgs};
use crate::config::AppConfig;
use crate::Result;

/// Arguments of `optionlab greeks`.
#[derive(Args, Debug, Clone)]
pub struct GreeksArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    /// Annualised volatility
    #[arg(long)]
    pub vol: f64,

    #[command(flatten)]
    pub style: StyleArgs,

    /// Use finite differences instead of closed-form Greeks
    #[arg(long)]
    pub numerical: bool,

    /// Relative bump for finite differences (overrides the configuration)
    #[arg(long)]
    pub bump: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Greeks with their market-quoting equivalents.
#[derive(Debug, Clone, Serialize)]
pub struct GreeksReport {
    pub style: OptionStyle,
    pub greeks: GreeksResult,
    pub vega_per_vol_point: f64,
    pub theta_per_day: f64,
    pub rho_per_rate_point: f64,
}

/// Computes the report without printing it.
///
/// Path-dependent styles always use finite differences over the seeded
/// simulation engine.
pub fn evaluate(args: &GreeksArgs, config: &AppConfig) -> Result<GreeksReport> {
    let contract = args.market.contract(args.vol)?;
    let style = args.style.style;
    let bump = Some(args.bump.unwrap_or(config.greeks.bump));
    let analytical = config.analytical_pricer()?;

    let greeks = if style != OptionStyle::European {
        let sim = config.simulation_config(args.style.paths, args.style.seed)?;
        let pricer = MonteCarloPricer::new(sim)
            .with_style(style, args.style.barrier_spec(contract.spot()))?
            .seeded();
        greeks_numerical(&pricer, &contract, bump)?
    } else if args.numerical {
        greeks_numerical(&analytical, &contract, bump)?
    } else {
        greeks_analytical_with(&analytical, &contract)
    };

    Ok(GreeksReport {
        style,
        greeks,
        vega_per_vol_point: greeks.vega_per_vol_point(),
        theta_per_day: greeks.theta_per_day(),
        rho_per_rate_point: greeks.rho_per_rate_point(),
    })
}

/// Run the greeks command
pub fn run(args: &GreeksArgs, config: &AppConfig) -> Result<()> {
    let report = evaluate(args, config)?;
    let g = &report.greeks;
    info!(method = %g.method, delta = g.delta, gamma = g.gamma, "computed greeks");

    match args.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table => {
            let title = format!("Greeks ({}, {})", report.style, g.method);
            print_table(
                &title,
                &[
                    ("Delta", format!("{:.6}", g.delta)),
                    ("Gamma", format!("{:.6}", g.gamma)),
                    ("Vega (per 1.00 vol)", format!("{:.4}", g.vega)),
                    ("Vega (per vol point)", format!("{:.4}", report.vega_per_vol_point)),
                    ("Theta (per year)", format!("{:.4}", g.theta)),
                    ("Theta (per day)", format!("{:.4}", report.theta_per_day)),
                    ("Rho (per 1.00 rate)", format!("{:.4}", g.rho)),
                    ("Rho (per rate point)", format!("{:.4}", report.rho_per_rate_point)),
                ],
            );
            Ok(())
        }
    }
}
