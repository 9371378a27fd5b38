//! Price command implementation
//!
//! Prices a single contract with the closed form or the Monte Carlo engine.

use clap::{Args, ValueEnum};
use pricer_pricing::mc::{ConvergenceAdvisory, MonteCarloPricer};
use pricer_pricing::path_dependent::OptionStyle;
use serde::Serialize;
use tracing::info;

use super::{print_json, print_table, MarketArgs, OutputFormat, StyleArgs};
use crate::config::AppConfig;
use crate::{CliError, Result};

/// Pricing engine selection.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Black-Scholes-Merton closed form (European only)
    Analytical,
    /// Monte Carlo simulation
    MonteCarlo,
}

/// Arguments of `optionlab price`.
#[derive(Args, Debug, Clone)]
pub struct PriceArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    /// Annualised volatility
    #[arg(long)]
    pub vol: f64,

    #[command(flatten)]
    pub style: StyleArgs,

    /// Pricing engine; analytical for European, monte-carlo otherwise
    #[arg(long)]
    pub method: Option<Method>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Priced contract.
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub method: Method,
    pub style: OptionStyle,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_error: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_interval: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_paths: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<ConvergenceAdvisory>,
}

/// Computes the report without printing it.
pub fn evaluate(args: &PriceArgs, config: &AppConfig) -> Result<PriceReport> {
    let contract = args.market.contract(args.vol)?;
    let style = args.style.style;
    let method = args.method.unwrap_or(match style {
        OptionStyle::European => Method::Analytical,
        _ => Method::MonteCarlo,
    });

    match method {
        Method::Analytical => {
            if style != OptionStyle::European {
                return Err(CliError::InvalidArgument(format!(
                    "no closed form for {} options; use --method monte-carlo",
                    style
                )));
            }
            let price = config.analytical_pricer()?.price_contract(&contract);
            Ok(PriceReport {
                method,
                style,
                price,
                std_error: None,
                confidence_interval: None,
                n_paths: None,
                seed: None,
                advisory: None,
            })
        }
        Method::MonteCarlo => {
            let sim = config.simulation_config(args.style.paths, args.style.seed)?;
            let pricer = MonteCarloPricer::new(sim)
                .with_style(style, args.style.barrier_spec(contract.spot()))?;
            let result = pricer.simulate(&contract)?;
            Ok(PriceReport {
                method,
                style,
                price: result.price,
                std_error: Some(result.std_error),
                confidence_interval: Some(result.confidence_interval()),
                n_paths: Some(result.n_paths),
                seed: Some(result.seed),
                advisory: result.advisory,
            })
        }
    }
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &AppConfig) -> Result<()> {
    let report = evaluate(args, config)?;
    info!(method = ?report.method, style = %report.style, price = report.price, "priced contract");

    match args.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table => {
            let mut rows = vec![
                ("Style", report.style.to_string()),
                ("Price", format!("{:.4}", report.price)),
            ];
            if let (Some(se), Some((lo, hi))) = (report.std_error, report.confidence_interval) {
                rows.push(("Std error", format!("{:.4}", se)));
                rows.push(("95% interval", format!("[{:.4}, {:.4}]", lo, hi)));
            }
            if let (Some(n), Some(seed)) = (report.n_paths, report.seed) {
                rows.push(("Paths", n.to_string()));
                rows.push(("Seed", seed.to_string()));
            }
            if let Some(advisory) = report.advisory {
                rows.push((
                    "Advisory",
                    format!(
                        "rel. error {:.2}% > {:.2}%",
                        advisory.relative_error * 100.0,
                        advisory.tolerance * 100.0
                    ),
                ));
            }
            let title = match report.method {
                Method::Analytical => "Analytical price",
                Method::MonteCarlo => "Monte Carlo price",
            };
            print_table(title, &rows);
            Ok(())
        }
    }
}
