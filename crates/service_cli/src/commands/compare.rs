//! Compare command implementation
//!
//! Prices a European contract with both engines and reports the gap.

use clap::Args;
use pricer_pricing::compare::{compare_methods, MethodComparison};

use super::{print_json, print_table, MarketArgs, OutputFormat};
use crate::config::AppConfig;
use crate::Result;

/// Arguments of `optionlab compare`.
#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    /// Annualised volatility
    #[arg(long)]
    pub vol: f64,

    /// Number of Monte Carlo paths (overrides the configuration)
    #[arg(long)]
    pub paths: Option<usize>,

    /// Random seed (overrides the configuration)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Runs both engines.
pub fn evaluate(args: &CompareArgs, config: &AppConfig) -> Result<MethodComparison> {
    let contract = args.market.contract(args.vol)?;
    let paths = args.paths.unwrap_or(config.simulation.paths);
    let seed = args.seed.or(config.simulation.seed);
    Ok(compare_methods(&contract, paths, seed)?)
}

/// Run the compare command
pub fn run(args: &CompareArgs, config: &AppConfig) -> Result<()> {
    let cmp = evaluate(args, config)?;

    match args.format {
        OutputFormat::Json => print_json(&cmp),
        OutputFormat::Table => {
            let (lo, hi) = cmp.simulation.confidence_interval();
            let relative = cmp
                .relative_error_pct
                .map_or_else(|| "n/a".to_string(), |pct| format!("{:.3}%", pct));
            print_table(
                "Analytical vs Monte Carlo",
                &[
                    ("Analytical", format!("{:.4}", cmp.analytical)),
                    ("Monte Carlo", format!("{:.4}", cmp.simulation.price)),
                    ("Std error", format!("{:.4}", cmp.simulation.std_error)),
                    ("95% interval", format!("[{:.4}, {:.4}]", lo, hi)),
                    ("Difference", format!("{:+.4}", cmp.difference)),
                    ("Relative error", relative),
                    ("Within 95% interval", cmp.within_confidence.to_string()),
                    ("Paths", cmp.simulation.n_paths.to_string()),
                    ("Seed", cmp.simulation.seed.to_string()),
                    (
                        "Elapsed",
                        format!("{:.1} ms", cmp.simulation.elapsed.as_secs_f64() * 1e3),
                    ),
                ],
            );
            Ok(())
        }
    }
}
