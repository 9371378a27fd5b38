//! Portfolio command implementation
//!
//! Reads positions from a JSON file, aggregates value and Greeks, and
//! reports the delta hedge.
//!
//! ```json
//! {
//!   "positions": [
//!     { "underlying": "SPY", "kind": "call", "quantity": 100,
//!       "spot": 450, "strike": 450, "expiry_days": 30,
//!       "rate": 0.05, "volatility": 0.2 },
//!     { "underlying": "SPY", "kind": "put", "quantity": -50,
//!       "spot": 450, "strike": 440, "expiry_days": 30,
//!       "rate": 0.05, "volatility": 0.2,
//!       "style": "knock-in", "barrier": 400 }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use clap::Args;
use pricer_core::contract::{Contract, OptionKind};
use pricer_core::types::DAYS_PER_YEAR;
use pricer_pricing::path_dependent::{BarrierSpec, OptionStyle};
use pricer_risk::{
    delta_hedge, risk_metrics, DeltaHedge, Portfolio, PortfolioSummary, Position, RiskEngine,
    RiskMetrics, DEFAULT_PORTFOLIO_SEED,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{print_json, OutputFormat};
use crate::config::AppConfig;
use crate::{CliError, Result};

/// Arguments of `optionlab portfolio`.
#[derive(Args, Debug, Clone)]
pub struct PortfolioArgs {
    /// JSON file with a `positions` array
    #[arg(short, long)]
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Portfolio file layout.
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioFile {
    pub positions: Vec<PositionInput>,
}

/// One position as written in the portfolio file.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionInput {
    #[serde(default)]
    pub underlying: String,
    pub kind: String,
    pub quantity: f64,
    pub spot: f64,
    pub strike: f64,
    pub expiry_days: f64,
    #[serde(default)]
    pub rate: f64,
    pub volatility: f64,
    #[serde(default)]
    pub dividend_yield: f64,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub barrier: Option<f64>,
}

impl PositionInput {
    fn into_position(self, index: usize) -> Result<Position> {
        let kind: OptionKind = self.kind.parse().map_err(|e| tagged(index, e))?;
        let style: OptionStyle = match &self.style {
            Some(style) => style.parse().map_err(|e| tagged(index, e))?,
            None => OptionStyle::European,
        };
        let contract = Contract::builder()
            .underlying(self.underlying)
            .kind(kind)
            .strike(self.strike)
            .spot(self.spot)
            .rate(self.rate)
            .dividend_yield(self.dividend_yield)
            .volatility(self.volatility)
            .expiry_in_years(self.expiry_days / DAYS_PER_YEAR)
            .build()
            .map_err(|e| tagged(index, e))?;
        let barrier = self
            .barrier
            .map(|level| BarrierSpec::from_level(level, self.spot));

        Ok(Position::new(self.quantity, contract).with_style(style, barrier))
    }
}

fn tagged(index: usize, err: impl std::fmt::Display) -> CliError {
    CliError::InvalidArgument(format!("position {}: {}", index, err))
}

impl PortfolioFile {
    /// Parses the JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(CliError::PortfolioFile)
    }

    /// Reads and parses `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Converts every entry, failing on the first invalid one.
    pub fn into_portfolio(self) -> Result<Portfolio> {
        self.positions
            .into_iter()
            .enumerate()
            .map(|(index, input)| input.into_position(index))
            .collect()
    }
}

/// Aggregated risk, hedge and headline metrics.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioReport {
    pub summary: PortfolioSummary,
    pub hedge: DeltaHedge,
    pub metrics: RiskMetrics,
}

/// Valuation engine configured from `config`.
///
/// Simulated positions always run on a fixed seed so repeated reports
/// agree.
pub fn engine(config: &AppConfig) -> Result<RiskEngine> {
    let seed = config.simulation.seed.unwrap_or(DEFAULT_PORTFOLIO_SEED);
    Ok(RiskEngine::new()
        .with_analytical(config.analytical_pricer()?)
        .with_simulation(config.simulation_config(None, Some(seed))?)
        .with_bump(config.greeks.bump))
}

/// Values `portfolio`.
pub fn evaluate(portfolio: &Portfolio, config: &AppConfig) -> Result<PortfolioReport> {
    let summary = engine(config)?.analyze(portfolio)?;
    let hedge = delta_hedge(&summary);
    let metrics = risk_metrics(&summary);
    Ok(PortfolioReport {
        summary,
        hedge,
        metrics,
    })
}

/// Run the portfolio command
pub fn run(args: &PortfolioArgs, config: &AppConfig) -> Result<()> {
    info!(file = %args.file.display(), "loading portfolio");
    let portfolio = PortfolioFile::load(&args.file)?.into_portfolio()?;
    debug!(positions = portfolio.len(), "portfolio parsed");

    let report = evaluate(&portfolio, config)?;
    match args.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table => {
            print_report(&report);
            Ok(())
        }
    }
}

fn print_report(report: &PortfolioReport) {
    let summary = &report.summary;
    println!("\n┌─────┬──────────┬──────────────────┬────────────┬────────────┬────────────┬────────────┐");
    println!(
        "│ {:>3} │ {:<8} │ {:<16} │ {:>10} │ {:>10} │ {:>10} │ {:>10} │",
        "#", "Under.", "Style", "Qty", "Value", "Delta", "Vega"
    );
    println!("├─────┼──────────┼──────────────────┼────────────┼────────────┼────────────┼────────────┤");
    for p in &summary.positions {
        println!(
            "│ {:>3} │ {:<8} │ {:<16} │ {:>10.2} │ {:>10.2} │ {:>10.4} │ {:>10.4} │",
            p.index,
            p.underlying,
            p.style.as_str(),
            p.quantity,
            p.value,
            p.greeks.delta,
            p.greeks.vega
        );
    }
    println!("└─────┴──────────┴──────────────────┴────────────┴────────────┴────────────┴────────────┘");

    super::print_table(
        "Portfolio totals",
        &[
            ("Net value", format!("{:.2}", summary.net_value)),
            ("Net delta", format!("{:.4}", summary.net_delta)),
            ("Net gamma", format!("{:.6}", summary.net_gamma)),
            ("Net vega", format!("{:.4}", summary.net_vega)),
            ("Net theta (per year)", format!("{:.4}", summary.net_theta)),
            ("Net rho", format!("{:.4}", summary.net_rho)),
            ("Theta per day", format!("{:.4}", report.metrics.daily_theta)),
            ("Theta per 30 days", format!("{:.4}", report.metrics.monthly_theta)),
            ("Vega per vol point", format!("{:.4}", report.metrics.vega_per_vol_point)),
        ],
    );
    println!("\nHedge: {}", report.hedge);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_risk::HedgeAction;

    const SAMPLE: &str = r#"{
        "positions": [
            { "underlying": "SPY", "kind": "call", "quantity": 100,
              "spot": 450, "strike": 450, "expiry_days": 30,
              "rate": 0.05, "volatility": 0.2 },
            { "underlying": "SPY", "kind": "put", "quantity": -50,
              "spot": 450, "strike": 440, "expiry_days": 30,
              "rate": 0.05, "volatility": 0.2,
              "style": "knock-in", "barrier": 400 }
        ]
    }"#;

    fn fast_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.simulation.paths = 4_000;
        config.simulation.steps = 30;
        config
    }

    #[test]
    fn test_parse_sample() {
        let portfolio = PortfolioFile::from_json(SAMPLE)
            .unwrap()
            .into_portfolio()
            .unwrap();
        assert_eq!(portfolio.len(), 2);

        let put = &portfolio.positions()[1];
        assert_eq!(put.quantity(), -50.0);
        assert_eq!(put.style(), OptionStyle::BarrierKnockIn);
        assert_eq!(put.barrier().map(|b| b.level()), Some(400.0));
    }

    #[test]
    fn test_bad_entries_name_their_index() {
        let json = r#"{ "positions": [
            { "kind": "call", "quantity": 1, "spot": 100, "strike": 100,
              "expiry_days": 30, "volatility": 0.2 },
            { "kind": "straddle", "quantity": 1, "spot": 100, "strike": 100,
              "expiry_days": 30, "volatility": 0.2 }
        ] }"#;
        let err = PortfolioFile::from_json(json)
            .unwrap()
            .into_portfolio()
            .unwrap_err();
        assert!(err.to_string().contains("position 1"));

        assert!(matches!(
            PortfolioFile::from_json("{ \"positions\": 3 }"),
            Err(CliError::PortfolioFile(_))
        ));
    }

    #[test]
    fn test_report_is_reproducible() {
        let portfolio = PortfolioFile::from_json(SAMPLE)
            .unwrap()
            .into_portfolio()
            .unwrap();
        let config = fast_config();

        let first = evaluate(&portfolio, &config).unwrap();
        let second = evaluate(&portfolio, &config).unwrap();
        assert_eq!(first.summary, second.summary);

        assert_relative_eq!(
            first.hedge.underlying_units,
            -first.summary.net_delta,
            max_relative = 1e-15
        );
        assert_eq!(first.hedge.action, HedgeAction::Sell);
    }
}
