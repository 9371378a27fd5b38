//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Shared argument groups
//! live here.

pub mod compare;
pub mod greeks;
pub mod implied_vol;
pub mod portfolio;
pub mod price;

use clap::{Args, ValueEnum};
use pricer_core::contract::{Contract, OptionKind};
use pricer_core::types::DAYS_PER_YEAR;
use pricer_pricing::path_dependent::{BarrierSpec, OptionStyle};
use serde::Serialize;

use crate::Result;

/// Market and contract terms shared by the single-contract commands.
#[derive(Args, Debug, Clone)]
pub struct MarketArgs {
    /// Current price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Calendar days to expiry (ACT/365)
    #[arg(long)]
    pub expiry_days: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
    pub rate: f64,

    /// Continuous dividend yield
    #[arg(long, default_value_t = 0.0)]
    pub dividend: f64,

    /// Option kind (call or put)
    #[arg(long, default_value = "call")]
    pub kind: OptionKind,

    /// Underlying identifier, used in logs and reports
    #[arg(long, default_value = "")]
    pub underlying: String,
}

impl MarketArgs {
    /// Builds the contract at `volatility`, valued now.
    pub fn contract(&self, volatility: f64) -> Result<Contract> {
        Ok(Contract::builder()
            .underlying(self.underlying.clone())
            .kind(self.kind)
            .strike(self.strike)
            .spot(self.spot)
            .rate(self.rate)
            .dividend_yield(self.dividend)
            .volatility(volatility)
            .expiry_in_years(self.expiry_days / DAYS_PER_YEAR)
            .build()?)
    }
}

/// Payoff style and simulation overrides.
#[derive(Args, Debug, Clone)]
pub struct StyleArgs {
    /// Payoff style (european, asian, knock-in, knock-out)
    #[arg(long, default_value = "european")]
    pub style: OptionStyle,

    /// Barrier level; up-and-in/out above spot, down-and-in/out otherwise
    #[arg(long)]
    pub barrier: Option<f64>,

    /// Number of Monte Carlo paths (overrides the configuration)
    #[arg(long)]
    pub paths: Option<usize>,

    /// Random seed (overrides the configuration)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl StyleArgs {
    /// Barrier specification relative to `spot`.
    pub fn barrier_spec(&self, spot: f64) -> Option<BarrierSpec> {
        self.barrier.map(|level| BarrierSpec::from_level(level, spot))
    }
}

/// Output rendering.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints one `label: value` row of a two-column table.
pub fn print_row(label: &str, value: impl std::fmt::Display) {
    println!("│ {:<24} │ {:>18} │", label, value);
}

/// Prints a two-column table with a title.
pub fn print_table(title: &str, rows: &[(&str, String)]) {
    println!("\n{}", title);
    println!("┌──────────────────────────┬────────────────────┐");
    for (label, value) in rows {
        print_row(label, value);
    }
    println!("└──────────────────────────┴────────────────────┘");
}
