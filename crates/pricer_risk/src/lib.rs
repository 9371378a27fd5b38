//! # Pricer Risk
//!
//! Portfolio aggregation on top of the pricing engines.
//!
//! This crate provides:
//! - [`Portfolio`] and [`Position`] structures with signed quantities
//! - Rayon-parallel valuation with an order-preserving reduction
//!   ([`RiskEngine`], [`analyze`], [`analyze_portfolio`])
//! - Delta hedging and market-unit risk figures ([`delta_hedge`],
//!   [`risk_metrics`])
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              pricer_risk                │
//! │  portfolio/ - Position, Portfolio      │
//! │  aggregate  - RiskEngine, summaries    │
//! │  hedge      - DeltaHedge, RiskMetrics  │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │     pricer_pricing / pricer_models      │
//! │  Monte Carlo, closed form, Greeks      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_core::contract::{Contract, OptionKind};
//! use pricer_risk::{analyze, delta_hedge, Portfolio};
//!
//! let call = Contract::builder()
//!     .underlying("SPY")
//!     .kind(OptionKind::Call)
//!     .strike(450.0)
//!     .spot(450.0)
//!     .rate(0.05)
//!     .volatility(0.2)
//!     .expiry_in_years(30.0 / 365.0)
//!     .build()
//!     .unwrap();
//!
//! let portfolio = Portfolio::builder().add_european(100.0, call).build();
//! let summary = analyze(&portfolio).unwrap();
//! let hedge = delta_hedge(&summary);
//!
//! assert!(hedge.underlying_units < 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod aggregate;
pub mod hedge;
pub mod portfolio;

pub use aggregate::{
    analyze, analyze_portfolio, PortfolioSummary, PositionRisk, RiskEngine,
    DEFAULT_PORTFOLIO_SEED,
};
pub use hedge::{delta_hedge, risk_metrics, DeltaHedge, HedgeAction, RiskMetrics};
pub use portfolio::{Portfolio, PortfolioBuilder, PortfolioError, Position};
