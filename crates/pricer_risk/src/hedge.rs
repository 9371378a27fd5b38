//! Delta hedging and headline risk figures.

use std::fmt;

use pricer_core::types::DAYS_PER_YEAR;

use crate::aggregate::PortfolioSummary;

/// Direction of the hedge trade in the underlying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HedgeAction {
    /// Buy the underlying.
    Buy,
    /// Sell the underlying.
    Sell,
    /// Delta is already flat.
    Hold,
}

impl fmt::Display for HedgeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Hold => "hold",
        })
    }
}

/// Trade in the underlying that flattens portfolio delta.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeltaHedge {
    /// Signed units of underlying to trade: `-net_delta`.
    pub underlying_units: f64,
    /// Buy for positive units, sell for negative.
    pub action: HedgeAction,
}

impl DeltaHedge {
    /// Absolute size of the trade.
    #[inline]
    pub fn units(&self) -> f64 {
        self.underlying_units.abs()
    }
}

impl fmt::Display for DeltaHedge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            HedgeAction::Hold => write!(f, "delta is flat, no hedge needed"),
            action => write!(f, "{} {:.2} units of the underlying", action, self.units()),
        }
    }
}

/// Hedge that brings `summary`'s net delta to zero.
///
/// # Examples
///
/// ```
/// use pricer_risk::{delta_hedge, HedgeAction, PortfolioSummary};
///
/// let summary = PortfolioSummary {
///     net_delta: 42.5,
///     ..PortfolioSummary::empty()
/// };
/// let hedge = delta_hedge(&summary);
/// assert_eq!(hedge.underlying_units, -42.5);
/// assert_eq!(hedge.action, HedgeAction::Sell);
/// ```
pub fn delta_hedge(summary: &PortfolioSummary) -> DeltaHedge {
    let underlying_units = -summary.net_delta;
    let action = if underlying_units > 0.0 {
        HedgeAction::Buy
    } else if underlying_units < 0.0 {
        HedgeAction::Sell
    } else {
        HedgeAction::Hold
    };
    DeltaHedge {
        underlying_units,
        action,
    }
}

/// Portfolio risk in market-quoting units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RiskMetrics {
    /// Net delta expressed as shares of the underlying.
    pub delta_equivalent_units: f64,
    /// Value change per calendar day from time decay.
    pub daily_theta: f64,
    /// Value change over 30 calendar days at the current theta.
    pub monthly_theta: f64,
    /// Value change for a one-point (0.01) rise in volatility.
    pub vega_per_vol_point: f64,
    /// Value change for a one-point (0.01) rise in rates.
    pub rho_per_rate_point: f64,
}

/// Headline figures derived from `summary`.
pub fn risk_metrics(summary: &PortfolioSummary) -> RiskMetrics {
    let daily_theta = summary.net_theta / DAYS_PER_YEAR;
    RiskMetrics {
        delta_equivalent_units: summary.net_delta,
        daily_theta,
        monthly_theta: 30.0 * daily_theta,
        vega_per_vol_point: summary.net_vega / 100.0,
        rho_per_rate_point: summary.net_rho / 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(delta: f64) -> PortfolioSummary {
        PortfolioSummary {
            net_delta: delta,
            net_theta: -365.0,
            net_vega: 250.0,
            net_rho: 50.0,
            ..PortfolioSummary::empty()
        }
    }

    #[test]
    fn test_short_delta_is_bought_back() {
        let hedge = delta_hedge(&summary(-30.0));
        assert_eq!(hedge.underlying_units, 30.0);
        assert_eq!(hedge.action, HedgeAction::Buy);
        assert_eq!(hedge.to_string(), "buy 30.00 units of the underlying");
    }

    #[test]
    fn test_flat_delta_holds() {
        let hedge = delta_hedge(&summary(0.0));
        assert_eq!(hedge.action, HedgeAction::Hold);
        assert_eq!(hedge.units(), 0.0);
    }

    #[test]
    fn test_risk_metrics_units() {
        let metrics = risk_metrics(&summary(10.0));
        assert_eq!(metrics.delta_equivalent_units, 10.0);
        assert_eq!(metrics.daily_theta, -1.0);
        assert_eq!(metrics.monthly_theta, -30.0);
        assert_eq!(metrics.vega_per_vol_point, 2.5);
        assert_eq!(metrics.rho_per_rate_point, 0.5);
    }
}
