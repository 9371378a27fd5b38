//! A signed holding of one option contract.

use pricer_core::contract::Contract;
use pricer_pricing::path_dependent::{BarrierSpec, OptionStyle};

/// Signed quantity of one option.
///
/// Positive quantities are long, negative short.
///
/// # Examples
///
/// ```
/// use pricer_core::contract::{Contract, OptionKind};
/// use pricer_pricing::path_dependent::{BarrierSpec, OptionStyle};
/// use pricer_risk::portfolio::Position;
///
/// let contract = Contract::builder()
///     .kind(OptionKind::Call)
///     .strike(100.0)
///     .spot(100.0)
///     .volatility(0.2)
///     .expiry_in_years(0.5)
///     .build()
///     .unwrap();
///
/// let short_knock_out = Position::new(-10.0, contract)
///     .with_style(OptionStyle::BarrierKnockOut, Some(BarrierSpec::up(125.0)));
/// assert!(short_knock_out.is_short());
/// assert!(!short_knock_out.is_analytical());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    quantity: f64,
    contract: Contract,
    style: OptionStyle,
    barrier: Option<BarrierSpec>,
}

impl Position {
    /// European position in `contract`.
    pub fn new(quantity: f64, contract: Contract) -> Self {
        Self {
            quantity,
            contract,
            style: OptionStyle::European,
            barrier: None,
        }
    }

    /// Replaces the option style and barrier.
    pub fn with_style(mut self, style: OptionStyle, barrier: Option<BarrierSpec>) -> Self {
        self.style = style;
        self.barrier = barrier;
        self
    }

    /// Signed quantity.
    #[inline]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// The option held.
    #[inline]
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Option style.
    #[inline]
    pub fn style(&self) -> OptionStyle {
        self.style
    }

    /// Barrier, for barrier styles.
    #[inline]
    pub fn barrier(&self) -> Option<BarrierSpec> {
        self.barrier
    }

    /// `true` for negative quantities.
    #[inline]
    pub fn is_short(&self) -> bool {
        self.quantity < 0.0
    }

    /// Whether the position is valued in closed form (European only).
    #[inline]
    pub fn is_analytical(&self) -> bool {
        self.style == OptionStyle::European
    }
}
