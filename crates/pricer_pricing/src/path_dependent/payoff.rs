//! Payoff evaluation from streamed path statistics.

use pricer_core::contract::{Contract, OptionKind};
use tracing::debug;

use super::{BarrierSpec, OptionStyle, PathObserver};
use crate::mc::SimulationArgumentError;

/// Payoff of one option style, resolved against a contract.
///
/// Enum dispatch keeps the per-path evaluation free of virtual calls.
///
/// # Examples
///
/// ```
/// use pricer_core::contract::OptionKind;
/// use pricer_pricing::path_dependent::{BarrierSpec, OptionStyle, PathObserver, PathPayoff};
///
/// let knock_out = PathPayoff::new(
///     OptionKind::Call,
///     100.0,
///     OptionStyle::BarrierKnockOut,
///     Some(BarrierSpec::up(120.0)),
/// )
/// .unwrap();
///
/// let mut observer = PathObserver::new();
/// for price in [100.0, 125.0, 110.0] {
///     observer.observe(price);
/// }
/// assert_eq!(knock_out.evaluate(&observer), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathPayoff {
    /// `max(S_T - K, 0)` or `max(K - S_T, 0)`.
    European {
        /// Call or put
        kind: OptionKind,
        /// Strike price
        strike: f64,
    },
    /// Vanilla payoff on the arithmetic path average.
    Asian {
        /// Call or put
        kind: OptionKind,
        /// Strike price
        strike: f64,
    },
    /// Vanilla payoff conditioned on the barrier.
    Barrier {
        /// Call or put
        kind: OptionKind,
        /// Strike price
        strike: f64,
        /// Barrier level and direction
        barrier: BarrierSpec,
        /// `true` for knock-in, `false` for knock-out
        knock_in: bool,
    },
}

impl PathPayoff {
    /// Resolves a style and optional barrier into a payoff.
    ///
    /// # Errors
    /// - `MissingBarrier` for a barrier style without a barrier
    /// - `InvalidBarrier` for a non-positive or non-finite level
    pub fn new(
        kind: OptionKind,
        strike: f64,
        style: OptionStyle,
        barrier: Option<BarrierSpec>,
    ) -> Result<Self, SimulationArgumentError> {
        match style {
            OptionStyle::European | OptionStyle::Asian => {
                if barrier.is_some() {
                    debug!(%style, "barrier ignored for non-barrier style");
                }
                Ok(if style == OptionStyle::European {
                    Self::European { kind, strike }
                } else {
                    Self::Asian { kind, strike }
                })
            }
            OptionStyle::BarrierKnockIn | OptionStyle::BarrierKnockOut => {
                let barrier = barrier.ok_or(SimulationArgumentError::MissingBarrier { style })?;
                barrier.validate()?;
                Ok(Self::Barrier {
                    kind,
                    strike,
                    barrier,
                    knock_in: style == OptionStyle::BarrierKnockIn,
                })
            }
        }
    }

    /// Payoff for `contract`'s kind and strike.
    pub fn for_contract(
        contract: &Contract,
        style: OptionStyle,
        barrier: Option<BarrierSpec>,
    ) -> Result<Self, SimulationArgumentError> {
        Self::new(contract.kind(), contract.strike(), style, barrier)
    }

    /// Undiscounted payoff of one observed path.
    #[inline]
    pub fn evaluate(&self, observer: &PathObserver) -> f64 {
        match *self {
            Self::European { kind, strike } => kind.payoff(observer.terminal(), strike),
            Self::Asian { kind, strike } => kind.payoff(observer.arithmetic_average(), strike),
            Self::Barrier {
                kind,
                strike,
                barrier,
                knock_in,
            } => {
                if barrier.was_touched(observer) == knock_in {
                    kind.payoff(observer.terminal(), strike)
                } else {
                    0.0
                }
            }
        }
    }
}
