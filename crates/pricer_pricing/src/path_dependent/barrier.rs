//! Barrier specification and monitoring.
//!
//! - **Up** barriers are touched when any path sample is `>= level`
//! - **Down** barriers are touched when any path sample is `<= level`
//!
//! Monitoring is discrete on the simulation grid and includes the initial
//! spot, so a barrier already breached at inception is touched on every path.

use super::PathObserver;
use crate::mc::SimulationArgumentError;

/// Side from which the barrier is approached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BarrierDirection {
    /// Barrier above the spot; monitored with the path maximum.
    Up,
    /// Barrier below the spot; monitored with the path minimum.
    Down,
}

/// Barrier level and direction.
///
/// # Examples
///
/// ```
/// use pricer_pricing::path_dependent::{BarrierDirection, BarrierSpec};
///
/// let barrier = BarrierSpec::from_level(120.0, 100.0);
/// assert_eq!(barrier.direction(), BarrierDirection::Up);
/// assert!(barrier.is_touched(120.0));
/// assert!(!barrier.is_touched(119.99));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarrierSpec {
    level: f64,
    direction: BarrierDirection,
}

impl BarrierSpec {
    /// Barrier touched from below.
    #[inline]
    pub fn up(level: f64) -> Self {
        Self {
            level,
            direction: BarrierDirection::Up,
        }
    }

    /// Barrier touched from above.
    #[inline]
    pub fn down(level: f64) -> Self {
        Self {
            level,
            direction: BarrierDirection::Down,
        }
    }

    /// Infers the direction from the barrier's position relative to `spot`:
    /// up if `level > spot`, down otherwise.
    pub fn from_level(level: f64, spot: f64) -> Self {
        if level > spot {
            Self::up(level)
        } else {
            Self::down(level)
        }
    }

    /// Barrier level.
    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Barrier direction.
    #[inline]
    pub fn direction(&self) -> BarrierDirection {
        self.direction
    }

    /// Rejects levels that are not positive and finite.
    pub fn validate(&self) -> Result<(), SimulationArgumentError> {
        if self.level.is_finite() && self.level > 0.0 {
            Ok(())
        } else {
            Err(SimulationArgumentError::InvalidBarrier { level: self.level })
        }
    }

    /// Whether a single price sample touches the barrier (inclusive).
    #[inline]
    pub fn is_touched(&self, price: f64) -> bool {
        match self.direction {
            BarrierDirection::Up => price >= self.level,
            BarrierDirection::Down => price <= self.level,
        }
    }

    /// Whether any sample of an observed path touched the barrier.
    #[inline]
    pub fn was_touched(&self, observer: &PathObserver) -> bool {
        match self.direction {
            BarrierDirection::Up => observer.maximum() >= self.level,
            BarrierDirection::Down => observer.minimum() <= self.level,
        }
    }
}
