//! Path-dependent option payoffs.
//!
//! # Key Components
//!
//! - [`OptionStyle`]: European, Asian, and barrier knock-in/knock-out
//! - [`BarrierSpec`]: barrier level and direction with inclusive monitoring
//! - [`PathObserver`]: streaming statistics accumulated along a path
//! - [`PathPayoff`]: payoff evaluation from the observer
//!
//! Statistics are computed incrementally as prices are generated, so the
//! engine never stores a full path.

mod barrier;
mod observer;
mod payoff;
mod style;

pub use barrier::{BarrierDirection, BarrierSpec};
pub use observer::PathObserver;
pub use payoff::PathPayoff;
pub use style::OptionStyle;
