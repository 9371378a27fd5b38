//! Portfolio structures.
//!
//! - [`Position`]: signed quantity of one option contract
//! - [`Portfolio`]: ordered collection of positions
//! - [`PortfolioBuilder`]: fluent construction
//! - [`PortfolioError`]: valuation failures, tagged with the position index

mod error;
mod position;

pub use error::PortfolioError;
pub use position::Position;

use pricer_core::contract::Contract;

/// Ordered collection of option positions.
///
/// Order is significant only for reporting: aggregation sums in position
/// order, and per-position results come back in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    positions: Vec<Position>,
}

impl Portfolio {
    /// Empty portfolio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new portfolio builder.
    pub fn builder() -> PortfolioBuilder {
        PortfolioBuilder::default()
    }

    /// European positions from `(quantity, contract)` pairs.
    pub fn from_pairs(pairs: &[(f64, Contract)]) -> Self {
        pairs
            .iter()
            .map(|(quantity, contract)| Position::new(*quantity, contract.clone()))
            .collect()
    }

    /// Adds a position at the end.
    pub fn push(&mut self, position: Position) {
        self.positions.push(position);
    }

    /// Positions in insertion order.
    #[inline]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// `true` if the portfolio holds no positions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl FromIterator<Position> for Portfolio {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

impl Extend<Position> for Portfolio {
    fn extend<I: IntoIterator<Item = Position>>(&mut self, iter: I) {
        self.positions.extend(iter);
    }
}

/// Builder for [`Portfolio`].
#[derive(Debug, Clone, Default)]
pub struct PortfolioBuilder {
    positions: Vec<Position>,
}

impl PortfolioBuilder {
    /// Adds a position.
    pub fn add_position(mut self, position: Position) -> Self {
        self.positions.push(position);
        self
    }

    /// Adds a European position.
    pub fn add_european(self, quantity: f64, contract: Contract) -> Self {
        self.add_position(Position::new(quantity, contract))
    }

    /// Builds the portfolio. Quantities are checked at valuation time.
    pub fn build(self) -> Portfolio {
        Portfolio {
            positions: self.positions,
        }
    }
}
