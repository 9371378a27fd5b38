//! Numerical routines.
//!
//! - `solvers`: bracketing root finders used to invert pricing formulas

pub mod solvers;
