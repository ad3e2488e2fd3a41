//! Matrix games for the equilibrium solver.
//!
//! This module contains the concrete payoff representation used by the
//! solver and a few fixed games:
//!
//! 1. **Random games**: [`matrix::PayoffTable::random`] fills an N×N table
//!    from a uniform, normal or Cauchy distribution.
//!
//! 2. **Validation**: games with known equilibria (rock-paper-scissors,
//!    matching pennies) check that the update rules converge where they must.
//!
//! ## Available Games
//!
//! - [`matrix`]: dense payoff tables and random generation
//! - [`classic`]: rock-paper-scissors, a skewed variant, matching pennies
//!
//! ## Adding New Games
//!
//! Any type implementing [`crate::cfr::MatrixGame`] can be solved. Build a
//! [`matrix::PayoffTable`] with `from_rows` for explicit payoffs.

pub mod classic;
pub mod matrix;

pub use matrix::{PayoffDistribution, PayoffTable};
