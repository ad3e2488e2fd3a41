//! Self-play equilibrium solver module.
//!
//! This module computes approximate Nash equilibria of two-player zero-sum
//! matrix games by letting both players repeatedly update against each other.
//!
//! # Overview
//!
//! Each iteration updates player 0 and then player 1. What an update does
//! depends on the algorithm:
//!
//! - **Fictitious Play**: best-respond to the opponent's average strategy and
//!   count the chosen action
//! - **CFR**: accumulate counterfactual regret and play by regret matching
//! - **CFR+**: as CFR, but regrets are floored at zero and the average strategy
//!   is delayed and weighted towards later iterations
//!
//! The quantity that converges to equilibrium is the *average* strategy, not
//! the per-iteration one. Convergence is measured by exploitability.
//!
//! # Example
//!
//! ```
//! use matrix_game_solver::cfr::{EquilibriumSolver, SolverConfig};
//! use matrix_game_solver::games::classic::matching_pennies;
//!
//! let mut solver = EquilibriumSolver::new(matching_pennies(), SolverConfig::cfr());
//! solver.train(1_000);
//! assert!(solver.exploitability() < 0.05);
//! ```
//!
//! # Theory
//!
//! **Regret**: how much better an action would have done than the strategy played.
//! ```text
//! Regret(a) = Value(a) - Value(current_strategy)
//! ```
//!
//! **Regret Matching**: play proportionally to positive regrets.
//! ```text
//! Strategy(a) = max(0, Regret(a)) / sum(max(0, Regret(a')))
//! ```
//!
//! **Exploitability**: the mean best-response value against the average strategies.
//! ```text
//! Exploitability = (BR_0(avg_1) + BR_1(avg_0)) / 2
//! ```
//!
//! # References
//!
//! - Brown, G. W. "Iterative Solution of Games by Fictitious Play" (1951)
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete Information" (2007)
//! - Tammelin, O. "Solving Large Imperfect Information Games Using CFR+" (2014)

pub mod best_response;
pub mod config;
pub mod game;
pub mod solver;
pub mod storage;

// Re-export main types for convenient access
pub use best_response::{best_response, best_response_value, exploitability, BestResponse};
pub use config::{Algorithm, ConfigError, ExploitabilityPoint, SolverConfig, SolverStats, WeightingMode};
pub use game::{MatrixGame, Player};
pub use solver::{ConvergenceResult, ConvergenceStats, EquilibriumSolver};
pub use storage::{PlayerState, RegretAccumulator, SolverStorage, StrategyAccumulator};
