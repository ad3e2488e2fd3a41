//! # Matrix Game Solver
//!
//! Approximates Nash equilibria of two-player zero-sum matrix games by
//! iterative self-play.
//!
//! ## Features
//!
//! - **Three Algorithms**: Fictitious Play, CFR and CFR+
//! - **Configurable CFR+ Averaging**: delay plus constant, linear or quadratic weighting
//! - **Exact Exploitability**: computed every iteration from the average strategies
//! - **Random Games**: uniform, normal or Cauchy payoffs from a seeded generator
//! - **Batch Runs**: many independent games solved in parallel
//!
//! ## Quick Start
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use matrix_game_solver::{EquilibriumSolver, PayoffDistribution, PayoffTable, SolverConfig};
//!
//! // 1. Build a game
//! let mut rng = StdRng::seed_from_u64(42);
//! let game = PayoffTable::random(20, PayoffDistribution::Uniform, &mut rng).unwrap();
//!
//! // 2. Create a solver
//! let mut solver = EquilibriumSolver::new(game, SolverConfig::default().with_epsilon(1e-3));
//!
//! // 3. Iterate until the average strategies are close to equilibrium
//! while solver.exploitability() > solver.config().epsilon {
//!     solver.run_iteration();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`cfr`]: solver, update rules, accumulators and best responses
//! - [`games`]: payoff tables and classic games
//! - [`batch`]: parallel runs over independent random games
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    EquilibriumSolver (Generic)                  │
//! │  - Fictitious play / CFR / CFR+   - Regret & strategy sums      │
//! │  - Iteration counter              - Exploitability              │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ implements MatrixGame trait
//!                               ▼
//!         ┌─────────────────────┼─────────────────────┐
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//!    ┌─────────┐         ┌───────────┐         ┌───────────┐
//!    │ Random  │         │   Rock    │         │ Matching  │
//!    │ Payoffs │         │  Paper... │         │  Pennies  │
//!    └─────────┘         └───────────┘         └───────────┘
//! ```

#![warn(missing_docs)]

/// Equilibrium solver module.
///
/// This is the core module containing the self-play algorithms.
pub mod cfr;

/// Game implementations module.
///
/// Contains the payoff table and games with known equilibria.
pub mod games;

/// Batch runs over independent random games.
pub mod batch;

// Re-export commonly used types at crate root for convenience
pub use cfr::{Algorithm, ConfigError, EquilibriumSolver, MatrixGame, Player, SolverConfig, WeightingMode};
pub use games::{PayoffDistribution, PayoffTable};
