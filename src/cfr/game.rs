//! Game trait definition for the equilibrium solver.
//!
//! Any two-player zero-sum game with a fixed, finite action set per player
//! can be solved by implementing the `MatrixGame` trait. This keeps the
//! update rules independent of how payoffs are stored or generated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two players of a matrix game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The row player, whose payoffs the matrix stores directly.
    First,
    /// The column player.
    Second,
}

impl Player {
    /// Both players in update order.
    pub const BOTH: [Player; 2] = [Player::First, Player::Second];

    /// The other player.
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Zero-based index, used for per-player storage.
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.index())
    }
}

/// A two-player zero-sum normal-form game.
///
/// Both players choose among the same number of actions. Payoffs are given
/// from the perspective of the acting player, so for every pair of actions
/// `payoff(Second, a, b) == -payoff(First, b, a)`.
///
/// # Example
/// ```ignore
/// impl MatrixGame for MyGame {
///     fn num_actions(&self) -> usize { 3 }
///     fn payoff(&self, player: Player, action: usize, opponent_action: usize) -> f64 {
///         // ...
///     }
/// }
/// ```
pub trait MatrixGame: Clone + Send + Sync {
    /// Number of actions available to each player.
    fn num_actions(&self) -> usize;

    /// Payoff to `player` for playing `action` against `opponent_action`.
    fn payoff(&self, player: Player, action: usize, opponent_action: usize) -> f64;
}
