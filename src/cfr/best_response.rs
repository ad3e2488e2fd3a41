//! Best responses and exploitability.
//!
//! A best response is the action that maximizes a player's expected payoff
//! against a fixed opponent distribution. Exploitability, the convergence
//! metric, is the mean best-response value of both players against each
//! other's average strategy. In a zero-sum game it is zero exactly at a Nash
//! equilibrium.

use crate::cfr::game::{MatrixGame, Player};

/// Best-response action and its expected value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestResponse {
    /// Maximizing action (lowest index among ties).
    pub action: usize,
    /// Expected payoff of that action.
    pub value: f64,
}

/// Expected payoff of every action of `player` against `opponent_strategy`.
///
/// These are the counterfactual utilities used by CFR.
pub fn action_values<G: MatrixGame>(game: &G, player: Player, opponent_strategy: &[f64]) -> Vec<f64> {
    let n = game.num_actions();
    debug_assert_eq!(opponent_strategy.len(), n);

    (0..n)
        .map(|a| {
            opponent_strategy
                .iter()
                .enumerate()
                .map(|(b, &prob)| prob * game.payoff(player, a, b))
                .sum()
        })
        .collect()
}

/// Best response of `player` against `opponent_strategy`.
///
/// Ties go to the lowest action index: an action only replaces the current
/// best when its value is strictly greater.
pub fn best_response<G: MatrixGame>(game: &G, player: Player, opponent_strategy: &[f64]) -> BestResponse {
    let values = action_values(game, player, opponent_strategy);

    let mut best = BestResponse {
        action: 0,
        value: values[0],
    };
    for (action, &value) in values.iter().enumerate().skip(1) {
        if value > best.value {
            best = BestResponse { action, value };
        }
    }
    best
}

/// Value of the best response of `player` against `opponent_strategy`.
pub fn best_response_value<G: MatrixGame>(game: &G, player: Player, opponent_strategy: &[f64]) -> f64 {
    best_response(game, player, opponent_strategy).value
}

/// Exploitability of a strategy profile.
///
/// Mean of what each player gains by best-responding to the other's
/// strategy. Never negative; rounding noise below zero is reported as 0.
pub fn exploitability<G: MatrixGame>(game: &G, first: &[f64], second: &[f64]) -> f64 {
    let first_gain = best_response_value(game, Player::First, second);
    let second_gain = best_response_value(game, Player::Second, first);

    ((first_gain + second_gain) / 2.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::classic::{matching_pennies, rock_paper_scissors, skewed_rock_paper_scissors};
    use crate::games::matrix::PayoffTable;

    #[test]
    fn test_action_values() {
        let game = rock_paper_scissors();
        let values = action_values(&game, Player::First, &[1.0, 0.0, 0.0]);
        assert_eq!(values, vec![0.0, -1.0, 1.0]);

        let values = action_values(&game, Player::Second, &[0.0, 1.0, 0.0]);
        assert_eq!(values, vec![1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_best_response_against_pure() {
        let game = rock_paper_scissors();
        let br = best_response(&game, Player::First, &[1.0, 0.0, 0.0]);
        assert_eq!(br, BestResponse { action: 2, value: 1.0 });
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let game = PayoffTable::from_rows(&[
            vec![0.0, 0.0, 0.0],
            vec![1.0, 1.0, 1.0],
            vec![1.0, 1.0, 1.0],
        ])
        .unwrap();
        let br = best_response(&game, Player::First, &[1.0 / 3.0; 3]);
        assert_eq!(br.action, 1);

        // All actions tie against uniform play in rock-paper-scissors
        let br = best_response(&rock_paper_scissors(), Player::Second, &[1.0 / 3.0; 3]);
        assert_eq!(br.action, 0);
    }

    #[test]
    fn test_exploitability_at_equilibrium() {
        let uniform = [1.0 / 3.0; 3];
        assert!(exploitability(&rock_paper_scissors(), &uniform, &uniform) < 1e-12);

        let skewed = [0.25, 0.25, 0.5];
        assert!(exploitability(&skewed_rock_paper_scissors(), &skewed, &skewed) < 1e-12);

        assert!(exploitability(&matching_pennies(), &[0.5, 0.5], &[0.5, 0.5]) < 1e-12);
    }

    #[test]
    fn test_exploitability_of_pure_profile() {
        let game = rock_paper_scissors();
        let rock = [1.0, 0.0, 0.0];
        assert!((exploitability(&game, &rock, &rock) - 1.0).abs() < 1e-12);

        let e = exploitability(&matching_pennies(), &[1.0, 0.0], &[0.5, 0.5]);
        assert!((e - 0.5).abs() < 1e-12);
    }
}
