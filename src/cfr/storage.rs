//! Storage for cumulative regrets and strategy sums.
//!
//! Each player owns a [`RegretAccumulator`] (used by CFR and CFR+) and a
//! [`StrategyAccumulator`] (used by every algorithm). The per-iteration
//! "current" strategy comes from regret matching; the long-run average
//! strategy, whose exploitability is reported, comes from the strategy sums.

use crate::cfr::game::Player;

/// Uniform distribution over `num_actions` actions.
pub fn uniform(num_actions: usize) -> Vec<f64> {
    vec![1.0 / num_actions as f64; num_actions]
}

/// Running sum of per-iteration strategies for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyAccumulator {
    sums: Vec<f64>,
}

impl StrategyAccumulator {
    /// Create an empty accumulator over `num_actions` actions.
    pub fn new(num_actions: usize) -> Self {
        Self {
            sums: vec![0.0; num_actions],
        }
    }

    /// Add `strategy[a] * weight` to every action's sum.
    pub fn add(&mut self, strategy: &[f64], weight: f64) {
        debug_assert_eq!(strategy.len(), self.sums.len());

        for (sum, &prob) in self.sums.iter_mut().zip(strategy) {
            *sum += prob * weight;
        }
    }

    /// Count one more play of `action`.
    pub fn increment(&mut self, action: usize) {
        self.sums[action] += 1.0;
    }

    /// Normalized average strategy.
    ///
    /// Falls back to the uniform distribution while the total mass is not
    /// positive (nothing accumulated yet, or still inside a CFR+ delay).
    pub fn average(&self) -> Vec<f64> {
        let total = self.total();
        if total > 0.0 {
            self.sums.iter().map(|&x| x / total).collect()
        } else {
            uniform(self.sums.len())
        }
    }

    /// Total accumulated mass.
    pub fn total(&self) -> f64 {
        self.sums.iter().sum()
    }

    /// Raw per-action sums.
    pub fn sums(&self) -> &[f64] {
        &self.sums
    }

    fn clear(&mut self) {
        self.sums.iter_mut().for_each(|x| *x = 0.0);
    }
}

/// Cumulative counterfactual regret for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct RegretAccumulator {
    regrets: Vec<f64>,
}

impl RegretAccumulator {
    /// Create a zeroed accumulator over `num_actions` actions.
    pub fn new(num_actions: usize) -> Self {
        Self {
            regrets: vec![0.0; num_actions],
        }
    }

    /// Current strategy by regret matching.
    ///
    /// The strategy is proportional to positive regrets. If no regret is
    /// positive, returns a uniform strategy.
    pub fn current_strategy(&self) -> Vec<f64> {
        let sum: f64 = self.regrets.iter().map(|&r| r.max(0.0)).sum();

        if sum > 0.0 {
            self.regrets.iter().map(|&r| r.max(0.0) / sum).collect()
        } else {
            uniform(self.regrets.len())
        }
    }

    /// Add one regret delta per action.
    ///
    /// # Arguments
    /// * `deltas` - Regret delta for each action (action value - expected value)
    /// * `floor_at_zero` - If true (CFR+), clamp each updated regret to 0
    pub fn update(&mut self, deltas: &[f64], floor_at_zero: bool) {
        debug_assert_eq!(deltas.len(), self.regrets.len());

        for (regret, &delta) in self.regrets.iter_mut().zip(deltas) {
            *regret += delta;

            if floor_at_zero && *regret < 0.0 {
                *regret = 0.0;
            }
        }
    }

    /// Raw per-action regrets.
    pub fn regrets(&self) -> &[f64] {
        &self.regrets
    }

    fn clear(&mut self) {
        self.regrets.iter_mut().for_each(|x| *x = 0.0);
    }
}

/// Accumulators for a single player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Cumulative regret (CFR and CFR+ only).
    pub regret: RegretAccumulator,
    /// Cumulative strategy.
    pub strategy: StrategyAccumulator,
}

impl PlayerState {
    fn new(num_actions: usize) -> Self {
        Self {
            regret: RegretAccumulator::new(num_actions),
            strategy: StrategyAccumulator::new(num_actions),
        }
    }
}

/// Regrets and strategy sums for both players.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverStorage {
    players: [PlayerState; 2],
}

impl SolverStorage {
    /// Create zeroed storage for a game with `num_actions` actions per player.
    pub fn new(num_actions: usize) -> Self {
        Self {
            players: [PlayerState::new(num_actions), PlayerState::new(num_actions)],
        }
    }

    /// Accumulators of `player`.
    pub fn player(&self, player: Player) -> &PlayerState {
        &self.players[player.index()]
    }

    /// Mutable accumulators of `player`.
    pub fn player_mut(&mut self, player: Player) -> &mut PlayerState {
        &mut self.players[player.index()]
    }

    /// Regret-matched current strategy of `player`.
    pub fn current_strategy(&self, player: Player) -> Vec<f64> {
        self.player(player).regret.current_strategy()
    }

    /// Normalized average strategy of `player`.
    pub fn average_strategy(&self, player: Player) -> Vec<f64> {
        self.player(player).strategy.average()
    }

    /// Raw cumulative regrets of `player`.
    pub fn regrets(&self, player: Player) -> &[f64] {
        self.player(player).regret.regrets()
    }

    /// Raw cumulative strategy sums of `player`.
    pub fn strategy_sums(&self, player: Player) -> &[f64] {
        self.player(player).strategy.sums()
    }

    /// Reset every accumulator to zero.
    pub fn clear(&mut self) {
        for state in self.players.iter_mut() {
            state.regret.clear();
            state.strategy.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-12, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_empty_average_is_uniform() {
        let acc = StrategyAccumulator::new(4);
        assert_close(&acc.average(), &[0.25; 4]);
    }

    #[test]
    fn test_weighted_average() {
        let mut acc = StrategyAccumulator::new(2);
        acc.add(&[1.0, 0.0], 1.0);
        acc.add(&[0.0, 1.0], 3.0);
        assert_eq!(acc.total(), 4.0);
        assert_close(&acc.average(), &[0.25, 0.75]);

        acc.increment(0);
        assert_close(acc.sums(), &[2.0, 3.0]);
    }

    #[test]
    fn test_regret_matching() {
        let mut acc = RegretAccumulator::new(3);
        assert_close(&acc.current_strategy(), &[1.0 / 3.0; 3]);

        acc.update(&[2.0, -1.0, 6.0], false);
        assert_close(&acc.current_strategy(), &[0.25, 0.0, 0.75]);
        assert_close(acc.regrets(), &[2.0, -1.0, 6.0]);
    }

    #[test]
    fn test_all_negative_regret_is_uniform() {
        let mut acc = RegretAccumulator::new(2);
        acc.update(&[-1.0, -2.0], false);
        assert_close(&acc.current_strategy(), &[0.5, 0.5]);
    }

    #[test]
    fn test_cfr_plus_floor() {
        let mut acc = RegretAccumulator::new(3);
        acc.update(&[1.0, -4.0, 0.5], true);
        assert_close(acc.regrets(), &[1.0, 0.0, 0.5]);

        acc.update(&[-3.0, 2.0, 0.0], true);
        assert_close(acc.regrets(), &[0.0, 2.0, 0.5]);
        assert!(acc.regrets().iter().all(|&r| r >= 0.0));
    }

    #[test]
    fn test_storage_per_player() {
        let mut storage = SolverStorage::new(2);
        storage.player_mut(Player::First).strategy.increment(1);
        storage.player_mut(Player::Second).regret.update(&[1.0, 0.0], false);

        assert_close(&storage.average_strategy(Player::First), &[0.0, 1.0]);
        assert_close(&storage.average_strategy(Player::Second), &[0.5, 0.5]);
        assert_close(&storage.current_strategy(Player::Second), &[1.0, 0.0]);
        assert_close(&storage.current_strategy(Player::First), &[0.5, 0.5]);

        storage.clear();
        assert_close(storage.strategy_sums(Player::First), &[0.0, 0.0]);
        assert_close(storage.regrets(Player::Second), &[0.0, 0.0]);
    }
}
