//! Self-play equilibrium solver.
//!
//! This module drives the three iterative algorithms over a matrix game:
//! - **Fictitious Play**: each player best-responds to the opponent's average
//! - **CFR**: regret matching with signed cumulative regret
//! - **CFR+**: regrets floored at zero, delayed and weighted averaging
//!
//! The solver is generic over any game that implements the `MatrixGame` trait.

use std::io::{self, Write};
use std::time::Instant;

use log::{debug, info};

use crate::cfr::best_response::{action_values, best_response, exploitability};
use crate::cfr::config::{Algorithm, SolverConfig, SolverStats};
use crate::cfr::game::{MatrixGame, Player};
use crate::cfr::storage::SolverStorage;
use crate::games::matrix::PayoffTable;

/// The equilibrium solver.
///
/// Owns the game, both players' accumulators and the iteration counter.
/// Termination is left to the caller: run iterations and stop once
/// [`exploitability`](Self::exploitability) is small enough.
///
/// # Example
/// ```
/// use matrix_game_solver::cfr::{EquilibriumSolver, SolverConfig};
/// use matrix_game_solver::games::classic::rock_paper_scissors;
///
/// let mut solver = EquilibriumSolver::new(rock_paper_scissors(), SolverConfig::default());
/// while solver.exploitability() > 0.01 {
///     solver.run_iteration();
/// }
/// assert!(solver.iteration() < 10_000);
/// ```
#[derive(Debug, Clone)]
pub struct EquilibriumSolver<G: MatrixGame = PayoffTable> {
    /// The game being solved.
    game: G,

    /// Configuration for the solver.
    config: SolverConfig,

    /// Regrets and strategy sums of both players.
    storage: SolverStorage,

    /// Number of joint iterations run so far.
    iteration: u64,

    /// Statistics tracking.
    stats: SolverStats,
}

impl<G: MatrixGame> EquilibriumSolver<G> {
    /// Create a new solver for the given game.
    ///
    /// # Arguments
    /// * `game` - The game to solve
    /// * `config` - Configuration options for the solver
    pub fn new(game: G, config: SolverConfig) -> Self {
        let num_actions = game.num_actions();
        debug!(
            "new {} solver over {}x{} game",
            config.algorithm, num_actions, num_actions
        );

        Self {
            storage: SolverStorage::new(num_actions),
            game,
            config,
            iteration: 0,
            stats: SolverStats::new(),
        }
    }

    /// Run a single joint iteration.
    ///
    /// Player 0 is updated first, then player 1, which already sees player 0's
    /// updated accumulators.
    pub fn run_iteration(&mut self) {
        self.iteration += 1;

        for player in Player::BOTH {
            match self.config.algorithm {
                Algorithm::FictitiousPlay => self.fictitious_play(player),
                Algorithm::Cfr => self.cfr(player),
                Algorithm::CfrPlus => self.cfr_plus(player),
            }
        }
    }

    /// Train the solver for a specified number of iterations.
    ///
    /// # Returns
    /// Statistics from the training run.
    pub fn train(&mut self, iterations: u64) -> &SolverStats {
        let start_time = Instant::now();

        for _ in 0..iterations {
            self.run_iteration();
        }

        self.finish_stats(start_time);
        let exploitability = self.exploitability();
        self.stats.record_exploitability(self.iteration, exploitability);

        &self.stats
    }

    /// Train until exploitability drops to `config.epsilon`.
    ///
    /// Exploitability is checked after every iteration. There is no built-in
    /// iteration cap; pass `max_iterations` to stop early.
    ///
    /// # Arguments
    /// * `max_iterations` - Optional limit on the total iteration count
    /// * `report_interval` - How often to record history and call the callback
    /// * `callback` - Optional callback for progress updates
    pub fn train_until_converged<F>(
        &mut self,
        max_iterations: Option<u64>,
        report_interval: u64,
        mut callback: Option<F>,
    ) -> ConvergenceResult
    where
        F: FnMut(&ConvergenceStats),
    {
        let start_time = Instant::now();
        let report_interval = report_interval.max(1);

        loop {
            self.run_iteration();
            let exploitability = self.exploitability();
            let converged = exploitability <= self.config.epsilon;
            let capped = max_iterations.is_some_and(|max| self.iteration >= max);

            if self.iteration % report_interval == 0 || converged || capped {
                self.stats.record_exploitability(self.iteration, exploitability);

                if let Some(ref mut cb) = callback {
                    let elapsed = start_time.elapsed().as_secs_f64();
                    cb(&ConvergenceStats {
                        iteration: self.iteration,
                        exploitability,
                        elapsed_seconds: elapsed,
                    });
                }
            }

            if converged || capped {
                let elapsed_seconds = self.finish_stats(start_time);

                if converged {
                    info!(
                        "{} converged after {} iterations (exploitability {:.3e})",
                        self.config.algorithm, self.iteration, exploitability
                    );
                } else {
                    info!(
                        "{} stopped at iteration cap {} (exploitability {:.3e})",
                        self.config.algorithm, self.iteration, exploitability
                    );
                }

                return ConvergenceResult {
                    converged,
                    exploitability,
                    iterations: self.iteration,
                    elapsed_seconds,
                };
            }
        }
    }

    /// Fold one training call into the lifetime stats. Returns the call's
    /// own duration.
    fn finish_stats(&mut self, start_time: Instant) -> f64 {
        let elapsed = start_time.elapsed().as_secs_f64();
        self.stats.iterations = self.iteration;
        self.stats.elapsed_seconds += elapsed;
        self.stats.update_rate();
        elapsed
    }

    /// Fictitious play update: best-respond to the opponent's average and
    /// count the chosen action.
    fn fictitious_play(&mut self, player: Player) {
        let opponent = self.storage.average_strategy(player.opponent());
        let br = best_response(&self.game, player, &opponent);

        self.storage.player_mut(player).strategy.increment(br.action);
    }

    /// Vanilla CFR update: signed regrets, unweighted average.
    fn cfr(&mut self, player: Player) {
        let strategy = self.regret_update(player, false);

        self.storage.player_mut(player).strategy.add(&strategy, 1.0);
    }

    /// CFR+ update: regrets floored at zero, delayed weighted average.
    fn cfr_plus(&mut self, player: Player) {
        let strategy = self.regret_update(player, true);

        if let Some(weight) = self.cfr_plus_weight() {
            self.storage.player_mut(player).strategy.add(&strategy, weight);
        }
    }

    /// Regret update shared by CFR and CFR+.
    ///
    /// Returns the regret-matched strategy `player` used this iteration.
    fn regret_update(&mut self, player: Player, floor_at_zero: bool) -> Vec<f64> {
        let strategy = self.storage.current_strategy(player);
        let opponent = self.storage.current_strategy(player.opponent());

        let values = action_values(&self.game, player, &opponent);
        let ev: f64 = strategy.iter().zip(&values).map(|(&s, &v)| s * v).sum();
        let deltas: Vec<f64> = values.iter().map(|&v| v - ev).collect();

        self.storage.player_mut(player).regret.update(&deltas, floor_at_zero);

        strategy
    }

    /// Averaging weight of the current iteration under CFR+.
    ///
    /// `None` while the iteration is still inside the averaging delay.
    fn cfr_plus_weight(&self) -> Option<f64> {
        let delay = self.config.cfr_plus_delay;
        if self.iteration > delay {
            Some(self.config.weighting.weight(self.iteration - delay))
        } else {
            None
        }
    }

    /// Exploitability of both players' average strategies.
    pub fn exploitability(&self) -> f64 {
        exploitability(
            &self.game,
            &self.average_strategy(Player::First),
            &self.average_strategy(Player::Second),
        )
    }

    /// Current (regret-matched) strategy of a player.
    ///
    /// Only meaningful for CFR and CFR+; fictitious play never touches regrets,
    /// so this stays uniform there.
    pub fn current_strategy(&self, player: Player) -> Vec<f64> {
        self.storage.current_strategy(player)
    }

    /// Normalized average strategy of a player.
    pub fn average_strategy(&self, player: Player) -> Vec<f64> {
        self.storage.average_strategy(player)
    }

    /// Get the current iteration count.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Get current statistics.
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Get reference to the storage for analysis.
    pub fn storage(&self) -> &SolverStorage {
        &self.storage
    }

    /// Get reference to the game.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Reset the solver to its initial state, keeping the game.
    pub fn reset(&mut self) {
        self.storage.clear();
        self.iteration = 0;
        self.stats = SolverStats::new();
    }

    /// Write both players' average strategies as text.
    pub fn dump_strategies<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for player in Player::BOTH {
            write!(out, "strategy ({}):", player)?;
            for prob in self.average_strategy(player) {
                write!(out, " {:.6}", prob)?;
            }
            writeln!(out)?;
        }
        writeln!(out, "iteration: {}", self.iteration)?;
        writeln!(out, "exploitability: {:.6e}", self.exploitability())
    }
}

impl EquilibriumSolver<PayoffTable> {
    /// Write the payoff matrix and both average strategies as text.
    ///
    /// Diagnostic output only; the format is not stable.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "payoffs ({}):", Player::First)?;
        write!(out, "{}", self.game)?;
        self.dump_strategies(out)
    }
}

/// Progress snapshot passed to the convergence callback.
#[derive(Debug, Clone)]
pub struct ConvergenceStats {
    /// Current iteration count.
    pub iteration: u64,
    /// Exploitability after this iteration.
    pub exploitability: f64,
    /// Elapsed time in seconds.
    pub elapsed_seconds: f64,
}

/// Result of convergence-based training.
#[derive(Debug, Clone)]
pub struct ConvergenceResult {
    /// Whether exploitability reached epsilon.
    pub converged: bool,
    /// Final exploitability.
    pub exploitability: f64,
    /// Total iterations run.
    pub iterations: u64,
    /// Total elapsed time in seconds.
    pub elapsed_seconds: f64,
}
