//! Batch runs over many random games.
//!
//! Each run generates its own payoff table, solves it to `epsilon` and
//! reports how many iterations that took. Runs share nothing, so they are
//! spread over a rayon thread pool. Run `i` seeds its generator with
//! `base_seed + i`, which makes a batch reproducible for a fixed base seed
//! regardless of the number of threads.

use std::time::Instant;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cfr::config::{validate_size, ConfigError, SolverConfig};
use crate::cfr::solver::{ConvergenceStats, EquilibriumSolver};
use crate::games::matrix::{PayoffDistribution, PayoffTable};

/// Configuration of a batch of independent runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Number of games to solve.
    pub runs: usize,
    /// Actions per player in every game.
    pub size: usize,
    /// Payoff distribution of every game.
    pub distribution: PayoffDistribution,
    /// Seed of run 0; run `i` uses `base_seed + i`.
    pub base_seed: u64,
    /// Optional per-run iteration cap. `None` runs each game to epsilon.
    pub max_iterations: Option<u64>,
    /// Solver settings shared by every run.
    pub solver: SolverConfig,
}

impl BatchConfig {
    /// Create a batch configuration with a random base seed.
    pub fn new(runs: usize, size: usize, solver: SolverConfig) -> Self {
        Self {
            runs,
            size,
            distribution: PayoffDistribution::Uniform,
            base_seed: rand::random(),
            max_iterations: None,
            solver,
        }
    }

    /// Builder method: set the payoff distribution.
    pub fn with_distribution(mut self, distribution: PayoffDistribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Builder method: set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Builder method: set the per-run iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: Option<u64>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runs == 0 {
            return Err(ConfigError::InvalidRuns(self.runs));
        }
        validate_size(self.size)?;
        self.solver.validate()
    }
}

/// Outcome of one run of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Index of the run within the batch.
    pub run: usize,
    /// Seed used to generate the payoff table.
    pub seed: u64,
    /// Iterations until convergence (or until the cap).
    pub iterations: u64,
    /// Whether epsilon was reached.
    pub converged: bool,
    /// Final exploitability.
    pub exploitability: f64,
    /// Wall time of this run in seconds.
    pub elapsed_seconds: f64,
}

/// Aggregated iteration counts over a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of runs.
    pub runs: usize,
    /// Runs that reached epsilon.
    pub converged: usize,
    /// Mean iteration count.
    pub mean_iterations: f64,
    /// Median iteration count.
    pub median_iterations: f64,
    /// Smallest iteration count.
    pub min_iterations: u64,
    /// Largest iteration count.
    pub max_iterations: u64,
}

impl BatchSummary {
    /// Summarize a non-empty slice of outcomes.
    pub fn from_outcomes(outcomes: &[RunOutcome]) -> Option<Self> {
        if outcomes.is_empty() {
            return None;
        }

        let mut counts: Vec<u64> = outcomes.iter().map(|o| o.iterations).collect();
        counts.sort_unstable();

        let n = counts.len();
        let mean = counts.iter().sum::<u64>() as f64 / n as f64;
        let median = if n % 2 == 1 {
            counts[n / 2] as f64
        } else {
            (counts[n / 2 - 1] + counts[n / 2]) as f64 / 2.0
        };

        Some(Self {
            runs: n,
            converged: outcomes.iter().filter(|o| o.converged).count(),
            mean_iterations: mean,
            median_iterations: median,
            min_iterations: counts[0],
            max_iterations: counts[n - 1],
        })
    }
}

/// Full result of a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Configuration the batch ran with.
    pub config: BatchConfig,
    /// Per-run outcomes, ordered by run index.
    pub outcomes: Vec<RunOutcome>,
    /// Aggregate statistics.
    pub summary: BatchSummary,
    /// Wall time of the whole batch in seconds.
    pub elapsed_seconds: f64,
}

/// Solve a single game of a batch.
pub fn run_single(config: &BatchConfig, run: usize) -> Result<RunOutcome, ConfigError> {
    let start = Instant::now();
    let seed = config.base_seed.wrapping_add(run as u64);

    let mut rng = StdRng::seed_from_u64(seed);
    let game = PayoffTable::random(config.size, config.distribution, &mut rng)?;

    let mut solver = EquilibriumSolver::new(game, config.solver.clone());
    let result = solver.train_until_converged(config.max_iterations, u64::MAX, None::<fn(&ConvergenceStats)>);

    debug!(
        "run {} (seed {}): {} iterations, exploitability {:.3e}",
        run, seed, result.iterations, result.exploitability
    );

    Ok(RunOutcome {
        run,
        seed,
        iterations: result.iterations,
        converged: result.converged,
        exploitability: result.exploitability,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    })
}

/// Run every game of the batch in parallel.
///
/// `on_complete` is called from worker threads as each run finishes.
pub fn run_batch<F>(config: &BatchConfig, on_complete: F) -> Result<BatchReport, ConfigError>
where
    F: Fn(&RunOutcome) + Sync,
{
    config.validate()?;
    let start = Instant::now();

    let outcomes = (0..config.runs)
        .into_par_iter()
        .map(|run| -> Result<RunOutcome, ConfigError> {
            let outcome = run_single(config, run)?;
            on_complete(&outcome);
            Ok(outcome)
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    let summary = BatchSummary::from_outcomes(&outcomes).ok_or(ConfigError::InvalidRuns(0))?;

    Ok(BatchReport {
        config: config.clone(),
        outcomes,
        summary,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn outcome(run: usize, iterations: u64, converged: bool) -> RunOutcome {
        RunOutcome {
            run,
            seed: run as u64,
            iterations,
            converged,
            exploitability: 0.0,
            elapsed_seconds: 0.0,
        }
    }

    #[test]
    fn test_summary() {
        let outcomes = vec![outcome(0, 10, true), outcome(1, 30, true), outcome(2, 20, false), outcome(3, 40, true)];
        let summary = BatchSummary::from_outcomes(&outcomes).unwrap();

        assert_eq!(summary.runs, 4);
        assert_eq!(summary.converged, 3);
        assert_eq!(summary.mean_iterations, 25.0);
        assert_eq!(summary.median_iterations, 25.0);
        assert_eq!(summary.min_iterations, 10);
        assert_eq!(summary.max_iterations, 40);

        assert!(BatchSummary::from_outcomes(&[]).is_none());
    }

    #[test]
    fn test_validate() {
        let solver = SolverConfig::default();
        assert_eq!(
            BatchConfig::new(0, 10, solver.clone()).validate(),
            Err(ConfigError::InvalidRuns(0))
        );
        assert_eq!(
            BatchConfig::new(3, 1, solver.clone()).validate(),
            Err(ConfigError::InvalidSize(1))
        );
        assert!(BatchConfig::new(3, 10, solver).validate().is_ok());
    }

    #[test]
    fn test_batch_is_reproducible() {
        let config = BatchConfig::new(6, 8, SolverConfig::default().with_epsilon(1e-3))
            .with_seed(1234)
            .with_max_iterations(Some(50_000));

        let completed = AtomicUsize::new(0);
        let a = run_batch(&config, |_| {
            completed.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();
        let b = run_batch(&config, |_| {}).unwrap();

        assert_eq!(completed.load(Ordering::Relaxed), 6);
        assert_eq!(a.outcomes.len(), 6);
        for (x, y) in a.outcomes.iter().zip(&b.outcomes) {
            assert_eq!(x.run, y.run);
            assert_eq!(x.seed, y.seed);
            assert_eq!(x.iterations, y.iterations);
            assert_eq!(x.exploitability, y.exploitability);
        }
        assert_eq!(a.summary, b.summary);
        assert_eq!(a.summary.converged, 6);
    }

    #[test]
    fn test_rejects_invalid_epsilon() {
        let config = BatchConfig::new(2, 4, SolverConfig::default().with_epsilon(0.0));
        assert!(matches!(run_batch(&config, |_| {}), Err(ConfigError::InvalidEpsilon(_))));
    }
}
