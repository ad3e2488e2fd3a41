//! Configuration options for the equilibrium solver.
//!
//! This module provides the configuration struct that selects the self-play
//! algorithm and its tuning knobs, the error type returned by every
//! construction-time validation, and the statistics gathered while training.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Smallest accepted matrix size.
pub const MIN_SIZE: usize = 2;

/// Largest accepted matrix size.
pub const MAX_SIZE: usize = 100_000;

/// Smallest accepted convergence threshold.
pub const MIN_EPSILON: f64 = 1e-12;

/// Largest accepted convergence threshold.
pub const MAX_EPSILON: f64 = 1.0;

/// Self-play algorithm driving each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Each player best-responds to the opponent's historical average.
    FictitiousPlay,
    /// Regret matching with signed cumulative regret and a plain average.
    Cfr,
    /// Regret matching with regrets floored at zero and a delayed, weighted average.
    CfrPlus,
}

impl Algorithm {
    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::FictitiousPlay => "Fictitious play",
            Algorithm::Cfr => "CFR",
            Algorithm::CfrPlus => "CFR+",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "fp" | "fictitious-play" | "fictitious_play" => Ok(Algorithm::FictitiousPlay),
            "1" | "cfr" => Ok(Algorithm::Cfr),
            "2" | "cfr+" | "cfr-plus" | "cfr_plus" | "cfrplus" => Ok(Algorithm::CfrPlus),
            _ => Err(ConfigError::UnknownVariant {
                kind: "algorithm",
                value: s.to_string(),
            }),
        }
    }
}

/// Iteration weight applied to CFR+ strategy accumulation.
///
/// With `t` the number of iterations past the averaging delay, the weight is
/// `1`, `t` or `t²`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightingMode {
    /// Every counted iteration has weight 1.
    Constant,
    /// Weight grows linearly with the iteration.
    Linear,
    /// Weight grows with the square of the iteration.
    Quadratic,
}

impl WeightingMode {
    /// Weight for the `t`-th counted iteration (`t` starts at 1).
    pub fn weight(self, t: u64) -> f64 {
        let t = t as f64;
        match self {
            WeightingMode::Constant => 1.0,
            WeightingMode::Linear => t,
            WeightingMode::Quadratic => t * t,
        }
    }
}

impl fmt::Display for WeightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeightingMode::Constant => "constant",
            WeightingMode::Linear => "linear",
            WeightingMode::Quadratic => "quadratic",
        };
        f.write_str(name)
    }
}

impl FromStr for WeightingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "constant" | "const" => Ok(WeightingMode::Constant),
            "1" | "linear" => Ok(WeightingMode::Linear),
            "2" | "quadratic" | "squared" => Ok(WeightingMode::Quadratic),
            _ => Err(ConfigError::UnknownVariant {
                kind: "weighting mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration for the equilibrium solver.
///
/// # Example
/// ```
/// use matrix_game_solver::cfr::{Algorithm, SolverConfig, WeightingMode};
///
/// let config = SolverConfig::default();
/// assert_eq!(config.algorithm, Algorithm::CfrPlus);
/// assert_eq!(config.weighting, WeightingMode::Quadratic);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Algorithm used by every iteration.
    pub algorithm: Algorithm,

    /// Number of initial CFR+ iterations excluded from the average strategy.
    ///
    /// Ignored by the other algorithms.
    pub cfr_plus_delay: u64,

    /// Weighting of CFR+ strategy accumulation after the delay.
    ///
    /// Ignored by the other algorithms.
    pub weighting: WeightingMode,

    /// Exploitability at or below which the game counts as solved.
    pub epsilon: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::CfrPlus,
            cfr_plus_delay: 0,
            weighting: WeightingMode::Quadratic,
            epsilon: 1e-4,
        }
    }
}

impl SolverConfig {
    /// Create a new SolverConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for fictitious play.
    pub fn fictitious_play() -> Self {
        Self {
            algorithm: Algorithm::FictitiousPlay,
            ..Default::default()
        }
    }

    /// Configuration for vanilla CFR.
    pub fn cfr() -> Self {
        Self {
            algorithm: Algorithm::Cfr,
            ..Default::default()
        }
    }

    /// Configuration for CFR+ with the given delay and weighting.
    pub fn cfr_plus(delay: u64, weighting: WeightingMode) -> Self {
        Self {
            algorithm: Algorithm::CfrPlus,
            cfr_plus_delay: delay,
            weighting,
            ..Default::default()
        }
    }

    /// Builder method: set the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Builder method: set the CFR+ averaging delay.
    pub fn with_delay(mut self, delay: u64) -> Self {
        self.cfr_plus_delay = delay;
        self
    }

    /// Builder method: set the CFR+ weighting mode.
    pub fn with_weighting(mut self, weighting: WeightingMode) -> Self {
        self.weighting = weighting;
        self
    }

    /// Builder method: set the convergence threshold.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_EPSILON..=MAX_EPSILON).contains(&self.epsilon) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }

        Ok(())
    }
}

/// Check a matrix size against the accepted range.
pub fn validate_size(size: usize) -> Result<(), ConfigError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSize(size))
    }
}

/// Errors that can occur when validating solver inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Matrix size is outside `MIN_SIZE..=MAX_SIZE`.
    InvalidSize(usize),
    /// Epsilon is outside `MIN_EPSILON..=MAX_EPSILON` or not a number.
    InvalidEpsilon(f64),
    /// Batch run count is zero.
    InvalidRuns(usize),
    /// A payoff row does not have as many entries as there are rows.
    NonSquarePayoffs {
        /// Number of rows.
        rows: usize,
        /// Offending row index.
        row: usize,
        /// Length of the offending row.
        len: usize,
    },
    /// A payoff entry is NaN or infinite.
    NonFinitePayoff {
        /// Row of the entry.
        row: usize,
        /// Column of the entry.
        column: usize,
    },
    /// A selector string did not name any known variant.
    UnknownVariant {
        /// What was being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
    /// A payoff distribution could not be built.
    Distribution(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSize(size) => {
                write!(f, "Matrix size {} is out of range [{}, {}]", size, MIN_SIZE, MAX_SIZE)
            }
            ConfigError::InvalidEpsilon(eps) => {
                write!(f, "Epsilon {} is out of range [{}, {}]", eps, MIN_EPSILON, MAX_EPSILON)
            }
            ConfigError::InvalidRuns(runs) => {
                write!(f, "Run count {} must be at least 1", runs)
            }
            ConfigError::NonSquarePayoffs { rows, row, len } => {
                write!(f, "Payoff row {} has {} entries, expected {}", row, len, rows)
            }
            ConfigError::NonFinitePayoff { row, column } => {
                write!(f, "Payoff at ({}, {}) is not finite", row, column)
            }
            ConfigError::UnknownVariant { kind, value } => {
                write!(f, "Unknown {} '{}'", kind, value)
            }
            ConfigError::Distribution(msg) => {
                write!(f, "Invalid payoff distribution: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Statistics tracked during training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverStats {
    /// Total number of iterations completed.
    pub iterations: u64,

    /// Total time spent training (in seconds).
    pub elapsed_seconds: f64,

    /// Iterations per second.
    pub iterations_per_second: f64,

    /// Most recent exploitability (if calculated).
    pub exploitability: Option<f64>,

    /// History of exploitability measurements.
    pub exploitability_history: Vec<ExploitabilityPoint>,
}

/// A single exploitability measurement at a specific iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploitabilityPoint {
    /// Iteration number when this measurement was taken.
    pub iteration: u64,
    /// Exploitability value.
    pub exploitability: f64,
}

impl SolverStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update iterations per second based on elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = self.iterations as f64 / self.elapsed_seconds;
        }
    }

    /// Record an exploitability measurement.
    pub fn record_exploitability(&mut self, iteration: u64, exploitability: f64) {
        self.exploitability = Some(exploitability);
        self.exploitability_history.push(ExploitabilityPoint {
            iteration,
            exploitability,
        });
    }
}
