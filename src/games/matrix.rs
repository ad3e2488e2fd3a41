//! Dense payoff tables.
//!
//! A [`PayoffTable`] stores the row player's payoffs for an N×N zero-sum
//! game. The column player's payoffs are derived by antisymmetry, so only
//! N² values are kept.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand_distr::{Cauchy, Distribution, Normal, Uniform};
use serde::{Deserialize, Serialize};

use crate::cfr::config::{validate_size, ConfigError};
use crate::cfr::game::{MatrixGame, Player};

/// Distribution used to fill a random payoff table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayoffDistribution {
    /// Uniform on `[-1, 1)`.
    Uniform,
    /// Standard normal.
    Normal,
    /// Standard Cauchy (heavy-tailed).
    Cauchy,
}

impl fmt::Display for PayoffDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayoffDistribution::Uniform => "uniform",
            PayoffDistribution::Normal => "normal",
            PayoffDistribution::Cauchy => "cauchy",
        };
        f.write_str(name)
    }
}

impl FromStr for PayoffDistribution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "uniform" => Ok(PayoffDistribution::Uniform),
            "1" | "normal" | "gaussian" => Ok(PayoffDistribution::Normal),
            "2" | "cauchy" => Ok(PayoffDistribution::Cauchy),
            _ => Err(ConfigError::UnknownVariant {
                kind: "payoff distribution",
                value: s.to_string(),
            }),
        }
    }
}

/// Immutable N×N payoff table for the row player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffTable {
    size: usize,
    /// Row-major payoffs: `values[a * size + b]` is the row player's payoff
    /// for playing `a` against `b`.
    values: Vec<f64>,
}

impl PayoffTable {
    /// Generate a random table, drawing every payoff from `distribution`.
    ///
    /// # Arguments
    /// * `size` - Number of actions per player
    /// * `distribution` - Distribution of each payoff
    /// * `rng` - Source of randomness (the only one the solver ever uses)
    pub fn random<R: Rng + ?Sized>(
        size: usize,
        distribution: PayoffDistribution,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        validate_size(size)?;

        let cells = size * size;
        let values = match distribution {
            PayoffDistribution::Uniform => sample(Uniform::new(-1.0, 1.0), cells, rng),
            PayoffDistribution::Normal => {
                let normal = Normal::new(0.0, 1.0)
                    .map_err(|e| ConfigError::Distribution(e.to_string()))?;
                sample(normal, cells, rng)
            }
            PayoffDistribution::Cauchy => {
                let cauchy = Cauchy::new(0.0, 1.0)
                    .map_err(|e| ConfigError::Distribution(e.to_string()))?;
                sample(cauchy, cells, rng)
            }
        };

        Ok(Self { size, values })
    }

    /// Build a table from explicit rows of row-player payoffs.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ConfigError> {
        let size = rows.len();
        validate_size(size)?;

        let mut values = Vec::with_capacity(size * size);
        for (row, entries) in rows.iter().enumerate() {
            if entries.len() != size {
                return Err(ConfigError::NonSquarePayoffs {
                    rows: size,
                    row,
                    len: entries.len(),
                });
            }
            for (column, &value) in entries.iter().enumerate() {
                if !value.is_finite() {
                    return Err(ConfigError::NonFinitePayoff { row, column });
                }
                values.push(value);
            }
        }

        Ok(Self { size, values })
    }

    /// Table from already-validated row-major values.
    pub(crate) fn from_row_major(size: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), size * size);
        Self { size, values }
    }

    /// Number of actions per player.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row player's payoff for `a` against `b`.
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.values[a * self.size + b]
    }
}

fn sample<D, R>(distribution: D, cells: usize, rng: &mut R) -> Vec<f64>
where
    D: Distribution<f64>,
    R: Rng + ?Sized,
{
    (0..cells).map(|_| distribution.sample(rng)).collect()
}

impl MatrixGame for PayoffTable {
    fn num_actions(&self) -> usize {
        self.size
    }

    fn payoff(&self, player: Player, action: usize, opponent_action: usize) -> f64 {
        match player {
            Player::First => self.get(action, opponent_action),
            Player::Second => -self.get(opponent_action, action),
        }
    }
}

impl fmt::Display for PayoffTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.values.chunks(self.size) {
            for value in row {
                write!(f, "{:>12.6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_antisymmetry() {
        let mut rng = StdRng::seed_from_u64(7);
        let table = PayoffTable::random(6, PayoffDistribution::Normal, &mut rng).unwrap();

        for a in 0..6 {
            for b in 0..6 {
                assert_eq!(
                    table.payoff(Player::First, a, b),
                    -table.payoff(Player::Second, b, a)
                );
            }
        }
    }

    #[test]
    fn test_uniform_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let table = PayoffTable::random(20, PayoffDistribution::Uniform, &mut rng).unwrap();

        for a in 0..20 {
            for b in 0..20 {
                let v = table.get(a, b);
                assert!((-1.0..1.0).contains(&v), "payoff {} out of range", v);
            }
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        for distribution in [
            PayoffDistribution::Uniform,
            PayoffDistribution::Normal,
            PayoffDistribution::Cauchy,
        ] {
            let a = PayoffTable::random(5, distribution, &mut StdRng::seed_from_u64(42)).unwrap();
            let b = PayoffTable::random(5, distribution, &mut StdRng::seed_from_u64(42)).unwrap();
            let c = PayoffTable::random(5, distribution, &mut StdRng::seed_from_u64(43)).unwrap();
            assert_eq!(a, b);
            assert_ne!(a, c);
        }
    }

    #[test]
    fn test_random_rejects_small_size() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            PayoffTable::random(1, PayoffDistribution::Uniform, &mut rng),
            Err(ConfigError::InvalidSize(1))
        );
    }

    #[test]
    fn test_from_rows_validation() {
        let table = PayoffTable::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(table.size(), 2);
        assert_eq!(table.get(1, 0), 3.0);
        assert_eq!(table.payoff(Player::Second, 0, 1), -3.0);

        assert_eq!(
            PayoffTable::from_rows(&[vec![1.0, 2.0], vec![3.0]]),
            Err(ConfigError::NonSquarePayoffs { rows: 2, row: 1, len: 1 })
        );
        assert_eq!(
            PayoffTable::from_rows(&[vec![1.0, f64::NAN], vec![3.0, 4.0]]),
            Err(ConfigError::NonFinitePayoff { row: 0, column: 1 })
        );
        assert!(PayoffTable::from_rows(&[vec![1.0]]).is_err());
    }

    #[test]
    fn test_parse_distribution() {
        assert_eq!("normal".parse::<PayoffDistribution>().unwrap(), PayoffDistribution::Normal);
        assert_eq!("2".parse::<PayoffDistribution>().unwrap(), PayoffDistribution::Cauchy);
        assert!("poisson".parse::<PayoffDistribution>().is_err());
        assert_eq!(PayoffDistribution::Uniform.to_string(), "uniform");
    }

    #[test]
    fn test_display_has_one_line_per_row() {
        let table = PayoffTable::from_rows(&[vec![0.0, 1.0], vec![-1.0, 0.0]]).unwrap();
        let text = table.to_string();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("-1.000000"));
    }
}
