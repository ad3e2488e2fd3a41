//! Classic zero-sum matrix games with known equilibria.
//!
//! These serve as fixed inputs for validation and benchmarks, next to the
//! randomly generated tables.

use crate::games::matrix::PayoffTable;

/// Rock-paper-scissors. The unique equilibrium is uniform for both players.
pub fn rock_paper_scissors() -> PayoffTable {
    #[rustfmt::skip]
    let values = vec![
         0.0,  1.0, -1.0,
        -1.0,  0.0,  1.0,
         1.0, -1.0,  0.0,
    ];
    PayoffTable::from_row_major(3, values)
}

/// Rock-paper-scissors where wins with the first action pay double.
///
/// The equilibrium is still fully mixed, but no longer uniform, so the
/// uniform starting point of regret matching is not already a solution.
pub fn skewed_rock_paper_scissors() -> PayoffTable {
    #[rustfmt::skip]
    let values = vec![
         0.0,  2.0, -1.0,
        -2.0,  0.0,  1.0,
         1.0, -1.0,  0.0,
    ];
    PayoffTable::from_row_major(3, values)
}

/// Matching pennies. The equilibrium is 50/50 for both players.
pub fn matching_pennies() -> PayoffTable {
    PayoffTable::from_row_major(2, vec![1.0, -1.0, -1.0, 1.0])
}
