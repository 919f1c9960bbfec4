//! Zero-sum maximin value via linear programming

use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem, Variable};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{PayoffMatrix, is_well_formed, solve_lp};
use crate::soccer::Action;

/// Optimal mixed strategy for the row player and its guaranteed value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimaxSolution {
    pub value: f64,
    pub policy: [f64; Action::COUNT],
}

/// Best worst-case value the row player can secure with a mixed strategy
///
/// Maximizes `v` over a distribution `pi` on the row player's actions,
/// subject to `sum_a pi(a) * payoff[a][o] >= v` for every column action `o`.
/// Returns `None` when the solver does not reach an optimum.
pub fn minimax(payoff: &PayoffMatrix) -> Option<MinimaxSolution> {
    if !is_well_formed(payoff) {
        debug!("payoff matrix contains non-finite entries, skipping minimax LP");
        return None;
    }

    let mut problem = Problem::new(OptimizationDirection::Maximize);

    let policy: Vec<Variable> = Action::ALL
        .iter()
        .map(|_| problem.add_var(0.0, (0.0, f64::INFINITY)))
        .collect();
    let value = problem.add_var(1.0, (f64::NEG_INFINITY, f64::INFINITY));

    let mut total = LinearExpr::empty();
    for &p in &policy {
        total.add(p, 1.0);
    }
    problem.add_constraint(total, ComparisonOp::Eq, 1.0);

    for column in 0..Action::COUNT {
        let mut expected = LinearExpr::empty();
        for (row, &p) in policy.iter().enumerate() {
            expected.add(p, payoff[row][column]);
        }
        expected.add(value, -1.0);
        problem.add_constraint(expected, ComparisonOp::Ge, 0.0);
    }

    let solution = solve_lp(&problem, "minimax")?;
    let mut distribution = [0.0; Action::COUNT];
    for (slot, &p) in distribution.iter_mut().zip(&policy) {
        *slot = solution[p];
    }
    Some(MinimaxSolution {
        value: solution[value],
        policy: distribution,
    })
}
