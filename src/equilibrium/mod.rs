//! Equilibrium values of one-shot matrix games
//!
//! Both solvers build a fresh linear program per query and keep no state
//! between calls. A failed solve is reported as `None`; callers decide what
//! value to substitute.
//!
//! - [`minimax`]: the zero-sum maximin value used by Foe-Q
//! - [`correlated_equilibrium`]: the utilitarian correlated equilibrium used
//!   by Correlated-Q

pub mod correlated;
pub mod minimax;

pub use correlated::{
    CorrelatedSolution, JointDistribution, RationalityConstraint, correlated_equilibrium,
    expected_value, rationality_constraints,
};
pub use minimax::{MinimaxSolution, minimax};

use std::panic::{self, AssertUnwindSafe};

use microlp::{Problem, Solution};
use tracing::debug;

use crate::soccer::Action;

/// Payoffs indexed `[a_action][b_action]` by [`Action::index`]
pub type PayoffMatrix = [[f64; Action::COUNT]; Action::COUNT];

/// Matrix with every entry equal to `value`
pub fn constant_matrix(value: f64) -> PayoffMatrix {
    [[value; Action::COUNT]; Action::COUNT]
}

/// Swap the roles of rows and columns
pub fn transpose(payoff: &PayoffMatrix) -> PayoffMatrix {
    std::array::from_fn(|i| std::array::from_fn(|j| payoff[j][i]))
}

pub(crate) fn is_well_formed(payoff: &PayoffMatrix) -> bool {
    payoff.iter().flatten().all(|q| q.is_finite())
}

/// Solve `problem`, reporting every backend failure as `None`
///
/// The simplex backend can abort on a singular basis when many payoffs are
/// tied, so its panics are caught here along with its errors.
pub(crate) fn solve_lp(problem: &Problem, name: &str) -> Option<Solution> {
    match panic::catch_unwind(AssertUnwindSafe(|| problem.solve())) {
        Ok(Ok(solution)) => Some(solution),
        Ok(Err(err)) => {
            debug!(lp = name, %err, "LP did not reach an optimum");
            None
        }
        Err(_) => {
            debug!(lp = name, "LP backend aborted");
            None
        }
    }
}
