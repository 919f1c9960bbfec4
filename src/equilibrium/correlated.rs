//! Utilitarian correlated equilibrium via linear programming
//!
//! The decision variables form a joint distribution over all 25 joint
//! actions. For each player and each ordered pair of that player's actions
//! (context, alternative), the LP requires that, restricted to the joint
//! actions where the player is told to play `context`, switching to
//! `alternative` does not raise the player's expected payoff. Among the
//! equilibria satisfying this, the one maximizing the sum of both players'
//! expected payoffs is selected.

use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem, Variable};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{PayoffMatrix, is_well_formed, solve_lp};
use crate::soccer::{Action, Player};

/// Joint distribution indexed `[a_action][b_action]`
pub type JointDistribution = [[f64; Action::COUNT]; Action::COUNT];

/// One "no profitable deviation" condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RationalityConstraint {
    pub player: Player,
    pub context: Action,
    pub alternative: Action,
}

impl RationalityConstraint {
    /// Expected gain for `player` from switching `context` to `alternative`
    ///
    /// Non-positive when the constraint holds. Both matrices are indexed
    /// `[a_action][b_action]`; `payoff` is the constrained player's own.
    pub fn deviation_gain(&self, distribution: &JointDistribution, payoff: &PayoffMatrix) -> f64 {
        let context = self.context.index();
        let alternative = self.alternative.index();
        match self.player {
            Player::A => (0..Action::COUNT)
                .map(|b| {
                    distribution[context][b] * (payoff[alternative][b] - payoff[context][b])
                })
                .sum(),
            Player::B => (0..Action::COUNT)
                .map(|a| {
                    distribution[a][context] * (payoff[a][alternative] - payoff[a][context])
                })
                .sum(),
        }
    }
}

/// All (context, alternative) pairs for one player
///
/// Context-major over [`Action::ALL`], skipping `alternative == context`,
/// which yields `|A| * (|A| - 1)` constraints.
pub fn rationality_constraints(player: Player) -> Vec<RationalityConstraint> {
    let mut constraints = Vec::with_capacity(Action::COUNT * (Action::COUNT - 1));
    for &context in &Action::ALL {
        for &alternative in &Action::ALL {
            if alternative != context {
                constraints.push(RationalityConstraint {
                    player,
                    context,
                    alternative,
                });
            }
        }
    }
    constraints
}

/// Solved equilibrium and each player's expected value under it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelatedSolution {
    pub distribution: JointDistribution,
    /// Expected payoff of (A, B) under `distribution`
    pub values: (f64, f64),
}

impl CorrelatedSolution {
    /// Largest violation of the equilibrium conditions, including the
    /// probability simplex; zero for an exact solution
    pub fn max_violation(&self, payoff_a: &PayoffMatrix, payoff_b: &PayoffMatrix) -> f64 {
        let total: f64 = self.distribution.iter().flatten().sum();
        let mut worst = (total - 1.0).abs();

        for &p in self.distribution.iter().flatten() {
            worst = worst.max(-p);
        }

        for constraint in rationality_constraints(Player::A) {
            worst = worst.max(constraint.deviation_gain(&self.distribution, payoff_a));
        }
        for constraint in rationality_constraints(Player::B) {
            worst = worst.max(constraint.deviation_gain(&self.distribution, payoff_b));
        }

        worst.max(0.0)
    }
}

/// Expected value of `payoff` under a joint distribution
pub fn expected_value(distribution: &JointDistribution, payoff: &PayoffMatrix) -> f64 {
    distribution
        .iter()
        .zip(payoff)
        .flat_map(|(p_row, q_row)| p_row.iter().zip(q_row).map(|(p, q)| p * q))
        .sum()
}

/// Correlated equilibrium maximizing the sum of both players' payoffs
///
/// Both matrices are indexed `[a_action][b_action]`. Returns `None` when the
/// solver does not reach an optimum.
pub fn correlated_equilibrium(
    payoff_a: &PayoffMatrix,
    payoff_b: &PayoffMatrix,
) -> Option<CorrelatedSolution> {
    if !is_well_formed(payoff_a) || !is_well_formed(payoff_b) {
        debug!("payoff matrix contains non-finite entries, skipping correlated LP");
        return None;
    }

    let mut problem = Problem::new(OptimizationDirection::Maximize);

    let mut vars: Vec<[Variable; Action::COUNT]> = Vec::with_capacity(Action::COUNT);
    for a in 0..Action::COUNT {
        let row = std::array::from_fn(|b| {
            problem.add_var(payoff_a[a][b] + payoff_b[a][b], (0.0, f64::INFINITY))
        });
        vars.push(row);
    }

    let mut total = LinearExpr::empty();
    for &var in vars.iter().flatten() {
        total.add(var, 1.0);
    }
    problem.add_constraint(total, ComparisonOp::Eq, 1.0);

    for constraint in rationality_constraints(Player::A) {
        let context = constraint.context.index();
        let alternative = constraint.alternative.index();
        let mut expr = LinearExpr::empty();
        for b in 0..Action::COUNT {
            expr.add(
                vars[context][b],
                payoff_a[context][b] - payoff_a[alternative][b],
            );
        }
        problem.add_constraint(expr, ComparisonOp::Ge, 0.0);
    }

    for constraint in rationality_constraints(Player::B) {
        let context = constraint.context.index();
        let alternative = constraint.alternative.index();
        let mut expr = LinearExpr::empty();
        for (a, row) in vars.iter().enumerate() {
            expr.add(row[context], payoff_b[a][context] - payoff_b[a][alternative]);
        }
        problem.add_constraint(expr, ComparisonOp::Ge, 0.0);
    }

    let solution = solve_lp(&problem, "correlated equilibrium")?;

    let mut distribution = [[0.0; Action::COUNT]; Action::COUNT];
    for (dist_row, var_row) in distribution.iter_mut().zip(&vars) {
        for (p, &var) in dist_row.iter_mut().zip(var_row) {
            *p = solution[var];
        }
    }

    Some(CorrelatedSolution {
        values: (
            expected_value(&distribution, payoff_a),
            expected_value(&distribution, payoff_b),
        ),
        distribution,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;
    use crate::equilibrium::{constant_matrix, minimax, transpose};

    const TOLERANCE: f64 = 1e-6;

    fn random_matrix(rng: &mut StdRng) -> PayoffMatrix {
        std::array::from_fn(|_| std::array::from_fn(|_| rng.random_range(-10.0..10.0)))
    }

    #[test]
    fn test_constraint_families_cover_every_ordered_pair() {
        for player in [Player::A, Player::B] {
            let constraints = rationality_constraints(player);
            assert_eq!(constraints.len(), 20);
            let pairs: HashSet<_> = constraints
                .iter()
                .map(|c| (c.context, c.alternative))
                .collect();
            assert_eq!(pairs.len(), 20);
            assert!(constraints.iter().all(|c| c.context != c.alternative));
            assert!(constraints.iter().all(|c| c.player == player));
        }
    }

    #[test]
    fn test_constant_tables_return_the_constants() {
        let solution =
            correlated_equilibrium(&constant_matrix(1.0), &constant_matrix(1.0)).unwrap();
        assert!((solution.values.0 - 1.0).abs() < TOLERANCE);
        assert!((solution.values.1 - 1.0).abs() < TOLERANCE);

        let solution =
            correlated_equilibrium(&constant_matrix(2.0), &constant_matrix(-3.0)).unwrap();
        assert!((solution.values.0 - 2.0).abs() < TOLERANCE);
        assert!((solution.values.1 + 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_coordination_peak_is_selected() {
        let mut payoff = constant_matrix(0.0);
        payoff[2][3] = 5.0;
        let solution = correlated_equilibrium(&payoff, &payoff).unwrap();
        assert!((solution.values.0 - 5.0).abs() < TOLERANCE);
        assert!((solution.values.1 - 5.0).abs() < TOLERANCE);
        assert!((solution.distribution[2][3] - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_zero_sum_values_match_minimax() {
        let mut rng = StdRng::seed_from_u64(5);
        let payoff_a = random_matrix(&mut rng);
        let payoff_b = payoff_a.map(|row| row.map(|q| -q));

        let solution = correlated_equilibrium(&payoff_a, &payoff_b).unwrap();
        let security = minimax(&payoff_a).unwrap().value;
        assert!((solution.values.0 - security).abs() < 1e-5);
        assert!((solution.values.0 + solution.values.1).abs() < 1e-5);
    }

    #[test]
    fn test_random_games_satisfy_equilibrium_conditions() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..25 {
            let payoff_a = random_matrix(&mut rng);
            let payoff_b = random_matrix(&mut rng);

            let solution = correlated_equilibrium(&payoff_a, &payoff_b).unwrap();

            let total: f64 = solution.distribution.iter().flatten().sum();
            assert!((total - 1.0).abs() < TOLERANCE);
            assert!(solution.max_violation(&payoff_a, &payoff_b) < TOLERANCE);

            let security_a = minimax(&payoff_a).unwrap().value;
            let security_b = minimax(&transpose(&payoff_b)).unwrap().value;
            assert!(solution.values.0 >= security_a - TOLERANCE);
            assert!(solution.values.1 >= security_b - TOLERANCE);
        }
    }

    #[test]
    fn test_tied_payoffs_never_abort() {
        // Value levels reached by early Correlated-Q backups from the 1.0 default
        const LEVELS: [f64; 6] = [1.0, 1.0, 0.95, 20.98, -19.02, 50.5];
        let mut rng = StdRng::seed_from_u64(1301);
        for _ in 0..300 {
            let mut pick = || -> PayoffMatrix {
                std::array::from_fn(|_| {
                    std::array::from_fn(|_| LEVELS[rng.random_range(0..LEVELS.len())])
                })
            };
            let payoff_a = pick();
            let payoff_b = pick().map(|row| row.map(|q| -q));

            if let Some(solution) = correlated_equilibrium(&payoff_a, &payoff_b) {
                assert!(solution.max_violation(&payoff_a, &payoff_b) < TOLERANCE);
            }
            if let Some(solution) = minimax(&payoff_a) {
                assert!(solution.value.is_finite());
            }
        }
    }

    #[test]
    fn test_deviation_gain_detects_profitable_switch() {
        let mut payoff = constant_matrix(0.0);
        payoff[1][0] = 4.0;
        let mut distribution = [[0.0; Action::COUNT]; Action::COUNT];
        distribution[0][0] = 1.0;

        let constraint = RationalityConstraint {
            player: Player::A,
            context: Action::North,
            alternative: Action::South,
        };
        assert!((constraint.deviation_gain(&distribution, &payoff) - 4.0).abs() < 1e-12);

        let solution = CorrelatedSolution {
            distribution,
            values: (0.0, 0.0),
        };
        assert!((solution.max_violation(&payoff, &constant_matrix(0.0)) - 4.0).abs() < 1e-12);
    }
}
