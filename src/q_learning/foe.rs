//! Foe-Q table

use super::{Algorithm, JointValues, LearningRate};
use crate::{
    Result,
    equilibrium::minimax,
    ports::{Learner, Step},
    soccer::{JointAction, State},
};

/// Joint-action Q-table that assumes the opponent is adversarial
///
/// The successor value is A's maximin value of the 5x5 stage game formed by
/// the successor's Q-values. When the LP fails, `fallback_value` stands in.
#[derive(Debug, Clone)]
pub struct FoeQTable {
    q_values: JointValues,
    discount_factor: f64,
    learning_rate: LearningRate,
    fallback_value: f64,
}

impl FoeQTable {
    pub fn new(
        discount_factor: f64,
        q_init: f64,
        learning_rate: LearningRate,
        fallback_value: f64,
    ) -> Self {
        Self {
            q_values: JointValues::new(q_init),
            discount_factor,
            learning_rate,
            fallback_value,
        }
    }

    pub fn get(&self, state: &State, joint: JointAction) -> f64 {
        self.q_values.get(state, joint)
    }

    pub fn set(&mut self, state: State, joint: JointAction, value: f64) {
        self.q_values.set(state, joint, value);
    }

    /// V(s) = max over A's mixed strategies of min over B's actions
    pub fn minimax_value(&self, state: &State) -> f64 {
        minimax(&self.q_values.matrix(state))
            .map(|solution| solution.value)
            .unwrap_or(self.fallback_value)
    }
}

impl Learner for FoeQTable {
    fn update(&mut self, step: &Step) -> Result<()> {
        let alpha = self.learning_rate.current();
        let current_q = self.get(&step.state, step.joint);
        let next_value = self.minimax_value(&step.next_state);
        let new_q = (1.0 - alpha) * current_q
            + alpha * (step.reward_a + self.discount_factor * next_value);
        self.set(step.state, step.joint, new_q);
        self.learning_rate.advance();
        Ok(())
    }

    fn value(&self, state: &State, joint: JointAction) -> f64 {
        self.get(state, joint)
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::FoeQ
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate.current()
    }

    fn updates(&self) -> u64 {
        self.learning_rate.steps()
    }

    fn table_size(&self) -> usize {
        self.q_values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soccer::{Action, Player};

    fn table(alpha: f64) -> FoeQTable {
        FoeQTable::new(0.9, 1.0, LearningRate::constant(alpha), 1.0)
    }

    #[test]
    fn test_default_tables_have_unit_minimax_value() {
        let table = table(0.2);
        let value = table.minimax_value(&State::new(2, 1, Player::B));
        assert!((value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_scoring_update_from_defaults() {
        let mut table = table(0.2);
        let state = State::new(1, 2, Player::A);
        let joint = JointAction::new(Action::West, Action::Stick);
        table
            .update(&Step {
                state,
                joint,
                next_state: State::new(0, 2, Player::A),
                reward_a: 100.0,
                reward_b: -100.0,
                done: true,
            })
            .unwrap();

        // 0.8 * 1.0 + 0.2 * (100 + 0.9 * 1.0)
        assert!((table.value(&state, joint) - 20.98).abs() < 1e-9);
    }

    #[test]
    fn test_matching_game_successor_value() {
        let mut table = table(0.2);
        let state = State::new(6, 1, Player::A);
        for (i, &a) in Action::ALL.iter().enumerate() {
            for (j, &b) in Action::ALL.iter().enumerate() {
                let q = if i == j { 1.0 } else { 0.0 };
                table.set(state, JointAction::new(a, b), q);
            }
        }
        assert!((table.minimax_value(&state) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_successor_uses_fallback() {
        let mut table = FoeQTable::new(0.9, 1.0, LearningRate::constant(0.2), 7.0);
        let state = State::new(6, 1, Player::A);
        table.set(state, JointAction::new(Action::North, Action::North), f64::NAN);
        assert_eq!(table.minimax_value(&state), 7.0);
    }
}
