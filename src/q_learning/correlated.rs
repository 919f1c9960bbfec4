//! Correlated-Q tables

use super::{Algorithm, JointValues, LearningRate};
use crate::{
    Result,
    equilibrium::correlated_equilibrium,
    ports::{Learner, Step},
    soccer::{JointAction, State},
};

/// One joint-action Q-table per player, backed up through a utilitarian
/// correlated equilibrium of the successor's stage game
///
/// Both tables share one learning rate, so a single update advances the
/// counter once even though two entries change.
#[derive(Debug, Clone)]
pub struct CorrelatedQTable {
    q_a: JointValues,
    q_b: JointValues,
    discount_factor: f64,
    learning_rate: LearningRate,
    fallback_value: f64,
}

impl CorrelatedQTable {
    pub fn new(
        discount_factor: f64,
        q_init: f64,
        learning_rate: LearningRate,
        fallback_value: f64,
    ) -> Self {
        Self {
            q_a: JointValues::new(q_init),
            q_b: JointValues::new(q_init),
            discount_factor,
            learning_rate,
            fallback_value,
        }
    }

    pub fn get_a(&self, state: &State, joint: JointAction) -> f64 {
        self.q_a.get(state, joint)
    }

    pub fn get_b(&self, state: &State, joint: JointAction) -> f64 {
        self.q_b.get(state, joint)
    }

    pub fn set_a(&mut self, state: State, joint: JointAction, value: f64) {
        self.q_a.set(state, joint, value);
    }

    pub fn set_b(&mut self, state: State, joint: JointAction, value: f64) {
        self.q_b.set(state, joint, value);
    }

    /// Expected (A, B) values under the selected equilibrium at `state`
    pub fn equilibrium_values(&self, state: &State) -> (f64, f64) {
        correlated_equilibrium(&self.q_a.matrix(state), &self.q_b.matrix(state))
            .map(|solution| solution.values)
            .unwrap_or((self.fallback_value, self.fallback_value))
    }
}

impl Learner for CorrelatedQTable {
    fn update(&mut self, step: &Step) -> Result<()> {
        let alpha = self.learning_rate.current();
        let (value_a, value_b) = if step.done {
            (0.0, 0.0)
        } else {
            self.equilibrium_values(&step.next_state)
        };

        let q_a = self.get_a(&step.state, step.joint);
        let q_b = self.get_b(&step.state, step.joint);
        let gamma = self.discount_factor;
        self.set_a(
            step.state,
            step.joint,
            (1.0 - alpha) * q_a + alpha * (step.reward_a + gamma * value_a),
        );
        self.set_b(
            step.state,
            step.joint,
            (1.0 - alpha) * q_b + alpha * (step.reward_b + gamma * value_b),
        );
        self.learning_rate.advance();
        Ok(())
    }

    fn value(&self, state: &State, joint: JointAction) -> f64 {
        self.get_a(state, joint)
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::CorrelatedQ
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate.current()
    }

    fn updates(&self) -> u64 {
        self.learning_rate.steps()
    }

    fn table_size(&self) -> usize {
        self.q_a.len() + self.q_b.len()
    }
}
