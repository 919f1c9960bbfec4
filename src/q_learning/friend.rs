//! Friend-Q table

use super::{Algorithm, JointValues, LearningRate};
use crate::{
    Result,
    ports::{Learner, Step},
    soccer::{JointAction, State},
};

/// Joint-action Q-table that assumes the opponent cooperates
///
/// The successor value is the best entry over the whole joint action space,
/// as if both players were choosing together to maximize A's payoff.
#[derive(Debug, Clone)]
pub struct FriendQTable {
    q_values: JointValues,
    discount_factor: f64,
    learning_rate: LearningRate,
}

impl FriendQTable {
    pub fn new(discount_factor: f64, q_init: f64, learning_rate: LearningRate) -> Self {
        Self {
            q_values: JointValues::new(q_init),
            discount_factor,
            learning_rate,
        }
    }

    pub fn get(&self, state: &State, joint: JointAction) -> f64 {
        self.q_values.get(state, joint)
    }

    pub fn set(&mut self, state: State, joint: JointAction, value: f64) {
        self.q_values.set(state, joint, value);
    }

    /// V(s) = max over (a, b) of Q(s, a, b)
    pub fn friend_value(&self, state: &State) -> f64 {
        self.q_values.max(state)
    }
}

impl Learner for FriendQTable {
    fn update(&mut self, step: &Step) -> Result<()> {
        let alpha = self.learning_rate.current();
        let current_q = self.get(&step.state, step.joint);
        let next_value = self.friend_value(&step.next_state);
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
        Algorithm::FriendQ
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
