//! Independent Q-learning table

use super::{Algorithm, DefaultMap, LearningRate};
use crate::{
    Result,
    ports::{Learner, Step},
    soccer::{Action, JointAction, State},
};

/// Q-table mapping (state, own action) pairs to Q-values
///
/// The opponent's action is not modeled; its effect shows up only through
/// the sampled successor state.
#[derive(Debug, Clone)]
pub struct QTable {
    /// Q-values: (state, own action) -> Q-value
    q_values: DefaultMap<(State, Action)>,
    /// Discount factor γ
    discount_factor: f64,
    /// Learning rate α and its decay
    learning_rate: LearningRate,
}

impl QTable {
    /// Create a new Q-table
    pub fn new(discount_factor: f64, q_init: f64, learning_rate: LearningRate) -> Self {
        Self {
            q_values: DefaultMap::new(q_init),
            discount_factor,
            learning_rate,
        }
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: &State, action: Action) -> f64 {
        self.q_values.get(&(*state, action))
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: State, action: Action, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Get maximum Q-value over own actions in a state
    pub fn max_q(&self, state: &State) -> f64 {
        Action::ALL
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Q-learning update
    ///
    /// Q(s,a) ← (1-α)Q(s,a) + α[r + γ max_a' Q(s',a')]
    pub fn q_learning_update(
        &mut self,
        state: State,
        action: Action,
        reward: f64,
        next_state: &State,
    ) -> f64 {
        let alpha = self.learning_rate.current();
        let current_q = self.get(&state, action);
        let max_next_q = self.max_q(next_state);
        let new_q = (1.0 - alpha) * current_q + alpha * (reward + self.discount_factor * max_next_q);
        self.set(state, action, new_q);
        self.learning_rate.advance();
        new_q
    }

    /// Get total number of Q-values stored
    pub fn size(&self) -> usize {
        self.q_values.len()
    }
}

impl Learner for QTable {
    fn update(&mut self, step: &Step) -> Result<()> {
        self.q_learning_update(step.state, step.joint.actor, step.reward_a, &step.next_state);
        Ok(())
    }

    fn value(&self, state: &State, joint: JointAction) -> f64 {
        self.get(state, joint.actor)
    }

    fn observes_opponent(&self) -> bool {
        false
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::QLearning
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate.current()
    }

    fn updates(&self) -> u64 {
        self.learning_rate.steps()
    }

    fn table_size(&self) -> usize {
        self.size()
    }
}
