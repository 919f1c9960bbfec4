//! Q-values keyed on both players' actions

use super::DefaultMap;
use crate::{
    equilibrium::PayoffMatrix,
    soccer::{Action, JointAction, State},
};

/// (state, A action, B action) -> Q-value, with an optimistic default
#[derive(Debug, Clone)]
pub struct JointValues {
    values: DefaultMap<(State, Action, Action)>,
}

impl JointValues {
    pub fn new(default: f64) -> Self {
        Self {
            values: DefaultMap::new(default),
        }
    }

    pub fn get(&self, state: &State, joint: JointAction) -> f64 {
        self.values.get(&(*state, joint.actor, joint.opponent))
    }

    pub fn set(&mut self, state: State, joint: JointAction, value: f64) {
        self.values.insert((state, joint.actor, joint.opponent), value);
    }

    /// Snapshot of all 25 values at `state`, indexed `[actor][opponent]`
    pub fn matrix(&self, state: &State) -> PayoffMatrix {
        std::array::from_fn(|a| {
            std::array::from_fn(|b| {
                self.get(state, JointAction::new(Action::ALL[a], Action::ALL[b]))
            })
        })
    }

    /// Largest value over all joint actions at `state`
    pub fn max(&self, state: &State) -> f64 {
        self.matrix(state)
            .iter()
            .flatten()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soccer::Player;

    #[test]
    fn test_matrix_layout_follows_action_order() {
        let mut values = JointValues::new(1.0);
        let state = State::new(2, 1, Player::B);
        values.set(state, JointAction::new(Action::South, Action::Stick), 7.0);

        let matrix = values.matrix(&state);
        assert_eq!(matrix[Action::South.index()][Action::Stick.index()], 7.0);
        assert_eq!(matrix[Action::Stick.index()][Action::South.index()], 1.0);
        assert_eq!(values.max(&state), 7.0);
        assert_eq!(values.len(), 1);
    }
}
