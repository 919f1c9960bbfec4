//! Goal rewards

use serde::{Deserialize, Serialize};

use super::state::{GRID_COLUMNS, Player, State};

/// Reward function for the soccer grid
///
/// The left column (cells 0 and 4) is A's goal and the right column
/// (cells 3 and 7) is B's goal. Whoever carries the ball into a goal, the
/// goal's owner receives `goal_reward` and the other player its negation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    pub goal_reward: f64,
}

impl Rewards {
    pub fn new(goal_reward: f64) -> Self {
        Self { goal_reward }
    }

    /// Player whose goal currently holds the ball, if any
    pub fn scorer(&self, state: &State) -> Option<Player> {
        match state.ball_cell() % GRID_COLUMNS {
            0 => Some(Player::A),
            c if c == GRID_COLUMNS - 1 => Some(Player::B),
            _ => None,
        }
    }

    pub fn reward_for(&self, state: &State, player: Player) -> f64 {
        match self.scorer(state) {
            Some(scorer) if scorer == player => self.goal_reward,
            Some(_) => -self.goal_reward,
            None => 0.0,
        }
    }

    pub fn reward_for_a(&self, state: &State) -> f64 {
        self.reward_for(state, Player::A)
    }

    pub fn reward_for_b(&self, state: &State) -> f64 {
        self.reward_for(state, Player::B)
    }

    pub fn is_terminal(&self, state: &State) -> bool {
        self.scorer(state).is_some()
    }
}

impl Default for Rewards {
    fn default() -> Self {
        Self::new(100.0)
    }
}
