//! Individual and joint actions

use std::{fmt, str::FromStr};

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One of the five moves available to each player
///
/// Declaration order is the iteration order everywhere (table lookups,
/// payoff matrix rows/columns, LP variable layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    North,
    South,
    East,
    West,
    Stick,
}

impl Action {
    /// Number of actions per player
    pub const COUNT: usize = 5;

    /// All actions in declaration order
    pub const ALL: [Action; Action::COUNT] = [
        Action::North,
        Action::South,
        Action::East,
        Action::West,
        Action::Stick,
    ];

    /// Position of this action in [`Action::ALL`]
    pub fn index(self) -> usize {
        match self {
            Action::North => 0,
            Action::South => 1,
            Action::East => 2,
            Action::West => 3,
            Action::Stick => 4,
        }
    }

    /// Signed cell offset on the 2x4 grid, before boundary clamping
    pub fn grid_shift(self) -> i8 {
        match self {
            Action::North => -4,
            Action::South => 4,
            Action::East => 1,
            Action::West => -1,
            Action::Stick => 0,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Action::North => "north",
            Action::South => "south",
            Action::East => "east",
            Action::West => "west",
            Action::Stick => "stick",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Action::North),
            "south" | "s" => Ok(Action::South),
            "east" | "e" => Ok(Action::East),
            "west" | "w" => Ok(Action::West),
            "stick" | "stay" | "x" => Ok(Action::Stick),
            _ => Err(Error::ParseAction {
                input: s.to_string(),
                expected: "north, south, east, west, stick".to_string(),
            }),
        }
    }
}

/// Simultaneous pair of moves: player A (the learner) and player B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JointAction {
    pub actor: Action,
    pub opponent: Action,
}

impl JointAction {
    /// Size of the joint action space
    pub const COUNT: usize = Action::COUNT * Action::COUNT;

    pub const fn new(actor: Action, opponent: Action) -> Self {
        Self { actor, opponent }
    }

    /// Full cross product, actor-major
    pub fn all() -> Vec<JointAction> {
        Action::ALL
            .iter()
            .flat_map(|&actor| {
                Action::ALL
                    .iter()
                    .map(move |&opponent| JointAction::new(actor, opponent))
            })
            .collect()
    }
}

impl fmt::Display for JointAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.actor, self.opponent)
    }
}

impl FromStr for JointAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(',');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(actor), Some(opponent), None) => Ok(JointAction::new(
                actor.parse()?,
                opponent.parse()?,
            )),
            _ => Err(Error::ParseJointAction {
                input: s.to_string(),
                expected: "actor,opponent (e.g. south,stick)".to_string(),
            }),
        }
    }
}

/// Uniform random action source used as the exploration policy
#[derive(Debug, Clone)]
pub struct ActionSampler {
    rng: StdRng,
}

impl ActionSampler {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn next_action(&mut self) -> Action {
        let idx = self.rng.random_range(0..Action::COUNT);
        Action::ALL[idx]
    }

    pub fn next_joint_action(&mut self) -> JointAction {
        let actor = self.next_action();
        let opponent = self.next_action();
        JointAction::new(actor, opponent)
    }
}
