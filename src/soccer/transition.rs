//! Stochastic transition model
//!
//! Both players pick a move simultaneously. Collisions are resolved by
//! treating the execution order as a fair coin flip, which turns a single
//! `(state, joint action)` pair into a short list of equally likely
//! successor states. The lists are computed once for the full state and
//! joint-action space and sampled uniformly afterwards.

use std::collections::HashMap;

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use super::{
    action::{Action, JointAction},
    state::{GRID_COLUMNS, Player, State},
};
use crate::{Error, Result};

/// Which collision branch produced a set of outcomes
///
/// Branches are tested in declaration order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Each player moves toward the other's current cell
    MutualSwap,
    /// Both players move toward the same cell
    SameTarget,
    /// A moves into B's current cell while B moves elsewhere
    ActorBlocked,
    /// B moves into A's current cell while A moves elsewhere
    OpponentBlocked,
    /// No interaction between the two moves
    Clear,
}

/// Candidate successors for one `(state, joint action)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub kind: CollisionKind,
    /// Equally likely successor states, never overlapping
    pub outcomes: Vec<State>,
}

/// Cell a player would reach from `cell`, ignoring the other player
///
/// Moves that would leave the board, or wrap from the end of one row to the
/// start of the other, leave the player where it is.
pub fn target_cell(cell: u8, action: Action) -> u8 {
    let top_row = cell < GRID_COLUMNS;
    let column = cell % GRID_COLUMNS;
    let blocked = match action {
        Action::North => top_row,
        Action::South => !top_row,
        Action::West => column == 0,
        Action::East => column == GRID_COLUMNS - 1,
        Action::Stick => false,
    };

    if blocked {
        cell
    } else {
        cell.wrapping_add_signed(action.grid_shift())
    }
}

/// Possession after `blocked` bumps into a stationary opponent
fn possession_after_block(possessor: Player, blocked: Player) -> Player {
    if possessor == blocked {
        blocked.opponent()
    } else {
        possessor
    }
}

/// Enumerate the successor states of `state` under `joint`
pub fn resolve(state: &State, joint: JointAction) -> Resolution {
    let target_a = target_cell(state.a, joint.actor);
    let target_b = target_cell(state.b, joint.opponent);

    let (kind, mut outcomes) = if target_a == state.b && target_b == state.a {
        // Whoever goes first is bounced back; the ball ends with either
        (
            CollisionKind::MutualSwap,
            vec![
                State::new(state.a, state.b, Player::A),
                State::new(state.a, state.b, Player::B),
            ],
        )
    } else if target_a == target_b {
        // The first mover takes the cell; the second runs into it and the
        // ball goes to the player now standing still in front of it
        (
            CollisionKind::SameTarget,
            vec![
                State::new(state.a, target_b, Player::B),
                State::new(target_a, state.b, Player::A),
            ],
        )
    } else if target_a == state.b {
        (
            CollisionKind::ActorBlocked,
            vec![
                State::new(
                    state.a,
                    state.b,
                    possession_after_block(state.possessor, Player::A),
                ),
                State::new(target_a, target_b, state.possessor),
            ],
        )
    } else if target_b == state.a {
        (
            CollisionKind::OpponentBlocked,
            vec![
                State::new(
                    state.a,
                    state.b,
                    possession_after_block(state.possessor, Player::B),
                ),
                State::new(target_a, target_b, state.possessor),
            ],
        )
    } else {
        (
            CollisionKind::Clear,
            vec![State::new(target_a, target_b, state.possessor)],
        )
    };

    outcomes.retain(|s| !s.is_overlapping());

    Resolution { kind, outcomes }
}

/// Precomputed successor lists for every `(state, joint action)` pair
#[derive(Debug, Clone)]
pub struct TransitionModel {
    table: HashMap<(State, JointAction), Vec<State>>,
    rng: StdRng,
}

impl TransitionModel {
    /// Eagerly resolve the full cross product of `states` and `joint_actions`
    pub fn build<'a, I>(states: I, joint_actions: &[JointAction], rng: StdRng) -> Self
    where
        I: IntoIterator<Item = &'a State>,
    {
        let mut table = HashMap::new();
        for state in states {
            for &joint in joint_actions {
                table.insert((*state, joint), resolve(state, joint).outcomes);
            }
        }
        Self { table, rng }
    }

    /// Build with a deterministic sampling stream
    pub fn build_seeded<'a, I>(states: I, joint_actions: &[JointAction], seed: u64) -> Self
    where
        I: IntoIterator<Item = &'a State>,
    {
        Self::build(states, joint_actions, StdRng::seed_from_u64(seed))
    }

    /// Stored successor list, without sampling
    pub fn candidates(&self, state: &State, joint: JointAction) -> Result<&[State]> {
        self.table
            .get(&(*state, joint))
            .map(Vec::as_slice)
            .ok_or_else(|| Error::MissingTransition {
                state: state.to_string(),
                joint: joint.to_string(),
            })
    }

    /// Draw one successor uniformly from the stored list
    pub fn next_state(&mut self, state: &State, joint: JointAction) -> Result<State> {
        let candidates = self
            .table
            .get(&(*state, joint))
            .ok_or_else(|| Error::MissingTransition {
                state: state.to_string(),
                joint: joint.to_string(),
            })?;

        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| Error::MissingTransition {
                state: state.to_string(),
                joint: joint.to_string(),
            })
    }

    /// Number of `(state, joint action)` keys in the table
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
