//! Player positions and ball possession

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of cells on the board (two rows of four)
pub const GRID_CELLS: u8 = 8;

/// Number of columns per row
pub const GRID_COLUMNS: u8 = 4;

/// A player, also used to name the ball possessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => f.write_str("A"),
            Player::B => f.write_str("B"),
        }
    }
}

/// Complete game state: both player cells and who holds the ball
///
/// Cells 0-3 form the top row and 4-7 the bottom row. The constructor does
/// not validate; use [`State::try_new`] or parsing for untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub a: u8,
    pub b: u8,
    pub possessor: Player,
}

impl State {
    pub const fn new(a: u8, b: u8, possessor: Player) -> Self {
        Self { a, b, possessor }
    }

    /// Construct a state, rejecting off-board or overlapping players
    pub fn try_new(a: u8, b: u8, possessor: Player) -> Result<Self> {
        let state = Self::new(a, b, possessor);
        if a >= GRID_CELLS || b >= GRID_CELLS {
            return Err(Error::InvalidState {
                input: state.to_string(),
                reason: format!("cells must be in 0..{GRID_CELLS}"),
            });
        }
        if a == b {
            return Err(Error::InvalidState {
                input: state.to_string(),
                reason: "players cannot share a cell".to_string(),
            });
        }
        Ok(state)
    }

    /// Cell occupied by the given player
    pub fn position(&self, player: Player) -> u8 {
        match player {
            Player::A => self.a,
            Player::B => self.b,
        }
    }

    /// Cell the ball is in (the possessor's cell)
    pub fn ball_cell(&self) -> u8 {
        self.position(self.possessor)
    }

    pub fn is_overlapping(&self) -> bool {
        self.a == self.b
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A@{} B@{} ball:{}", self.a, self.b, self.possessor)
    }
}

impl FromStr for State {
    type Err = Error;

    /// Parse `a,b,possessor`, e.g. `2,1,B`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidState {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [a, b, possessor] = parts.as_slice() else {
            return Err(invalid("expected format 'a,b,possessor' (e.g. 2,1,B)"));
        };

        let a: u8 = a.parse().map_err(|_| invalid("player A cell is not a number"))?;
        let b: u8 = b.parse().map_err(|_| invalid("player B cell is not a number"))?;
        let possessor = match possessor.to_ascii_uppercase().as_str() {
            "A" => Player::A,
            "B" => Player::B,
            _ => return Err(invalid("possessor must be 'A' or 'B'")),
        };

        State::try_new(a, b, possessor).map_err(|_| {
            invalid("cells must be distinct and on the board (0-7)")
        })
    }
}

/// Every valid state of the game, in a fixed order
#[derive(Debug, Clone)]
pub struct StateSet {
    states: Vec<State>,
}

impl StateSet {
    pub fn new() -> Self {
        let mut states = Vec::with_capacity(
            (GRID_CELLS as usize) * (GRID_CELLS as usize - 1) * 2,
        );
        for a in 0..GRID_CELLS {
            for b in 0..GRID_CELLS {
                if a == b {
                    continue;
                }
                for possessor in [Player::A, Player::B] {
                    states.push(State::new(a, b, possessor));
                }
            }
        }
        Self { states }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, State> {
        self.states.iter()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, state: &State) -> bool {
        self.states.contains(state)
    }
}

impl Default for StateSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}
