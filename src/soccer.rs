//! Two-player grid soccer environment

pub mod action;
pub mod rewards;
pub mod state;
pub mod transition;

pub use action::{Action, ActionSampler, JointAction};
pub use rewards::Rewards;
pub use state::{GRID_CELLS, GRID_COLUMNS, Player, State, StateSet};
pub use transition::{CollisionKind, Resolution, TransitionModel, resolve, target_cell};
