//! Multi-agent Q-learning on a two-player grid soccer game
//!
//! This crate provides:
//! - The 2x4 soccer environment with its stochastic collision rules
//! - Independent Q-learning, Friend-Q, Foe-Q and Correlated-Q tables
//! - Minimax and correlated-equilibrium solvers backed by linear programming
//! - A random-play training pipeline that tracks convergence of one Q-value
//! - CSV/JSON export and the `soccer` command-line interface

pub mod analysis;
pub mod app;
pub mod cli;
pub mod equilibrium;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod soccer;

pub use analysis::{ConvergencePoint, ConvergenceSeries, ConvergenceSummary};
pub use error::{Error, Result};
pub use q_learning::{Algorithm, CorrelatedQTable, FoeQTable, FriendQTable, QTable};
pub use soccer::{Action, JointAction, Player, State};
