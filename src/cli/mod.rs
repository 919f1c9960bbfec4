//! CLI infrastructure for the grid soccer toolkit
//!
//! This module provides the command-line interface for training learners,
//! inspecting the transition model, and checking the equilibrium solvers.

pub mod commands;
pub mod output;
