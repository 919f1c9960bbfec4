//! Subcommands of the `soccer` binary

pub mod solve;
pub mod train;
pub mod transitions;
