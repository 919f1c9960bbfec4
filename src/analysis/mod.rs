//! Analysis of training runs

pub mod convergence;

pub use convergence::{ConvergencePoint, ConvergenceSeries, ConvergenceSummary};
