//! Export of training results
//!
//! Convergence series go to CSV; the full [`TrainingResult`] summary is
//! written as JSON by [`TrainingResult::save`].
//!
//! [`TrainingResult`]: crate::pipeline::TrainingResult
//! [`TrainingResult::save`]: crate::pipeline::TrainingResult::save

mod convergence_csv;

pub use convergence_csv::{ConvergenceCsvObserver, write_convergence, write_convergence_csv};
