//! Application layer with dependency injection container.
//!
//! [`App`] turns a [`RunConfig`] into a learner and a training pipeline.
//!
//! ```text
//!  RunConfig ──► App ──► Box<dyn Learner>  (QTable, FriendQTable, ...)
//!                   └──► TrainingPipeline ──► TrainingResult
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use grid_soccer::app::{App, RunConfig};
//! use grid_soccer::q_learning::Algorithm;
//!
//! let app = App::new();
//! let (mut learner, mut pipeline) = app.create_run(Algorithm::FoeQ, &RunConfig::default())?;
//! let result = pipeline.run(learner.as_mut())?;
//! println!("{} benchmark updates", result.series.len());
//! # Ok::<(), grid_soccer::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::{LearnerConfig, RunConfig};
pub use container::{App, AppBuilder};
