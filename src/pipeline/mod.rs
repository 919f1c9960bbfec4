//! Training pipeline abstractions
//!
//! This module provides:
//! - The random-play training loop shared by all four learners
//! - Observers that report progress while training runs

pub mod observers;
pub mod training;

// Re-export observer implementations (adapters)
pub use observers::{LoggingObserver, MetricsObserver, ProgressObserver};
pub use training::{Benchmark, EpisodeSummary, TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Learner, Observer};
