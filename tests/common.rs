//! Common test utilities for the grid soccer test suite.

#![allow(dead_code)]

use grid_soccer::{
    app::{App, LearnerConfig},
    pipeline::TrainingConfig,
    ports::Learner,
    q_learning::Algorithm,
};

/// Seeded training configuration starting from the benchmark state.
pub fn seeded_config(steps: u64, seed: u64) -> TrainingConfig {
    TrainingConfig {
        steps,
        seed: Some(seed),
        ..TrainingConfig::default()
    }
}

/// Learner with the algorithm's default hyperparameters.
pub fn default_learner(algorithm: Algorithm) -> Box<dyn Learner> {
    App::new()
        .create_learner(algorithm, &LearnerConfig::for_algorithm(algorithm))
        .unwrap()
}
