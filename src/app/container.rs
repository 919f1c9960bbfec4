//! Dependency injection container for grid soccer runs.
//!
//! The container turns configuration into ready-to-run domain objects: a
//! boxed [`Learner`] for the requested algorithm and a [`TrainingPipeline`]
//! with the requested seed.

use super::config::{LearnerConfig, RunConfig};
use crate::{
    Result,
    pipeline::{TrainingConfig, TrainingPipeline},
    ports::Learner,
    q_learning::{Algorithm, CorrelatedQTable, FoeQTable, FriendQTable, QTable},
};

/// Application with dependency injection.
///
/// # Examples
///
/// ```
/// use grid_soccer::app::{App, LearnerConfig};
/// use grid_soccer::q_learning::Algorithm;
///
/// let app = App::new();
/// let learner = app.create_learner(
///     Algorithm::FriendQ,
///     &LearnerConfig::for_algorithm(Algorithm::FriendQ),
/// )?;
/// assert_eq!(learner.name(), "Friend-Q");
/// # Ok::<(), grid_soccer::Error>(())
/// ```
pub struct App {
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults.
    pub fn new() -> Self {
        Self { default_seed: None }
    }

    /// Create a builder for constructing app with custom defaults.
    ///
    /// Primarily used for testing with fixed seeds.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Create a learner of the given algorithm.
    ///
    /// The configuration is validated first; every learner starts with a
    /// fresh learning-rate counter.
    pub fn create_learner(
        &self,
        algorithm: Algorithm,
        config: &LearnerConfig,
    ) -> Result<Box<dyn Learner>> {
        config.validate()?;

        let gamma = config.gamma;
        let init = config.default_value;
        let rate = config.learning_rate();
        let learner: Box<dyn Learner> = match algorithm {
            Algorithm::QLearning => Box::new(QTable::new(gamma, init, rate)),
            Algorithm::FriendQ => Box::new(FriendQTable::new(gamma, init, rate)),
            Algorithm::FoeQ => Box::new(FoeQTable::new(gamma, init, rate, config.fallback_value)),
            Algorithm::CorrelatedQ => Box::new(CorrelatedQTable::new(
                gamma,
                init,
                rate,
                config.fallback_value,
            )),
        };
        Ok(learner)
    }

    /// Create a training pipeline, filling in the default seed if the
    /// configuration has none.
    pub fn create_pipeline(&self, mut config: TrainingConfig) -> Result<TrainingPipeline> {
        if config.seed.is_none() {
            config.seed = self.default_seed;
        }
        config.validate()?;
        Ok(TrainingPipeline::new(config))
    }

    /// Create both halves of a run.
    pub fn create_run(
        &self,
        algorithm: Algorithm,
        run: &RunConfig,
    ) -> Result<(Box<dyn Learner>, TrainingPipeline)> {
        let learner = self.create_learner(algorithm, &run.learner_for(algorithm))?;
        let pipeline = self.create_pipeline(run.training.clone())?;
        Ok((learner, pipeline))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom defaults.
///
/// # Examples
///
/// ```
/// use grid_soccer::app::AppBuilder;
///
/// let app = AppBuilder::new()
///     .with_default_seed(42)
///     .build();
/// ```
pub struct AppBuilder {
    default_seed: Option<u64>,
}

impl AppBuilder {
    /// Create a new app builder.
    pub fn new() -> Self {
        Self { default_seed: None }
    }

    /// Set a default random seed for every pipeline created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app with the configured defaults.
    pub fn build(self) -> App {
        App {
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_app_creates_every_learner() {
        let app = App::new();
        for algorithm in Algorithm::ALL {
            let learner = app
                .create_learner(algorithm, &LearnerConfig::for_algorithm(algorithm))
                .unwrap();
            assert_eq!(learner.algorithm(), algorithm);
            assert_eq!(learner.updates(), 0);
            assert_eq!(learner.table_size(), 0);
            assert_eq!(learner.observes_opponent(), algorithm != Algorithm::QLearning);
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let app = App::new();
        let config = LearnerConfig::default().with_gamma(-0.1);
        assert!(matches!(
            app.create_learner(Algorithm::FoeQ, &config),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_config_seed_overrides_app_default() {
        let app = App::for_testing().with_default_seed(42).build();

        let pipeline = app.create_pipeline(TrainingConfig::default()).unwrap();
        assert_eq!(pipeline.config().seed, Some(42));

        let config = TrainingConfig {
            seed: Some(123),
            ..TrainingConfig::default()
        };
        let pipeline = app.create_pipeline(config).unwrap();
        assert_eq!(pipeline.config().seed, Some(123));
    }
}
