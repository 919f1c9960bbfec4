//! Configuration types for learner creation and training runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    pipeline::TrainingConfig,
    q_learning::{Algorithm, DecayKind, LearningRate},
};

/// Hyperparameters of one learner.
///
/// Builder-style, with per-algorithm defaults from
/// [`LearnerConfig::for_algorithm`].
///
/// # Examples
///
/// ```
/// use grid_soccer::app::LearnerConfig;
/// use grid_soccer::q_learning::Algorithm;
///
/// let config = LearnerConfig::for_algorithm(Algorithm::FoeQ)
///     .with_initial_alpha(0.5)
///     .with_gamma(0.95);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerConfig {
    /// Learning rate before any update
    pub initial_alpha: f64,
    /// Decay coefficient of the learning rate schedule
    pub decay: f64,
    /// Lower bound on the learning rate
    pub alpha_floor: f64,
    pub schedule: DecayKind,
    /// Discount factor γ
    pub gamma: f64,
    /// Value of every entry not yet written
    pub default_value: f64,
    /// Successor value substituted when an LP does not solve
    pub fallback_value: f64,
}

impl LearnerConfig {
    /// Defaults tuned per algorithm.
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        let (initial_alpha, decay, alpha_floor, schedule) = match algorithm {
            Algorithm::QLearning => (0.001, 1e-5, 0.001, DecayKind::Hyperbolic),
            Algorithm::FriendQ => (0.2, 1e-5, 0.0001, DecayKind::Hyperbolic),
            Algorithm::FoeQ => (0.2, 1e-5, 0.001, DecayKind::Hyperbolic),
            Algorithm::CorrelatedQ => (0.2, 1e-10, 0.001, DecayKind::Compounding),
        };
        Self {
            initial_alpha,
            decay,
            alpha_floor,
            schedule,
            gamma: 0.9,
            default_value: 1.0,
            fallback_value: 1.0,
        }
    }

    pub fn with_initial_alpha(mut self, alpha: f64) -> Self {
        self.initial_alpha = alpha;
        self
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_alpha_floor(mut self, floor: f64) -> Self {
        self.alpha_floor = floor;
        self
    }

    pub fn with_schedule(mut self, schedule: DecayKind) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_default_value(mut self, value: f64) -> Self {
        self.default_value = value;
        self
    }

    pub fn with_fallback_value(mut self, value: f64) -> Self {
        self.fallback_value = value;
        self
    }

    /// Fresh learning rate built from this configuration.
    pub fn learning_rate(&self) -> LearningRate {
        LearningRate::new(self.initial_alpha, self.decay, self.alpha_floor, self.schedule)
    }

    /// Reject parameters that would make the backup meaningless.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfiguration { message });

        if !(self.initial_alpha > 0.0 && self.initial_alpha <= 1.0) {
            return invalid(format!("initial_alpha must be in (0, 1], got {}", self.initial_alpha));
        }
        if !(self.alpha_floor >= 0.0 && self.alpha_floor <= 1.0) {
            return invalid(format!("alpha_floor must be in [0, 1], got {}", self.alpha_floor));
        }
        if !(self.decay >= 0.0 && self.decay.is_finite()) {
            return invalid(format!("decay must be non-negative, got {}", self.decay));
        }
        if !(self.gamma >= 0.0 && self.gamma <= 1.0) {
            return invalid(format!("gamma must be in [0, 1], got {}", self.gamma));
        }
        if !self.default_value.is_finite() || !self.fallback_value.is_finite() {
            return invalid("default_value and fallback_value must be finite".to_string());
        }
        Ok(())
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self::for_algorithm(Algorithm::FoeQ)
    }
}

/// Complete description of one run, loadable from JSON.
///
/// Missing sections fall back to their defaults, so a file may carry only
/// the values it wants to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub training: TrainingConfig,
    /// Overrides the algorithm's defaults when present
    pub learner: Option<LearnerConfig>,
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open config file {}", path.display()),
            source,
        })?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    /// Learner settings for `algorithm`, honoring any override in the file.
    pub fn learner_for(&self, algorithm: Algorithm) -> LearnerConfig {
        self.learner
            .clone()
            .unwrap_or_else(|| LearnerConfig::for_algorithm(algorithm))
    }
}
