//! Training pipeline for the grid soccer learners

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    Error, Result,
    analysis::{ConvergencePoint, ConvergenceSeries, ConvergenceSummary},
    ports::{Learner, Observer, Step},
    q_learning::Algorithm,
    soccer::{
        Action, ActionSampler, JointAction, Player, Rewards, State, StateSet, TransitionModel,
    },
};

/// The Q-table entry whose updates are tracked for convergence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub state: State,
    pub actor: Action,
    pub opponent: Action,
}

impl Benchmark {
    pub fn joint(&self) -> JointAction {
        JointAction::new(self.actor, self.opponent)
    }

    /// Whether an update of `(state, joint)` touches this entry
    ///
    /// Learners that ignore the opponent's action match on the actor alone.
    pub fn matches(&self, state: &State, joint: JointAction, observes_opponent: bool) -> bool {
        *state == self.state
            && joint.actor == self.actor
            && (!observes_opponent || joint.opponent == self.opponent)
    }
}

impl Default for Benchmark {
    fn default() -> Self {
        Self {
            state: State::new(2, 1, Player::B),
            actor: Action::South,
            opponent: Action::Stick,
        }
    }
}

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Total number of environment steps across all episodes
    pub steps: u64,

    /// Random seed; an unseeded run draws one and reports it
    pub seed: Option<u64>,

    /// State every episode starts from
    pub start_state: State,

    /// Entry whose updates form the convergence series
    pub benchmark: Benchmark,

    /// Steps between periodic log lines
    pub log_interval: u64,

    /// Number of points averaged at each end of the series in the summary
    pub summary_window: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        let benchmark = Benchmark::default();
        Self {
            steps: 1_000_000,
            seed: None,
            start_state: benchmark.state,
            benchmark,
            log_interval: 20_000,
            summary_window: 100,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        let states = StateSet::new();
        for (role, state) in [("start", &self.start_state), ("benchmark", &self.benchmark.state)] {
            if !states.contains(state) {
                return Err(Error::InvalidConfiguration {
                    message: format!(
                        "{role} state '{state}' is not on the board or has both players in one cell"
                    ),
                });
            }
        }
        if Rewards::default().is_terminal(&self.start_state) {
            return Err(Error::InvalidConfiguration {
                message: format!("start state '{}' is already a goal", self.start_state),
            });
        }
        if self.summary_window == 0 {
            return Err(Error::InvalidConfiguration {
                message: "summary_window must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// How a single episode ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Steps taken in this episode
    pub steps: u64,
    /// Player that scored, `None` if the step budget ran out first
    pub scorer: Option<Player>,
    pub final_state: State,
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    pub algorithm: Algorithm,
    pub seed: u64,
    pub steps: u64,
    pub episodes: u64,
    pub goals_a: u64,
    pub goals_b: u64,
    pub final_benchmark_value: f64,
    pub final_learning_rate: f64,
    pub table_size: usize,
    pub summary: ConvergenceSummary,
    pub series: ConvergenceSeries,
}

impl TrainingResult {
    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| Error::Io {
            operation: format!("create summary file {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline driving one learner through random-play episodes
pub struct TrainingPipeline {
    config: TrainingConfig,
    rewards: Rewards,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            rewards: Rewards::default(),
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run training with the given learner
    ///
    /// Transitions are seeded from `seed` and the exploration policy from
    /// `seed + 1`, so a seeded run is fully reproducible.
    pub fn run(&mut self, learner: &mut dyn Learner) -> Result<TrainingResult> {
        self.config.validate()?;

        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let states = StateSet::new();
        let joint_actions = JointAction::all();
        let mut transitions = TransitionModel::build_seeded(&states, &joint_actions, seed);
        let mut sampler = ActionSampler::from_seed(seed.wrapping_add(1));

        let total_steps = self.config.steps;
        let benchmark = self.config.benchmark;
        let observes_opponent = learner.observes_opponent();

        info!(
            algorithm = learner.name(),
            steps = total_steps,
            seed,
            start = %self.config.start_state,
            benchmark = %format!("{} {}", benchmark.state, benchmark.joint()),
            "starting training"
        );

        for observer in &mut self.observers {
            observer.on_training_start(total_steps)?;
        }

        let mut series = ConvergenceSeries::new();
        let mut step_index = 0u64;
        let mut episodes = 0u64;
        let mut goals_a = 0u64;
        let mut goals_b = 0u64;

        while step_index < total_steps {
            for observer in &mut self.observers {
                observer.on_episode_start(episodes)?;
            }

            let mut state = self.config.start_state;
            let mut episode_steps = 0u64;
            let mut scorer = None;

            while step_index < total_steps {
                let before = learner.value(&benchmark.state, benchmark.joint());
                let joint = sampler.next_joint_action();
                let next_state = transitions.next_state(&state, joint)?;
                let reward_a = self.rewards.reward_for_a(&next_state);
                let reward_b = self.rewards.reward_for_b(&next_state);
                let done = reward_a != 0.0 || reward_b != 0.0;

                let step = Step {
                    state,
                    joint,
                    next_state,
                    reward_a,
                    reward_b,
                    done,
                };
                learner.update(&step)?;

                for observer in &mut self.observers {
                    observer.on_step(step_index, &step)?;
                }

                if benchmark.matches(&state, joint, observes_opponent) {
                    let after = learner.value(&benchmark.state, benchmark.joint());
                    let point = ConvergencePoint {
                        step: step_index,
                        difference: (after - before).abs(),
                    };
                    series.push(point);
                    for observer in &mut self.observers {
                        observer.on_benchmark_update(point)?;
                    }
                }

                step_index += 1;
                episode_steps += 1;
                state = next_state;

                if done {
                    scorer = self.rewards.scorer(&next_state);
                    break;
                }
            }

            match scorer {
                Some(Player::A) => goals_a += 1,
                Some(Player::B) => goals_b += 1,
                None => {}
            }

            let summary = EpisodeSummary {
                steps: episode_steps,
                scorer,
                final_state: state,
            };
            for observer in &mut self.observers {
                observer.on_episode_end(episodes, &summary)?;
            }
            episodes += 1;
        }

        if series.is_empty() && total_steps > 0 {
            warn!(
                benchmark = %benchmark.state,
                "benchmark entry was never updated during training"
            );
        }

        let result = TrainingResult {
            algorithm: learner.algorithm(),
            seed,
            steps: step_index,
            episodes,
            goals_a,
            goals_b,
            final_benchmark_value: learner.value(&benchmark.state, benchmark.joint()),
            final_learning_rate: learner.learning_rate(),
            table_size: learner.table_size(),
            summary: series.summary(self.config.summary_window),
            series,
        };

        for observer in &mut self.observers {
            observer.on_training_end(&result)?;
        }

        info!(
            algorithm = learner.name(),
            episodes = result.episodes,
            goals_a = result.goals_a,
            goals_b = result.goals_b,
            benchmark_updates = result.summary.count,
            final_alpha = result.final_learning_rate,
            "training finished"
        );

        Ok(result)
    }
}
