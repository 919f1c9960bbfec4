//! Learner port - the value-update contract shared by all four tables
//!
//! The training loop only talks to a table through this trait: it asks for
//! the benchmark value before and after a step and hands over one observed
//! transition per call.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    q_learning::Algorithm,
    soccer::{JointAction, State},
};

/// One observed transition, as seen by the learner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub state: State,
    pub joint: JointAction,
    pub next_state: State,
    pub reward_a: f64,
    pub reward_b: f64,
    /// Whether `next_state` ended the episode
    pub done: bool,
}

/// Learner trait - unified interface for the Q-value update rules
///
/// # Examples
///
/// ```no_run
/// use grid_soccer::ports::{Learner, Step};
///
/// fn replay(learner: &mut dyn Learner, steps: &[Step]) -> grid_soccer::Result<()> {
///     for step in steps {
///         learner.update(step)?;
///     }
///     Ok(())
/// }
/// ```
pub trait Learner: Send {
    /// Apply one backup for `step.state` and the joint action taken there.
    ///
    /// Advances the learner's learning-rate counter exactly once.
    fn update(&mut self, step: &Step) -> Result<()>;

    /// Player A's current value for `(state, joint)`.
    ///
    /// Learners that do not model the opponent ignore `joint.opponent`.
    fn value(&self, state: &State, joint: JointAction) -> f64;

    /// Whether values are keyed on the opponent's action as well.
    ///
    /// # Default Implementation
    ///
    /// Returns `true`.
    fn observes_opponent(&self) -> bool {
        true
    }

    /// Which update rule this learner implements.
    fn algorithm(&self) -> Algorithm;

    /// Human-readable name used in logs and summaries.
    fn name(&self) -> &str {
        self.algorithm().label()
    }

    /// Learning rate that the next update will use.
    fn learning_rate(&self) -> f64;

    /// Number of updates applied so far.
    fn updates(&self) -> u64;

    /// Number of stored (non-default) entries across the learner's tables.
    fn table_size(&self) -> usize;
}
