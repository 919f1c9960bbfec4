//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling the training
//! loop to specific output formats.

use crate::{
    Result,
    analysis::ConvergencePoint,
    pipeline::{EpisodeSummary, TrainingResult},
    ports::Step,
};

/// Observer trait for monitoring training
///
/// Observers can be composed to collect different types of data during
/// training, for example a progress bar, periodic log lines or a streamed
/// CSV of benchmark differences.
///
/// # Event Sequence
///
/// 1. `on_training_start(total_steps)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - For each step: `on_step(index, step)`, then
///      `on_benchmark_update(point)` if the benchmark entry was updated
///    - `on_episode_end(episode, summary)`
/// 3. `on_training_end(result)` - Once at the end
///
/// The last episode may be cut short by the step budget; it still gets an
/// `on_episode_end` call.
///
/// # Examples
///
/// ```no_run
/// use grid_soccer::{analysis::ConvergencePoint, ports::Observer};
///
/// struct LargestChange {
///     largest: f64,
/// }
///
/// impl Observer for LargestChange {
///     fn on_benchmark_update(&mut self, point: ConvergencePoint) -> grid_soccer::Result<()> {
///         self.largest = self.largest.max(point.difference);
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_training_start(&mut self, _total_steps: u64) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts (0-based).
    fn on_episode_start(&mut self, _episode: u64) -> Result<()> {
        Ok(())
    }

    /// Called after the learner has applied the update for `step`.
    ///
    /// `index` is the global step index (0-based).
    fn on_step(&mut self, _index: u64, _step: &Step) -> Result<()> {
        Ok(())
    }

    /// Called when the benchmark entry changed during the last update.
    fn on_benchmark_update(&mut self, _point: ConvergencePoint) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends.
    fn on_episode_end(&mut self, _episode: u64, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// This is the last method called in the observation lifecycle.
    /// Use this to flush outputs or display summaries.
    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        Ok(())
    }
}
