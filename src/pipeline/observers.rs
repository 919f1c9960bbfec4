//! Observer implementations for the training pipeline

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::training::{EpisodeSummary, TrainingResult};
use crate::{
    Result,
    analysis::ConvergencePoint,
    ports::{Observer, Step},
    soccer::Player,
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    goals_a: u64,
    goals_b: u64,
    refresh_every: u64,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            goals_a: 0,
            goals_b: 0,
            refresh_every: 1_000,
        }
    }

    fn message(&self) -> String {
        format!("A:{} B:{}", self.goals_a, self.goals_b)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_steps: u64) -> Result<()> {
        let pb = ProgressBar::new(total_steps);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} steps (goals {msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_step(&mut self, index: u64, _step: &Step) -> Result<()> {
        if (index + 1).is_multiple_of(self.refresh_every) {
            if let Some(pb) = &self.progress_bar {
                pb.set_position(index + 1);
            }
        }
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: u64, summary: &EpisodeSummary) -> Result<()> {
        match summary.scorer {
            Some(Player::A) => self.goals_a += 1,
            Some(Player::B) => self.goals_b += 1,
            None => {}
        }
        if let Some(pb) = &self.progress_bar {
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self, result: &TrainingResult) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(result.steps);
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Emits an `info` event every `interval` steps with the latest benchmark
/// difference
pub struct LoggingObserver {
    interval: u64,
    latest: Option<ConvergencePoint>,
    updates: u64,
    episodes: u64,
}

impl LoggingObserver {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            latest: None,
            updates: 0,
            episodes: 0,
        }
    }
}

impl Observer for LoggingObserver {
    fn on_step(&mut self, index: u64, _step: &Step) -> Result<()> {
        if index.is_multiple_of(self.interval) {
            match self.latest {
                Some(point) => info!(
                    step = index,
                    episodes = self.episodes,
                    benchmark_updates = self.updates,
                    last_update_step = point.step,
                    difference = point.difference,
                    "training progress"
                ),
                None => info!(
                    step = index,
                    episodes = self.episodes,
                    "training progress, benchmark not yet updated"
                ),
            }
        }
        Ok(())
    }

    fn on_benchmark_update(&mut self, point: ConvergencePoint) -> Result<()> {
        self.latest = Some(point);
        self.updates += 1;
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: u64, _summary: &EpisodeSummary) -> Result<()> {
        self.episodes += 1;
        Ok(())
    }
}

/// Episode-length statistics
#[derive(Debug, Default)]
pub struct MetricsObserver {
    episode_lengths: Vec<u64>,
    goals_a: u64,
    goals_b: u64,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn episodes(&self) -> usize {
        self.episode_lengths.len()
    }

    pub fn goals(&self) -> (u64, u64) {
        (self.goals_a, self.goals_b)
    }

    /// Mean number of steps per episode
    pub fn avg_episode_length(&self) -> f64 {
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            self.episode_lengths.iter().sum::<u64>() as f64 / self.episode_lengths.len() as f64
        }
    }

    pub fn longest_episode(&self) -> u64 {
        self.episode_lengths.iter().copied().max().unwrap_or(0)
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: u64, summary: &EpisodeSummary) -> Result<()> {
        self.episode_lengths.push(summary.steps);
        match summary.scorer {
            Some(Player::A) => self.goals_a += 1,
            Some(Player::B) => self.goals_b += 1,
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soccer::State;

    fn summary(steps: u64, scorer: Option<Player>) -> EpisodeSummary {
        EpisodeSummary {
            steps,
            scorer,
            final_state: State::new(0, 2, Player::A),
        }
    }

    #[test]
    fn test_metrics_observer() {
        let mut observer = MetricsObserver::new();
        observer.on_episode_end(0, &summary(4, Some(Player::A))).unwrap();
        observer.on_episode_end(1, &summary(8, Some(Player::B))).unwrap();
        observer.on_episode_end(2, &summary(3, None)).unwrap();

        assert_eq!(observer.episodes(), 3);
        assert_eq!(observer.goals(), (1, 1));
        assert!((observer.avg_episode_length() - 5.0).abs() < 1e-12);
        assert_eq!(observer.longest_episode(), 8);
    }

    #[test]
    fn test_logging_observer_tracks_latest_update() {
        let mut observer = LoggingObserver::new(0);
        assert_eq!(observer.interval, 1);
        observer
            .on_benchmark_update(ConvergencePoint {
                step: 12,
                difference: 0.5,
            })
            .unwrap();
        assert_eq!(observer.updates, 1);
        assert_eq!(observer.latest.map(|p| p.step), Some(12));
    }
}
