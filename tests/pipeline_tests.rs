//! End-to-end tests for the training pipeline

mod common;

use std::sync::{Arc, Mutex};

use grid_soccer::{
    Result,
    analysis::ConvergencePoint,
    pipeline::{Benchmark, MetricsObserver, TrainingPipeline, TrainingResult},
    ports::{Observer, Step},
    q_learning::Algorithm,
};

use common::{default_learner, seeded_config};

/// Records the global index of every step that hit the benchmark key
struct BenchmarkVisits {
    benchmark: Benchmark,
    visits: Arc<Mutex<Vec<u64>>>,
}

impl Observer for BenchmarkVisits {
    fn on_step(&mut self, index: u64, step: &Step) -> Result<()> {
        if step.state == self.benchmark.state && step.joint == self.benchmark.joint() {
            self.visits.lock().unwrap().push(index);
        }
        Ok(())
    }
}

struct Collect(Arc<Mutex<Vec<ConvergencePoint>>>);

impl Observer for Collect {
    fn on_benchmark_update(&mut self, point: ConvergencePoint) -> Result<()> {
        self.0.lock().unwrap().push(point);
        Ok(())
    }
}

fn run(algorithm: Algorithm, steps: u64, seed: u64) -> TrainingResult {
    let mut learner = default_learner(algorithm);
    TrainingPipeline::new(seeded_config(steps, seed))
        .run(learner.as_mut())
        .unwrap()
}

#[test]
fn test_every_algorithm_trains_and_records_benchmark() {
    for algorithm in Algorithm::ALL {
        let result = run(algorithm, 2_000, 11);

        assert_eq!(result.algorithm, algorithm);
        assert_eq!(result.steps, 2_000);
        assert!(result.episodes > 0);
        assert!(!result.series.is_empty(), "{algorithm} never hit the benchmark");
        for point in result.series.points() {
            assert!(point.difference.is_finite());
            assert!(point.difference >= 0.0);
        }
        assert!(result.final_benchmark_value.is_finite());
    }
}

#[test]
fn test_joint_learners_record_exactly_the_benchmark_visits() {
    let benchmark = Benchmark::default();
    let visits = Arc::new(Mutex::new(Vec::new()));
    let mut learner = default_learner(Algorithm::FoeQ);

    let result = TrainingPipeline::new(seeded_config(20_000, 3))
        .with_observer(Box::new(BenchmarkVisits {
            benchmark,
            visits: Arc::clone(&visits),
        }))
        .run(learner.as_mut())
        .unwrap();

    let steps: Vec<u64> = result.series.points().iter().map(|p| p.step).collect();
    assert_eq!(steps, *visits.lock().unwrap());
}

#[test]
fn test_independent_learner_matches_on_own_action_only() {
    // Trajectories depend only on the seed, not on the learner
    let q = run(Algorithm::QLearning, 20_000, 5);
    let friend = run(Algorithm::FriendQ, 20_000, 5);

    assert_eq!(q.episodes, friend.episodes);
    assert!(q.series.len() > friend.series.len());
    let q_steps: Vec<u64> = q.series.points().iter().map(|p| p.step).collect();
    for point in friend.series.points() {
        assert!(q_steps.binary_search(&point.step).is_ok());
    }
}

#[test]
fn test_observer_sees_the_same_series_as_the_result() {
    let points = Arc::new(Mutex::new(Vec::new()));
    let mut learner = default_learner(Algorithm::CorrelatedQ);

    let result = TrainingPipeline::new(seeded_config(3_000, 8))
        .with_observer(Box::new(Collect(Arc::clone(&points))))
        .with_observer(Box::new(MetricsObserver::new()))
        .run(learner.as_mut())
        .unwrap();

    assert_eq!(result.steps, 3_000);
    assert_eq!(result.series.points(), points.lock().unwrap().as_slice());
}

#[test]
fn test_correlated_q_survives_long_runs_across_seeds() {
    for seed in 1..=5 {
        let result = run(Algorithm::CorrelatedQ, 20_000, seed);

        assert_eq!(result.steps, 20_000, "seed {seed}");
        assert!(result.final_benchmark_value.is_finite(), "seed {seed}");
        assert!(
            result
                .series
                .points()
                .iter()
                .all(|p| p.difference.is_finite() && p.difference >= 0.0),
            "seed {seed}"
        );
    }
}

#[test]
fn test_differences_vanish_as_learning_rate_collapses() {
    use grid_soccer::app::{App, LearnerConfig};

    let config = LearnerConfig::for_algorithm(Algorithm::FoeQ)
        .with_decay(1.0)
        .with_alpha_floor(0.0);
    let mut learner = App::new().create_learner(Algorithm::FoeQ, &config).unwrap();

    let mut training = seeded_config(50_000, 21);
    training.summary_window = 20;
    let result = TrainingPipeline::new(training)
        .run(learner.as_mut())
        .unwrap();

    assert!(result.summary.count > 40);
    assert!(result.summary.last_window_mean < 1e-2);
    assert!(result.final_learning_rate < 1e-4);
}

/// Full-length Foe-Q run with the default schedule; run with `--ignored --release`
#[test]
#[ignore = "one million LP-backed steps"]
fn test_foe_q_benchmark_converges_with_default_schedule() {
    let result = run(Algorithm::FoeQ, 1_000_000, 7);

    assert!(result.series.len() > 1_000);
    assert!(result.series.points().iter().all(|p| p.difference >= 0.0));
    assert!(
        result.summary.is_converging(),
        "first {} mean {} vs last {} mean {}",
        result.summary.window,
        result.summary.first_window_mean,
        result.summary.window,
        result.summary.last_window_mean
    );
}

#[test]
fn test_goals_account_for_finished_episodes() {
    let result = run(Algorithm::FriendQ, 10_000, 17);
    let scored = result.goals_a + result.goals_b;
    // Only the last episode can be cut off by the step budget
    assert!(scored == result.episodes || scored + 1 == result.episodes);
}
