//! Container wiring from configuration to a finished run

use grid_soccer::{
    app::{App, LearnerConfig, RunConfig},
    q_learning::Algorithm,
};

#[test]
fn test_container_builds_runnable_pairs() {
    let app = App::for_testing().with_default_seed(42).build();
    let mut run = RunConfig::default();
    run.training.steps = 1_000;

    for algorithm in Algorithm::ALL {
        let (mut learner, mut pipeline) = app.create_run(algorithm, &run).unwrap();
        let result = pipeline.run(learner.as_mut()).unwrap();
        assert_eq!(result.seed, 42);
        assert_eq!(result.algorithm, algorithm);
        assert_eq!(learner.updates(), 1_000);
    }
}

#[test]
fn test_learner_override_applies_to_any_algorithm() {
    let app = App::new();
    let run = RunConfig {
        learner: Some(LearnerConfig::for_algorithm(Algorithm::FoeQ).with_initial_alpha(0.7)),
        ..RunConfig::default()
    };
    let (learner, _) = app.create_run(Algorithm::FriendQ, &run).unwrap();
    assert_eq!(learner.learning_rate(), 0.7);
}
