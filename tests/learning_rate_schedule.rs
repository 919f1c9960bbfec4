//! Learning-rate behavior of every table under real transitions

mod common;

use grid_soccer::{
    app::{App, LearnerConfig},
    ports::Step,
    q_learning::Algorithm,
    soccer::{ActionSampler, JointAction, Rewards, State, StateSet, TransitionModel},
};

#[test]
fn test_alpha_is_monotone_and_reaches_floor_for_every_algorithm() {
    let states = StateSet::new();
    let rewards = Rewards::default();

    for algorithm in Algorithm::ALL {
        let config = LearnerConfig::for_algorithm(algorithm)
            .with_initial_alpha(0.2)
            .with_decay(0.01)
            .with_alpha_floor(0.05);
        let mut learner = App::new().create_learner(algorithm, &config).unwrap();
        let mut transitions = TransitionModel::build_seeded(&states, &JointAction::all(), 1);
        let mut sampler = ActionSampler::from_seed(2);

        let start = State::new(2, 1, grid_soccer::Player::B);
        let mut state = start;
        let mut previous = learner.learning_rate();
        assert_eq!(previous, 0.2);

        for _ in 0..1_000 {
            let joint = sampler.next_joint_action();
            let next_state = transitions.next_state(&state, joint).unwrap();
            let step = Step {
                state,
                joint,
                next_state,
                reward_a: rewards.reward_for_a(&next_state),
                reward_b: rewards.reward_for_b(&next_state),
                done: rewards.is_terminal(&next_state),
            };
            learner.update(&step).unwrap();

            let alpha = learner.learning_rate();
            assert!(alpha <= previous, "{algorithm}: {alpha} > {previous}");
            assert!(alpha >= 0.05, "{algorithm}: {alpha} below floor");
            previous = alpha;

            state = if step.done { start } else { next_state };
        }

        assert_eq!(learner.updates(), 1_000);
        assert_eq!(learner.learning_rate(), 0.05, "{algorithm} never reached its floor");
    }
}

#[test]
fn test_default_q_learning_starts_at_its_floor() {
    let learner = common::default_learner(Algorithm::QLearning);
    assert_eq!(learner.learning_rate(), 0.001);
}
