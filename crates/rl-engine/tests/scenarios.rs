//! End-to-end scenarios driving environments, estimators and policies together.

use bandit_core::{ExperimentConfig, PolicyKind};
use bandit_rl_engine::{
    BanditEnvironment, EnvironmentParams, Estimator, Experiment, GradientStrategy,
    GreedyStrategy, RandomSource, SelectionPolicy, Ucb1Strategy,
};

fn deterministic_env(means: Vec<f64>) -> BanditEnvironment {
    let stds = vec![0.0; means.len()];
    BanditEnvironment::new(EnvironmentParams::stationary(means, stds)).unwrap()
}

#[test]
fn test_deterministic_arm_estimate_is_exact_after_first_pull() {
    let mut env = deterministic_env(vec![10.0, 8.0]);
    let mut estimator = Estimator::new(2, true, 0.0, 0.1).unwrap();

    let mut rewards = Vec::new();
    for _ in 0..5 {
        let reward = env.pull(0).unwrap();
        estimator.update(0, reward).unwrap();
        assert_eq!(estimator.estimate(0).unwrap(), 10.0);
        rewards.push(reward);
    }
    assert_eq!(rewards, vec![10.0; 5]);
    assert_eq!(env.cumulative_reward(), 50.0);
}

#[test]
fn test_ucb1_cold_start_spends_entire_budget() {
    let env = deterministic_env(vec![1.0, 2.0, 3.0]);
    let estimator = Estimator::sample_average(3).unwrap();
    let mut ucb = Ucb1Strategy::new(env, estimator, RandomSource::seeded(0), 1.0).unwrap();

    let order: Vec<usize> = (0..3)
        .map(|_| ucb.select_and_pull().unwrap().arm_id)
        .collect();

    assert_eq!(order, vec![0, 1, 2]);
    assert_eq!(ucb.environment().cumulative_reward(), 6.0);
}

#[test]
fn test_exploring_policies_converge_on_clear_winner() {
    let means = vec![0.0, 0.5, 2.0, 1.0];
    let stds = vec![1.0; 4];
    let params = EnvironmentParams {
        seed: 2024,
        ..EnvironmentParams::stationary(means, stds)
    };

    let policies: Vec<Box<dyn SelectionPolicy>> = vec![
        Box::new(
            Ucb1Strategy::new(
                BanditEnvironment::new(params.clone()).unwrap(),
                Estimator::sample_average(4).unwrap(),
                RandomSource::seeded(2),
                1.0,
            )
            .unwrap(),
        ),
        Box::new(
            GradientStrategy::new(
                BanditEnvironment::new(params).unwrap(),
                Estimator::sample_average(4).unwrap(),
                RandomSource::seeded(3),
                0.1,
            )
            .unwrap(),
        ),
    ];

    for mut policy in policies {
        policy.run_strategy(2000).unwrap();
        let uses = policy.estimator().use_counts();
        assert_eq!(policy.environment().total_pulls(), 2000);
        assert!(
            uses[2] > 1000,
            "{} pulled the best arm only {} times: {uses:?}",
            policy.name(),
            uses[2]
        );
    }
}

#[test]
fn test_regret_is_non_negative_on_average() {
    for policy in [PolicyKind::Greedy, PolicyKind::Ucb1, PolicyKind::Gradient] {
        let experiment = Experiment::from_config(ExperimentConfig {
            n_arms: 10,
            n_pulls: 100,
            trials: 200,
            policy,
            seed: 7,
            ..Default::default()
        })
        .unwrap();
        let summary = experiment.run().unwrap();
        assert!(
            summary.mean_regret >= 0.0,
            "{policy} mean regret {}",
            summary.mean_regret
        );
        assert!(
            (summary.mean_cumulative_optimal_reward
                - summary.mean_cumulative_reward
                - summary.mean_regret)
                .abs()
                < 1e-9
        );
    }
}

#[test]
fn test_non_stationary_experiment_runs_with_drift() {
    let experiment = Experiment::from_config(ExperimentConfig {
        n_arms: 3,
        n_pulls: 300,
        non_stationary: true,
        drift_period: 10,
        drift_std: 1.0,
        policy: PolicyKind::Ucb1,
        ..Default::default()
    })
    .unwrap();

    let initial_means = experiment
        .build_policy(experiment.trial_seed(0))
        .unwrap()
        .environment()
        .true_means();
    let report = experiment.run_trial(0).unwrap();

    assert!(!report.stationary);
    assert_eq!(report.total_pulls, 300);
    let final_means: Vec<f64> = report.arms.iter().map(|a| a.true_mean).collect();
    assert_ne!(initial_means, final_means);
    for arm in &report.arms {
        assert_eq!(arm.true_std, 1.0);
    }
}

#[test]
fn test_optimistic_greedy_settles_on_best_deterministic_arm() {
    let env = deterministic_env(vec![1.0, 3.0, 2.0]);
    let estimator = Estimator::new(3, true, 10.0, 0.1).unwrap();
    let mut greedy = GreedyStrategy::new(env, estimator, RandomSource::seeded(31)).unwrap();

    greedy.run_strategy(50).unwrap();

    assert_eq!(greedy.estimator().use_counts(), &[1, 48, 1]);
    assert_eq!(greedy.estimator().estimates(), &[1.0, 3.0, 2.0]);
    assert_eq!(greedy.environment().regret(), 3.0);
}
