//! Standard testbed construction and multi-trial experiment runner.

use bandit_core::{BanditError, BanditResult, ExperimentConfig, PolicyKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::environment::{BanditEnvironment, EnvironmentParams};
use crate::estimator::Estimator;
use crate::gradient::GradientStrategy;
use crate::greedy::GreedyStrategy;
use crate::report::RunReport;
use crate::rng::{RandomSource, POLICY_STREAM, TESTBED_STREAM};
use crate::strategy::SelectionPolicy;
use crate::ucb::Ucb1Strategy;

/// Environment parameters of the standard testbed: arm means drawn from
/// `Normal(0, 1)`, every arm with unit standard deviation.
pub fn standard_testbed(config: &ExperimentConfig, seed: u64) -> EnvironmentParams {
    let mut rng = RandomSource::stream(seed, TESTBED_STREAM);
    let means = (0..config.n_arms).map(|_| rng.normal(0.0, 1.0)).collect();
    EnvironmentParams {
        means,
        stds: vec![1.0; config.n_arms],
        stationary: !config.non_stationary,
        drift_period: config.drift_period,
        drift_std: config.drift_std,
        seed,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentSummary {
    pub experiment_id: Uuid,
    pub policy: PolicyKind,
    pub trials: usize,
    pub n_pulls: usize,
    pub mean_cumulative_reward: f64,
    pub mean_cumulative_optimal_reward: f64,
    pub mean_regret: f64,
    pub last_trial: RunReport,
    pub completed_at: DateTime<Utc>,
}

pub struct Experiment {
    config: ExperimentConfig,
}

impl Experiment {
    pub fn from_config(config: ExperimentConfig) -> BanditResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Seed of trial `trial`; trial 0 uses the experiment seed itself.
    pub fn trial_seed(&self, trial: usize) -> u64 {
        self.config.seed.wrapping_add(trial as u64)
    }

    /// Fresh environment, estimator and policy for one trial.
    pub fn build_policy(&self, seed: u64) -> BanditResult<Box<dyn SelectionPolicy>> {
        let config = &self.config;
        let environment = BanditEnvironment::new(standard_testbed(config, seed))?;
        let estimator = Estimator::new(
            config.n_arms,
            !config.non_stationary,
            config.initial_value,
            config.estimator_step_size,
        )?;
        let rng = RandomSource::stream(seed, POLICY_STREAM);

        let policy: Box<dyn SelectionPolicy> = match config.policy {
            PolicyKind::Greedy => Box::new(GreedyStrategy::new(environment, estimator, rng)?),
            PolicyKind::Ucb1 => Box::new(Ucb1Strategy::new(
                environment,
                estimator,
                rng,
                config.degree_of_exploration,
            )?),
            PolicyKind::Gradient => Box::new(GradientStrategy::new(
                environment,
                estimator,
                rng,
                config.gradient_step_size,
            )?),
        };
        Ok(policy)
    }

    pub fn run_trial(&self, trial: usize) -> BanditResult<RunReport> {
        let seed = self.trial_seed(trial);
        let mut policy = self.build_policy(seed)?;
        debug!(
            trial,
            seed,
            policy = policy.name(),
            true_means = ?policy.environment().true_means(),
            "trial started"
        );

        policy.run_strategy(self.config.n_pulls)?;

        let report = RunReport::capture(policy.as_ref());
        debug!(
            trial,
            cumulative_reward = report.cumulative_reward,
            regret = report.regret,
            "trial finished"
        );
        Ok(report)
    }

    pub fn run(&self) -> BanditResult<ExperimentSummary> {
        let trials = self.config.trials;
        info!(
            policy = %self.config.policy,
            n_arms = self.config.n_arms,
            n_pulls = self.config.n_pulls,
            trials,
            stationary = !self.config.non_stationary,
            "running experiment"
        );

        let mut reward = 0.0;
        let mut optimal = 0.0;
        let mut last = None;
        for trial in 0..trials {
            let report = self.run_trial(trial)?;
            reward += report.cumulative_reward;
            optimal += report.cumulative_optimal_reward;
            last = Some(report);
        }

        // `validate` guarantees at least one trial ran.
        let Some(last_trial) = last else {
            return Err(BanditError::invalid_config(
                "at least one trial is required",
            ));
        };

        let n = trials as f64;
        let summary = ExperimentSummary {
            experiment_id: Uuid::new_v4(),
            policy: self.config.policy,
            trials,
            n_pulls: self.config.n_pulls,
            mean_cumulative_reward: reward / n,
            mean_cumulative_optimal_reward: optimal / n,
            mean_regret: (optimal - reward) / n,
            last_trial,
            completed_at: Utc::now(),
        };

        info!(
            experiment_id = %summary.experiment_id,
            mean_reward = summary.mean_cumulative_reward,
            mean_regret = summary.mean_regret,
            "experiment complete"
        );
        Ok(summary)
    }
}
