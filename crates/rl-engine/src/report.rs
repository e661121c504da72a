//! Serializable snapshots of a run: everything needed to render a summary of
//! the environment and the estimator after (or during) an experiment.

use bandit_core::BanditResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::strategy::SelectionPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmReport {
    pub arm_id: usize,
    pub true_mean: f64,
    pub true_std: f64,
    pub use_count: u64,
    pub estimate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub policy: String,
    pub n_arms: usize,
    pub stationary: bool,
    pub arms: Vec<ArmReport>,
    pub total_pulls: u64,
    pub cumulative_reward: f64,
    pub cumulative_optimal_reward: f64,
    pub regret: f64,
    pub generated_at: DateTime<Utc>,
}

impl RunReport {
    pub fn capture(policy: &dyn SelectionPolicy) -> Self {
        let env = policy.environment();
        let estimates = policy.estimator().estimates();

        let arms = env
            .arms()
            .iter()
            .zip(estimates)
            .enumerate()
            .map(|(arm_id, (arm, &estimate))| ArmReport {
                arm_id,
                true_mean: arm.true_mean(),
                true_std: arm.true_std(),
                use_count: arm.use_count(),
                estimate,
            })
            .collect();

        Self {
            run_id: Uuid::new_v4(),
            policy: policy.name().to_string(),
            n_arms: env.n_arms(),
            stationary: env.is_stationary(),
            arms,
            total_pulls: env.total_pulls(),
            cumulative_reward: env.cumulative_reward(),
            cumulative_optimal_reward: env.cumulative_optimal_reward(),
            regret: env.regret(),
            generated_at: Utc::now(),
        }
    }

    pub fn to_json_pretty(&self) -> BanditResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
