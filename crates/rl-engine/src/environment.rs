//! Multi-armed bandit environment: Gaussian arms, optional mean drift and
//! shadow-optimal reward tracking.

use bandit_core::{BanditError, BanditResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rng::{RandomSource, PULL_STREAM, SHADOW_STREAM};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentParams {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
    pub stationary: bool,
    /// Uses of one arm between two drift events of that arm.
    pub drift_period: u64,
    pub drift_std: f64,
    pub seed: u64,
}

impl Default for EnvironmentParams {
    fn default() -> Self {
        Self {
            means: Vec::new(),
            stds: Vec::new(),
            stationary: true,
            drift_period: 30,
            drift_std: 5.0,
            seed: 42,
        }
    }
}

impl EnvironmentParams {
    pub fn stationary(means: Vec<f64>, stds: Vec<f64>) -> Self {
        Self {
            means,
            stds,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Arm {
    true_mean: f64,
    true_std: f64,
    use_count: u64,
}

impl Arm {
    pub fn true_mean(&self) -> f64 {
        self.true_mean
    }

    pub fn true_std(&self) -> f64 {
        self.true_std
    }

    pub fn use_count(&self) -> u64 {
        self.use_count
    }
}

pub struct BanditEnvironment {
    arms: Vec<Arm>,
    stationary: bool,
    drift_period: u64,
    drift_std: f64,
    total_pulls: u64,
    cumulative_reward: f64,
    cumulative_optimal_reward: f64,
    pull_rng: RandomSource,
    shadow_rng: RandomSource,
}

impl BanditEnvironment {
    pub fn new(params: EnvironmentParams) -> BanditResult<Self> {
        let EnvironmentParams {
            means,
            stds,
            stationary,
            drift_period,
            drift_std,
            seed,
        } = params;

        if means.len() != stds.len() {
            return Err(BanditError::invalid_config(format!(
                "{} reward means were given for {} standard deviations",
                means.len(),
                stds.len()
            )));
        }
        if means.is_empty() {
            return Err(BanditError::invalid_config(
                "an environment needs at least one arm",
            ));
        }
        if let Some(mean) = means.iter().find(|m| !m.is_finite()) {
            return Err(BanditError::invalid_config(format!(
                "arm means must be finite, got {mean}"
            )));
        }
        if let Some(std) = stds.iter().find(|s| !s.is_finite() || **s < 0.0) {
            return Err(BanditError::invalid_config(format!(
                "arm standard deviations must be finite and non-negative, got {std}"
            )));
        }
        if drift_period == 0 {
            return Err(BanditError::invalid_config(
                "drift period must be positive",
            ));
        }
        if !drift_std.is_finite() || drift_std < 0.0 {
            return Err(BanditError::invalid_config(format!(
                "drift standard deviation must be finite and non-negative, got {drift_std}"
            )));
        }

        let arms = means
            .into_iter()
            .zip(stds)
            .map(|(true_mean, true_std)| Arm {
                true_mean,
                true_std,
                use_count: 0,
            })
            .collect();

        Ok(Self {
            arms,
            stationary,
            drift_period,
            drift_std,
            total_pulls: 0,
            cumulative_reward: 0.0,
            cumulative_optimal_reward: 0.0,
            pull_rng: RandomSource::stream(seed, PULL_STREAM),
            shadow_rng: RandomSource::stream(seed, SHADOW_STREAM),
        })
    }

    /// Pull `arm_id` and return the sampled reward.
    ///
    /// Every pull also samples what the currently best arm would have paid,
    /// from a separate stream, so the shadow bookkeeping never changes the
    /// rewards observed by the caller.
    pub fn pull(&mut self, arm_id: usize) -> BanditResult<f64> {
        BanditError::check_arm(arm_id, self.arms.len())?;

        let best = &self.arms[self.best_arm()];
        let optimal = self.shadow_rng.normal(best.true_mean, best.true_std);
        self.cumulative_optimal_reward += optimal;

        let arm = &mut self.arms[arm_id];
        let reward = self.pull_rng.normal(arm.true_mean, arm.true_std);
        arm.use_count += 1;
        self.total_pulls += 1;
        self.cumulative_reward += reward;

        if !self.stationary && arm.use_count % self.drift_period == 0 {
            let previous = arm.true_mean;
            arm.true_mean = self.pull_rng.normal(previous, self.drift_std);
            debug!(
                arm_id,
                use_count = arm.use_count,
                previous,
                current = arm.true_mean,
                "arm mean drifted"
            );
        }

        Ok(reward)
    }

    /// Index of the arm with the highest true mean; ties go to the lowest index.
    pub fn best_arm(&self) -> usize {
        let mut best = 0;
        for (id, arm) in self.arms.iter().enumerate().skip(1) {
            if arm.true_mean > self.arms[best].true_mean {
                best = id;
            }
        }
        best
    }

    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    pub fn arm(&self, arm_id: usize) -> BanditResult<&Arm> {
        BanditError::check_arm(arm_id, self.arms.len())?;
        Ok(&self.arms[arm_id])
    }

    pub fn n_arms(&self) -> usize {
        self.arms.len()
    }

    pub fn true_means(&self) -> Vec<f64> {
        self.arms.iter().map(|a| a.true_mean).collect()
    }

    pub fn is_stationary(&self) -> bool {
        self.stationary
    }

    pub fn drift_period(&self) -> u64 {
        self.drift_period
    }

    pub fn drift_std(&self) -> f64 {
        self.drift_std
    }

    pub fn total_pulls(&self) -> u64 {
        self.total_pulls
    }

    pub fn cumulative_reward(&self) -> f64 {
        self.cumulative_reward
    }

    pub fn cumulative_optimal_reward(&self) -> f64 {
        self.cumulative_optimal_reward
    }

    pub fn regret(&self) -> f64 {
        self.cumulative_optimal_reward - self.cumulative_reward
    }
}
