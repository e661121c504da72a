//! Gradient bandit: arms are sampled from a softmax over learned preferences,
//! and preferences follow a stochastic gradient ascent step against a running
//! reward baseline.
//!
//! The estimator is still fed every reward so runs can be reported the same way
//! as value-based policies, but it never influences selection here.

use bandit_core::{BanditError, BanditResult};
use serde::Serialize;

use crate::environment::BanditEnvironment;
use crate::estimator::Estimator;
use crate::rng::RandomSource;
use crate::strategy::{ensure_same_arms, PullOutcome, SelectionPolicy};

/// Softmax of `preferences`, shifted by the maximum so large values cannot
/// overflow.
pub fn softmax(preferences: &[f64]) -> Vec<f64> {
    let max = preferences
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = preferences.iter().map(|&p| (p - max).exp()).collect();
    let sum: f64 = exp.iter().sum();
    exp.iter().map(|&e| e / sum).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct GradientPolicyState {
    preferences: Vec<f64>,
    baseline_reward: f64,
    observed: u64,
    step_size: f64,
}

impl GradientPolicyState {
    pub fn new(n_arms: usize, step_size: f64) -> BanditResult<Self> {
        if n_arms == 0 {
            return Err(BanditError::invalid_config(
                "a gradient policy needs at least one arm",
            ));
        }
        if !step_size.is_finite() || step_size <= 0.0 {
            return Err(BanditError::invalid_config(format!(
                "gradient step size must be finite and positive, got {step_size}"
            )));
        }
        Ok(Self {
            preferences: vec![0.0; n_arms],
            baseline_reward: 0.0,
            observed: 0,
            step_size,
        })
    }

    pub fn action_probabilities(&self) -> Vec<f64> {
        softmax(&self.preferences)
    }

    /// Sample an arm from the current action probabilities.
    pub fn sample(&self, rng: &mut RandomSource) -> usize {
        let u = rng.uniform();
        let mut cumulative = 0.0;
        let probabilities = self.action_probabilities();
        for (arm_id, p) in probabilities.iter().enumerate() {
            cumulative += p;
            if cumulative >= u {
                return arm_id;
            }
        }
        // Rounding can leave the total a hair under `u`.
        probabilities.len() - 1
    }

    /// Gradient ascent step for `reward` observed on `chosen`, then fold the
    /// reward into the baseline.
    pub fn update(&mut self, chosen: usize, reward: f64) -> BanditResult<()> {
        BanditError::check_arm(chosen, self.preferences.len())?;

        let probabilities = self.action_probabilities();
        let advantage = reward - self.baseline_reward;
        for (arm_id, (preference, pi)) in self
            .preferences
            .iter_mut()
            .zip(probabilities)
            .enumerate()
        {
            let indicator = if arm_id == chosen { 1.0 } else { 0.0 };
            *preference += self.step_size * advantage * (indicator - pi);
        }

        self.observed += 1;
        self.baseline_reward += (reward - self.baseline_reward) / self.observed as f64;
        Ok(())
    }

    pub fn preferences(&self) -> &[f64] {
        &self.preferences
    }

    pub fn baseline_reward(&self) -> f64 {
        self.baseline_reward
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }
}

pub struct GradientStrategy {
    environment: BanditEnvironment,
    estimator: Estimator,
    rng: RandomSource,
    state: GradientPolicyState,
}

impl GradientStrategy {
    pub fn new(
        environment: BanditEnvironment,
        estimator: Estimator,
        rng: RandomSource,
        step_size: f64,
    ) -> BanditResult<Self> {
        ensure_same_arms(&environment, &estimator)?;
        let state = GradientPolicyState::new(environment.n_arms(), step_size)?;
        Ok(Self {
            environment,
            estimator,
            rng,
            state,
        })
    }

    pub fn action_probabilities(&self) -> Vec<f64> {
        self.state.action_probabilities()
    }

    pub fn state(&self) -> &GradientPolicyState {
        &self.state
    }
}

impl SelectionPolicy for GradientStrategy {
    fn name(&self) -> &'static str {
        "gradient"
    }

    fn select_arm(&mut self) -> usize {
        self.state.sample(&mut self.rng)
    }

    fn select_and_pull(&mut self) -> BanditResult<PullOutcome> {
        let arm_id = self.select_arm();
        let reward = self.environment.pull(arm_id)?;
        self.state.update(arm_id, reward)?;
        self.estimator.update(arm_id, reward)?;
        Ok(PullOutcome { arm_id, reward })
    }

    fn environment(&self) -> &BanditEnvironment {
        &self.environment
    }

    fn estimator(&self) -> &Estimator {
        &self.estimator
    }
}
