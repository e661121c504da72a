use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BanditError, BanditResult};

/// Action-selection policy driving an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum PolicyKind {
    Greedy,
    #[default]
    Ucb1,
    Gradient,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Greedy => "greedy",
            PolicyKind::Ucb1 => "ucb1",
            PolicyKind::Gradient => "gradient",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = BanditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(PolicyKind::Greedy),
            "ucb1" | "ucb" => Ok(PolicyKind::Ucb1),
            "gradient" | "softmax" => Ok(PolicyKind::Gradient),
            other => Err(BanditError::invalid_config(format!(
                "unknown policy '{other}', expected one of greedy, ucb1, gradient"
            ))),
        }
    }
}

/// Root experiment configuration. Loaded from environment variables
/// with the prefix `BANDIT_TESTBED__`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    #[serde(default = "default_n_arms")]
    pub n_arms: usize,
    #[serde(default = "default_n_pulls")]
    pub n_pulls: usize,
    #[serde(default = "default_trials")]
    pub trials: usize,
    #[serde(default)]
    pub non_stationary: bool,
    #[serde(default = "default_drift_period")]
    pub drift_period: u64,
    #[serde(default = "default_drift_std")]
    pub drift_std: f64,
    /// Constant step of the estimator's exponential filter on drifting arms.
    #[serde(default = "default_step_size")]
    pub estimator_step_size: f64,
    /// Preference step of the gradient policy.
    #[serde(default = "default_step_size")]
    pub gradient_step_size: f64,
    #[serde(default = "default_degree_of_exploration")]
    pub degree_of_exploration: f64,
    #[serde(default = "default_initial_value")]
    pub initial_value: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub policy: PolicyKind,
}

// Default functions
fn default_n_arms() -> usize {
    10
}
fn default_n_pulls() -> usize {
    1000
}
fn default_trials() -> usize {
    1
}
fn default_drift_period() -> u64 {
    30
}
fn default_drift_std() -> f64 {
    5.0
}
fn default_step_size() -> f64 {
    0.1
}
fn default_degree_of_exploration() -> f64 {
    1.0
}
fn default_initial_value() -> f64 {
    5.0
}
fn default_seed() -> u64 {
    42
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            n_arms: default_n_arms(),
            n_pulls: default_n_pulls(),
            trials: default_trials(),
            non_stationary: false,
            drift_period: default_drift_period(),
            drift_std: default_drift_std(),
            estimator_step_size: default_step_size(),
            gradient_step_size: default_step_size(),
            degree_of_exploration: default_degree_of_exploration(),
            initial_value: default_initial_value(),
            seed: default_seed(),
            policy: PolicyKind::default(),
        }
    }
}

impl ExperimentConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("BANDIT_TESTBED")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Boundary validation of every scalar parameter.
    pub fn validate(&self) -> BanditResult<()> {
        if self.n_arms == 0 {
            return Err(BanditError::invalid_config(
                "the number of arms must be positive",
            ));
        }
        if self.trials == 0 {
            return Err(BanditError::invalid_config(
                "at least one trial is required",
            ));
        }
        if self.drift_period == 0 {
            return Err(BanditError::invalid_config(
                "drift period must be positive",
            ));
        }
        if !self.drift_std.is_finite() || self.drift_std < 0.0 {
            return Err(BanditError::invalid_config(format!(
                "drift standard deviation must be finite and non-negative, got {}",
                self.drift_std
            )));
        }
        if !(self.estimator_step_size > 0.0 && self.estimator_step_size <= 1.0) {
            return Err(BanditError::invalid_config(format!(
                "estimator step size must lie in (0, 1], got {}",
                self.estimator_step_size
            )));
        }
        if !self.gradient_step_size.is_finite() || self.gradient_step_size <= 0.0 {
            return Err(BanditError::invalid_config(format!(
                "gradient step size must be finite and positive, got {}",
                self.gradient_step_size
            )));
        }
        if !self.degree_of_exploration.is_finite() || self.degree_of_exploration < 0.0 {
            return Err(BanditError::invalid_config(format!(
                "degree of exploration must be finite and non-negative, got {}",
                self.degree_of_exploration
            )));
        }
        if !self.initial_value.is_finite() {
            return Err(BanditError::invalid_config(
                "initial estimate must be finite",
            ));
        }
        Ok(())
    }
}
