//! UCB1, optimism in the face of uncertainty. Each arm is scored by its
//! estimate plus an exploration bonus that shrinks as the arm is used.

use bandit_core::{BanditError, BanditResult};
use tracing::debug;

use crate::environment::BanditEnvironment;
use crate::estimator::Estimator;
use crate::rng::RandomSource;
use crate::strategy::{argmax_random_tie, ensure_same_arms, PullOutcome, SelectionPolicy};

pub struct Ucb1Strategy {
    environment: BanditEnvironment,
    estimator: Estimator,
    rng: RandomSource,
    degree_of_exploration: f64,
}

impl Ucb1Strategy {
    pub fn new(
        environment: BanditEnvironment,
        estimator: Estimator,
        rng: RandomSource,
        degree_of_exploration: f64,
    ) -> BanditResult<Self> {
        ensure_same_arms(&environment, &estimator)?;
        if !degree_of_exploration.is_finite() || degree_of_exploration < 0.0 {
            return Err(BanditError::invalid_config(format!(
                "degree of exploration must be finite and non-negative, got {degree_of_exploration}"
            )));
        }
        Ok(Self {
            environment,
            estimator,
            rng,
            degree_of_exploration,
        })
    }

    pub fn degree_of_exploration(&self) -> f64 {
        self.degree_of_exploration
    }

    /// Lowest-indexed arm that has never been used.
    pub fn cold_start_arm(&self) -> Option<usize> {
        self.estimator.use_counts().iter().position(|&uses| uses == 0)
    }

    /// UCB1 score of every arm. Only meaningful once every arm has been used.
    pub fn scores(&self) -> Vec<f64> {
        let log_total = (self.estimator.total_uses() as f64).ln();
        self.estimator
            .estimates()
            .iter()
            .zip(self.estimator.use_counts())
            .map(|(&estimate, &uses)| {
                estimate + self.degree_of_exploration * (log_total / uses as f64).sqrt()
            })
            .collect()
    }
}

impl SelectionPolicy for Ucb1Strategy {
    fn name(&self) -> &'static str {
        "ucb1"
    }

    fn select_arm(&mut self) -> usize {
        if let Some(arm_id) = self.cold_start_arm() {
            debug!(arm_id, "cold start pull");
            return arm_id;
        }
        let scores = self.scores();
        argmax_random_tie(&scores, &mut self.rng)
    }

    fn select_and_pull(&mut self) -> BanditResult<PullOutcome> {
        let arm_id = self.select_arm();
        let reward = self.environment.pull(arm_id)?;
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
