//! Greedy selection. Always exploit the highest current estimate. Exploration
//! comes only from optimistic initial estimates.

use bandit_core::BanditResult;

use crate::environment::BanditEnvironment;
use crate::estimator::Estimator;
use crate::rng::RandomSource;
use crate::strategy::{argmax_random_tie, ensure_same_arms, PullOutcome, SelectionPolicy};

pub struct GreedyStrategy {
    environment: BanditEnvironment,
    estimator: Estimator,
    rng: RandomSource,
}

impl GreedyStrategy {
    pub fn new(
        environment: BanditEnvironment,
        estimator: Estimator,
        rng: RandomSource,
    ) -> BanditResult<Self> {
        ensure_same_arms(&environment, &estimator)?;
        Ok(Self {
            environment,
            estimator,
            rng,
        })
    }
}

impl SelectionPolicy for GreedyStrategy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn select_arm(&mut self) -> usize {
        argmax_random_tie(self.estimator.estimates(), &mut self.rng)
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
