//! Shared contract for action-selection policies and the helpers they share.

use bandit_core::{BanditError, BanditResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::environment::BanditEnvironment;
use crate::estimator::Estimator;
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PullOutcome {
    pub arm_id: usize,
    pub reward: f64,
}

pub trait SelectionPolicy {
    fn name(&self) -> &'static str;

    fn select_arm(&mut self) -> usize;

    /// One select → pull → update cycle.
    fn select_and_pull(&mut self) -> BanditResult<PullOutcome>;

    fn run_strategy(&mut self, n_pulls: usize) -> BanditResult<()> {
        for _ in 0..n_pulls {
            self.select_and_pull()?;
        }
        Ok(())
    }

    fn environment(&self) -> &BanditEnvironment;

    fn estimator(&self) -> &Estimator;
}

/// Every index holding the maximum of `values`, in increasing order.
pub fn maximal_indices(values: &[f64]) -> Vec<usize> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v == max)
        .map(|(i, _)| i)
        .collect()
}

/// Argmax with a uniform random choice among tied maxima.
pub fn argmax_random_tie(values: &[f64], rng: &mut RandomSource) -> usize {
    debug_assert!(
        !values.iter().any(|v| v.is_nan()),
        "NaN among arm values {values:?}"
    );
    let candidates = maximal_indices(values);
    if candidates.is_empty() {
        // Only reachable when every value is NaN.
        warn!(?values, "no comparable value, falling back to arm 0");
        return 0;
    }
    rng.choose(&candidates)
}

pub(crate) fn ensure_same_arms(
    environment: &BanditEnvironment,
    estimator: &Estimator,
) -> BanditResult<()> {
    if environment.n_arms() != estimator.n_arms() {
        return Err(BanditError::invalid_config(format!(
            "estimator tracks {} arms but the environment has {}",
            estimator.n_arms(),
            environment.n_arms()
        )));
    }
    Ok(())
}
