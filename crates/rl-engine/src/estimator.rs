//! Online per-arm value estimates: exact sample average for stationary arms,
//! exponential recency-weighted average otherwise.

use bandit_core::{BanditError, BanditResult};

#[derive(Debug, Clone)]
pub struct Estimator {
    estimates: Vec<f64>,
    use_counts: Vec<u64>,
    stationary: bool,
    step_size: f64,
}

impl Estimator {
    pub fn new(
        n_arms: usize,
        stationary: bool,
        initial_value: f64,
        step_size: f64,
    ) -> BanditResult<Self> {
        if n_arms == 0 {
            return Err(BanditError::invalid_config(
                "the number of arms tracked by an estimator must be positive",
            ));
        }
        if !(step_size > 0.0 && step_size <= 1.0) {
            return Err(BanditError::invalid_config(format!(
                "step size must lie in (0, 1], got {step_size}"
            )));
        }
        if !initial_value.is_finite() {
            return Err(BanditError::invalid_config(
                "initial estimate must be finite",
            ));
        }
        Ok(Self {
            estimates: vec![initial_value; n_arms],
            use_counts: vec![0; n_arms],
            stationary,
            step_size,
        })
    }

    /// Stationary estimator starting at zero.
    pub fn sample_average(n_arms: usize) -> BanditResult<Self> {
        Self::new(n_arms, true, 0.0, 0.1)
    }

    pub fn update(&mut self, arm_id: usize, reward: f64) -> BanditResult<()> {
        BanditError::check_arm(arm_id, self.estimates.len())?;

        self.use_counts[arm_id] += 1;
        let estimate = &mut self.estimates[arm_id];
        if self.stationary {
            *estimate += (reward - *estimate) / self.use_counts[arm_id] as f64;
        } else {
            *estimate += self.step_size * (reward - *estimate);
        }
        Ok(())
    }

    pub fn estimates(&self) -> &[f64] {
        &self.estimates
    }

    pub fn use_counts(&self) -> &[u64] {
        &self.use_counts
    }

    pub fn estimate(&self, arm_id: usize) -> BanditResult<f64> {
        BanditError::check_arm(arm_id, self.estimates.len())?;
        Ok(self.estimates[arm_id])
    }

    pub fn use_count(&self, arm_id: usize) -> BanditResult<u64> {
        BanditError::check_arm(arm_id, self.use_counts.len())?;
        Ok(self.use_counts[arm_id])
    }

    pub fn n_arms(&self) -> usize {
        self.estimates.len()
    }

    pub fn total_uses(&self) -> u64 {
        self.use_counts.iter().sum()
    }

    pub fn is_stationary(&self) -> bool {
        self.stationary
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_validation() {
        assert!(matches!(
            Estimator::new(0, true, 0.0, 0.1),
            Err(BanditError::InvalidConfig(_))
        ));
        assert!(Estimator::new(3, false, 0.0, 0.0).is_err());
        assert!(Estimator::new(3, false, 0.0, 1.01).is_err());
        assert!(Estimator::new(3, false, f64::INFINITY, 0.1).is_err());
        assert!(Estimator::new(3, false, 0.0, 1.0).is_ok());
    }

    #[test]
    fn test_incremental_mean_identity() {
        let rewards = [3.5, -1.25, 7.0, 0.0, 2.75, 10.5, -4.0, 1.0];
        let mut estimator = Estimator::sample_average(2).unwrap();
        for (k, reward) in rewards.iter().enumerate() {
            estimator.update(1, *reward).unwrap();
            let mean = rewards[..=k].iter().sum::<f64>() / (k + 1) as f64;
            assert!((estimator.estimate(1).unwrap() - mean).abs() < 1e-12);
        }
        assert_eq!(estimator.use_counts(), &[0, rewards.len() as u64]);
        assert_eq!(estimator.estimates()[0], 0.0);
    }

    #[test]
    fn test_first_update_replaces_initial_value() {
        let mut estimator = Estimator::new(2, true, 5.0, 0.1).unwrap();
        estimator.update(0, 10.0).unwrap();
        assert_eq!(estimator.estimate(0).unwrap(), 10.0);
    }

    #[test]
    fn test_exponential_filter_closed_form() {
        // Halving steps stay exact in binary floating point.
        let mut estimator = Estimator::new(1, false, 0.0, 0.5).unwrap();
        for k in 1..=20 {
            estimator.update(0, 1.0).unwrap();
            let expected = 1.0 + (0.0 - 1.0) * 0.5f64.powi(k);
            assert_eq!(estimator.estimate(0).unwrap(), expected);
        }

        let (alpha, e0, r) = (0.1, 4.0, -2.0);
        let mut estimator = Estimator::new(1, false, e0, alpha).unwrap();
        for k in 1..=50 {
            estimator.update(0, r).unwrap();
            let expected = r + (e0 - r) * (1.0 - alpha).powi(k);
            assert!((estimator.estimate(0).unwrap() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_out_of_range_update_changes_nothing() {
        let mut estimator = Estimator::sample_average(2).unwrap();
        estimator.update(0, 1.0).unwrap();
        let err = estimator.update(5, 100.0).unwrap_err();
        assert!(matches!(err, BanditError::OutOfRange { arm_id: 5, n_arms: 2 }));
        assert_eq!(estimator.estimates(), &[1.0, 0.0]);
        assert_eq!(estimator.total_uses(), 1);
    }
}
