//! Seeded random streams. Every consumer of randomness owns its own stream so
//! that draws made for one purpose never shift the sequence seen by another.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Stream consumed by real arm pulls and drift events.
pub const PULL_STREAM: u64 = 0;
/// Stream consumed by shadow-optimal bookkeeping.
pub const SHADOW_STREAM: u64 = 1;
/// Stream consumed by policy tie-breaks and softmax sampling.
pub const POLICY_STREAM: u64 = 2;
/// Stream used to sample the arm means of the standard testbed.
pub const TESTBED_STREAM: u64 = 3;

#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derive stream `stream_id` of the experiment seeded with `seed`.
    pub fn stream(seed: u64, stream_id: u64) -> Self {
        Self::seeded(mix(seed, stream_id))
    }

    /// Gaussian draw. A zero standard deviation yields `mean` exactly.
    pub fn normal(&mut self, mean: f64, std: f64) -> f64 {
        if std == 0.0 {
            return mean;
        }
        let z: f64 = self.rng.sample(StandardNormal);
        mean + std * z
    }

    /// Uniform draw in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform choice among `candidates`. A lone candidate is returned without
    /// consuming randomness.
    ///
    /// # Panics
    /// If `candidates` is empty.
    pub fn choose(&mut self, candidates: &[usize]) -> usize {
        match candidates {
            [only] => *only,
            _ => candidates[self.rng.gen_range(0..candidates.len())],
        }
    }
}

/// SplitMix64 finalizer over the seed/stream pair.
fn mix(seed: u64, stream_id: u64) -> u64 {
    let mut z = seed ^ stream_id.wrapping_add(1).wrapping_mul(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}
