//! Multi-armed bandit testbed — Gaussian arm environment with optional drift,
//! incremental value estimation, and Greedy, UCB1 and softmax-gradient
//! action selection.

pub mod environment;
pub mod estimator;
pub mod experiment;
pub mod gradient;
pub mod greedy;
pub mod report;
pub mod rng;
pub mod strategy;
pub mod ucb;

pub use environment::{Arm, BanditEnvironment, EnvironmentParams};
pub use estimator::Estimator;
pub use experiment::{Experiment, ExperimentSummary};
pub use gradient::{GradientPolicyState, GradientStrategy};
pub use greedy::GreedyStrategy;
pub use report::{ArmReport, RunReport};
pub use rng::RandomSource;
pub use strategy::{PullOutcome, SelectionPolicy};
pub use ucb::Ucb1Strategy;
