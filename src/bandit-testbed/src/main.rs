//! Bandit Testbed — runs Greedy, UCB1 or gradient bandit experiments on the
//! standard Gaussian testbed and prints a JSON summary.

use bandit_core::{ExperimentConfig, PolicyKind};
use bandit_rl_engine::Experiment;
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "bandit-testbed")]
#[command(about = "Multi-armed bandit testbed for Greedy, UCB1 and gradient policies")]
#[command(version)]
struct Cli {
    /// Number of arms in the testbed
    #[arg(short = 'n', long, env = "BANDIT_TESTBED__N_ARMS")]
    n_arms: Option<usize>,

    /// Number of arm pulls per trial
    #[arg(long = "n-pulls", env = "BANDIT_TESTBED__N_PULLS")]
    n_pulls: Option<usize>,

    /// Number of independent trials to average over
    #[arg(long, env = "BANDIT_TESTBED__TRIALS")]
    trials: Option<usize>,

    /// Let arm means drift with use
    #[arg(long, default_value_t = false)]
    non_stationary: bool,

    /// Uses of an arm between two drifts of its mean
    #[arg(long, env = "BANDIT_TESTBED__DRIFT_PERIOD")]
    drift_period: Option<u64>,

    /// Standard deviation of a drift step
    #[arg(long, env = "BANDIT_TESTBED__DRIFT_STD")]
    drift_std: Option<f64>,

    /// Preference step size of the gradient policy
    #[arg(long = "step-size", env = "BANDIT_TESTBED__GRADIENT_STEP_SIZE")]
    gradient_step_size: Option<f64>,

    /// Estimator step size on drifting arms, in (0, 1]
    #[arg(long, env = "BANDIT_TESTBED__ESTIMATOR_STEP_SIZE")]
    estimator_step_size: Option<f64>,

    /// Weight of the UCB1 exploration bonus
    #[arg(long = "degree-exploration", env = "BANDIT_TESTBED__DEGREE_OF_EXPLORATION")]
    degree_of_exploration: Option<f64>,

    /// Initial value of every arm estimate
    #[arg(long, env = "BANDIT_TESTBED__INITIAL_VALUE")]
    initial_value: Option<f64>,

    /// Experiment seed
    #[arg(long, env = "BANDIT_TESTBED__SEED")]
    seed: Option<u64>,

    /// Policy to run: greedy, ucb1 or gradient
    #[arg(long, env = "BANDIT_TESTBED__POLICY", value_parser = parse_policy)]
    policy: Option<PolicyKind>,
}

fn parse_policy(s: &str) -> Result<PolicyKind, String> {
    s.parse().map_err(|e: bandit_core::BanditError| e.to_string())
}

impl Cli {
    fn apply(self, config: &mut ExperimentConfig) {
        if let Some(n_arms) = self.n_arms {
            config.n_arms = n_arms;
        }
        if let Some(n_pulls) = self.n_pulls {
            config.n_pulls = n_pulls;
        }
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if self.non_stationary {
            config.non_stationary = true;
        }
        if let Some(period) = self.drift_period {
            config.drift_period = period;
        }
        if let Some(std) = self.drift_std {
            config.drift_std = std;
        }
        if let Some(step) = self.gradient_step_size {
            config.gradient_step_size = step;
        }
        if let Some(step) = self.estimator_step_size {
            config.estimator_step_size = step;
        }
        if let Some(c) = self.degree_of_exploration {
            config.degree_of_exploration = c;
        }
        if let Some(value) = self.initial_value {
            config.initial_value = value;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bandit_testbed=info,bandit_rl_engine=info".into()),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = ExperimentConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        ExperimentConfig::default()
    });

    // Apply CLI overrides
    cli.apply(&mut config);

    info!(
        policy = %config.policy,
        n_arms = config.n_arms,
        n_pulls = config.n_pulls,
        trials = config.trials,
        seed = config.seed,
        "Configuration loaded"
    );

    let experiment = Experiment::from_config(config)?;
    let summary = experiment.run()?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "bandit-testbed",
            "-n",
            "4",
            "--n-pulls",
            "250",
            "--non-stationary",
            "--degree-exploration",
            "2.5",
            "--policy",
            "gradient",
            "--step-size",
            "2.0",
        ])
        .unwrap();

        let mut config = ExperimentConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.n_arms, 4);
        assert_eq!(config.n_pulls, 250);
        assert!(config.non_stationary);
        assert_eq!(config.degree_of_exploration, 2.5);
        assert_eq!(config.policy, PolicyKind::Gradient);
        assert_eq!(config.gradient_step_size, 2.0);
        assert_eq!(config.estimator_step_size, 0.1);
        assert_eq!(config.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(Cli::try_parse_from(["bandit-testbed", "--policy", "epsilon"]).is_err());
    }
}
