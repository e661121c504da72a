pub mod config;
pub mod error;

pub use crate::config::{ExperimentConfig, PolicyKind};
pub use crate::error::{BanditError, BanditResult};
