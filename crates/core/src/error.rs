use thiserror::Error;

pub type BanditResult<T> = Result<T, BanditError>;

#[derive(Error, Debug)]
pub enum BanditError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Arm id {arm_id} is outside the accepted range 0..{n_arms}")]
    OutOfRange { arm_id: usize, n_arms: usize },

    #[error("Configuration source error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BanditError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Returns `Ok(())` when `arm_id` addresses one of `n_arms` arms.
    pub fn check_arm(arm_id: usize, n_arms: usize) -> BanditResult<()> {
        if arm_id < n_arms {
            Ok(())
        } else {
            Err(Self::OutOfRange { arm_id, n_arms })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_arm_bounds() {
        assert!(BanditError::check_arm(0, 1).is_ok());
        assert!(BanditError::check_arm(2, 3).is_ok());

        let err = BanditError::check_arm(3, 3).unwrap_err();
        assert!(matches!(err, BanditError::OutOfRange { arm_id: 3, n_arms: 3 }));
        assert_eq!(
            err.to_string(),
            "Arm id 3 is outside the accepted range 0..3"
        );
    }

    #[test]
    fn test_config_source_errors_convert() {
        let err: BanditError = config::ConfigError::Message("bad value".into()).into();
        assert!(matches!(err, BanditError::Config(_)));
        assert!(err.to_string().starts_with("Configuration source error"));
    }

    #[test]
    fn test_invalid_config_message() {
        let err = BanditError::invalid_config("no arms");
        assert_eq!(err.to_string(), "Invalid configuration: no arms");
    }
}
