//! Reviewer assignment settings.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// `PR_REVIEWER__REVIEW__*`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Deadline for each operation, in seconds.
    pub operation_timeout_secs: u64,
    /// Fixed seed for reproducible reviewer picks; entropy when unset.
    pub rng_seed: Option<u64>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            operation_timeout_secs: 10,
            rng_seed: None,
        }
    }
}

impl ReviewConfig {
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=300).contains(&self.operation_timeout_secs) {
            return Err(ValidationError::InvalidOperationTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_entropy_and_ten_second_deadline() {
        let config = ReviewConfig::default();
        assert_eq!(config.operation_timeout(), Duration::from_secs(10));
        assert!(config.rng_seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_deadline_is_rejected() {
        let config = ReviewConfig {
            operation_timeout_secs: 0,
            ..ReviewConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidOperationTimeout)
        );
    }
}
