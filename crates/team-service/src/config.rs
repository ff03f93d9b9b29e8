//! Service configuration.
//!
//! Configuration is loaded from environment variables with defaults suitable
//! for local development.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Shortest API key the service will generate.
pub const MIN_API_KEY_LENGTH: usize = 16;

/// Team service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamConfig {
    /// Length of generated organization API keys.
    pub api_key_length: usize,

    /// Maximum members per organization, unlimited when `None`.
    pub max_team_members: Option<usize>,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            api_key_length: 40,
            max_team_members: None,
        }
    }
}

impl TeamConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TEAM_API_KEY_LENGTH`: generated API key length (default: 40)
    /// - `TEAM_MAX_MEMBERS`: member cap per organization (default: unlimited)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            api_key_length: std::env::var("TEAM_API_KEY_LENGTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.api_key_length),
            max_team_members: std::env::var("TEAM_MAX_MEMBERS")
                .ok()
                .and_then(|s| s.parse().ok())
                .or(default.max_team_members),
        }
    }

    /// Check the values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key_length < MIN_API_KEY_LENGTH {
            return Err(ConfigError::InvalidValue {
                key: "TEAM_API_KEY_LENGTH".to_string(),
                message: format!("must be at least {}", MIN_API_KEY_LENGTH),
            });
        }
        if self.max_team_members == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "TEAM_MAX_MEMBERS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TeamConfig::default();
        assert_eq!(config.api_key_length, 40);
        assert_eq!(config.max_team_members, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_keys() {
        let config = TeamConfig {
            api_key_length: 8,
            ..TeamConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "TEAM_API_KEY_LENGTH"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_members() {
        let config = TeamConfig {
            max_team_members: Some(0),
            ..TeamConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
