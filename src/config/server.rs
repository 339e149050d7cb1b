//! HTTP listener and admin access settings.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

pub(super) const DEFAULT_ADMIN_TOKEN: &str = "admin-secret";
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// `PR_REVIEWER__SERVER__*`. Missing keys fall back to [`ServerConfig::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Outer bound on a whole HTTP request, in seconds.
    pub request_timeout_secs: u64,
    /// Value the `X-Admin-Token` header must carry on admin routes.
    pub admin_token: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,pr_reviewer=debug,sqlx=warn".into(),
            request_timeout_secs: 15,
            admin_token: DEFAULT_ADMIN_TOKEN.into(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|_| ValidationError::InvalidSocketAddr(raw))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        match self.admin_token.as_str() {
            "" => return Err(ValidationError::MissingRequired("ADMIN_TOKEN")),
            DEFAULT_ADMIN_TOKEN if self.is_production() => {
                return Err(ValidationError::DefaultAdminTokenInProduction)
            }
            _ => {}
        }
        self.socket_addr().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn production(token: &str) -> ServerConfig {
        ServerConfig {
            environment: Environment::Production,
            admin_token: token.to_string(),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn development_defaults_are_valid() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert!(!config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unparseable_host_is_reported_with_the_address() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidSocketAddr("not a host:8080".to_string()))
        );
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPort));
    }

    #[test]
    fn request_timeout_must_be_between_one_second_and_five_minutes() {
        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..ServerConfig::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
        }
    }

    #[test]
    fn production_refuses_the_development_admin_token() {
        assert_eq!(
            production(DEFAULT_ADMIN_TOKEN).validate(),
            Err(ValidationError::DefaultAdminTokenInProduction)
        );
        assert!(production("rotated").validate().is_ok());
    }

    #[test]
    fn empty_admin_token_is_missing() {
        assert_eq!(
            production("").validate(),
            Err(ValidationError::MissingRequired("ADMIN_TOKEN"))
        );
    }
}
