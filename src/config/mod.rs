//! Runtime settings, read from `PR_REVIEWER__<SECTION>__<KEY>` environment
//! variables (a `.env` file is honoured in development).
//!
//! ```no_run
//! use pr_reviewer::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! config.validate()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod database;
mod error;
mod review;
mod server;

pub use database::{DatabaseConfig, StorageBackend};
pub use error::{ConfigError, ValidationError};
pub use review::ReviewConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// An empty environment yields a runnable development setup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub review: ReviewConfig,
}

impl AppConfig {
    /// `PR_REVIEWER__DATABASE__STORAGE=memory` sets `database.storage`, and so on.
    ///
    /// Fails only when a value cannot be parsed; call [`AppConfig::validate`]
    /// for range checks.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PR_REVIEWER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Per-section checks, then the operation deadline must fit inside the
    /// request timeout.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.review.validate()?;
        if self.review.operation_timeout() > self.server.request_timeout() {
            return Err(ValidationError::OperationTimeoutExceedsRequest);
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
