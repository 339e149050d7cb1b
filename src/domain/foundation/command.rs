//! Command infrastructure for application handlers.
//!
//! `CommandMetadata` is the context that flows through every handler call:
//! correlation for log lines, the caller's source, and the deadline the
//! whole operation must finish within.
//!
//! ```ignore
//! let metadata = CommandMetadata::new(Duration::from_secs(5))
//!     .with_correlation_id(request_id)
//!     .with_source("http");
//!
//! handler.handle(cmd, metadata).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default operation deadline when none is configured.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Metadata context for command and query handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Upper bound for the whole read-decide-write sequence.
    timeout: Duration,

    /// Links related log lines across a single request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command (e.g., "http", "test").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

/// Returned when an operation exceeds its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineExceeded {
    pub timeout: Duration,
}

impl CommandMetadata {
    /// Creates metadata with the given operation deadline.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            correlation_id: None,
            source: None,
        }
    }

    /// Usually the inbound `x-request-id`.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Falls back to a fresh UUID so log lines always carry one.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the operation deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `operation` under this deadline.
    ///
    /// On expiry the future is dropped, which aborts any in-flight
    /// persistence call and rolls back its open transaction.
    pub async fn run_bounded<F, T>(&self, operation: F) -> Result<T, DeadlineExceeded>
    where
        F: Future<Output = T>,
    {
        tokio::time::timeout(self.timeout, operation)
            .await
            .map_err(|_| DeadlineExceeded {
                timeout: self.timeout,
            })
    }
}

impl Default for CommandMetadata {
    fn default() -> Self {
        Self::new(DEFAULT_OPERATION_TIMEOUT)
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates a test fixture. Only available in test builds.
    pub fn test_fixture() -> Self {
        Self::default()
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}
