//! Connection configuration for queue clients.

use crate::error::QueueError;
use serde::{Deserialize, Serialize};

/// Region applied when the caller does not name one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Connection parameters for one SQS queue.
///
/// Together these four fields form the connection identity a
/// [`ClientRegistry`](crate::registry::ClientRegistry) memoizes clients by:
/// any differing field yields a distinct client with its own buffer and
/// flush timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqsConfig {
    /// AWS region hosting the queue.
    pub region: String,
    /// Access key id used to sign requests.
    pub access_key: String,
    /// Secret access key used to sign requests.
    pub secret_key: String,
    /// Full queue URL, as handed out at queue creation.
    pub queue_url: String,
}

impl SqsConfig {
    /// Create a configuration in the default region.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        queue_url: impl Into<String>,
    ) -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            queue_url: queue_url.into(),
        }
    }

    /// Override the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Check the configuration is usable before a transport is built from it.
    pub fn validate(&self) -> Result<(), QueueError> {
        if self.region.is_empty() {
            return Err(QueueError::Configuration {
                message: "region cannot be empty".to_string(),
            });
        }
        if self.queue_url.is_empty() {
            return Err(QueueError::Configuration {
                message: "queue_url cannot be empty".to_string(),
            });
        }
        if self.access_key.is_empty() || self.secret_key.is_empty() {
            return Err(QueueError::Configuration {
                message: "access_key and secret_key are required".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
