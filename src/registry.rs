//! Registry memoizing one queue client per connection identity.

use crate::client::QueueClient;
use crate::config::SqsConfig;
use crate::error::QueueError;
use crate::transports::SqsHttpTransport;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

/// Lookup key covering every parameter that changes connection identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ConnectionKey {
    region: String,
    queue_url: String,
    access_key: String,
    secret_key: String,
}

impl ConnectionKey {
    fn for_config(config: &SqsConfig) -> Self {
        Self {
            region: config.region.clone(),
            queue_url: config.queue_url.clone(),
            access_key: config.access_key.clone(),
            secret_key: config.secret_key.clone(),
        }
    }
}

/// Hands out one [`QueueClient`] per distinct connection identity.
///
/// Own one of these at application startup and share it wherever clients are
/// needed; repeated lookups with the same parameters reuse one buffer and
/// flush timer instead of creating duplicates. Clients are never evicted.
pub struct ClientRegistry {
    clients: Mutex<HashMap<ConnectionKey, QueueClient>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Return the client for `config`, constructing it (and starting its
    /// flush timer) on first use.
    ///
    /// Identical parameters always yield the same instance; any differing
    /// parameter yields a distinct one.
    pub fn get_client(&self, config: SqsConfig) -> Result<QueueClient, QueueError> {
        let key = ConnectionKey::for_config(&config);
        let mut clients = self.clients.lock().expect("registry lock poisoned");
        if let Some(client) = clients.get(&key) {
            return Ok(client.clone());
        }

        config.validate()?;
        let transport = Arc::new(SqsHttpTransport::new(&config)?);
        debug!(
            queue_url = %config.queue_url,
            region = %config.region,
            "constructing queue client"
        );
        let client = QueueClient::new(transport, config);
        clients.insert(key, client.clone());
        Ok(client)
    }

    /// Number of distinct clients constructed so far.
    pub fn len(&self) -> usize {
        self.clients.lock().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}
