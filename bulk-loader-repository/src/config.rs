//! Configuration types for the destination client.

use serde_json::{json, Value};
use url::Url;

use crate::errors::DestinationError;

/// Default destination host.
pub const DEFAULT_HOST: &str = "localhost:9200";

/// Settings applied when the loader creates a missing index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSettings {
    /// Number of primary shards.
    pub number_of_shards: u32,
    /// Number of replicas per primary shard.
    pub number_of_replicas: u32,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            number_of_shards: 1,
            number_of_replicas: 1,
        }
    }
}

impl IndexSettings {
    /// Request body for index creation. Mappings are left dynamic.
    pub fn to_body(&self) -> Value {
        json!({
            "settings": {
                "number_of_shards": self.number_of_shards,
                "number_of_replicas": self.number_of_replicas
            }
        })
    }
}

/// Connection settings for the destination store.
#[derive(Debug, Clone)]
pub struct DestinationConfig {
    /// Host and port, with or without a scheme (e.g. `localhost:9200`).
    pub host: String,
    /// Settings for indices created by the loader.
    pub index_settings: IndexSettings,
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

impl DestinationConfig {
    /// Create a config for the given host with default index settings.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            index_settings: IndexSettings::default(),
        }
    }

    /// Resolve the host into a URL, defaulting the scheme to `http`.
    pub fn url(&self) -> Result<Url, DestinationError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(DestinationError::configuration("host must not be empty"));
        }

        let candidate = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };

        let url = Url::parse(&candidate)
            .map_err(|e| DestinationError::configuration(format!("Invalid host {}: {}", host, e)))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(DestinationError::configuration(format!(
                    "Unsupported scheme {} in host {}",
                    other, host
                )))
            }
        }

        if url.host_str().is_none() {
            return Err(DestinationError::configuration(format!(
                "Host {} has no hostname",
                host
            )));
        }

        Ok(url)
    }
}
