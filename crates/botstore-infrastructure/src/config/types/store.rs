//! State store configuration types

use crate::constants::*;
use botstore_domain::keys::{KeyDeriver, KeyPolicy};
use botstore_providers::codec::GzipJsonCodec;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// State store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Redis URL (`redis://host:port`) or bare `host:port`
    pub connection_target: String,

    /// Logical database index; unset or negative keeps the server default
    pub database: Option<i64>,

    /// Connect timeout in milliseconds
    pub connect_timeout_ms: u64,

    /// Per-command timeout in milliseconds
    pub response_timeout_ms: u64,

    /// How identity fields are checked before they become key segments
    pub key_policy: KeyPolicy,

    /// Optional prefix placed in front of every key
    pub key_namespace: Option<String>,

    /// gzip level for stored payloads (0-9)
    pub compression_level: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            connection_target: DEFAULT_CONNECTION_TARGET.to_string(),
            database: None,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            response_timeout_ms: DEFAULT_RESPONSE_TIMEOUT_MS,
            key_policy: KeyPolicy::default(),
            key_namespace: None,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl StoreConfig {
    /// Key deriver for the configured policy and namespace
    pub fn key_deriver(&self) -> KeyDeriver {
        let deriver = KeyDeriver::new().with_policy(self.key_policy);
        match &self.key_namespace {
            Some(namespace) => deriver.with_namespace(namespace.as_str()),
            None => deriver,
        }
    }

    /// Payload codec at the configured compression level
    pub fn codec(&self) -> GzipJsonCodec {
        GzipJsonCodec::with_level(self.compression_level)
    }

    /// Connect timeout as a [`Duration`]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Response timeout as a [`Duration`]
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }

    /// Connection options for the Redis backend
    #[cfg(feature = "backend-redis")]
    pub fn redis_options(&self) -> botstore_providers::backend::RedisStoreOptions {
        let options = botstore_providers::backend::RedisStoreOptions::new(
            self.connection_target.as_str(),
        )
        .with_connect_timeout(self.connect_timeout())
        .with_response_timeout(self.response_timeout());
        match self.database {
            Some(database) => options.with_database(database),
            None => options,
        }
    }
}
