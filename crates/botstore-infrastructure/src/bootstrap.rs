//! Store bootstrap
//!
//! Assembles a [`HashBotDataStore`] from a [`StoreConfig`]: backend, key
//! deriver and codec all follow the configuration.

use crate::config::StoreConfig;
use botstore_domain::error::Result;
use botstore_domain::ports::HashBackend;
use botstore_providers::backend::InMemoryHashBackend;
use botstore_providers::store::HashBotDataStore;
use std::sync::Arc;
use tracing::info;

#[cfg(feature = "backend-redis")]
use botstore_providers::backend::RedisHashBackend;

/// State store over Redis
#[cfg(feature = "backend-redis")]
pub type RedisBotDataStore = HashBotDataStore<RedisHashBackend>;

/// State store over the in-process backend
pub type InMemoryBotDataStore = HashBotDataStore<InMemoryHashBackend>;

/// Build a Redis-backed store
///
/// The connection target is validated here, but no connection is opened
/// until the first operation.
#[cfg(feature = "backend-redis")]
pub fn build_redis_store(config: &StoreConfig) -> Result<Arc<RedisBotDataStore>> {
    let backend = RedisHashBackend::with_options(config.redis_options())?;
    Ok(Arc::new(assemble(Arc::new(backend), config)))
}

/// Build a store over a fresh in-process backend
pub fn build_in_memory_store(config: &StoreConfig) -> Arc<InMemoryBotDataStore> {
    Arc::new(assemble(Arc::new(InMemoryHashBackend::new()), config))
}

/// Build a store over an existing backend
pub fn assemble<B: HashBackend + ?Sized>(
    backend: Arc<B>,
    config: &StoreConfig,
) -> HashBotDataStore<B> {
    let store = HashBotDataStore::new(backend)
        .with_key_deriver(config.key_deriver())
        .with_codec(config.codec());
    info!(
        backend = store.backend().backend_name(),
        key_policy = ?config.key_policy,
        namespace = config.key_namespace.as_deref().unwrap_or(""),
        "State store assembled"
    );
    store
}
