//! # botstore - Provider Implementations
//!
//! Concrete implementations of the ports defined in `botstore-domain`.
//!
//! | Component | Port | Implementations |
//! |-----------|------|-----------------|
//! | Backend | `HashBackend` | Redis, InMemory |
//! | Store | `BotDataStore` | `HashBotDataStore` over any backend |
//! | Codec | - | gzip-compressed JSON |
//! | Clock | - | monotonic tick clock for version tokens |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! botstore-providers = { version = "0.1", default-features = false }  # in-memory only
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use botstore_providers::backend::RedisHashBackend;
//! use botstore_providers::store::HashBotDataStore;
//!
//! let backend = RedisHashBackend::with_options(RedisStoreOptions::new("redis://localhost:6379"))?;
//! let store = HashBotDataStore::new(Arc::new(backend));
//! ```

pub use botstore_domain::error::{Error, Result};
pub use botstore_domain::ports::{BotDataStore, HashBackend};

/// Provider-specific constants
pub mod constants;

/// Payload codec (JSON + gzip)
pub mod codec;

/// Version token clock
pub mod clock;

/// Hash backend implementations
pub mod backend;

/// State store over a hash backend
pub mod store;

pub use backend::InMemoryHashBackend;
#[cfg(feature = "backend-redis")]
pub use backend::{RedisHashBackend, RedisStoreOptions};
pub use clock::TickClock;
pub use codec::GzipJsonCodec;
pub use store::HashBotDataStore;
