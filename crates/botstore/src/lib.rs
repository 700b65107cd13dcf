//! # botstore
//!
//! Durable state for conversational bots. Conversation, user and
//! private-conversation state is stored as gzip-compressed JSON in Redis
//! hashes and guarded by ETag optimistic concurrency: a save carries the
//! etag of the revision it was based on and fails if another writer got
//! there first.
//!
//! ## Example
//!
//! ```ignore
//! use botstore::domain::{BotDataStore, Identity, StateCategory, VersionToken};
//! use botstore::infrastructure::{ConfigLoader, bootstrap::build_redis_store};
//!
//! let config = ConfigLoader::new().load()?;
//! let store = build_redis_store(&config.store)?;
//!
//! let who = Identity::new("bot", "msteams", "user-1", "conv-1");
//! let etag = store
//!     .save(&who, StateCategory::UserState, &serde_json::json!({"name": "Ada"}), &VersionToken::Any)
//!     .await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Error type, value objects, key derivation and ports
//! - `providers` - Codec, version clock, Redis and in-memory backends, the store
//! - `infrastructure` - Configuration, logging and store bootstrap
//! - `cli` - The `botstore` admin command

/// Domain layer - core types and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use botstore_domain::*;
}

/// Provider layer - backends, codec and the state store
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use botstore_providers::*;
}

/// Infrastructure layer - config, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use botstore_infrastructure::*;
}

pub mod cli;

// Re-export commonly used domain types at the crate root
pub use domain::*;
pub use providers::HashBotDataStore;
