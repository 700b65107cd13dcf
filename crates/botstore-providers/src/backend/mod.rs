//! Hash Backend Implementations
//!
//! ## Available Backends
//!
//! | Backend | Type | Description |
//! |---------|------|-------------|
//! | [`RedisHashBackend`] | Distributed | Redis hashes, conditional writes via a Lua script |
//! | [`InMemoryHashBackend`] | Local | Process-local map for tests and development |

pub mod memory;
#[cfg(feature = "backend-redis")]
pub mod redis;

pub use memory::InMemoryHashBackend;
#[cfg(feature = "backend-redis")]
pub use redis::{RedisHashBackend, RedisStoreOptions};
