//! Domain Port Interfaces
//!
//! Boundary contracts between the domain and the outer layers.
//!
//! - [`backend`] - what the store needs from a remote hash-map backend
//! - [`store`] - what the store offers to the caching layer above it

/// Hash backend port
pub mod backend;
/// State store port
pub mod store;

pub use backend::{ConditionalHashWrite, FieldEquals, HashBackend, HashRecord};
pub use store::BotDataStore;
