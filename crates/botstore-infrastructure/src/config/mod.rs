//! Configuration management
//!
//! Layered configuration (defaults, TOML file, environment) for the state
//! store and logging.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, LoggingConfig, StoreConfig};
