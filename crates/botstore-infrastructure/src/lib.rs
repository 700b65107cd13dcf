//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the state store.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration: defaults, TOML file, environment |
//! | [`logging`] | Structured logging with tracing |
//! | [`bootstrap`] | Assemble a configured store |
//! | [`error_ext`] | Context extensions for foreign errors |
//! | [`constants`] | Infrastructure defaults |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigLoader, LoggingConfig, StoreConfig};
pub use error_ext::ErrorContext;
