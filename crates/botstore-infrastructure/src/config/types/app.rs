//! Application configuration root

use super::{LoggingConfig, StoreConfig};
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// State store settings
    pub store: StoreConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}
