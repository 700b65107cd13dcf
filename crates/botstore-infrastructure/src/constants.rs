//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "botstore.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "botstore";

/// Environment variable prefix for configuration overrides
///
/// Nested keys are separated by a double underscore, e.g.
/// `BOTSTORE__STORE__CONNECTION_TARGET`.
pub const CONFIG_ENV_PREFIX: &str = "BOTSTORE";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// STORE
// ============================================================================

/// Default Redis connection target
pub const DEFAULT_CONNECTION_TARGET: &str = "redis://localhost:6379";

/// Default connect timeout in milliseconds
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// Default per-command timeout in milliseconds
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 5_000;

/// Default gzip compression level (flate2 default)
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Highest gzip compression level
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

// ============================================================================
// LOGGING
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a tracing filter directive that overrides the configured level
pub const LOG_FILTER_ENV: &str = "BOTSTORE_LOG";

/// File stem used for log files when the configured path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "botstore";
