//! Provider Constants
//!
//! Constants specific to provider implementations. Record layout constants
//! live in `botstore_domain::constants`.

// ============================================================================
// REDIS BACKEND CONSTANTS
// ============================================================================

/// Redis URL used when none is configured
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Default timeout for establishing the Redis connection (milliseconds)
pub const REDIS_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// Default timeout for a single Redis command (milliseconds)
pub const REDIS_RESPONSE_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// VERSION CLOCK CONSTANTS
// ============================================================================

/// Ticks between 0001-01-01T00:00:00Z and the Unix epoch
///
/// One tick is 100 ns. Tokens use this epoch so they stay comparable with
/// records written by .NET bot stores.
pub const UNIX_EPOCH_TICKS: u64 = 621_355_968_000_000_000;

/// Nanoseconds per tick
pub const NANOS_PER_TICK: i64 = 100;

// ============================================================================
// CODEC CONSTANTS
// ============================================================================

/// Byte order mark some writers emit in front of the JSON text
pub const UTF8_BOM: char = '\u{feff}';
