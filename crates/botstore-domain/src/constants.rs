//! Domain layer constants
//!
//! Names and markers that are part of the durable storage contract.
//! Changing any of them breaks compatibility with records already stored.

// ============================================================================
// RECORD LAYOUT
// ============================================================================

/// Hash field holding the version token of a record
pub const ETAG_FIELD: &str = "etag";

/// Hash field holding the compressed payload of a record
pub const DATA_FIELD: &str = "data";

/// Version token meaning "write regardless of the stored version"
pub const WILDCARD_ETAG: &str = "*";

// ============================================================================
// KEY LAYOUT
// ============================================================================

/// Separator between key segments
pub const KEY_SEPARATOR: char = ':';

/// Key prefix for conversation-scoped state
pub const CONVERSATION_KEY_PREFIX: &str = "conversation";

/// Key prefix for user-scoped state
pub const USER_KEY_PREFIX: &str = "user";

/// Key prefix for per-user state within a conversation
pub const PRIVATE_CONVERSATION_KEY_PREFIX: &str = "privateConversation";
