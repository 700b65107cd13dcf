//! Identity of the scope a piece of state belongs to

use serde::{Deserialize, Serialize};

/// Tenant/channel/user/conversation tuple
///
/// Not every category uses every field: user state ignores the
/// conversation, conversation state ignores the user.
///
/// # Example
///
/// ```
/// use botstore_domain::value_objects::Identity;
///
/// let identity = Identity::new("t1", "skype", "u1", "c1");
/// assert_eq!(identity.channel_id, "skype");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Tenant owning the state (the bot id in Bot Framework addresses)
    pub tenant_id: String,

    /// Channel the message arrived on
    pub channel_id: String,

    /// User the state belongs to
    pub user_id: String,

    /// Conversation the state belongs to
    pub conversation_id: String,
}

impl Identity {
    /// Create a new identity
    pub fn new(
        tenant_id: impl Into<String>,
        channel_id: impl Into<String>,
        user_id: impl Into<String>,
        conversation_id: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            channel_id: channel_id.into(),
            user_id: user_id.into(),
            conversation_id: conversation_id.into(),
        }
    }
}
