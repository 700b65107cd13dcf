//! State category selector

use crate::constants::{
    CONVERSATION_KEY_PREFIX, PRIVATE_CONVERSATION_KEY_PREFIX, USER_KEY_PREFIX,
};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of state being addressed
///
/// Selects both the subset of the [`Identity`](super::Identity) that scopes
/// the state and the key namespace prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateCategory {
    /// State shared by everyone in a conversation
    ConversationState,
    /// State following a user across conversations on a channel
    UserState,
    /// State of one user inside one conversation
    PrivateConversationState,
}

impl StateCategory {
    /// All supported categories
    pub const ALL: [StateCategory; 3] = [
        StateCategory::ConversationState,
        StateCategory::UserState,
        StateCategory::PrivateConversationState,
    ];

    /// Key namespace prefix of this category
    pub fn key_prefix(self) -> &'static str {
        match self {
            Self::ConversationState => CONVERSATION_KEY_PREFIX,
            Self::UserState => USER_KEY_PREFIX,
            Self::PrivateConversationState => PRIVATE_CONVERSATION_KEY_PREFIX,
        }
    }

    /// Canonical snake_case name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConversationState => "conversation_state",
            Self::UserState => "user_state",
            Self::PrivateConversationState => "private_conversation_state",
        }
    }
}

impl fmt::Display for StateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateCategory {
    type Err = Error;

    /// Accepts the canonical names, the key prefixes and the Bot Framework
    /// store type names, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "conversation_state" | "conversation" | "botconversationdata" => {
                Ok(Self::ConversationState)
            }
            "user_state" | "user" | "botuserdata" => Ok(Self::UserState),
            "private_conversation_state"
            | "private_conversation"
            | "privateconversation"
            | "botprivateconversationdata" => Ok(Self::PrivateConversationState),
            _ => Err(Error::unsupported_category(s)),
        }
    }
}
