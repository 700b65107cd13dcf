//! Backend key derivation
//!
//! Maps an [`Identity`] and a [`StateCategory`] to the flat key a record is
//! stored under:
//!
//! | Category | Key |
//! |----------|-----|
//! | conversation | `conversation:{tenant}:{channel}:{conversation}` |
//! | user | `user:{tenant}:{channel}:{user}` |
//! | private conversation | `privateConversation:{tenant}:{channel}:{user}:{conversation}` |
//!
//! Segments are joined verbatim. A segment containing `:` can make two
//! distinct identities share a key; [`KeyPolicy::Strict`] rejects such
//! identities instead of deriving a key for them.

use crate::constants::KEY_SEPARATOR;
use crate::error::{Error, Result};
use crate::value_objects::{Identity, StateCategory};
use serde::{Deserialize, Serialize};

/// How identity segments are checked before being joined into a key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPolicy {
    /// Join segments as-is, compatible with existing stored data
    #[default]
    Legacy,
    /// Reject empty segments and segments containing the separator
    Strict,
}

/// Derive the key for `identity` under `category`
///
/// Pure and infallible: this is the legacy layout with no validation and no
/// namespace.
///
/// # Example
///
/// ```
/// use botstore_domain::keys::derive_key;
/// use botstore_domain::value_objects::{Identity, StateCategory};
///
/// let identity = Identity::new("t1", "skype", "u1", "c1");
/// assert_eq!(derive_key(&identity, StateCategory::UserState), "user:t1:skype:u1");
/// ```
pub fn derive_key(identity: &Identity, category: StateCategory) -> String {
    let mut key = String::from(category.key_prefix());
    for segment in segments(identity, category) {
        key.push(KEY_SEPARATOR);
        key.push_str(segment);
    }
    key
}

/// Identity fields used by `category`, in key order
fn segments(identity: &Identity, category: StateCategory) -> Vec<&str> {
    match category {
        StateCategory::ConversationState => vec![
            identity.tenant_id.as_str(),
            identity.channel_id.as_str(),
            identity.conversation_id.as_str(),
        ],
        StateCategory::UserState => vec![
            identity.tenant_id.as_str(),
            identity.channel_id.as_str(),
            identity.user_id.as_str(),
        ],
        StateCategory::PrivateConversationState => vec![
            identity.tenant_id.as_str(),
            identity.channel_id.as_str(),
            identity.user_id.as_str(),
            identity.conversation_id.as_str(),
        ],
    }
}

/// Configurable key deriver
///
/// Adds an optional namespace prefix and a [`KeyPolicy`] on top of
/// [`derive_key`]. The default deriver produces exactly the legacy keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDeriver {
    policy: KeyPolicy,
    namespace: Option<String>,
}

impl KeyDeriver {
    /// Create a deriver with the legacy policy and no namespace
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the segment policy
    pub fn with_policy(mut self, policy: KeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Prefix every key with `namespace:`; an empty namespace is ignored
    pub fn with_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        let namespace = namespace.into();
        self.namespace = (!namespace.is_empty()).then_some(namespace);
        self
    }

    /// Segment policy in effect
    pub fn policy(&self) -> KeyPolicy {
        self.policy
    }

    /// Namespace prefix in effect
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Derive the key for `identity` under `category`
    pub fn derive(&self, identity: &Identity, category: StateCategory) -> Result<String> {
        if self.policy == KeyPolicy::Strict {
            check_segments(identity, category)?;
        }

        let key = derive_key(identity, category);
        Ok(match &self.namespace {
            Some(namespace) => format!("{namespace}{KEY_SEPARATOR}{key}"),
            None => key,
        })
    }
}

fn check_segments(identity: &Identity, category: StateCategory) -> Result<()> {
    for segment in segments(identity, category) {
        if segment.is_empty() {
            return Err(Error::invalid_argument(format!(
                "identity field used by {category} must not be empty"
            )));
        }
        if segment.contains(KEY_SEPARATOR) {
            return Err(Error::invalid_argument(format!(
                "identity field '{segment}' contains the key separator '{KEY_SEPARATOR}'"
            )));
        }
    }
    Ok(())
}
