//! Version tokens (ETags)

use crate::constants::WILDCARD_ETAG;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Opaque revision marker of a stored record
///
/// Two tokens denote the same revision iff their text is byte-equal.
/// [`VersionToken::Any`] is the wildcard `"*"` and makes a save
/// unconditional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum VersionToken {
    /// Accept whatever is stored, including nothing
    #[default]
    Any,
    /// A concrete etag observed on a previous load or save
    Tag(String),
}

impl VersionToken {
    /// Wrap a concrete etag; `"*"` becomes [`VersionToken::Any`]
    pub fn new(etag: impl Into<String>) -> Self {
        let etag = etag.into();
        if etag == WILDCARD_ETAG {
            Self::Any
        } else {
            Self::Tag(etag)
        }
    }

    /// Whether this is the wildcard
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// The etag that must be stored for a conditional write, if any
    pub fn expected(&self) -> Option<&str> {
        match self {
            Self::Any => None,
            Self::Tag(tag) => Some(tag),
        }
    }

    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Any => WILDCARD_ETAG,
            Self::Tag(tag) => tag,
        }
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionToken {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for VersionToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for VersionToken {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl Serialize for VersionToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VersionToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
