//! Loaded state records

use super::VersionToken;
use serde::{Deserialize, Serialize};

/// A decoded state value and the version it was stored at
///
/// Pass `version` back as the expected token of the next save to detect
/// concurrent writers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord<T> {
    /// Caller-defined state value
    pub value: T,

    /// Etag of the stored revision
    pub version: VersionToken,
}

impl<T> StateRecord<T> {
    /// Create a new record
    pub fn new(value: T, version: VersionToken) -> Self {
        Self { value, version }
    }

    /// Replace the value, keeping the version it was loaded at
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StateRecord<U> {
        StateRecord {
            value: f(self.value),
            version: self.version,
        }
    }
}
