//! Hash Backend Port
//!
//! A remote key-value service whose values are hashes (field → bytes) and
//! which can apply a multi-field hash write atomically behind a single
//! field-equality precondition.

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// All fields of one stored hash; empty when the key does not exist
pub type HashRecord = HashMap<String, Vec<u8>>;

/// Precondition that a hash field currently holds `value`
///
/// A missing key or field never satisfies the precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldEquals<'a> {
    /// Field to compare
    pub field: &'a str,
    /// Value the field must hold, compared byte for byte
    pub value: &'a str,
}

/// An atomic multi-field hash write
///
/// # Example
///
/// ```
/// use botstore_domain::ports::{ConditionalHashWrite, FieldEquals};
///
/// let write = ConditionalHashWrite::new("user:t1:skype:u1")
///     .only_if(FieldEquals { field: "etag", value: "42" })
///     .field("etag", b"43".to_vec())
///     .field("data", vec![0x1f, 0x8b]);
/// assert_eq!(write.fields.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalHashWrite<'a> {
    /// Key of the hash to write
    pub key: &'a str,
    /// Optional precondition evaluated atomically with the write
    pub precondition: Option<FieldEquals<'a>>,
    /// Fields to set
    pub fields: Vec<(&'a str, Vec<u8>)>,
}

impl<'a> ConditionalHashWrite<'a> {
    /// Start an unconditional write with no fields
    pub fn new(key: &'a str) -> Self {
        Self {
            key,
            precondition: None,
            fields: Vec::new(),
        }
    }

    /// Guard the write with a precondition
    pub fn only_if(mut self, precondition: FieldEquals<'a>) -> Self {
        self.precondition = Some(precondition);
        self
    }

    /// Add a field to set
    pub fn field(mut self, name: &'a str, value: Vec<u8>) -> Self {
        self.fields.push((name, value));
        self
    }
}

/// Hash backend interface
///
/// Implementations must evaluate the precondition and apply every field of
/// a [`ConditionalHashWrite`] as one indivisible operation: no other writer
/// may observe or change the hash in between.
#[async_trait]
pub trait HashBackend: Send + Sync + std::fmt::Debug {
    /// Fetch every field of the hash at `key`
    async fn fetch_all(&self, key: &str) -> Result<HashRecord>;

    /// Apply `write` if its precondition holds
    ///
    /// # Returns
    /// `true` if the fields were written, `false` if the precondition failed
    /// and nothing was changed
    async fn write_if(&self, write: ConditionalHashWrite<'_>) -> Result<bool>;

    /// Check that the backend answers
    async fn ping(&self) -> Result<()>;

    /// Get the name/identifier of this backend implementation
    fn backend_name(&self) -> &str;
}
