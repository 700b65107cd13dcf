//! In-memory hash backend
//!
//! Keeps hashes in a sharded concurrent map. A conditional write holds the
//! shard lock of its key while it checks and writes, which gives the same
//! per-key atomicity the Redis backend gets from running a script.

use async_trait::async_trait;
use botstore_domain::error::{Error, Result};
use botstore_domain::ports::{ConditionalHashWrite, HashBackend, HashRecord};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicBool, Ordering};

/// Process-local [`HashBackend`]
///
/// # Example
///
/// ```
/// use botstore_providers::backend::InMemoryHashBackend;
///
/// let backend = InMemoryHashBackend::new();
/// assert!(backend.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryHashBackend {
    hashes: DashMap<String, HashRecord>,
    offline: AtomicBool,
}

impl InMemoryHashBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail with `BackendUnavailable` until turned back on
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Overwrite the hash at `key` without any check
    ///
    /// Lets tests plant records another writer (or a broken one) left behind.
    pub fn insert_raw<I, F>(&self, key: &str, fields: I)
    where
        I: IntoIterator<Item = (F, Vec<u8>)>,
        F: Into<String>,
    {
        let record = fields
            .into_iter()
            .map(|(field, value)| (field.into(), value))
            .collect();
        self.hashes.insert(key.to_string(), record);
    }

    /// Number of stored hashes
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::backend_unavailable("In-memory backend is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl HashBackend for InMemoryHashBackend {
    async fn fetch_all(&self, key: &str) -> Result<HashRecord> {
        self.ensure_online()?;
        Ok(self
            .hashes
            .get(key)
            .map(|record| record.value().clone())
            .unwrap_or_default())
    }

    async fn write_if(&self, write: ConditionalHashWrite<'_>) -> Result<bool> {
        self.ensure_online()?;

        let fields = write
            .fields
            .into_iter()
            .map(|(field, value)| (field.to_string(), value));

        match self.hashes.entry(write.key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if let Some(precondition) = write.precondition {
                    let current = occupied.get().get(precondition.field);
                    if current.map(Vec::as_slice) != Some(precondition.value.as_bytes()) {
                        return Ok(false);
                    }
                }
                occupied.get_mut().extend(fields);
            }
            Entry::Vacant(vacant) => {
                if write.precondition.is_some() {
                    return Ok(false);
                }
                vacant.insert(fields.collect());
            }
        }
        Ok(true)
    }

    async fn ping(&self) -> Result<()> {
        self.ensure_online()
    }

    fn backend_name(&self) -> &str {
        "in_memory"
    }
}
