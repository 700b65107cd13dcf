//! Hash-backed bot state store
//!
//! Implements [`BotDataStore`] on top of any [`HashBackend`]. Every record is
//! a hash with two fields:
//!
//! | Field | Content |
//! |-------|---------|
//! | `etag` | decimal tick count of the write that produced the record |
//! | `data` | gzip-compressed JSON of the caller's value |
//!
//! A save sends both fields in one conditional write guarded by the etag
//! the caller last observed, so a writer holding a stale etag is rejected
//! instead of overwriting someone else's update.

use crate::clock::TickClock;
use crate::codec::GzipJsonCodec;
use async_trait::async_trait;
use botstore_domain::constants::{DATA_FIELD, ETAG_FIELD};
use botstore_domain::error::{Error, Result};
use botstore_domain::keys::KeyDeriver;
use botstore_domain::ports::{BotDataStore, ConditionalHashWrite, FieldEquals, HashBackend};
use botstore_domain::value_objects::{Identity, StateCategory, StateRecord, VersionToken};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// [`BotDataStore`] over a [`HashBackend`]
///
/// # Example
///
/// ```
/// # tokio_test_block_on(async {
/// use botstore_domain::{BotDataStore, Identity, StateCategory, VersionToken};
/// use botstore_providers::{HashBotDataStore, InMemoryHashBackend};
/// use serde_json::{Value, json};
/// use std::sync::Arc;
///
/// let store = HashBotDataStore::new(Arc::new(InMemoryHashBackend::new()));
/// let identity = Identity::new("t1", "skype", "u1", "c1");
///
/// let etag = store
///     .save(&identity, StateCategory::UserState, &json!({"score": 1}), &VersionToken::Any)
///     .await
///     .unwrap();
/// let record: Option<_> = BotDataStore::<Value>::load(&store, &identity, StateCategory::UserState)
///     .await
///     .unwrap();
/// assert_eq!(record.unwrap().version, etag);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug)]
pub struct HashBotDataStore<B: HashBackend + ?Sized> {
    backend: Arc<B>,
    keys: KeyDeriver,
    codec: GzipJsonCodec,
    clock: Arc<TickClock>,
}

impl<B: HashBackend + ?Sized> HashBotDataStore<B> {
    /// Create a store with legacy keys and default compression
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            keys: KeyDeriver::new(),
            codec: GzipJsonCodec::new(),
            clock: TickClock::shared(),
        }
    }

    /// Use a custom key deriver
    pub fn with_key_deriver(mut self, keys: KeyDeriver) -> Self {
        self.keys = keys;
        self
    }

    /// Use a custom codec
    pub fn with_codec(mut self, codec: GzipJsonCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Issue etags from `clock` instead of the process-wide clock
    pub fn with_clock(mut self, clock: Arc<TickClock>) -> Self {
        self.clock = clock;
        self
    }

    /// Backend the store writes to
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Key deriver in use
    pub fn key_deriver(&self) -> &KeyDeriver {
        &self.keys
    }

    /// Backend key for `identity` under `category`
    pub fn key_for(&self, identity: &Identity, category: StateCategory) -> Result<String> {
        self.keys.derive(identity, category)
    }

    /// Check that the backend answers
    pub async fn ping(&self) -> Result<()> {
        self.backend.ping().await
    }
}

#[async_trait]
impl<B, T> BotDataStore<T> for HashBotDataStore<B>
where
    B: HashBackend + ?Sized + 'static,
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn load(
        &self,
        identity: &Identity,
        category: StateCategory,
    ) -> Result<Option<StateRecord<T>>> {
        let key = self.keys.derive(identity, category)?;
        let mut fields = self.backend.fetch_all(&key).await?;

        if fields.is_empty() {
            debug!(key = %key, category = %category, "No stored state");
            return Ok(None);
        }

        let (Some(etag), Some(data)) = (fields.remove(ETAG_FIELD), fields.remove(DATA_FIELD))
        else {
            warn!(key = %key, "Stored record is missing its etag or data field");
            return Err(Error::corrupt_record(
                key,
                format!("record must hold both '{ETAG_FIELD}' and '{DATA_FIELD}' fields"),
            ));
        };

        let Ok(etag) = String::from_utf8(etag) else {
            warn!(key = %key, "Stored etag is not valid UTF-8");
            return Err(Error::corrupt_record(key, "etag is not valid UTF-8"));
        };

        let value = self.codec.decode(&data).inspect_err(|e| {
            warn!(key = %key, error = %e, "Failed to decode stored state");
        })?;

        debug!(key = %key, category = %category, etag = %etag, "Loaded state");
        Ok(Some(StateRecord::new(value, VersionToken::Tag(etag))))
    }

    async fn save(
        &self,
        identity: &Identity,
        category: StateCategory,
        value: &T,
        expected: &VersionToken,
    ) -> Result<VersionToken> {
        let key = self.keys.derive(identity, category)?;
        let payload = self.codec.encode(value)?;
        let etag = self.clock.next_token();

        let mut write = ConditionalHashWrite::new(&key)
            .field(ETAG_FIELD, etag.clone().into_bytes())
            .field(DATA_FIELD, payload);
        if let Some(expected) = expected.expected() {
            write = write.only_if(FieldEquals {
                field: ETAG_FIELD,
                value: expected,
            });
        }

        if !self.backend.write_if(write).await? {
            warn!(key = %key, expected = %expected, "Save rejected, stored version has changed");
            return Err(Error::concurrency(key));
        }

        debug!(key = %key, category = %category, etag = %etag, "Saved state");
        Ok(VersionToken::Tag(etag))
    }

    async fn flush(&self, _identity: &Identity) -> Result<bool> {
        // Writes go straight to the backend; nothing is buffered
        Ok(true)
    }
}
