//! State Store Port
//!
//! The contract the write-through caching layer consumes: load and save
//! per-identity state with ETag-based optimistic concurrency.

use crate::error::Result;
use crate::value_objects::{Identity, StateCategory, StateRecord, VersionToken};
use async_trait::async_trait;

/// Optimistically locked state store
///
/// # Concurrency
///
/// The store never retries. A save rejected with
/// [`Error::Concurrency`](crate::error::Error::Concurrency) must be resolved
/// by the caller: reload, merge or reapply, then save again with the fresh
/// version. [`Error::BackendUnavailable`](crate::error::Error::BackendUnavailable)
/// may be retried as-is.
///
/// # Cancellation
///
/// Dropping a `save` future after the write was dispatched does not undo it.
/// The caller cannot tell a cancelled save from a completed one and should
/// reload before relying on either outcome.
#[async_trait]
pub trait BotDataStore<T>: Send + Sync
where
    T: Send + Sync,
{
    /// Load the state stored for `identity` under `category`
    ///
    /// # Returns
    /// `None` when nothing has been stored yet
    async fn load(
        &self,
        identity: &Identity,
        category: StateCategory,
    ) -> Result<Option<StateRecord<T>>>;

    /// Store `value` if the stored version still equals `expected`
    ///
    /// [`VersionToken::Any`] writes unconditionally.
    ///
    /// # Returns
    /// The version token of the newly stored revision
    async fn save(
        &self,
        identity: &Identity,
        category: StateCategory,
        value: &T,
        expected: &VersionToken,
    ) -> Result<VersionToken>;

    /// Flush buffered writes for `identity`
    ///
    /// Stores without client-side buffering report success immediately.
    async fn flush(&self, identity: &Identity) -> Result<bool>;
}
