//! Redis hash backend
//!
//! Stores each record as a Redis hash and applies conditional writes with a
//! Lua script, so the etag comparison and the field writes run as one atomic
//! step on the server.
//!
//! ## Connection lifecycle
//!
//! - Options are supplied exactly once, via [`RedisHashBackend::configure`]
//!   or [`RedisHashBackend::with_options`]
//! - The connection is opened on first use and shared afterwards; concurrent
//!   first callers wait on the same initialization
//! - The shared `ConnectionManager` reconnects on its own after a drop
//!
//! ## Example
//!
//! ```ignore
//! use botstore_providers::backend::{RedisHashBackend, RedisStoreOptions};
//!
//! let backend = RedisHashBackend::with_options(
//!     RedisStoreOptions::new("redis://localhost:6379").with_database(2),
//! )?;
//! ```

use crate::constants::{DEFAULT_REDIS_URL, REDIS_CONNECT_TIMEOUT_MS, REDIS_RESPONSE_TIMEOUT_MS};
use async_trait::async_trait;
use botstore_domain::error::{Error, Result};
use botstore_domain::ports::{ConditionalHashWrite, HashBackend, HashRecord};
use redis::aio::ConnectionManager;
use redis::{Client, ErrorKind, RedisError, RedisResult, Script, ServerErrorKind};
use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::timeout;
use tracing::{debug, info};

/// Set the given fields if the guard field holds the expected value
///
/// KEYS[1] = hash key
/// ARGV[1] = "1" to check the guard, "0" to write unconditionally
/// ARGV[2], ARGV[3] = guard field and expected value
/// ARGV[4..] = field/value pairs
const CONDITIONAL_HSET_SCRIPT: &str = r"
if ARGV[1] == '1' and redis.call('HGET', KEYS[1], ARGV[2]) ~= ARGV[3] then
  return 0
end
redis.call('HSET', KEYS[1], unpack(ARGV, 4))
return 1
";

/// Connection options for [`RedisHashBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisStoreOptions {
    /// Redis URL (`redis://[user:pass@]host:port`) or bare `host:port`
    pub connection_target: String,

    /// Logical database; `None` or a negative index keeps the server default
    pub database: Option<i64>,

    /// Limit for establishing the connection
    pub connect_timeout: Duration,

    /// Limit for a single command round trip
    pub response_timeout: Duration,
}

impl RedisStoreOptions {
    /// Options for `connection_target` with default database and timeouts
    pub fn new<S: Into<String>>(connection_target: S) -> Self {
        Self {
            connection_target: connection_target.into(),
            database: None,
            connect_timeout: Duration::from_millis(REDIS_CONNECT_TIMEOUT_MS),
            response_timeout: Duration::from_millis(REDIS_RESPONSE_TIMEOUT_MS),
        }
    }

    /// Select a logical database
    pub fn with_database(mut self, database: i64) -> Self {
        self.database = Some(database);
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, limit: Duration) -> Self {
        self.connect_timeout = limit;
        self
    }

    /// Set the per-command timeout
    pub fn with_response_timeout(mut self, limit: Duration) -> Self {
        self.response_timeout = limit;
        self
    }

    /// Database index to select, if any
    pub fn effective_database(&self) -> Option<i64> {
        self.database.filter(|db| *db >= 0)
    }

    /// Build the URL handed to the Redis client
    ///
    /// A selected database replaces any database path already present in
    /// the target. Unix socket targets carry it as a `db` query parameter.
    pub fn connection_url(&self) -> Result<String> {
        let target = self.connection_target.trim();
        if target.is_empty() {
            return Err(Error::configuration("Redis connection target is empty"));
        }

        let url = if target.contains("://") {
            target.to_string()
        } else {
            format!("redis://{target}")
        };

        let Some(db) = self.effective_database() else {
            return Ok(url);
        };

        if url.starts_with("unix:") || url.starts_with("redis+unix:") {
            let joiner = if url.contains('?') { '&' } else { '?' };
            return Ok(format!("{url}{joiner}db={db}"));
        }

        let (base, query) = match url.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (url.as_str(), None),
        };
        let authority_start = base.find("://").map_or(0, |i| i + 3);
        let authority_end = base[authority_start..]
            .find('/')
            .map_or(base.len(), |i| authority_start + i);

        let mut selected = format!("{}/{db}", &base[..authority_end]);
        if let Some(query) = query {
            selected.push('?');
            selected.push_str(query);
        }
        Ok(selected)
    }
}

impl Default for RedisStoreOptions {
    fn default() -> Self {
        Self::new(DEFAULT_REDIS_URL)
    }
}

struct Configured {
    options: RedisStoreOptions,
    client: Client,
}

/// Redis [`HashBackend`]
pub struct RedisHashBackend {
    configured: OnceLock<Configured>,
    connection: OnceCell<ConnectionManager>,
    write_script: Script,
}

impl RedisHashBackend {
    /// Create a backend that still needs [`configure`](Self::configure)
    ///
    /// Every operation fails with `NotConfigured` until then.
    pub fn new() -> Self {
        Self {
            configured: OnceLock::new(),
            connection: OnceCell::new(),
            write_script: Script::new(CONDITIONAL_HSET_SCRIPT),
        }
    }

    /// Create a configured backend
    pub fn with_options(options: RedisStoreOptions) -> Result<Self> {
        let backend = Self::new();
        backend.configure(options)?;
        Ok(backend)
    }

    /// Supply the connection options
    ///
    /// Options can only be supplied once; the URL is validated here but no
    /// connection is opened until the first operation.
    pub fn configure(&self, options: RedisStoreOptions) -> Result<()> {
        let url = options.connection_url()?;
        let client = Client::open(url.as_str()).map_err(|e| {
            Error::configuration_with_source(format!("Invalid Redis connection target: {e}"), e)
        })?;

        let database = options.effective_database();
        self.configured
            .set(Configured { options, client })
            .map_err(|_| Error::configuration("Redis backend is already configured"))?;

        info!(database = ?database, "Redis backend configured");
        Ok(())
    }

    /// Whether options have been supplied
    pub fn is_configured(&self) -> bool {
        self.configured.get().is_some()
    }

    /// Options in effect, once configured
    pub fn options(&self) -> Option<&RedisStoreOptions> {
        self.configured.get().map(|configured| &configured.options)
    }

    fn configured(&self) -> Result<&Configured> {
        self.configured.get().ok_or_else(|| {
            Error::not_configured("Configure the Redis backend before loading or saving state")
        })
    }

    /// Shared connection, opened on first use
    async fn connection(&self) -> Result<(ConnectionManager, Duration)> {
        let configured = self.configured()?;

        let manager = self
            .connection
            .get_or_try_init(|| async {
                let manager = timeout(
                    configured.options.connect_timeout,
                    ConnectionManager::new(configured.client.clone()),
                )
                .await
                .map_err(|_| Error::backend_unavailable("Timed out connecting to Redis"))?
                .map_err(|e| classify(e, "connect", None))?;

                info!("Redis connection established");
                Ok::<_, Error>(manager)
            })
            .await?;

        Ok((manager.clone(), configured.options.response_timeout))
    }
}

/// Await a Redis command within `limit`
///
/// `key` names the record the command reads or writes, if any.
async fn bounded<T>(
    limit: Duration,
    operation: &str,
    key: Option<&str>,
    command: impl Future<Output = RedisResult<T>>,
) -> Result<T> {
    match timeout(limit, command).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(classify(e, operation, key)),
        Err(_) => Err(Error::backend_unavailable(format!(
            "Redis {operation} timed out after {}ms",
            limit.as_millis()
        ))),
    }
}

/// Map a Redis failure to a domain error
///
/// Only transport failures and transient server states are reported as
/// `BackendUnavailable`. A key holding something other than a hash is a
/// corrupt record; any other server error is a rejection.
fn classify(e: RedisError, operation: &str, key: Option<&str>) -> Error {
    if let Some(key) = key {
        if e.code() == Some("WRONGTYPE") {
            return Error::corrupt_record(
                key,
                format!("Redis {operation} found a value that is not a hash: {e}"),
            );
        }
        if matches!(e.kind(), ErrorKind::Parse | ErrorKind::UnexpectedReturnType) {
            return Error::corrupt_record(
                key,
                format!("Redis {operation} reply could not be read: {e}"),
            );
        }
    }

    if is_transient(&e) {
        Error::backend_unavailable_with_source(format!("Redis {operation} failed: {e}"), e)
    } else {
        Error::backend_rejected_with_source(format!("Redis {operation} was rejected: {e}"), e)
    }
}

fn is_transient(e: &RedisError) -> bool {
    e.is_io_error()
        || e.is_timeout()
        || e.is_connection_dropped()
        || e.is_connection_refusal()
        || matches!(
            e.kind(),
            ErrorKind::ClusterConnectionNotFound
                | ErrorKind::Server(
                    ServerErrorKind::BusyLoading
                        | ServerErrorKind::TryAgain
                        | ServerErrorKind::ClusterDown
                        | ServerErrorKind::MasterDown
                        | ServerErrorKind::ReadOnly
                )
        )
}

impl Default for RedisHashBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HashBackend for RedisHashBackend {
    async fn fetch_all(&self, key: &str) -> Result<HashRecord> {
        let (mut conn, limit) = self.connection().await?;
        let record: HashRecord = bounded(
            limit,
            "HGETALL",
            Some(key),
            redis::cmd("HGETALL").arg(key).query_async(&mut conn),
        )
        .await?;
        debug!(key = key, fields = record.len(), "Fetched hash");
        Ok(record)
    }

    async fn write_if(&self, write: ConditionalHashWrite<'_>) -> Result<bool> {
        if write.fields.is_empty() {
            return Err(Error::invalid_argument(format!(
                "Conditional write to '{}' has no fields",
                write.key
            )));
        }

        let (mut conn, limit) = self.connection().await?;

        let (guarded, guard_field, guard_value) = match write.precondition {
            Some(precondition) => ("1", precondition.field, precondition.value),
            None => ("0", "", ""),
        };

        let mut invocation = self.write_script.key(write.key);
        invocation.arg(guarded).arg(guard_field).arg(guard_value);
        for (field, value) in &write.fields {
            invocation.arg(*field).arg(value.as_slice());
        }

        let written: i64 = bounded(
            limit,
            "conditional HSET",
            Some(write.key),
            invocation.invoke_async(&mut conn),
        )
        .await?;
        Ok(written == 1)
    }

    async fn ping(&self) -> Result<()> {
        let (mut conn, limit) = self.connection().await?;
        let _: String = bounded(
            limit,
            "PING",
            None,
            redis::cmd("PING").query_async(&mut conn),
        )
        .await?;
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisHashBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisHashBackend")
            .field("configured", &self.is_configured())
            .field("database", &self.options().and_then(|o| o.effective_database()))
            .field("connected", &self.connection.initialized())
            .finish()
    }
}
