//! Redis backend error mapping against a scripted RESP server
//!
//! The server answers each command with a canned reply chosen by command
//! name, so server-side failures can be produced without a real Redis.

use botstore_domain::ports::HashBackend;
use botstore_domain::{BotDataStore, Error, Identity, StateCategory, StateRecord, VersionToken};
use botstore_providers::{HashBotDataStore, RedisHashBackend, RedisStoreOptions};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::{TcpListener, TcpStream};

const WRONGTYPE: &str = "-WRONGTYPE Operation against a key holding the wrong kind of value\r\n";

/// Start a server and return its URL
///
/// Commands without a canned reply get `+OK`.
async fn scripted_redis(replies: &[(&'static str, &'static str)]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut table: HashMap<&'static str, &'static str> = HashMap::from([("PING", "+PONG\r\n")]);
    table.extend(replies.iter().copied());
    let table = Arc::new(table);

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(serve(socket, Arc::clone(&table)));
        }
    });
    format!("redis://{addr}")
}

async fn serve(socket: TcpStream, replies: Arc<HashMap<&'static str, &'static str>>) {
    let (read, mut write) = socket.into_split();
    let mut reader = BufReader::new(read);
    while let Some(args) = read_command(&mut reader).await {
        let name = args
            .first()
            .map(|arg| String::from_utf8_lossy(arg).to_ascii_uppercase())
            .unwrap_or_default();
        let reply = replies.get(name.as_str()).copied().unwrap_or("+OK\r\n");
        if write.write_all(reply.as_bytes()).await.is_err() {
            return;
        }
    }
}

/// Read one RESP array of bulk strings
async fn read_command(reader: &mut BufReader<OwnedReadHalf>) -> Option<Vec<Vec<u8>>> {
    let mut line = String::new();
    if reader.read_line(&mut line).await.ok()? == 0 {
        return None;
    }
    let count: usize = line.trim_end().strip_prefix('*')?.parse().ok()?;

    let mut args = Vec::with_capacity(count);
    for _ in 0..count {
        line.clear();
        reader.read_line(&mut line).await.ok()?;
        let len: usize = line.trim_end().strip_prefix('$')?.parse().ok()?;
        let mut arg = vec![0; len + 2];
        reader.read_exact(&mut arg).await.ok()?;
        arg.truncate(len);
        args.push(arg);
    }
    Some(args)
}

fn backend(url: &str) -> RedisHashBackend {
    RedisHashBackend::with_options(
        RedisStoreOptions::new(url)
            .with_connect_timeout(Duration::from_secs(2))
            .with_response_timeout(Duration::from_secs(2)),
    )
    .unwrap()
}

fn store(url: &str) -> HashBotDataStore<RedisHashBackend> {
    HashBotDataStore::new(Arc::new(backend(url)))
}

fn identity() -> Identity {
    Identity::new("t1", "skype", "u1", "c1")
}

async fn load(store: &HashBotDataStore<RedisHashBackend>) -> Result<Option<StateRecord<Value>>, Error> {
    store.load(&identity(), StateCategory::UserState).await
}

#[tokio::test]
async fn test_ping_through_handshake() {
    let url = scripted_redis(&[]).await;

    backend(&url).ping().await.unwrap();
}

#[tokio::test]
async fn test_wrong_type_on_load_is_corrupt_record() {
    let url = scripted_redis(&[("HGETALL", WRONGTYPE)]).await;

    let err = load(&store(&url)).await.unwrap_err();

    match &err {
        Error::CorruptRecord { key, message } => {
            assert_eq!(key, "user:t1:skype:u1");
            assert!(message.contains("not a hash"));
        }
        other => panic!("Expected CorruptRecord, got {other:?}"),
    }
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_wrong_type_on_save_is_corrupt_record() {
    let url = scripted_redis(&[("EVALSHA", WRONGTYPE)]).await;

    let err = store(&url)
        .save(&identity(), StateCategory::UserState, &json!({"a": 1}), &VersionToken::Any)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::CorruptRecord { ref key, .. } if key == "user:t1:skype:u1"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_non_hash_reply_is_corrupt_record() {
    let url = scripted_redis(&[("HGETALL", ":5\r\n")]).await;

    let err = load(&store(&url)).await.unwrap_err();

    assert!(matches!(err, Error::CorruptRecord { .. }));
}

#[tokio::test]
async fn test_permission_error_is_rejected() {
    let url = scripted_redis(&[(
        "HGETALL",
        "-NOPERM this user has no permissions to run the 'hgetall' command\r\n",
    )])
    .await;

    let err = load(&store(&url)).await.unwrap_err();

    assert!(matches!(err, Error::BackendRejected { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_generic_server_error_is_rejected() {
    let url = scripted_redis(&[("HGETALL", "-ERR unknown command 'HGETALL'\r\n")]).await;

    let err = load(&store(&url)).await.unwrap_err();

    assert!(matches!(err, Error::BackendRejected { .. }));
}

#[tokio::test]
async fn test_loading_server_is_unavailable() {
    let url = scripted_redis(&[(
        "HGETALL",
        "-LOADING Redis is loading the dataset in memory\r\n",
    )])
    .await;

    let err = load(&store(&url)).await.unwrap_err();

    assert!(matches!(err, Error::BackendUnavailable { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_refused_connection_is_unavailable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = backend(&format!("redis://{addr}"))
        .fetch_all("user:t1:skype:u1")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::BackendUnavailable { .. }));
    assert!(err.is_retryable());
}
