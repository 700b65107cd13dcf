//! CLI Tests

use botstore::cli::{Cli, Command, execute};
use botstore::domain::{Error, StateCategory, VersionToken};
use botstore_infrastructure::bootstrap::build_in_memory_store;
use botstore_infrastructure::config::StoreConfig;
use clap::{CommandFactory, Parser};
use serde_json::{Value, json};

const TARGET: [&str; 8] = [
    "--category",
    "user",
    "--tenant",
    "t1",
    "--channel",
    "skype",
    "--user",
    "u1",
];

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("botstore").chain(args.iter().copied())).unwrap()
}

fn with_target(command: &str, rest: &[&str]) -> Cli {
    let mut args = vec![command];
    args.extend_from_slice(&TARGET);
    args.extend_from_slice(rest);
    parse(&args)
}

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_put_defaults_to_wildcard_etag() {
    let cli = with_target("put", &[r#"{"a":1}"#]);

    match cli.command {
        Command::Put { target, etag, value } => {
            assert_eq!(target.category, StateCategory::UserState);
            assert_eq!(target.conversation, "");
            assert_eq!(etag, VersionToken::Any);
            assert_eq!(value, r#"{"a":1}"#);
        }
        other => panic!("Expected put, got {other:?}"),
    }
}

#[test]
fn test_parse_global_config_flag() {
    let cli = parse(&["ping", "--config", "/etc/botstore.toml"]);

    assert_eq!(cli.command, Command::Ping);
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/etc/botstore.toml"))
    );
}

#[test]
fn test_parse_rejects_unknown_category() {
    let result = Cli::try_parse_from([
        "botstore",
        "key",
        "--category",
        "dialog",
        "--tenant",
        "t1",
        "--channel",
        "skype",
    ]);

    let err = result.unwrap_err().to_string();
    assert!(err.contains("Unsupported state category"));
}

#[tokio::test]
async fn test_key_command() {
    let store = build_in_memory_store(&StoreConfig::default());

    let output = execute(&store, &with_target("key", &[]).command)
        .await
        .unwrap();

    assert_eq!(output, "user:t1:skype:u1");
}

#[tokio::test]
async fn test_get_absent_prints_null() {
    let store = build_in_memory_store(&StoreConfig::default());

    let output = execute(&store, &with_target("get", &[]).command)
        .await
        .unwrap();

    assert_eq!(output, "null");
}

#[tokio::test]
async fn test_put_then_get_then_stale_put() {
    let store = build_in_memory_store(&StoreConfig::default());

    let etag = execute(&store, &with_target("put", &[r#"{"name":"Ada"}"#]).command)
        .await
        .unwrap();

    let shown: Value = serde_json::from_str(
        &execute(&store, &with_target("get", &[]).command)
            .await
            .unwrap(),
    )
    .unwrap();
    assert_eq!(shown, json!({"etag": etag.as_str(), "value": {"name": "Ada"}}));

    execute(
        &store,
        &with_target("put", &["--etag", etag.as_str(), r#"{"name":"Grace"}"#]).command,
    )
    .await
    .unwrap();

    let err = execute(
        &store,
        &with_target("put", &["--etag", etag.as_str(), r#"{"name":"Linus"}"#]).command,
    )
    .await
    .unwrap_err();
    assert!(err.is_concurrency_conflict());
}

#[tokio::test]
async fn test_put_rejects_invalid_json() {
    let store = build_in_memory_store(&StoreConfig::default());

    let err = execute(&store, &with_target("put", &["{not json"]).command)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert!(store.backend().is_empty());
}

#[tokio::test]
async fn test_ping_command() {
    let store = build_in_memory_store(&StoreConfig::default());

    let output = execute(&store, &Command::Ping).await.unwrap();

    assert_eq!(output, "in_memory backend is reachable");
}
