//! Command line interface
//!
//! Argument definitions for the `botstore` binary and the command runner.
//! Commands run against any [`HashBotDataStore`], so they can be exercised
//! over the in-memory backend as well as Redis.

use botstore_domain::error::{Error, Result};
use botstore_domain::ports::{BotDataStore, HashBackend};
use botstore_domain::value_objects::{Identity, StateCategory, StateRecord, VersionToken};
use botstore_infrastructure::error_ext::ErrorContext;
use botstore_providers::store::HashBotDataStore;
use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use std::path::PathBuf;

/// Read value from stdin when given as the value argument
const STDIN_MARKER: &str = "-";

/// Command line interface for botstore
#[derive(Parser, Debug)]
#[command(name = "botstore")]
#[command(about = "Inspect and edit bot state kept in Redis")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the backend key a record is stored under
    Key(Target),

    /// Load a record and print its etag and value as JSON
    Get(Target),

    /// Save a JSON value and print the new etag
    Put {
        #[command(flatten)]
        target: Target,

        /// Etag the write is based on; `*` writes unconditionally
        #[arg(long, default_value = "*")]
        etag: VersionToken,

        /// JSON value, or `-` to read it from stdin
        value: String,
    },

    /// Check that the backend answers
    Ping,
}

/// Record addressed by a command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// State category (conversation, user, private_conversation)
    #[arg(long)]
    pub category: StateCategory,

    /// Tenant (bot) id
    #[arg(long)]
    pub tenant: String,

    /// Channel id
    #[arg(long)]
    pub channel: String,

    /// User id; needed by user and private conversation state
    #[arg(long, default_value = "")]
    pub user: String,

    /// Conversation id; needed by conversation and private conversation state
    #[arg(long, default_value = "")]
    pub conversation: String,
}

impl Target {
    /// Identity the command addresses
    pub fn identity(&self) -> Identity {
        Identity::new(
            self.tenant.as_str(),
            self.channel.as_str(),
            self.user.as_str(),
            self.conversation.as_str(),
        )
    }
}

/// Run `command` against `store` and return the text to print
pub async fn execute<B>(store: &HashBotDataStore<B>, command: &Command) -> Result<String>
where
    B: HashBackend + ?Sized + 'static,
{
    match command {
        Command::Key(target) => store.key_for(&target.identity(), target.category),
        Command::Get(target) => {
            let record: Option<StateRecord<Value>> =
                store.load(&target.identity(), target.category).await?;
            Ok(match record {
                Some(record) => json!({
                    "etag": record.version.as_str(),
                    "value": record.value,
                })
                .to_string(),
                None => Value::Null.to_string(),
            })
        }
        Command::Put {
            target,
            etag,
            value,
        } => {
            let value = parse_value(value)?;
            let saved = store
                .save(&target.identity(), target.category, &value, etag)
                .await?;
            Ok(saved.to_string())
        }
        Command::Ping => {
            store.ping().await?;
            Ok(format!("{} backend is reachable", store.backend().backend_name()))
        }
    }
}

fn parse_value(raw: &str) -> Result<Value> {
    let text = if raw == STDIN_MARKER {
        std::io::read_to_string(std::io::stdin()).io_context("Failed to read value from stdin")?
    } else {
        raw.to_string()
    };
    serde_json::from_str(&text)
        .map_err(|e| Error::invalid_argument(format!("Value is not valid JSON: {e}")))
}
