//! # Domain Layer
//!
//! Core types and contracts of the bot state store.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error type shared by every layer |
//! | [`constants`] | Record field names and key prefixes |
//! | [`value_objects`] | Identity, category, version token, record |
//! | [`keys`] | Backend key derivation |
//! | [`ports`] | Backend and store traits |

pub mod constants;
pub mod error;
pub mod keys;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use keys::{KeyDeriver, KeyPolicy, derive_key};
pub use ports::{BotDataStore, ConditionalHashWrite, FieldEquals, HashBackend, HashRecord};
pub use value_objects::{Identity, StateCategory, StateRecord, VersionToken};
