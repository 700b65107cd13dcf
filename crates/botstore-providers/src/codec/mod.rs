//! Payload codecs
//!
//! Turn a caller's state value into the bytes stored in the `data` field of
//! a record and back.

pub mod gzip_json;

pub use gzip_json::GzipJsonCodec;
