//! gzip-compressed JSON codec
//!
//! The value is serialized to JSON text, then gzip-compressed. Decoding
//! decompresses first and only parses once the whole stream inflated
//! cleanly, so a damaged payload is reported as a decompression failure
//! rather than a parse failure.

use crate::constants::UTF8_BOM;
use botstore_domain::error::{Error, Result};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{Read, Write};

/// Stateless JSON + gzip codec
///
/// # Example
///
/// ```
/// use botstore_providers::codec::GzipJsonCodec;
/// use serde_json::json;
///
/// let codec = GzipJsonCodec::new();
/// let bytes = codec.encode(&json!({"score": 1})).unwrap();
/// let value: serde_json::Value = codec.decode(&bytes).unwrap();
/// assert_eq!(value, json!({"score": 1}));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GzipJsonCodec {
    level: Compression,
}

impl GzipJsonCodec {
    /// Create a codec with the default compression level
    pub fn new() -> Self {
        Self {
            level: Compression::default(),
        }
    }

    /// Create a codec with an explicit compression level (0-9)
    pub fn with_level(level: u32) -> Self {
        Self {
            level: Compression::new(level.min(9)),
        }
    }

    /// Compression level in use
    pub fn level(&self) -> u32 {
        self.level.level()
    }

    /// Serialize and compress `value`
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let json = serde_json::to_vec(value)
            .map_err(|e| Error::codec_with_source(format!("Failed to serialize payload: {e}"), e))?;

        let mut encoder = GzEncoder::new(Vec::with_capacity(json.len() / 2 + 32), self.level);
        encoder
            .write_all(&json)
            .map_err(|e| Error::codec_with_source(format!("Failed to compress payload: {e}"), e))?;
        encoder
            .finish()
            .map_err(|e| Error::codec_with_source(format!("Failed to compress payload: {e}"), e))
    }

    /// Decompress and parse `bytes`
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        if bytes.is_empty() {
            return Err(Error::codec("Failed to decompress payload: empty input"));
        }

        let mut inflated = Vec::with_capacity(bytes.len() * 4);
        GzDecoder::new(bytes)
            .read_to_end(&mut inflated)
            .map_err(|e| Error::codec_with_source(format!("Failed to decompress payload: {e}"), e))?;

        let text = std::str::from_utf8(&inflated)
            .map_err(|e| Error::codec_with_source(format!("Failed to parse payload: {e}"), e))?;
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

        serde_json::from_str(text)
            .map_err(|e| Error::codec_with_source(format!("Failed to parse payload: {e}"), e))
    }
}

impl Default for GzipJsonCodec {
    fn default() -> Self {
        Self::new()
    }
}
