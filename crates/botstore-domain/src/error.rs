//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by variants that wrap a foreign failure
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the bot state store
#[derive(Error, Debug)]
pub enum Error {
    /// An operation was attempted before the store was configured
    #[error("Store not configured: {message}")]
    NotConfigured {
        /// Description of what was missing
        message: String,
    },

    /// A state category outside the supported set
    #[error("Unsupported state category: {category}")]
    UnsupportedCategory {
        /// The rejected category text
        category: String,
    },

    /// A backend record exists but does not follow the etag/data layout
    #[error("Corrupt record at '{key}': {message}")]
    CorruptRecord {
        /// Backend key of the record
        key: String,
        /// What is wrong with the record
        message: String,
    },

    /// Payload compression, decompression, serialization or parsing failure
    #[error("Codec error: {message}")]
    Codec {
        /// Description of the codec failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// The conditional write was rejected because the stored version moved on
    #[error("Concurrency conflict on '{key}': stored version no longer matches the expected etag")]
    Concurrency {
        /// Backend key of the contested record
        key: String,
    },

    /// The backend could not be reached or did not answer in time
    #[error("Backend unavailable: {message}")]
    BackendUnavailable {
        /// Description of the backend failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// The backend answered but refused the command
    ///
    /// Covers server errors that repeating the command will not fix, such as
    /// missing permissions or a failed authentication.
    #[error("Backend rejected the command: {message}")]
    BackendRejected {
        /// Description of the rejection
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },
}

// Store protocol error creation methods
impl Error {
    /// Create a not-configured error
    pub fn not_configured<S: Into<String>>(message: S) -> Self {
        Self::NotConfigured {
            message: message.into(),
        }
    }

    /// Create an unsupported category error
    pub fn unsupported_category<S: Into<String>>(category: S) -> Self {
        Self::UnsupportedCategory {
            category: category.into(),
        }
    }

    /// Create a corrupt record error
    pub fn corrupt_record<K: Into<String>, S: Into<String>>(key: K, message: S) -> Self {
        Self::CorruptRecord {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a concurrency conflict error
    pub fn concurrency<K: Into<String>>(key: K) -> Self {
        Self::Concurrency { key: key.into() }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

// Codec error creation methods
impl Error {
    /// Create a codec error
    pub fn codec<S: Into<String>>(message: S) -> Self {
        Self::Codec {
            message: message.into(),
            source: None,
        }
    }

    /// Create a codec error with source
    pub fn codec_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Codec {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Backend error creation methods
impl Error {
    /// Create a backend unavailable error
    pub fn backend_unavailable<S: Into<String>>(message: S) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend unavailable error with source
    pub fn backend_unavailable_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a backend rejection error
    pub fn backend_rejected<S: Into<String>>(message: S) -> Self {
        Self::BackendRejected {
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend rejection error with source
    pub fn backend_rejected_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::BackendRejected {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration and I/O error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification
impl Error {
    /// Whether the caller may retry the same operation unchanged
    ///
    /// Only backend outages qualify. A rejected command fails the same way
    /// again, and a concurrency conflict needs a reload first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::BackendUnavailable { .. })
    }

    /// Whether this is an optimistic concurrency rejection
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, Self::Concurrency { .. })
    }
}
