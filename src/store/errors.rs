//! Store error types
//!
//! Error codes:
//! - POSTBOX_STORE_IO_ERROR: the message file could not be read or written
//! - POSTBOX_STORE_DECODE_FAILED: the message file exists but is malformed
//! - POSTBOX_STORE_ENCODE_FAILED: the document could not be serialized
//!
//! A requested id that matches nothing is not an error; operations report
//! it through their return value.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::codec::{DecodeError, EncodeError};

/// Store error type
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{message}: {source}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("message file is malformed: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl StoreError {
    /// Creates an I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            message: message.into(),
            source,
        }
    }

    /// Creates an I/O error naming the path involved
    pub fn io_at(action: &str, path: &Path, source: io::Error) -> Self {
        Self::io(format!("failed to {}: {}", action, path.display()), source)
    }

    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "POSTBOX_STORE_IO_ERROR",
            StoreError::Decode(_) => "POSTBOX_STORE_DECODE_FAILED",
            StoreError::Encode(_) => "POSTBOX_STORE_ENCODE_FAILED",
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
