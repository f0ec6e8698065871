//! Codec error types
//!
//! Error codes:
//! - POSTBOX_DECODE_UTF8: document bytes are not valid UTF-8
//! - POSTBOX_DECODE_SYNTAX: document is not parseable JSON
//! - POSTBOX_DECODE_NOT_AN_OBJECT: top level is not a JSON object
//! - POSTBOX_DECODE_MESSAGES_NOT_ARRAY: `messages` holds something other than an array
//! - POSTBOX_ENCODE_FAILED: serializer rejected the document
//!
//! Individual malformed records are never errors. The decoder drops them
//! and logs a warning instead.

use thiserror::Error;

/// Failure to turn raw bytes into a [`Document`](super::Document).
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("document is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("document root must be an object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("`messages` must be an array, found {found}")]
    MessagesNotArray { found: &'static str },
}

impl DecodeError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::Utf8(_) => "POSTBOX_DECODE_UTF8",
            DecodeError::Syntax(_) => "POSTBOX_DECODE_SYNTAX",
            DecodeError::NotAnObject { .. } => "POSTBOX_DECODE_NOT_AN_OBJECT",
            DecodeError::MessagesNotArray { .. } => "POSTBOX_DECODE_MESSAGES_NOT_ARRAY",
        }
    }
}

/// Failure to serialize a [`Document`](super::Document).
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl EncodeError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            EncodeError::Serialize(_) => "POSTBOX_ENCODE_FAILED",
        }
    }
}

/// Result type for decoding
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for encoding
pub type EncodeResult<T> = Result<T, EncodeError>;
