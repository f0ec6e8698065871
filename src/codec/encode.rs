//! Canonical document encoder
//!
//! Output is pretty-printed JSON with two-space indentation and a trailing
//! newline. Record keys follow `Message` field order
//! (`id, name, email, subject, message, timestamp, read`); `id` is always a
//! number and `read` always a boolean, whatever the source file used.

use super::errors::{EncodeError, EncodeResult};
use super::record::Document;

/// Encodes a document into its on-disk bytes.
///
/// # Errors
///
/// Returns `EncodeError::Serialize` if serialization fails.
pub fn encode(document: &Document) -> EncodeResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(document).map_err(EncodeError::Serialize)?;
    bytes.push(b'\n');
    Ok(bytes)
}
