//! Document codec for postbox
//!
//! Converts the persisted JSON document into an ordered sequence of
//! [`Message`] records and back.
//!
//! # Guarantees
//!
//! - Total: every well-formed root decodes; bad records are skipped, not fatal
//! - Lossless: `decode(encode(d)) == d` for any document with positive ids
//! - Deterministic: encoding the same document always yields the same bytes
//! - Backward compatible: legacy string-typed `id`/`read` values are accepted

mod decode;
mod encode;
mod errors;
mod record;

pub use decode::decode;
pub use encode::encode;
pub use errors::{DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use record::{Document, Message, MessageId, MESSAGES_KEY, TIMESTAMP_FORMAT};
