//! Message store for postbox
//!
//! Owns the path of one message file and exposes list, get, append,
//! mark-as-read, delete and unread queries over it.
//!
//! # Design Principles
//!
//! - Load, mutate in memory, save; no cache between calls
//! - Whole-document writes only, replaced atomically via a temp file
//! - Load failures abort before any mutation; the file stays untouched
//! - A missing id is a normal outcome (`false` / `None`), not an error
//!
//! # Invariants Enforced
//!
//! - Ids are unique and contiguous `1..=N` after every delete
//! - Timestamps are stamped once at append and never rewritten
//! - The file always holds a complete, well-formed document

mod durable;
mod errors;
mod message_store;

pub use durable::write_atomic;
pub use errors::{StoreError, StoreResult};
pub use message_store::MessageStore;
