//! postbox - a durable, single-file store for contact-form messages
//!
//! Messages live in one pretty-printed JSON document. Every operation
//! reloads the file, applies its change in memory, and replaces the file
//! atomically.
//!
//! ```ignore
//! use postbox::store::MessageStore;
//!
//! let store = MessageStore::open("messages.json")?;
//! let message = store.append("Ann", "a@x.com", "Hi", "Hello")?;
//! store.mark_read(message.id)?;
//! assert_eq!(store.unread_count()?, 0);
//! ```

pub mod cli;
pub mod codec;
pub mod observability;
pub mod store;
