//! Observability for postbox
//!
//! Structured, synchronous JSON logging. Logging is read-only: it never
//! changes the outcome of a store operation, and write failures on the log
//! sink are ignored.
//!
//! ```ignore
//! use postbox::observability::Logger;
//!
//! Logger::info("STORE_MESSAGE_APPENDED", &[("id", "3")]);
//! ```

mod logger;

pub use logger::{Logger, Severity};
