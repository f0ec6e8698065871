//! CLI module for postbox
//!
//! Provides a command-line interface over the message store:
//! - list / show: read-only queries
//! - add: append a message
//! - read / delete: mutate by id
//! - unread: unread count plus the unread messages

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{execute, resolve_config, respond, run, run_command, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{error_envelope, ok_envelope, write_error, write_response};
