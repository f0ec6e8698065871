//! CLI argument definitions using clap
//!
//! Commands:
//! - postbox list
//! - postbox show --id <id>
//! - postbox add --name <name> --email <email> --subject <subject> --message <body>
//! - postbox read --id <id>
//! - postbox delete --id <id>
//! - postbox unread
//!
//! `--file` and `--config` are accepted before or after the subcommand.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// postbox - a durable single-file store for contact-form messages
#[derive(Parser, Debug)]
#[command(name = "postbox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the message file (overrides the config file)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all messages in insertion order
    List,

    /// Show one message
    Show {
        #[arg(long)]
        id: u64,
    },

    /// Append a new message
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        /// Message body
        #[arg(long)]
        message: String,
    },

    /// Mark a message as read
    Read {
        #[arg(long)]
        id: u64,
    },

    /// Delete a message and renumber the rest
    Delete {
        #[arg(long)]
        id: u64,
    },

    /// Show the unread count and the unread messages
    Unread,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
