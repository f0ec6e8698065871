//! CLI command implementations
//!
//! The CLI is a thin client over [`MessageStore`]: it resolves the message
//! file, runs one store operation, and prints the JSON result. It performs
//! no input validation of its own.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::observability::{Logger, Severity};
use crate::store::MessageStore;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Message file (optional, default "messages.json")
    #[serde(default = "default_messages_file")]
    pub messages_file: PathBuf,

    /// Minimum log severity: trace, info, warn or error (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_messages_file() -> PathBuf {
    PathBuf::from("messages.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            messages_file: default_messages_file(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.messages_file.as_os_str().is_empty() {
            return Err(CliError::config_error("messages_file must not be empty"));
        }
        self.severity()?;
        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            CliError::config_error(format!(
                "Invalid log_level: '{}'. Expected trace, info, warn or error.",
                self.log_level
            ))
        })
    }
}

/// Resolve the effective configuration: config file first, then `--file`.
pub fn resolve_config(file: Option<&Path>, config: Option<&Path>) -> CliResult<Config> {
    let mut resolved = match config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(file) = file {
        resolved.messages_file = file.to_path_buf();
    }

    Ok(resolved)
}

/// Entry point used by `main`: parse, execute, print.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    respond(run_command(&cli), &mut io::stdout().lock())
}

/// Print the outcome of a command and hand back its error, if any.
///
/// When the command failed, its error is returned even if printing the
/// error envelope fails too; that second failure is only logged.
pub fn respond<W: Write>(outcome: CliResult<Value>, out: &mut W) -> CliResult<()> {
    match outcome {
        Ok(data) => write_response(out, data),
        Err(e) => {
            if let Err(write_failure) = write_error(out, e.code_str(), e.message()) {
                let reason = write_failure.to_string();
                Logger::error("CLI_WRITE_FAILED", &[("error", reason.as_str())]);
            }
            Err(e)
        }
    }
}

/// Resolve configuration, open the store, and execute the command.
pub fn run_command(cli: &Cli) -> CliResult<Value> {
    let config = resolve_config(cli.file.as_deref(), cli.config.as_deref())?;
    Logger::set_min_severity(config.severity()?);

    let store = MessageStore::open(&config.messages_file)?;
    execute(&cli.command, &store)
}

/// Execute one command against an open store.
pub fn execute(command: &Command, store: &MessageStore) -> CliResult<Value> {
    let data = match command {
        Command::List => {
            let messages = store.list_all()?;
            json!({ "count": messages.len(), "messages": messages })
        }
        Command::Show { id } => match store.get(*id)? {
            Some(message) => json!({ "found": true, "message": message }),
            None => json!({ "found": false, "id": id }),
        },
        Command::Add {
            name,
            email,
            subject,
            message,
        } => {
            let created = store.append(name, email, subject, message)?;
            json!({ "message": created })
        }
        Command::Read { id } => {
            let found = store.mark_read(*id)?;
            json!({ "found": found, "id": id })
        }
        Command::Delete { id } => {
            let found = store.delete(*id)?;
            json!({ "found": found, "id": id })
        }
        Command::Unread => {
            let messages = store.unread()?;
            json!({ "unread": messages.len(), "messages": messages })
        }
    };

    Ok(data)
}
