//! Message store over a single JSON document
//!
//! Every public operation is a self-contained load → mutate → save cycle.
//! Nothing is cached between calls; the file is the single source of truth.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use super::durable::write_atomic;
use super::errors::{StoreError, StoreResult};
use crate::codec::{decode, encode, Document, Message, MessageId, TIMESTAMP_FORMAT};
use crate::observability::Logger;

/// CRUD surface over the message file at a fixed path.
///
/// # Concurrency
///
/// The store holds no lock. Two callers mutating the same file at once can
/// interleave their load and save windows, and the later save then drops
/// the earlier change. Callers that may run concurrently must serialize
/// mutating access themselves (single writer queue, file lock, ...).
#[derive(Debug, Clone)]
pub struct MessageStore {
    path: PathBuf,
}

impl MessageStore {
    /// Opens the store at `path`, creating an empty document if the file
    /// does not exist yet. No handle is kept open afterwards.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the path cannot be inspected, is not a
    /// regular file, or the empty document cannot be written (for example
    /// because the parent directory is missing).
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(StoreError::io_at(
                    "open message file",
                    &path,
                    io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
                ))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                write_atomic(&path, &encode(&Document::new())?)?;
                let shown = path.display().to_string();
                Logger::info("STORE_CREATED", &[("path", shown.as_str())]);
            }
            Err(e) => return Err(StoreError::io_at("inspect message file", &path, e)),
        }

        Ok(Self { path })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All messages in insertion order.
    pub fn list_all(&self) -> StoreResult<Vec<Message>> {
        Ok(self.load()?.messages)
    }

    /// First message with the given id.
    pub fn get(&self, id: MessageId) -> StoreResult<Option<Message>> {
        Ok(self.load()?.find(id).cloned())
    }

    /// Unread messages in insertion order.
    pub fn unread(&self) -> StoreResult<Vec<Message>> {
        let mut messages = self.load()?.messages;
        messages.retain(|m| !m.read);
        Ok(messages)
    }

    /// Number of unread messages. Never writes.
    pub fn unread_count(&self) -> StoreResult<usize> {
        Ok(self.load()?.unread_count())
    }

    /// Appends a new unread message and returns it with its assigned id.
    ///
    /// The id is `count + 1`. Ids loaded with gaps or duplicates (for
    /// example after a record without an id was dropped) are renumbered to
    /// `1..=N` first so the new id cannot collide. The timestamp is the current local time,
    /// held at the previous message's timestamp if the clock stepped back,
    /// so timestamps never decrease along the collection.
    ///
    /// # Errors
    ///
    /// On a save failure nothing is persisted and the new record is dropped.
    pub fn append(
        &self,
        name: &str,
        email: &str,
        subject: &str,
        body: &str,
    ) -> StoreResult<Message> {
        let mut document = self.load()?;
        if !document.has_contiguous_ids() {
            document.renumber();
        }

        let timestamp = next_timestamp(document.messages.last());
        let message = Message::new(document.next_id(), name, email, subject, body, timestamp);
        document.messages.push(message.clone());

        self.save(&document)?;

        let id = message.id.to_string();
        Logger::info("STORE_MESSAGE_APPENDED", &[("id", id.as_str())]);
        Ok(message)
    }

    /// Marks the first message with `id` as read.
    ///
    /// Returns `false` without touching the file when nothing matches.
    /// Marking an already-read message again rewrites the same content.
    pub fn mark_read(&self, id: MessageId) -> StoreResult<bool> {
        let mut document = self.load()?;

        match document.find_mut(id) {
            Some(message) => message.read = true,
            None => return Ok(false),
        }

        self.save(&document)?;

        let id = id.to_string();
        Logger::info("STORE_MESSAGE_MARKED_READ", &[("id", id.as_str())]);
        Ok(true)
    }

    /// Removes every message with `id` and renumbers the rest to `1..=N`.
    ///
    /// The file is rewritten even when nothing matched, so ids are always
    /// contiguous afterwards. Returns whether anything was removed.
    pub fn delete(&self, id: MessageId) -> StoreResult<bool> {
        let mut document = self.load()?;

        let removed = document.remove_all(id);
        document.renumber();

        self.save(&document)?;

        let (id, count) = (id.to_string(), removed.to_string());
        Logger::info(
            "STORE_MESSAGE_DELETED",
            &[("id", id.as_str()), ("removed", count.as_str())],
        );
        Ok(removed > 0)
    }

    fn load(&self) -> StoreResult<Document> {
        let bytes = fs::read(&self.path)
            .map_err(|e| StoreError::io_at("read message file", &self.path, e))?;

        let (path, size) = (self.path.display().to_string(), bytes.len().to_string());
        Logger::trace("STORE_LOADED", &[("bytes", size.as_str()), ("path", path.as_str())]);

        Ok(decode(&bytes)?)
    }

    fn save(&self, document: &Document) -> StoreResult<()> {
        let bytes = encode(document)?;
        write_atomic(&self.path, &bytes).map_err(|e| {
            let (error, path) = (e.to_string(), self.path.display().to_string());
            Logger::error(
                "STORE_SAVE_FAILED",
                &[("error", error.as_str()), ("path", path.as_str())],
            );
            e
        })
    }
}

/// Current local time, never earlier than the previous record's timestamp.
fn next_timestamp(previous: Option<&Message>) -> String {
    let now = Local::now().format(TIMESTAMP_FORMAT).to_string();

    match previous {
        Some(last) if is_fixed_format(&last.timestamp) && last.timestamp > now => {
            last.timestamp.clone()
        }
        _ => now,
    }
}

fn is_fixed_format(timestamp: &str) -> bool {
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).is_ok()
}
