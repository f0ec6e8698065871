//! In-memory message records
//!
//! A [`Document`] is the whole persisted file: one ordered `messages`
//! collection. Field declaration order on [`Message`] is the on-disk key
//! order, so it must not be rearranged.

use serde::Serialize;

/// Identifier of a message within one store (1-based, contiguous).
pub type MessageId = u64;

/// Name of the single top-level collection key.
pub const MESSAGES_KEY: &str = "messages";

/// Format of timestamps stamped at append time (local time, sortable).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub subject: String,
    /// Free-text body, stored under the `message` key.
    #[serde(rename = "message")]
    pub body: String,
    /// Creation time. Set once, never rewritten.
    pub timestamp: String,
    pub read: bool,
}

impl Message {
    /// Creates an unread message.
    pub fn new(
        id: MessageId,
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            body: body.into(),
            timestamp: timestamp.into(),
            read: false,
        }
    }
}

/// The root persisted object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub messages: Vec<Message>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document holding `messages` in the given order.
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Id the next appended message receives.
    pub fn next_id(&self) -> MessageId {
        self.messages.len() as MessageId + 1
    }

    /// Whether ids are exactly `1..=N` in order.
    pub fn has_contiguous_ids(&self) -> bool {
        self.messages
            .iter()
            .enumerate()
            .all(|(index, message)| message.id == index as MessageId + 1)
    }

    /// First message carrying `id`, if any.
    pub fn find(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn find_mut(&mut self, id: MessageId) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == id)
    }

    /// Removes every message carrying `id`. Returns how many were removed.
    pub fn remove_all(&mut self, id: MessageId) -> usize {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        before - self.messages.len()
    }

    /// Reassigns ids to `1..=N` following the current order.
    pub fn renumber(&mut self) {
        for (index, message) in self.messages.iter_mut().enumerate() {
            message.id = index as MessageId + 1;
        }
    }

    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.read).count()
    }
}
