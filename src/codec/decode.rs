//! Structural decoder for message documents
//!
//! Accepts both the current typed layout and the legacy layout where
//! `id` and `read` were written as strings (`"id": "3"`, `"read": "false"`).
//!
//! Only a malformed document root is an error. A record that cannot be
//! identified (missing or non-numeric `id`, or not an object at all) is
//! dropped with a `CODEC_RECORD_SKIPPED` warning so one bad entry never
//! makes the rest of the history unreadable.

use serde_json::{Map, Value};

use super::errors::{DecodeError, DecodeResult};
use super::record::{Document, Message, MessageId, MESSAGES_KEY};
use crate::observability::Logger;

/// Why a single record was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    NotAnObject,
    MissingId,
    InvalidId,
}

impl SkipReason {
    fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NotAnObject => "record is not an object",
            SkipReason::MissingId => "record has no id",
            SkipReason::InvalidId => "record id is not a positive integer",
        }
    }
}

/// Decodes raw document bytes.
///
/// Empty (or whitespace-only) input yields an empty document, as does a
/// missing or `null` `messages` key.
///
/// # Errors
///
/// Returns `DecodeError` if the bytes are not UTF-8 JSON, the root is not
/// an object, or `messages` is present but not an array.
pub fn decode(bytes: &[u8]) -> DecodeResult<Document> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    if text.trim().is_empty() {
        Logger::warn("CODEC_EMPTY_DOCUMENT", &[]);
        return Ok(Document::new());
    }

    let root: Value = serde_json::from_str(text).map_err(DecodeError::Syntax)?;
    let root = match root {
        Value::Object(map) => map,
        other => {
            return Err(DecodeError::NotAnObject {
                found: type_name(&other),
            })
        }
    };

    let entries = match root.get(MESSAGES_KEY) {
        None | Some(Value::Null) => return Ok(Document::new()),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(DecodeError::MessagesNotArray {
                found: type_name(other),
            })
        }
    };

    let mut messages = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match decode_message(index, entry) {
            Ok(message) => messages.push(message),
            Err(reason) => {
                let index = index.to_string();
                Logger::warn(
                    "CODEC_RECORD_SKIPPED",
                    &[("index", index.as_str()), ("reason", reason.as_str())],
                );
            }
        }
    }

    Ok(Document::with_messages(messages))
}

fn decode_message(index: usize, entry: &Value) -> Result<Message, SkipReason> {
    let fields = entry.as_object().ok_or(SkipReason::NotAnObject)?;
    let id = decode_id(fields.get("id"))?;

    Ok(Message {
        id,
        name: text_field(fields, "name"),
        email: text_field(fields, "email"),
        subject: text_field(fields, "subject"),
        body: text_field(fields, "message"),
        timestamp: text_field(fields, "timestamp"),
        read: read_flag(index, fields.get("read")),
    })
}

fn decode_id(value: Option<&Value>) -> Result<MessageId, SkipReason> {
    let id = match value {
        None | Some(Value::Null) => return Err(SkipReason::MissingId),
        Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().and_then(integral_id)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<MessageId>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral_id))
        }
        Some(_) => None,
    };

    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(SkipReason::InvalidId),
    }
}

/// Accepts a float id such as `2.0` when it has no fractional part.
fn integral_id(value: f64) -> Option<MessageId> {
    if value.is_finite() && value.fract() == 0.0 && value > 0.0 && value <= MessageId::MAX as f64 {
        Some(value as MessageId)
    } else {
        None
    }
}

/// Free-text field; absent or null becomes the empty string.
fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn read_flag(index: usize, value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("true") => true,
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("false") => false,
        Some(other) => {
            let index = index.to_string();
            let raw = other.to_string();
            Logger::warn(
                "CODEC_READ_FLAG_UNRECOGNIZED",
                &[("index", index.as_str()), ("value", raw.as_str())],
            );
            false
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_document() {
        let raw = br#"{"messages": [
            {"id": 1, "name": "Ann", "email": "a@x.com", "subject": "Hi",
             "message": "Hello", "timestamp": "2026-01-02T03:04:05", "read": true}
        ]}"#;

        let doc = decode(raw).unwrap();
        assert_eq!(doc.len(), 1);
        let m = &doc.messages[0];
        assert_eq!(m.id, 1);
        assert_eq!(m.name, "Ann");
        assert_eq!(m.email, "a@x.com");
        assert_eq!(m.subject, "Hi");
        assert_eq!(m.body, "Hello");
        assert_eq!(m.timestamp, "2026-01-02T03:04:05");
        assert!(m.read);
    }

    #[test]
    fn test_legacy_string_fields() {
        let raw = br#"{"messages": [
            {"id": "7", "name": "Ann", "read": "true"},
            {"id": " 8 ", "name": "Bob", "read": "FALSE"}
        ]}"#;

        let doc = decode(raw).unwrap();
        assert_eq!(doc.messages[0].id, 7);
        assert!(doc.messages[0].read);
        assert_eq!(doc.messages[1].id, 8);
        assert!(!doc.messages[1].read);
    }

    #[test]
    fn test_integral_float_ids() {
        let raw = br#"{"messages": [
            {"id": 2.0, "name": "float"},
            {"id": " 3.0 ", "name": "float text"},
            {"id": 4.5, "name": "fractional"},
            {"id": "NaN", "name": "not a number"},
            {"id": -1.0, "name": "negative"}
        ]}"#;

        let doc = decode(raw).unwrap();
        let ids: Vec<_> = doc.messages.iter().map(|m| (m.id, m.name.as_str())).collect();
        assert_eq!(ids, vec![(2, "float"), (3, "float text")]);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let doc = decode(br#"{"messages": [{"id": 1}]}"#).unwrap();
        let m = &doc.messages[0];
        assert_eq!(m.name, "");
        assert_eq!(m.email, "");
        assert_eq!(m.subject, "");
        assert_eq!(m.body, "");
        assert_eq!(m.timestamp, "");
        assert!(!m.read);
    }

    #[test]
    fn test_numeric_text_fields_are_stringified() {
        let doc = decode(br#"{"messages": [{"id": 1, "subject": 42, "name": null}]}"#).unwrap();
        assert_eq!(doc.messages[0].subject, "42");
        assert_eq!(doc.messages[0].name, "");
    }

    #[test]
    fn test_records_without_usable_id_are_skipped() {
        let raw = br#"{"messages": [
            {"name": "no id"},
            {"id": "abc", "name": "bad id"},
            {"id": 0, "name": "zero"},
            {"id": -3, "name": "negative"},
            "not an object",
            {"id": 2, "name": "kept"}
        ]}"#;

        let doc = decode(raw).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.messages[0].name, "kept");
    }

    #[test]
    fn test_unrecognized_read_flag_is_unread() {
        let doc = decode(br#"{"messages": [{"id": 1, "read": "yes"}]}"#).unwrap();
        assert!(!doc.messages[0].read);
    }

    #[test]
    fn test_missing_or_null_messages_is_empty() {
        assert!(decode(b"{}").unwrap().is_empty());
        assert!(decode(br#"{"messages": null}"#).unwrap().is_empty());
        assert!(decode(br#"{"messages": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert!(decode(b"").unwrap().is_empty());
        assert!(decode(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_root_fails() {
        assert!(matches!(decode(b"{not json"), Err(DecodeError::Syntax(_))));
        assert!(matches!(
            decode(b"[]"),
            Err(DecodeError::NotAnObject { found: "array" })
        ));
        assert!(matches!(
            decode(br#"{"messages": "oops"}"#),
            Err(DecodeError::MessagesNotArray { found: "string" })
        ));
        assert!(matches!(decode(&[0xff, 0xfe]), Err(DecodeError::Utf8(_))));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let mut raw = "\u{feff}".as_bytes().to_vec();
        raw.extend_from_slice(br#"{"messages": [{"id": 1}]}"#);
        assert_eq!(decode(&raw).unwrap().len(), 1);
    }
}
