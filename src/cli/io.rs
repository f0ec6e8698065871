//! JSON output for the CLI
//!
//! Every invocation prints exactly one JSON object on stdout:
//! `{"status":"ok","data":...}` or `{"status":"error","code":...,"message":...}`.
//! Writers are parameters so the envelopes can be captured in tests.

use std::io::Write;

use serde_json::{json, Value};

use super::errors::CliResult;

/// Build the success envelope
pub fn ok_envelope(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

/// Build the error envelope
pub fn error_envelope(code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

/// Write a success response to `out`
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    write_line(out, &ok_envelope(data))
}

/// Write an error response to `out`
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    write_line(out, &error_envelope(code, message))
}

fn write_line<W: Write>(out: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelopes() {
        let ok = ok_envelope(json!({"count": 2}));
        assert_eq!(ok["status"], "ok");
        assert_eq!(ok["data"]["count"], 2);

        let err = error_envelope("POSTBOX_STORE_IO_ERROR", "denied");
        assert_eq!(err["status"], "error");
        assert_eq!(err["code"], "POSTBOX_STORE_IO_ERROR");
        assert_eq!(err["message"], "denied");
    }

    #[test]
    fn test_write_response_is_one_line() {
        let mut out = Vec::new();
        write_response(&mut out, json!({"count": 0})).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.matches('\n').count(), 1);
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["status"], "ok");
    }
}
