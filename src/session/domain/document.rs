//! On-disk shape of the session registry: `{"sessions": [...]}`.
//!
//! Entries are kept as raw JSON values. Reading tolerates anything: a file
//! that is not a JSON object with a `sessions` array decodes to no entries,
//! and individual entries are only interpreted when a caller needs them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct SessionDocument {
    #[serde(default)]
    sessions: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct SessionDocumentRef<'a> {
    sessions: &'a [Value],
}

/// Decodes registry file contents into raw entries.
///
/// Any decode error yields an empty list instead of failing.
#[must_use]
pub fn decode_session_document(text: &str) -> Vec<Value> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<SessionDocument>(text) {
        Ok(document) => document.sessions,
        Err(err) => {
            warn!(error = %err, "session registry is malformed; treating it as empty");
            Vec::new()
        }
    }
}

/// Encodes raw entries as a pretty-printed registry document.
///
/// # Errors
///
/// Returns the `serde_json` error when encoding fails.
pub fn encode_session_document(entries: &[Value]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&SessionDocumentRef { sessions: entries })
}

/// Returns the `pid` field of a raw entry when it is a valid process id.
#[must_use]
pub fn entry_pid(entry: &Value) -> Option<u32> {
    entry
        .get("pid")
        .and_then(Value::as_u64)
        .and_then(|pid| u32::try_from(pid).ok())
}
