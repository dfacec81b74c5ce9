//! Decoding tests for the registry document.

use crate::session::domain::{decode_session_document, encode_session_document, entry_pid};
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case("")]
#[case("   ")]
#[case("not json")]
#[case("[1, 2, 3]")]
#[case(r#"{"sessions": "oops"}"#)]
#[case(r#"{"sessions": [1, 2"#)]
fn malformed_documents_decode_to_no_entries(#[case] text: &str) {
    assert!(decode_session_document(text).is_empty());
}

#[test]
fn document_without_sessions_key_is_empty() {
    assert!(decode_session_document(r#"{"other": []}"#).is_empty());
}

#[test]
fn encoded_document_wraps_entries_in_sessions_key() {
    let entries = vec![json!({"pid": 1}), json!({"pid": 2})];

    let text = encode_session_document(&entries).expect("encoding should succeed");
    let parsed: Value = serde_json::from_str(&text).expect("output should be JSON");

    assert_eq!(parsed, json!({"sessions": [{"pid": 1}, {"pid": 2}]}));
}

#[rstest]
#[case(json!({"pid": 42}), Some(42))]
#[case(json!({"pid": "42"}), None)]
#[case(json!({"pid": -1}), None)]
#[case(json!({"pid": 5_000_000_000_u64}), None)]
#[case(json!({"port": 8080}), None)]
#[case(json!("not an object"), None)]
fn entry_pid_requires_a_valid_process_id(#[case] entry: Value, #[case] expected: Option<u32>) {
    assert_eq!(entry_pid(&entry), expected);
}
