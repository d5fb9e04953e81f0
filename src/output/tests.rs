//! Tests for output module

use super::*;
use crate::engine::Message;
use crate::streams::{all_streams, StreamKind};
use crate::types::JsonObject;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn record(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

fn written_lines(writer: MessageWriter<Vec<u8>>) -> Vec<Value> {
    let bytes = writer.into_inner();
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// ============================================================================
// Writer Tests
// ============================================================================

#[test]
fn test_writer_schema_line() {
    let mut writer = MessageWriter::new(Vec::new());
    writer
        .send(Message::schema(StreamKind::WebFormTracking.definition()))
        .unwrap();

    let lines = written_lines(writer);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["type"], "SCHEMA");
    assert_eq!(lines[0]["stream"], "whatconverts_tracking_web_forms");
    assert_eq!(lines[0]["key_properties"], json!(["form_id"]));
    assert_eq!(
        lines[0]["schema"]["properties"]["form_id"],
        json!({"type": ["integer", "null"]})
    );
}

#[test]
fn test_writer_record_line() {
    let mut writer = MessageWriter::new(Vec::new());
    writer
        .send(Message::record(
            "whatconverts_leads",
            record(json!({"lead_id": 7, "spam": false})),
        ))
        .unwrap();

    let lines = written_lines(writer);
    assert_eq!(lines[0]["type"], "RECORD");
    assert_eq!(lines[0]["stream"], "whatconverts_leads");
    assert_eq!(lines[0]["record"], json!({"lead_id": 7, "spam": false}));

    let extracted = lines[0]["time_extracted"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(extracted).is_ok());
}

#[test]
fn test_writer_state_line() {
    let mut writer = MessageWriter::new(Vec::new());
    writer.send(Message::empty_state()).unwrap();
    assert_eq!(writer.messages_written(), 1);

    let bytes = writer.into_inner();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "{\"type\":\"STATE\",\"value\":{\"bookmarks\":{}}}\n"
    );
}

#[test]
fn test_writer_pretty_format() {
    let mut writer = MessageWriter::with_format(Vec::new(), OutputFormat::Pretty);
    writer.send(Message::empty_state()).unwrap();

    let text = String::from_utf8(writer.into_inner()).unwrap();
    assert!(text.contains("\n  \"type\": \"STATE\""));
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["value"], json!({"bookmarks": {}}));
}

#[test]
fn test_writer_raw_value() {
    let mut writer = MessageWriter::new(Vec::new());
    writer
        .write_value(&json!({"type": "CONNECTION_STATUS"}))
        .unwrap();
    writer.flush().unwrap();

    let lines = written_lines(writer);
    assert_eq!(lines, vec![json!({"type": "CONNECTION_STATUS"})]);
}

#[test]
fn test_vec_sink_collects() {
    let mut sink: Vec<Message> = Vec::new();
    sink.send(Message::empty_state()).unwrap();
    sink.send(Message::record("s", JsonObject::new())).unwrap();

    assert_eq!(sink.len(), 2);
    assert!(sink[0].is_state());
    assert!(sink[1].is_record());
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[test]
fn test_catalog_entry_shape() {
    let entry = catalog_entry(StreamKind::Accounts.definition());

    assert_eq!(entry["tap_stream_id"], "whatconverts_accounts");
    assert_eq!(entry["stream"], "whatconverts_accounts");
    assert_eq!(entry["key_properties"], json!(["account_id"]));

    let metadata = entry["metadata"].as_array().unwrap();
    // stream-level entry plus one per property
    assert_eq!(metadata.len(), 1 + 7);
    assert_eq!(
        metadata[0],
        json!({
            "breadcrumb": [],
            "metadata": {
                "selected": true,
                "table-key-properties": ["account_id"],
                "forced-replication-method": "FULL_TABLE"
            }
        })
    );
    assert!(metadata[1..]
        .iter()
        .all(|m| m["metadata"]["inclusion"] == "available"));
}

#[test]
fn test_build_catalog_lists_all_streams() {
    let catalog = build_catalog(all_streams());
    let streams = catalog["streams"].as_array().unwrap();
    assert_eq!(streams.len(), 5);
    assert_eq!(selected_streams(&catalog).len(), 5);
}

#[test]
fn test_selected_streams_respects_flag() {
    let catalog = json!({
        "streams": [
            {
                "tap_stream_id": "whatconverts_leads",
                "metadata": [
                    {"breadcrumb": [], "metadata": {"selected": true}},
                    {"breadcrumb": ["properties", "lead_id"], "metadata": {"selected": false}}
                ]
            },
            {
                "tap_stream_id": "whatconverts_accounts",
                "metadata": [{"breadcrumb": [], "metadata": {"selected": false}}]
            },
            {
                "stream": "whatconverts_tracking_web_forms",
                "metadata": [{"breadcrumb": [], "metadata": {"selected": true}}]
            },
            {
                "tap_stream_id": "whatconverts_profiles"
            }
        ]
    });

    assert_eq!(
        selected_streams(&catalog),
        vec![
            "whatconverts_leads".to_string(),
            "whatconverts_tracking_web_forms".to_string()
        ]
    );
}

#[test]
fn test_selected_streams_malformed_catalog() {
    assert!(selected_streams(&json!({})).is_empty());
    assert!(selected_streams(&json!({"streams": 3})).is_empty());
}
