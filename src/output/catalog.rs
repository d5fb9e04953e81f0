//! Singer catalog
//!
//! Rendering the catalog printed by `discover`, and reading stream
//! selection back from a catalog file.

use crate::streams::StreamDefinition;
use crate::types::JsonValue;
use serde_json::json;

/// Catalog entry for one stream
pub fn catalog_entry(stream: &StreamDefinition) -> JsonValue {
    let schema = stream.schema();

    let mut metadata = vec![json!({
        "breadcrumb": [],
        "metadata": {
            "selected": true,
            "table-key-properties": stream.primary_keys,
            "forced-replication-method": "FULL_TABLE",
        }
    })];
    metadata.extend(schema.properties.keys().map(|name| {
        json!({
            "breadcrumb": ["properties", name],
            "metadata": { "inclusion": "available" }
        })
    }));

    json!({
        "tap_stream_id": stream.name,
        "stream": stream.name,
        "schema": schema.to_json(),
        "key_properties": stream.primary_keys,
        "metadata": metadata,
    })
}

/// Catalog covering the given streams
pub fn build_catalog<'a>(streams: impl IntoIterator<Item = &'a StreamDefinition>) -> JsonValue {
    let entries: Vec<JsonValue> = streams.into_iter().map(catalog_entry).collect();
    json!({ "streams": entries })
}

/// Names of the streams a catalog selects.
///
/// A stream counts as selected when its stream-level metadata (empty
/// breadcrumb) has `selected: true`.
pub fn selected_streams(catalog: &JsonValue) -> Vec<String> {
    let Some(entries) = catalog.get("streams").and_then(JsonValue::as_array) else {
        return vec![];
    };

    entries
        .iter()
        .filter(|entry| is_selected(entry))
        .filter_map(|entry| {
            entry
                .get("tap_stream_id")
                .or_else(|| entry.get("stream"))
                .and_then(JsonValue::as_str)
                .map(ToString::to_string)
        })
        .collect()
}

fn is_selected(entry: &JsonValue) -> bool {
    entry
        .get("metadata")
        .and_then(JsonValue::as_array)
        .into_iter()
        .flatten()
        .filter(|m| {
            m.get("breadcrumb")
                .and_then(JsonValue::as_array)
                .is_some_and(Vec::is_empty)
        })
        .any(|m| m.pointer("/metadata/selected") == Some(&JsonValue::Bool(true)))
}
