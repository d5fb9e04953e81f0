//! Schema tests

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_field_type_mapping() {
    assert_eq!(FieldType::String.json_type(), JsonType::String);
    assert_eq!(FieldType::Integer.json_type(), JsonType::Integer);
    assert_eq!(FieldType::Boolean.json_type(), JsonType::Boolean);
    assert_eq!(FieldType::DateTime.json_type(), JsonType::String);

    assert_eq!(FieldType::DateTime.format(), Some("date-time"));
    assert_eq!(FieldType::Integer.format(), None);
}

#[test]
fn test_field_constructors() {
    assert_eq!(Field::string("a").field_type, FieldType::String);
    assert_eq!(Field::integer("b").field_type, FieldType::Integer);
    assert_eq!(Field::boolean("c").field_type, FieldType::Boolean);
    assert_eq!(Field::date_time("d").field_type, FieldType::DateTime);
    assert_eq!(Field::date_time("d").name, "d");
}

#[test]
fn test_nullable_type() {
    let t = JsonTypeOrArray::nullable(JsonType::Integer);
    assert!(t.is_nullable());
    assert_eq!(t.primary_type(), Some(JsonType::Integer));

    let null = JsonTypeOrArray::nullable(JsonType::Null);
    assert_eq!(null, JsonTypeOrArray::Single(JsonType::Null));
    assert!(!JsonTypeOrArray::Single(JsonType::String).is_nullable());
}

#[test]
fn test_property_from_field() {
    let prop = SchemaProperty::from(&Field::date_time("date_created"));
    assert!(prop.is_nullable());
    assert_eq!(prop.format.as_deref(), Some("date-time"));

    let prop = SchemaProperty::from(&Field::boolean("spam"));
    assert_eq!(prop.json_type.primary_type(), Some(JsonType::Boolean));
    assert!(prop.format.is_none());
}

#[test]
fn test_schema_from_fields_json() {
    let schema = JsonSchema::from_fields(&[
        Field::integer("account_id"),
        Field::string("account_name"),
        Field::date_time("date_created"),
        Field::boolean("active"),
    ]);

    assert_eq!(
        schema.to_json(),
        json!({
            "type": "object",
            "properties": {
                "account_id": {"type": ["integer", "null"]},
                "account_name": {"type": ["string", "null"]},
                "active": {"type": ["boolean", "null"]},
                "date_created": {"type": ["string", "null"], "format": "date-time"}
            },
            "additionalProperties": true
        })
    );
}

#[test]
fn test_schema_duplicate_field_keeps_last() {
    let schema = JsonSchema::from_fields(&[Field::string("x"), Field::integer("x")]);
    assert_eq!(schema.properties.len(), 1);
    assert_eq!(
        schema.get_property("x").unwrap().json_type.primary_type(),
        Some(JsonType::Integer)
    );
}

#[test]
fn test_schema_deserialize_roundtrip_defaults() {
    let schema: JsonSchema = serde_json::from_value(json!({"type": "object"})).unwrap();
    assert!(schema.properties.is_empty());
    assert!(schema.additional_properties);
    assert_eq!(schema, JsonSchema::default());
}
