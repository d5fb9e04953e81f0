//! Schema types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Field Declarations
// ============================================================================

/// Declared type of a stream field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Boolean,
    /// ISO 8601 timestamp carried as a string
    DateTime,
}

impl FieldType {
    /// JSON type used to carry values of this field
    pub fn json_type(self) -> JsonType {
        match self {
            FieldType::String | FieldType::DateTime => JsonType::String,
            FieldType::Integer => JsonType::Integer,
            FieldType::Boolean => JsonType::Boolean,
        }
    }

    /// Format hint, if any
    pub fn format(self) -> Option<&'static str> {
        match self {
            FieldType::DateTime => Some("date-time"),
            _ => None,
        }
    }
}

/// A single declared field of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Field name as it appears in records
    pub name: &'static str,
    /// Declared type
    pub field_type: FieldType,
}

impl Field {
    pub const fn string(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::String,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Integer,
        }
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Boolean,
        }
    }

    pub const fn date_time(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::DateTime,
        }
    }
}

// ============================================================================
// JSON Schema
// ============================================================================

/// JSON Schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Integer,
    Boolean,
    Object,
    Null,
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonType::String => write!(f, "string"),
            JsonType::Integer => write!(f, "integer"),
            JsonType::Boolean => write!(f, "boolean"),
            JsonType::Object => write!(f, "object"),
            JsonType::Null => write!(f, "null"),
        }
    }
}

/// JSON type can be a single type or array of types (for nullable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonTypeOrArray {
    Single(JsonType),
    Multiple(Vec<JsonType>),
}

impl JsonTypeOrArray {
    /// Create a nullable type
    pub fn nullable(t: JsonType) -> Self {
        if t == JsonType::Null {
            JsonTypeOrArray::Single(JsonType::Null)
        } else {
            JsonTypeOrArray::Multiple(vec![t, JsonType::Null])
        }
    }

    /// Check if this type is nullable
    pub fn is_nullable(&self) -> bool {
        match self {
            JsonTypeOrArray::Single(JsonType::Null) => true,
            JsonTypeOrArray::Multiple(types) => types.contains(&JsonType::Null),
            JsonTypeOrArray::Single(_) => false,
        }
    }

    /// Get the primary (non-null) type
    pub fn primary_type(&self) -> Option<JsonType> {
        match self {
            JsonTypeOrArray::Single(t) => Some(*t),
            JsonTypeOrArray::Multiple(types) => types.iter().copied().find(|t| *t != JsonType::Null),
        }
    }
}

/// JSON Schema property definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaProperty {
    /// Property type(s)
    #[serde(rename = "type")]
    pub json_type: JsonTypeOrArray,

    /// Format hint (e.g., "date-time")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl SchemaProperty {
    /// Create a nullable property
    pub fn nullable(json_type: JsonType) -> Self {
        Self {
            json_type: JsonTypeOrArray::nullable(json_type),
            format: None,
        }
    }

    /// Set format hint
    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Check if nullable
    pub fn is_nullable(&self) -> bool {
        self.json_type.is_nullable()
    }
}

impl From<&Field> for SchemaProperty {
    fn from(field: &Field) -> Self {
        let property = SchemaProperty::nullable(field.field_type.json_type());
        match field.field_type.format() {
            Some(format) => property.with_format(format),
            None => property,
        }
    }
}

/// Full JSON Schema document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Schema type (always "object" for top-level)
    #[serde(rename = "type")]
    pub json_type: JsonType,

    /// Object properties
    #[serde(default)]
    pub properties: BTreeMap<String, SchemaProperty>,

    /// Allow additional properties
    #[serde(rename = "additionalProperties", default = "default_true")]
    pub additional_properties: bool,
}

fn default_true() -> bool {
    true
}

impl Default for JsonSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonSchema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self {
            json_type: JsonType::Object,
            properties: BTreeMap::new(),
            additional_properties: true,
        }
    }

    /// Build a schema from a list of declared fields
    pub fn from_fields(fields: &[Field]) -> Self {
        let mut schema = Self::new();
        for field in fields {
            schema.add_property(field.name, SchemaProperty::from(field));
        }
        schema
    }

    /// Add a property
    pub fn add_property(&mut self, name: &str, property: SchemaProperty) {
        self.properties.insert(name.to_string(), property);
    }

    /// Get a property
    pub fn get_property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.get(name)
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
