//! Stream schema module
//!
//! Every stream declares a fixed, flat list of fields. This module turns
//! those declarations into JSON Schema documents for SCHEMA messages and
//! the discovery catalog.

mod types;

pub use types::{Field, FieldType, JsonSchema, JsonType, JsonTypeOrArray, SchemaProperty};

#[cfg(test)]
mod tests;
