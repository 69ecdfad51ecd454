//! # kg2-schema
//!
//! Structural JSON Schema inference for example records.
//!
//! [`infer_schema`] describes the shape of one JSON value: its type, the merged
//! shape of array elements, and the properties of objects. Observations of
//! several values merge: differing types become a type list, objects union
//! their properties and keep only the keys every object had as `required`.

mod error;

pub use error::SchemaError;

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value, json};

/// Draft identifier placed on every root schema.
pub const SCHEMA_URI: &str = "http://json-schema.org/schema#";

/// Accumulated shape of every value observed at one position.
#[derive(Debug, Default)]
struct Shape {
    types: BTreeSet<&'static str>,
    items: Option<Box<Shape>>,
    properties: BTreeMap<String, Shape>,
    /// `None` until the first object is observed.
    required: Option<BTreeSet<String>>,
}

impl Shape {
    fn observe(&mut self, value: &Value) {
        match value {
            Value::Null => {
                self.types.insert("null");
            }
            Value::Bool(_) => {
                self.types.insert("boolean");
            }
            Value::Number(n) if n.is_i64() || n.is_u64() => {
                self.types.insert("integer");
            }
            Value::Number(_) => {
                self.types.insert("number");
            }
            Value::String(_) => {
                self.types.insert("string");
            }
            Value::Array(elements) => {
                self.types.insert("array");
                for element in elements {
                    self.items.get_or_insert_default().observe(element);
                }
            }
            Value::Object(object) => {
                self.types.insert("object");
                for (key, field) in object {
                    self.properties.entry(key.clone()).or_default().observe(field);
                }
                let keys: BTreeSet<String> = object.keys().cloned().collect();
                self.required = Some(match self.required.take() {
                    Some(seen) => seen.intersection(&keys).cloned().collect(),
                    None => keys,
                });
            }
        }
    }

    fn to_schema(&self) -> Map<String, Value> {
        let mut types: Vec<&str> = self.types.iter().copied().collect();
        // Every integer is also a number.
        if self.types.contains("number") {
            types.retain(|t| *t != "integer");
        }

        let mut schema = Map::new();
        match types.as_slice() {
            [] => {}
            [only] => {
                schema.insert("type".into(), json!(only));
            }
            many => {
                schema.insert("type".into(), json!(many));
            }
        }

        if let Some(items) = &self.items {
            schema.insert("items".into(), Value::Object(items.to_schema()));
        }
        if !self.properties.is_empty() {
            let properties: Map<String, Value> = self
                .properties
                .iter()
                .map(|(key, shape)| (key.clone(), Value::Object(shape.to_schema())))
                .collect();
            schema.insert("properties".into(), Value::Object(properties));
        }
        if let Some(required) = self.required.as_ref().filter(|r| !r.is_empty()) {
            schema.insert("required".into(), json!(required));
        }
        schema
    }
}

/// Infer a JSON Schema describing `value`.
#[must_use]
pub fn infer_schema(value: &Value) -> Value {
    infer_schema_from(std::slice::from_ref(value))
}

/// Infer one JSON Schema describing every value in `values`.
#[must_use]
pub fn infer_schema_from(values: &[Value]) -> Value {
    let mut shape = Shape::default();
    for value in values {
        shape.observe(value);
    }
    let mut schema = shape.to_schema();
    schema.insert("$schema".into(), Value::String(SCHEMA_URI.into()));
    Value::Object(schema)
}

/// Validate `example` against `schema`.
///
/// The `$schema` draft marker is ignored; the structural keywords are
/// checked with the validator's default draft.
///
/// # Errors
///
/// Returns [`SchemaError::Compile`] if the schema is invalid, or
/// [`SchemaError::Mismatch`] listing every violation.
pub fn check_example(schema: &Value, example: &Value) -> Result<(), SchemaError> {
    let mut schema = schema.clone();
    if let Value::Object(map) = &mut schema {
        map.remove("$schema");
    }

    let validator =
        jsonschema::validator_for(&schema).map_err(|e| SchemaError::Compile(format!("{e}")))?;
    let errors: Vec<String> = validator
        .iter_errors(example)
        .map(|e| format!("{e}"))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::Mismatch { errors })
    }
}
