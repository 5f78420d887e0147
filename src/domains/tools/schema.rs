//! Declared input contracts and the argument validator.
//!
//! A [`SchemaSpec`] lists the parameters a tool accepts. [`validate`] checks raw
//! JSON arguments against it and is pure: it performs no I/O and touches no
//! state, so it can always run before a handler.

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use super::error::ValidationError;

/// Name of the parameter every current tool takes.
pub const PROMPT: &str = "prompt";

/// Type constraint of a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// A string that is not empty after trimming whitespace.
    NonEmptyString,
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
}

/// Ordered set of required parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaSpec {
    params: Vec<ParamSpec>,
}

impl SchemaSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required non-empty string parameter.
    pub fn with_string(mut self, name: &'static str, description: &'static str) -> Self {
        self.params.push(ParamSpec {
            name,
            description,
            kind: ParamKind::NonEmptyString,
        });
        self
    }

    /// The single-`prompt` schema shared by every current tool.
    pub fn prompt(description: &'static str) -> Self {
        Self::new().with_string(PROMPT, description)
    }

    /// Render as a JSON Schema object for discovery.
    pub fn to_json_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| {
                let schema = match p.kind {
                    ParamKind::NonEmptyString => json!({
                        "type": "string",
                        "minLength": 1,
                        "description": p.description,
                    }),
                };
                (p.name.to_string(), schema)
            })
            .collect();
        let required: Vec<Value> = self.params.iter().map(|p| json!(p.name)).collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), Value::Array(required));
        schema
    }
}

/// Arguments that passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedArguments {
    values: BTreeMap<String, String>,
}

impl ValidatedArguments {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// The validated `prompt`. Empty only if the schema did not declare one.
    pub fn prompt(&self) -> &str {
        self.get(PROMPT).unwrap_or_default()
    }
}

/// Validate raw call arguments against a schema.
///
/// Non-object arguments (including `null`) are treated as an empty object, so
/// every required parameter is reported missing. Extra keys are ignored.
pub fn validate(schema: &SchemaSpec, raw: &Value) -> Result<ValidatedArguments, ValidationError> {
    let empty = Map::new();
    let object = raw.as_object().unwrap_or(&empty);

    let mut values = BTreeMap::new();
    for param in &schema.params {
        let value = object.get(param.name).ok_or_else(|| ValidationError::Missing {
            param: param.name.to_string(),
        })?;
        match param.kind {
            ParamKind::NonEmptyString => {
                let text = value.as_str().ok_or_else(|| ValidationError::NotAString {
                    param: param.name.to_string(),
                })?;
                if text.trim().is_empty() {
                    return Err(ValidationError::Empty {
                        param: param.name.to_string(),
                    });
                }
                values.insert(param.name.to_string(), text.to_string());
            }
        }
    }
    Ok(ValidatedArguments { values })
}
