//! Field declarations
//!
//! Supported coercion targets:
//! - string: UTF-8 string
//! - integer: 64-bit signed integer
//! - float: 64-bit floating point
//! - boolean: true/false
//! - list: array of raw values (scalars are wrapped)
//!
//! Types outside this set are expressed with a transform on an untyped field.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::BoxError;

/// Coercion target of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    #[serde(alias = "str")]
    String,
    /// 64-bit signed integer
    #[serde(alias = "int")]
    Integer,
    /// 64-bit floating point
    Float,
    /// Boolean
    #[serde(alias = "bool")]
    Boolean,
    /// Array of raw values
    List,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::List => "list",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(FieldType::String),
            "integer" | "int" => Ok(FieldType::Integer),
            "float" => Ok(FieldType::Float),
            "boolean" | "bool" => Ok(FieldType::Boolean),
            "list" => Ok(FieldType::List),
            other => Err(format!("unknown field type '{}'", other)),
        }
    }
}

/// User-supplied transform applied to a coerced, constraint-checked value.
///
/// Must not touch the registry; a returned error surfaces as a transform error.
pub type Transform = Arc<dyn Fn(Value) -> Result<Value, BoxError> + Send + Sync>;

/// One declared field.
///
/// Built with chained setters and handed to
/// [`SchemaRegistry::register`](super::SchemaRegistry::register), which
/// checks it and compiles its pattern.
#[derive(Clone)]
pub struct FieldSpec {
    pub(crate) source_key: String,
    pub(crate) output_key: Option<String>,
    pub(crate) field_type: Option<FieldType>,
    pub(crate) required: bool,
    pub(crate) choices: Option<Vec<Value>>,
    pub(crate) transform: Option<Transform>,
    pub(crate) description: Option<String>,
    /// `None` is the absence marker; `Some(Value::Null)` is a null default.
    pub(crate) default: Option<Value>,
    pub(crate) pattern: Option<String>,
}

impl FieldSpec {
    /// Declare a field read from `source_key`
    pub fn new(source_key: impl Into<String>) -> Self {
        Self {
            source_key: source_key.into(),
            output_key: None,
            field_type: None,
            required: false,
            choices: None,
            transform: None,
            description: None,
            default: None,
            pattern: None,
        }
    }

    /// Store the value under `output_key` instead of the source key
    pub fn output_key(mut self, output_key: impl Into<String>) -> Self {
        self.output_key = Some(output_key.into());
        self
    }

    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Restrict the coerced value to `choices`
    pub fn choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Value stored when the field is absent. Stored verbatim, never coerced.
    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Require the stringified value to match `pattern` from its first character
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn source_key(&self) -> &str {
        &self.source_key
    }

    /// Returns the output key, falling back to the source key
    pub fn resolved_output_key(&self) -> &str {
        self.output_key.as_deref().unwrap_or(&self.source_key)
    }

    pub fn expected_type(&self) -> Option<FieldType> {
        self.field_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn choice_set(&self) -> Option<&[Value]> {
        self.choices.as_deref()
    }

    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn pattern_source(&self) -> Option<&str> {
        self.pattern.as_deref()
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("source_key", &self.source_key)
            .field("output_key", &self.resolved_output_key())
            .field("field_type", &self.field_type)
            .field("required", &self.required)
            .field("choices", &self.choices)
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .field("description", &self.description)
            .field("default", &self.default)
            .field("pattern", &self.pattern)
            .finish()
    }
}
