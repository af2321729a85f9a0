//! Loading parsers from declarative schema documents
//!
//! Document format (JSON):
//!
//! ```json
//! {
//!   "config": { "strict": true },
//!   "fields": [
//!     { "name": "age", "type": "int", "required": true },
//!     { "name": "lang", "dest": "language", "choices": ["rust", "go"], "default": null }
//!   ]
//! }
//! ```
//!
//! An explicit `"default": null` declares a null default; omitting `default`
//! leaves the field without one. Transforms cannot be expressed in a
//! document and are attached afterwards with
//! [`DictParser::set_transform`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::info;

use super::errors::{ParseError, ParseResult};
use super::types::{FieldSpec, FieldType};
use crate::config::ParserConfig;
use crate::observability::Event;
use crate::parser::DictParser;

/// One field declaration as written in a schema document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    /// Key expected in the input
    pub name: String,
    /// Key used in the result; defaults to `name`
    #[serde(default)]
    pub dest: Option<String>,
    #[serde(default, rename = "type")]
    pub field_type: Option<FieldType>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub choices: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "present")]
    pub default: Option<Value>,
    #[serde(default)]
    pub regex: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl FieldDecl {
    /// Converts the declaration into a field spec
    pub fn into_spec(self) -> FieldSpec {
        let mut spec = FieldSpec::new(self.name).required(self.required);
        if let Some(dest) = self.dest {
            spec = spec.output_key(dest);
        }
        if let Some(field_type) = self.field_type {
            spec = spec.field_type(field_type);
        }
        if let Some(choices) = self.choices {
            spec = spec.choices(choices);
        }
        if let Some(default) = self.default {
            spec = spec.default_value(default);
        }
        if let Some(regex) = self.regex {
            spec = spec.pattern(regex);
        }
        if let Some(description) = self.description {
            spec = spec.description(description);
        }
        spec
    }
}

/// A complete schema document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    #[serde(default)]
    pub config: ParserConfig,
    pub fields: Vec<FieldDecl>,
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only a missing key maps to `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Builds parsers from schema documents.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Builds a parser from a schema document held in a string.
    ///
    /// `origin` names the document in errors and logs.
    pub fn load_str(origin: &str, text: &str) -> ParseResult<DictParser> {
        let document: SchemaDocument = serde_json::from_str(text)
            .map_err(|e| ParseError::schema(origin, format!("malformed schema document: {}", e)))?;
        Self::load_document(origin, document)
    }

    /// Reads and builds a parser from a schema file.
    ///
    /// # Errors
    ///
    /// Returns a schema error naming the path if the file cannot be read or
    /// is not a valid document. A field the registry rejects yields its
    /// registration error, naming the field's source key.
    pub fn load_path(path: &Path) -> ParseResult<DictParser> {
        let origin = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|e| ParseError::schema(&origin, format!("failed to read file: {}", e)))?;
        Self::load_str(&origin, &content)
    }

    /// Builds a parser from an already deserialized document.
    pub fn load_document(origin: &str, document: SchemaDocument) -> ParseResult<DictParser> {
        let mut parser = DictParser::with_config(document.config);
        let count = document.fields.len();
        for decl in document.fields {
            parser.add_field(decl.into_spec())?;
        }

        if document.config.log_events {
            info!(
                event = Event::SchemaLoaded.as_str(),
                origin,
                fields = count,
                "schema loaded"
            );
        }

        Ok(parser)
    }
}
