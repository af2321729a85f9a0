//! Ordered registry of declared fields
//!
//! Registration order is validation order and result order.
//! Both source keys and output keys are unique; registering a duplicate of
//! either is rejected, so a registry never silently drops a declaration.

use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use super::errors::{ParseError, ParseResult};
use super::types::FieldSpec;
use crate::observability::Event;

/// A declared field with its pattern compiled.
#[derive(Debug, Clone)]
pub struct RegisteredField {
    spec: FieldSpec,
    pattern: Option<Regex>,
}

impl RegisteredField {
    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn source_key(&self) -> &str {
        self.spec.source_key()
    }

    pub fn output_key(&self) -> &str {
        self.spec.resolved_output_key()
    }

    pub(crate) fn compiled_pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }
}

/// Ordered collection of field declarations, indexed by source and output key.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    fields: Vec<RegisteredField>,
    by_source: HashMap<String, usize>,
    by_output: HashMap<String, usize>,
    log_events: bool,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            by_source: HashMap::new(),
            by_output: HashMap::new(),
            log_events: true,
        }
    }
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry; `FIELD_REGISTERED` is only logged when `log_events` is set
    pub fn with_logging(log_events: bool) -> Self {
        Self {
            log_events,
            ..Self::default()
        }
    }

    /// Registers a field at the end of the registry.
    ///
    /// # Errors
    ///
    /// Returns a schema error if:
    /// - the source key or output key is empty
    /// - the source key is already registered
    /// - the output key collides with another field's output key
    /// - the pattern is not a valid regular expression
    pub fn register(&mut self, spec: FieldSpec) -> ParseResult<()> {
        let source_key = spec.source_key().to_string();
        let output_key = spec.resolved_output_key().to_string();

        if source_key.is_empty() {
            return Err(ParseError::schema(source_key, "source key must not be empty"));
        }
        if output_key.is_empty() {
            return Err(ParseError::schema(source_key, "output key must not be empty"));
        }
        if self.by_source.contains_key(&source_key) {
            return Err(ParseError::schema(source_key, "source key is already registered"));
        }
        if let Some(&existing) = self.by_output.get(&output_key) {
            let reason = format!(
                "output key '{}' is already used by field '{}'",
                output_key,
                self.fields[existing].source_key()
            );
            return Err(ParseError::schema(source_key, reason));
        }

        let pattern = match spec.pattern_source() {
            Some(source) => Some(Regex::new(source).map_err(|e| {
                ParseError::schema(&source_key, format!("invalid pattern: {}", e))
            })?),
            None => None,
        };

        if self.log_events {
            debug!(
                event = Event::FieldRegistered.as_str(),
                source_key = %source_key,
                output_key = %output_key,
                "field registered"
            );
        }

        let index = self.fields.len();
        self.by_source.insert(source_key, index);
        self.by_output.insert(output_key, index);
        self.fields.push(RegisteredField { spec, pattern });

        Ok(())
    }

    /// Returns the field read from `source_key`
    pub fn by_source_key(&self, source_key: &str) -> Option<&RegisteredField> {
        self.by_source.get(source_key).map(|&i| &self.fields[i])
    }

    /// Returns the field stored under `output_key`
    pub fn by_output_key(&self, output_key: &str) -> Option<&RegisteredField> {
        self.by_output.get(output_key).map(|&i| &self.fields[i])
    }

    pub(crate) fn by_source_key_mut(&mut self, source_key: &str) -> Option<&mut FieldSpec> {
        let index = *self.by_source.get(source_key)?;
        Some(&mut self.fields[index].spec)
    }

    pub fn contains_source_key(&self, source_key: &str) -> bool {
        self.by_source.contains_key(source_key)
    }

    /// Iterates fields in registration order
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredField> {
        self.fields.iter()
    }

    /// Source keys in registration order
    pub fn source_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(RegisteredField::source_key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
