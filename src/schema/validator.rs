//! Validation engine
//!
//! Per-field pipeline, applied in registration order:
//! 1. Presence: absent required fields fail; absent optional fields take
//!    their default (or null) verbatim and skip the remaining steps
//! 2. Coercion to the declared type
//! 3. Choice constraint on the coerced value
//! 4. Pattern constraint on the stringified value, anchored at the start
//! 5. Transform
//!
//! Strict reconciliation runs after every field has been resolved, so a
//! field failure always wins over an unexpected key.
//!
//! The validator only reads the registry. Concurrent calls against one
//! registry need no locking.

use regex::Regex;
use serde_json::Value;

use super::coerce::{coerce, stringify};
use super::errors::{ParseError, ParseErrors, ParseResult};
use super::input::{normalize, Input, InputMapping};
use super::namespace::Namespace;
use super::registry::{RegisteredField, SchemaRegistry};
use crate::observability::ValidationScope;

/// Applies a registry's declarations to input mappings.
pub struct Validator<'a> {
    registry: &'a SchemaRegistry,
    log_events: bool,
}

impl<'a> Validator<'a> {
    /// Creates a validator backed by the given registry.
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            log_events: true,
        }
    }

    /// Enables or disables lifecycle logging for this validator
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.log_events = enabled;
        self
    }

    /// Validates `input`, stopping at the first failure.
    ///
    /// # Arguments
    ///
    /// * `input` - A mapping, a JSON object value, or a JSON object string
    /// * `strict` - Reject input keys that no field declares
    ///
    /// # Errors
    ///
    /// Returns exactly one `ParseError`:
    /// - decode / input-type errors if the input is not a mapping
    /// - the first field failure in registration order
    /// - an unexpected-field error (strict only) listing every unknown key
    pub fn validate<'i>(&self, input: impl Into<Input<'i>>, strict: bool) -> ParseResult<Namespace> {
        let scope = ValidationScope::begin(self.log_events, self.registry.len(), strict);
        match self.run(input.into(), strict) {
            Ok(namespace) => {
                scope.complete(namespace.len());
                Ok(namespace)
            }
            Err(e) => {
                scope.reject(&e);
                Err(e)
            }
        }
    }

    /// Validates `input`, reporting every failing field instead of the first.
    ///
    /// Field failures are listed in registration order, followed by the
    /// unexpected-field error in strict mode. Input that cannot be decoded
    /// yields a single error.
    pub fn validate_all<'i>(
        &self,
        input: impl Into<Input<'i>>,
        strict: bool,
    ) -> Result<Namespace, ParseErrors> {
        let scope = ValidationScope::begin(self.log_events, self.registry.len(), strict);

        let normalized = match normalize(input.into()) {
            Ok(normalized) => normalized,
            Err(e) => {
                scope.reject(&e);
                return Err(e.into());
            }
        };
        let mapping = normalized.mapping();

        let mut entries = Vec::with_capacity(self.registry.len());
        let mut errors = Vec::new();
        for field in self.registry.iter() {
            match resolve_field(field, mapping) {
                Ok(value) => entries.push((field.output_key().to_string(), value)),
                Err(e) => errors.push(e),
            }
        }
        if strict {
            if let Err(e) = self.reconcile(mapping) {
                errors.push(e);
            }
        }

        match ParseErrors::new(errors) {
            None => {
                scope.complete(entries.len());
                Ok(Namespace::from_entries(entries))
            }
            Some(errors) => {
                scope.reject_many(errors.first(), errors.len());
                Err(errors)
            }
        }
    }

    fn run(&self, input: Input<'_>, strict: bool) -> ParseResult<Namespace> {
        let normalized = normalize(input)?;
        let mapping = normalized.mapping();

        let entries = self
            .registry
            .iter()
            .map(|field| -> ParseResult<(String, Value)> {
                Ok((field.output_key().to_string(), resolve_field(field, mapping)?))
            })
            .collect::<ParseResult<Vec<_>>>()?;

        if strict {
            self.reconcile(mapping)?;
        }

        Ok(Namespace::from_entries(entries))
    }

    /// Fails if `mapping` holds keys that no field reads.
    fn reconcile(&self, mapping: &dyn InputMapping) -> ParseResult<()> {
        let mut unexpected: Vec<String> = mapping
            .keys()
            .filter(|key| !self.registry.contains_source_key(key))
            .map(str::to_string)
            .collect();

        if unexpected.is_empty() {
            return Ok(());
        }

        // Hash map inputs enumerate in arbitrary order
        unexpected.sort();
        Err(ParseError::UnexpectedField { fields: unexpected })
    }
}

/// Runs the per-field pipeline and returns the value to store.
fn resolve_field(field: &RegisteredField, mapping: &dyn InputMapping) -> ParseResult<Value> {
    let spec = field.spec();
    let source_key = spec.source_key();

    let raw = match mapping.lookup(source_key) {
        Some(raw) => raw,
        None if spec.is_required() => {
            return Err(ParseError::MissingRequiredField {
                field: source_key.to_string(),
            });
        }
        // Defaults are trusted verbatim
        None => return Ok(spec.default().cloned().unwrap_or(Value::Null)),
    };

    let value = match spec.expected_type() {
        Some(field_type) => coerce(field_type, raw).map_err(|reason| ParseError::TypeCoercion {
            field: source_key.to_string(),
            expected: field_type.type_name().to_string(),
            value: raw.clone(),
            reason,
        })?,
        None => raw.clone(),
    };

    if let Some(choices) = spec.choice_set() {
        if !choices.contains(&value) {
            return Err(ParseError::InvalidChoice {
                field: source_key.to_string(),
                value,
                choices: choices.to_vec(),
            });
        }
    }

    if let Some(pattern) = field.compiled_pattern() {
        let text = stringify(&value);
        if !matches_from_start(pattern, &text) {
            return Err(ParseError::PatternMismatch {
                field: source_key.to_string(),
                value: text,
                pattern: pattern.as_str().to_string(),
            });
        }
    }

    match &spec.transform {
        Some(transform) => transform(value).map_err(|source| ParseError::Transform {
            field: source_key.to_string(),
            source,
        }),
        None => Ok(value),
    }
}

/// True if some match of `pattern` begins at the first character of `text`.
///
/// The leftmost match starts at 0 whenever any match does.
fn matches_from_start(pattern: &Regex, text: &str) -> bool {
    pattern.find(text).map_or(false, |m| m.start() == 0)
}
