//! Error types for schema registration and validation
//!
//! Error codes:
//! - DICT_SCHEMA_INVALID (registration)
//! - DICT_INPUT_UNDECODABLE
//! - DICT_INPUT_NOT_MAPPING
//! - DICT_FIELD_MISSING
//! - DICT_FIELD_COERCION_FAILED
//! - DICT_FIELD_INVALID_CHOICE
//! - DICT_FIELD_PATTERN_MISMATCH
//! - DICT_FIELD_TRANSFORM_FAILED
//! - DICT_FIELD_UNEXPECTED (strict mode)
//! - DICT_ATTRIBUTE_NOT_FOUND (result access)

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Boxed failure returned by user-supplied transforms.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Identifies which kind of failure a [`ParseError`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Schema,
    Decode,
    InputType,
    MissingRequiredField,
    TypeCoercion,
    InvalidChoice,
    PatternMismatch,
    Transform,
    UnexpectedField,
    AttributeNotFound,
}

impl ErrorKind {
    /// Returns the stable string code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Schema => "DICT_SCHEMA_INVALID",
            ErrorKind::Decode => "DICT_INPUT_UNDECODABLE",
            ErrorKind::InputType => "DICT_INPUT_NOT_MAPPING",
            ErrorKind::MissingRequiredField => "DICT_FIELD_MISSING",
            ErrorKind::TypeCoercion => "DICT_FIELD_COERCION_FAILED",
            ErrorKind::InvalidChoice => "DICT_FIELD_INVALID_CHOICE",
            ErrorKind::PatternMismatch => "DICT_FIELD_PATTERN_MISMATCH",
            ErrorKind::Transform => "DICT_FIELD_TRANSFORM_FAILED",
            ErrorKind::UnexpectedField => "DICT_FIELD_UNEXPECTED",
            ErrorKind::AttributeNotFound => "DICT_ATTRIBUTE_NOT_FOUND",
        }
    }

    /// Whether the failure is caused by the input rather than by the schema
    /// or the caller.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, ErrorKind::Schema | ErrorKind::AttributeNotFound)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Every failure the parser can raise.
///
/// Each variant carries the key it concerns and, where relevant, the
/// offending value and the constraint it violated.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid schema for field '{field}': {reason}")]
    Schema { field: String, reason: String },

    #[error("input could not be decoded as a JSON object: {reason}")]
    Decode { reason: String },

    #[error("input must be a mapping or a JSON string, got {actual}")]
    InputType { actual: String },

    #[error("missing required field '{field}'")]
    MissingRequiredField { field: String },

    #[error("field '{field}': cannot convert {value} to {expected}: {reason}")]
    TypeCoercion {
        field: String,
        expected: String,
        value: Value,
        reason: String,
    },

    #[error("field '{field}': {value} is not one of {}", render_choices(.choices))]
    InvalidChoice {
        field: String,
        value: Value,
        choices: Vec<Value>,
    },

    #[error("field '{field}': '{value}' does not match pattern '{pattern}'")]
    PatternMismatch {
        field: String,
        value: String,
        pattern: String,
    },

    #[error("field '{field}': transform failed: {source}")]
    Transform {
        field: String,
        #[source]
        source: BoxError,
    },

    #[error("unexpected fields: {}", .fields.join(", "))]
    UnexpectedField { fields: Vec<String> },

    #[error("no field named '{key}' was declared")]
    AttributeNotFound { key: String },
}

impl ParseError {
    /// Create a schema (registration) error
    pub fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ParseError::Schema {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a decode error
    pub fn decode(reason: impl Into<String>) -> Self {
        ParseError::Decode {
            reason: reason.into(),
        }
    }

    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Schema { .. } => ErrorKind::Schema,
            ParseError::Decode { .. } => ErrorKind::Decode,
            ParseError::InputType { .. } => ErrorKind::InputType,
            ParseError::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            ParseError::TypeCoercion { .. } => ErrorKind::TypeCoercion,
            ParseError::InvalidChoice { .. } => ErrorKind::InvalidChoice,
            ParseError::PatternMismatch { .. } => ErrorKind::PatternMismatch,
            ParseError::Transform { .. } => ErrorKind::Transform,
            ParseError::UnexpectedField { .. } => ErrorKind::UnexpectedField,
            ParseError::AttributeNotFound { .. } => ErrorKind::AttributeNotFound,
        }
    }

    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Returns the field key this error concerns, if it concerns exactly one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ParseError::Schema { field, .. }
            | ParseError::MissingRequiredField { field }
            | ParseError::TypeCoercion { field, .. }
            | ParseError::InvalidChoice { field, .. }
            | ParseError::PatternMismatch { field, .. }
            | ParseError::Transform { field, .. } => Some(field),
            ParseError::AttributeNotFound { key } => Some(key),
            ParseError::Decode { .. }
            | ParseError::InputType { .. }
            | ParseError::UnexpectedField { .. } => None,
        }
    }
}

fn render_choices(choices: &[Value]) -> String {
    let rendered: Vec<String> = choices.iter().map(Value::to_string).collect();
    format!("[{}]", rendered.join(", "))
}

/// All failures found by a collect-all validation pass, in registration order.
///
/// Never empty.
#[derive(Debug, Error)]
#[error("{} validation error(s); first: {}", .errors.len(), .errors[0])]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    pub(crate) fn new(errors: Vec<ParseError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Returns the first failure in registration order
    pub fn first(&self) -> &ParseError {
        &self.errors[0]
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }
}

impl From<ParseError> for ParseErrors {
    fn from(err: ParseError) -> Self {
        Self { errors: vec![err] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ErrorKind::Schema.code(), "DICT_SCHEMA_INVALID");
        assert_eq!(ErrorKind::MissingRequiredField.code(), "DICT_FIELD_MISSING");
        assert_eq!(ErrorKind::UnexpectedField.code(), "DICT_FIELD_UNEXPECTED");
        assert_eq!(ErrorKind::AttributeNotFound.code(), "DICT_ATTRIBUTE_NOT_FOUND");
    }

    #[test]
    fn test_kind_matches_variant() {
        let err = ParseError::MissingRequiredField { field: "name".into() };
        assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
        assert_eq!(err.field(), Some("name"));
        assert!(err.kind().is_input_error());
        assert!(!ParseError::schema("x", "bad").kind().is_input_error());
    }

    #[test]
    fn test_invalid_choice_display_lists_choices() {
        let err = ParseError::InvalidChoice {
            field: "language".into(),
            value: json!("go"),
            choices: vec![json!("python"), json!("rust")],
        };
        let display = err.to_string();
        assert!(display.contains("language"));
        assert!(display.contains("\"go\""));
        assert!(display.contains("[\"python\", \"rust\"]"));
    }

    #[test]
    fn test_transform_error_chains_source() {
        use std::error::Error as _;

        let cause: BoxError = "boom".into();
        let err = ParseError::Transform {
            field: "tags".into(),
            source: cause,
        };
        assert_eq!(err.source().map(|s| s.to_string()), Some("boom".to_string()));
    }

    #[test]
    fn test_parse_errors_never_empty() {
        assert!(ParseErrors::new(Vec::new()).is_none());

        let errors = ParseErrors::new(vec![
            ParseError::MissingRequiredField { field: "a".into() },
            ParseError::MissingRequiredField { field: "b".into() },
        ])
        .unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first().field(), Some("a"));
        assert!(errors.to_string().starts_with("2 validation error(s)"));
    }
}
