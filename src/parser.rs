//! Dictionary parser
//!
//! Owns a [`SchemaRegistry`] and a [`ParserConfig`]. Fields are declared
//! once, then the parser is applied to any number of inputs. Parsing only
//! reads the registry, so a built parser can be shared across threads.

use std::sync::Arc;

use serde_json::Value;

use crate::config::ParserConfig;
use crate::schema::{
    BoxError, FieldSpec, Input, Namespace, ParseError, ParseErrors, ParseResult, SchemaRegistry,
    Validator,
};

/// Declares fields and validates dictionary input against them.
#[derive(Debug, Clone, Default)]
pub struct DictParser {
    registry: SchemaRegistry,
    config: ParserConfig,
}

impl DictParser {
    /// Create a lenient parser with no fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with no fields and the given config
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            registry: SchemaRegistry::with_logging(config.log_events),
            config,
        }
    }

    /// Declares a field.
    ///
    /// # Errors
    ///
    /// Returns a schema error for duplicate keys or an invalid pattern;
    /// the parser is left unchanged.
    pub fn add_field(&mut self, spec: FieldSpec) -> ParseResult<&mut Self> {
        self.registry.register(spec)?;
        Ok(self)
    }

    /// Attaches a transform to an already declared field, replacing any
    /// previous one. Used for schemas loaded from documents.
    pub fn set_transform<F>(&mut self, source_key: &str, transform: F) -> ParseResult<()>
    where
        F: Fn(Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        let spec = self
            .registry
            .by_source_key_mut(source_key)
            .ok_or_else(|| ParseError::schema(source_key, "no such field to attach a transform to"))?;
        spec.transform = Some(Arc::new(transform));
        Ok(())
    }

    /// Validates `input` using the configured strictness.
    pub fn parse<'i>(&self, input: impl Into<Input<'i>>) -> ParseResult<Namespace> {
        self.parse_with(input, self.config.strict)
    }

    /// Validates `input`, overriding the configured strictness.
    pub fn parse_with<'i>(&self, input: impl Into<Input<'i>>, strict: bool) -> ParseResult<Namespace> {
        self.validator().validate(input, strict)
    }

    /// Validates `input`, reporting every failure when `collect_errors` is
    /// configured and only the first otherwise.
    pub fn parse_all<'i>(&self, input: impl Into<Input<'i>>) -> Result<Namespace, ParseErrors> {
        if self.config.collect_errors {
            self.validator().validate_all(input, self.config.strict)
        } else {
            self.parse(input).map_err(ParseErrors::from)
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn validator(&self) -> Validator<'_> {
        Validator::new(&self.registry).with_logging(self.config.log_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ErrorKind, FieldType};
    use serde_json::json;

    #[test]
    fn test_add_field_chains() {
        let mut parser = DictParser::new();
        parser
            .add_field(FieldSpec::new("a"))
            .unwrap()
            .add_field(FieldSpec::new("b"))
            .unwrap();
        assert_eq!(parser.registry().len(), 2);
    }

    #[test]
    fn test_config_strict_applies_by_default() {
        let mut parser = DictParser::with_config(ParserConfig::strict());
        parser.add_field(FieldSpec::new("a")).unwrap();

        let input = json!({"a": 1, "b": 2});
        assert_eq!(parser.parse(&input).unwrap_err().kind(), ErrorKind::UnexpectedField);
        assert!(parser.parse_with(&input, false).is_ok());
    }

    #[test]
    fn test_set_transform_on_declared_field() {
        let mut parser = DictParser::new();
        parser
            .add_field(FieldSpec::new("n").field_type(FieldType::Integer))
            .unwrap();
        parser
            .set_transform("n", |v| Ok(json!(v.as_i64().unwrap_or(0) + 1)))
            .unwrap();

        assert_eq!(parser.parse(&json!({"n": "41"})).unwrap()["n"], json!(42));
        assert!(parser.set_transform("missing", Ok).is_err());
    }

    #[test]
    fn test_parse_all_respects_collect_errors() {
        let config = ParserConfig {
            collect_errors: true,
            ..ParserConfig::default()
        };
        let mut parser = DictParser::with_config(config);
        parser.add_field(FieldSpec::new("a").required(true)).unwrap();
        parser.add_field(FieldSpec::new("b").required(true)).unwrap();

        assert_eq!(parser.parse_all(&json!({})).unwrap_err().len(), 2);

        let mut fail_fast = DictParser::new();
        fail_fast.add_field(FieldSpec::new("a").required(true)).unwrap();
        fail_fast.add_field(FieldSpec::new("b").required(true)).unwrap();
        assert_eq!(fail_fast.parse_all(&json!({})).unwrap_err().len(), 1);
    }

    #[test]
    fn test_parser_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DictParser>();
    }
}
