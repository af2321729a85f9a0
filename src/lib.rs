//! dictparse - declarative validation and coercion of dictionary input
//!
//! Rules are declared once against a [`DictParser`] and then applied to
//! incoming mappings or JSON object strings, producing a read-only
//! [`Namespace`] or a descriptive [`ParseError`].
//!
//! ```
//! use dictparse::{DictParser, FieldSpec, FieldType};
//!
//! let mut parser = DictParser::new();
//! parser.add_field(FieldSpec::new("name").field_type(FieldType::String).required(true))?;
//! parser.add_field(FieldSpec::new("age").field_type(FieldType::Integer))?;
//!
//! let ns = parser.parse(r#"{"name": "FooBar", "age": "42"}"#)?;
//! assert_eq!(ns["age"], 42);
//! # Ok::<(), dictparse::ParseError>(())
//! ```

pub mod config;
pub mod observability;
pub mod parser;
pub mod schema;

pub use config::ParserConfig;
pub use parser::DictParser;
pub use schema::{
    ErrorKind, FieldSpec, FieldType, Input, InputMapping, Namespace, ParseError, ParseErrors,
    ParseResult, SchemaLoader, SchemaRegistry, Validator,
};
