//! Schema subsystem
//!
//! Fields are declared once on a [`SchemaRegistry`] and applied to any
//! number of inputs by a [`Validator`].
//!
//! # Pipeline
//!
//! - Presence check, then default substitution for absent optional fields
//! - Coercion to the declared [`FieldType`]
//! - Choice and pattern constraints
//! - User transform
//! - Strict reconciliation of undeclared input keys
//!
//! Validation is deterministic and fails fast on the first field error
//! unless the collect-all entry point is used.

mod coerce;
mod errors;
mod input;
mod loader;
mod namespace;
mod registry;
mod types;
mod validator;

pub use coerce::coerce;
pub use errors::{BoxError, ErrorKind, ParseError, ParseErrors, ParseResult};
pub use input::{Input, InputMapping};
pub use loader::{FieldDecl, SchemaDocument, SchemaLoader};
pub use namespace::Namespace;
pub use registry::{RegisteredField, SchemaRegistry};
pub use types::{FieldSpec, FieldType, Transform};
pub use validator::Validator;
