//! Observability for the parser
//!
//! Records are emitted through `tracing`; the library never installs a
//! subscriber. Every record carries an `event` field naming an [`Event`].
//!
//! # Usage
//!
//! ```ignore
//! tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
//! let ns = parser.parse(r#"{"name": "x"}"#)?; // VALIDATION_BEGIN, VALIDATION_COMPLETE
//! ```

mod events;
mod scope;

pub use events::Event;
pub use scope::ValidationScope;
