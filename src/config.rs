//! Parser configuration
//!
//! Controls the defaults a [`DictParser`](crate::DictParser) applies when a
//! call does not override them. Deserializable so it can live next to the
//! field declarations in a schema document.

use serde::{Deserialize, Serialize};

/// Configuration for a parser instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Reject input keys that no field declares.
    pub strict: bool,
    /// Report every failing field from `parse_all` style entry points
    /// instead of only the first.
    pub collect_errors: bool,
    /// Emit lifecycle events through `tracing`.
    pub log_events: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strict: false,
            collect_errors: false,
            log_events: true,
        }
    }
}

impl ParserConfig {
    /// Create config that rejects undeclared input keys.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Create config that ignores undeclared input keys.
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Create config with lifecycle logging turned off.
    pub fn quiet(self) -> Self {
        Self {
            log_events: false,
            ..self
        }
    }
}
