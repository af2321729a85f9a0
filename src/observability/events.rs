//! Observable parser events
//!
//! Events are explicit and typed; their string names are stable and are
//! emitted as the `event` field of each log record.

use std::fmt;

/// Observable events of schema construction and validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Schema construction
    /// A field was added to a registry
    FieldRegistered,
    /// A schema document was loaded into a parser
    SchemaLoaded,

    // Validation
    /// Validation pass started
    ValidationBegin,
    /// Validation pass produced a result
    ValidationComplete,
    /// Validation pass rejected its input
    ValidationRejected,
    /// Validation scope ended without an outcome (a transform panicked)
    ValidationIncomplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::FieldRegistered => "FIELD_REGISTERED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::ValidationBegin => "VALIDATION_BEGIN",
            Event::ValidationComplete => "VALIDATION_COMPLETE",
            Event::ValidationRejected => "VALIDATION_REJECTED",
            Event::ValidationIncomplete => "VALIDATION_INCOMPLETE",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::FieldRegistered.as_str(), "FIELD_REGISTERED");
        assert_eq!(Event::ValidationBegin.to_string(), "VALIDATION_BEGIN");
        assert_eq!(Event::ValidationRejected.as_str(), "VALIDATION_REJECTED");
    }
}
