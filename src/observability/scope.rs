//! Scope that logs the lifecycle of one validation pass
//!
//! - Logs VALIDATION_BEGIN on creation
//! - Logs VALIDATION_COMPLETE or VALIDATION_REJECTED when closed
//! - Logs VALIDATION_INCOMPLETE on drop if never closed
//!
//! Only keys, counts and error codes are logged, never input values.

use tracing::{debug, info, warn};

use super::events::Event;
use crate::schema::ParseError;

/// Lifecycle logger for a single validation call.
///
/// # Usage
///
/// ```ignore
/// let scope = ValidationScope::begin(true, registry.len(), strict);
/// match run() {
///     Ok(ns) => scope.complete(ns.len()),
///     Err(e) => scope.reject(&e),
/// }
/// ```
pub struct ValidationScope {
    enabled: bool,
    closed: bool,
}

impl ValidationScope {
    /// Opens a scope; logs nothing when `enabled` is false
    pub fn begin(enabled: bool, declared: usize, strict: bool) -> Self {
        if enabled {
            debug!(
                event = Event::ValidationBegin.as_str(),
                declared,
                strict,
                "validation started"
            );
        }
        Self {
            enabled,
            closed: false,
        }
    }

    /// Closes the scope after a successful pass
    pub fn complete(mut self, stored: usize) {
        self.closed = true;
        if self.enabled {
            debug!(
                event = Event::ValidationComplete.as_str(),
                stored,
                "validation complete"
            );
        }
    }

    /// Closes the scope after the pass rejected its input
    pub fn reject(mut self, error: &ParseError) {
        self.closed = true;
        if self.enabled {
            info!(
                event = Event::ValidationRejected.as_str(),
                code = error.code(),
                field = error.field().unwrap_or(""),
                "validation rejected"
            );
        }
    }

    /// Closes the scope after a collect-all pass found `count` failures
    pub fn reject_many(mut self, first: &ParseError, count: usize) {
        self.closed = true;
        if self.enabled {
            info!(
                event = Event::ValidationRejected.as_str(),
                code = first.code(),
                field = first.field().unwrap_or(""),
                count,
                "validation rejected"
            );
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for ValidationScope {
    fn drop(&mut self) {
        if self.enabled && !self.closed {
            warn!(
                event = Event::ValidationIncomplete.as_str(),
                "validation scope dropped without an outcome"
            );
        }
    }
}
