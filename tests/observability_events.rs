//! Observability Tests
//!
//! Lifecycle events are emitted through `tracing` with a stable `event`
//! field, and input values never reach the log.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use dictparse::{DictParser, FieldSpec, FieldType, ParserConfig, SchemaLoader};
use serde_json::json;
use tracing_subscriber::fmt::MakeWriter;

// =============================================================================
// Helper Functions
// =============================================================================

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLog {
    type Writer = CapturedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let sink = CapturedLog::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = sink.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

fn parser(config: ParserConfig) -> DictParser {
    let mut parser = DictParser::with_config(config);
    parser
        .add_field(FieldSpec::new("token").field_type(FieldType::String).required(true))
        .unwrap();
    parser
        .add_field(FieldSpec::new("count").field_type(FieldType::Integer))
        .unwrap();
    parser
}

// =============================================================================
// Event Tests
// =============================================================================

#[test]
fn test_registration_logs_field_registered() {
    let log = capture(|| {
        parser(ParserConfig::default());
    });
    assert!(log.contains("FIELD_REGISTERED"));
    assert!(log.contains("token"));
}

#[test]
fn test_successful_parse_logs_begin_and_complete() {
    let parser = parser(ParserConfig::default());
    let log = capture(|| {
        parser.parse(&json!({"token": "s3cr3t-value"})).unwrap();
    });

    assert!(log.contains("VALIDATION_BEGIN"));
    assert!(log.contains("VALIDATION_COMPLETE"));
    assert!(!log.contains("VALIDATION_REJECTED"));
    assert!(!log.contains("s3cr3t-value"));
}

#[test]
fn test_rejected_parse_logs_code_and_field() {
    let parser = parser(ParserConfig::default());
    let log = capture(|| {
        parser
            .parse(&json!({"token": "s3cr3t-value", "count": "many"}))
            .unwrap_err();
    });

    assert!(log.contains("VALIDATION_REJECTED"));
    assert!(log.contains("DICT_FIELD_COERCION_FAILED"));
    assert!(log.contains("count"));
    assert!(!log.contains("s3cr3t-value"));
    assert!(!log.contains("many"));
}

#[test]
fn test_quiet_config_suppresses_lifecycle_events() {
    let parser = parser(ParserConfig::default().quiet());
    let log = capture(|| {
        parser.parse(&json!({"token": "t"})).unwrap();
        parser.parse(&json!({})).unwrap_err();
    });

    assert!(!log.contains("VALIDATION_BEGIN"));
    assert!(!log.contains("VALIDATION_REJECTED"));
}

#[test]
fn test_quiet_config_suppresses_field_registered() {
    let log = capture(|| {
        let mut parser = DictParser::with_config(ParserConfig::default().quiet());
        parser.add_field(FieldSpec::new("secret_field")).unwrap();
    });

    assert!(!log.contains("FIELD_REGISTERED"));
    assert!(!log.contains("secret_field"));
}

#[test]
fn test_schema_loaded_event() {
    let log = capture(|| {
        SchemaLoader::load_str("inline-doc", r#"{"fields": [{"name": "a"}]}"#).unwrap();
    });

    assert!(log.contains("SCHEMA_LOADED"));
    assert!(log.contains("inline-doc"));
}
