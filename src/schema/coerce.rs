//! Conversion of raw input values to declared field types
//!
//! Each target type has one pure function `&Value -> Result<Value, String>`.
//! The error string explains why the conversion was refused; the validator
//! wraps it into a coercion error naming the field.
//!
//! Conversions:
//! - string: strings pass, numbers and booleans are rendered
//! - integer: integers within i64 pass, floats truncate toward zero, strings
//!   are parsed, booleans become 0/1
//! - float: numbers widen, strings are parsed, booleans become 0.0/1.0
//! - boolean: booleans pass, numbers are true when non-zero, strings accept
//!   true/false, yes/no, on/off, 1/0 in any case
//! - list: arrays pass, scalars are wrapped in a one-element array
//!
//! Null and objects are never converted.

use serde_json::{Number, Value};

use super::types::FieldType;

/// Coerce `raw` to `field_type`.
pub fn coerce(field_type: FieldType, raw: &Value) -> Result<Value, String> {
    match field_type {
        FieldType::String => to_string(raw),
        FieldType::Integer => to_integer(raw),
        FieldType::Float => to_float(raw),
        FieldType::Boolean => to_boolean(raw),
        FieldType::List => to_list(raw),
    }
}

fn to_string(raw: &Value) -> Result<Value, String> {
    match raw {
        Value::String(_) => Ok(raw.clone()),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(format!("{} has no string form", json_type_name(other))),
    }
}

fn to_integer(raw: &Value) -> Result<Value, String> {
    match raw {
        Value::Number(n) if n.is_i64() => Ok(raw.clone()),
        Value::Number(n) if n.is_u64() => Err(format!("{} is out of integer range", n)),
        Value::Number(n) => {
            let f = n.as_f64().ok_or("number is not representable")?;
            float_to_integer(f)
        }
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| format!("'{}' is not an integer literal", s))
        }
        Value::Bool(b) => Ok(Value::from(i64::from(*b))),
        other => Err(format!("{} cannot become an integer", json_type_name(other))),
    }
}

fn float_to_integer(f: f64) -> Result<Value, String> {
    let truncated = f.trunc();
    if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(format!("{} is out of integer range", f));
    }
    Ok(Value::from(truncated as i64))
}

fn to_float(raw: &Value) -> Result<Value, String> {
    let f = match raw {
        Value::Number(n) => n.as_f64().ok_or("number is not representable")?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("'{}' is not a float literal", s))?,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        other => return Err(format!("{} cannot become a float", json_type_name(other))),
    };

    // JSON has no NaN or infinity
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| format!("{} is not a finite float", f))
}

fn to_boolean(raw: &Value) -> Result<Value, String> {
    match raw {
        Value::Bool(_) => Ok(raw.clone()),
        Value::Number(n) => Ok(Value::Bool(n.as_f64().map_or(true, |f| f != 0.0))),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "off" | "0" => Ok(Value::Bool(false)),
            _ => Err(format!("'{}' is not a boolean literal", s)),
        },
        other => Err(format!("{} cannot become a boolean", json_type_name(other))),
    }
}

fn to_list(raw: &Value) -> Result<Value, String> {
    match raw {
        Value::Array(_) => Ok(raw.clone()),
        Value::Null | Value::Object(_) => {
            Err(format!("{} cannot become a list", json_type_name(raw)))
        }
        scalar => Ok(Value::Array(vec![scalar.clone()])),
    }
}

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Renders a value the way pattern constraints see it: strings without
/// quotes, everything else as compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
