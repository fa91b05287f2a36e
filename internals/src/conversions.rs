use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::errors::RelayError;
use crate::failure::Failure;
use crate::structs::Value;

// ==========================================
// 1. INTO VALUE
// ==========================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(Arc::new(bytes))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self {
        Value::Timestamp(ts)
    }
}

impl From<Failure> for Value {
    fn from(failure: Failure) -> Self {
        Value::Failure(failure)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

// ==========================================
// 2. OUT OF VALUE (lenient coercion)
// ==========================================

fn no_conversion(value: &Value, to: &'static str) -> RelayError {
    RelayError::NoTypeConversion {
        from: value.type_name().to_string(),
        to,
    }
}

impl TryFrom<&Value> for String {
    type Error = RelayError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Err(no_conversion(value, "String")),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Int(n) => Ok(n.to_string()),
            Value::Double(d) => Ok(d.to_string()),
            Value::Text(s) => Ok(s.clone()),
            Value::Bytes(bytes) => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|_| no_conversion(value, "String")),
            Value::Timestamp(ts) => Ok(ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Failure(f) => Ok(f.message().unwrap_or_else(|| f.type_name().to_string())),
        }
    }
}

impl TryFrom<&Value> for i64 {
    type Error = RelayError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(*n),
            Value::Double(d) if d.is_finite() && d.fract() == 0.0 => {
                if *d >= i64::MIN as f64 && *d < i64::MAX as f64 {
                    Ok(*d as i64)
                } else {
                    Err(no_conversion(value, "i64"))
                }
            }
            Value::Text(s) => s.trim().parse().map_err(|_| no_conversion(value, "i64")),
            _ => Err(no_conversion(value, "i64")),
        }
    }
}

impl TryFrom<&Value> for DateTime<Utc> {
    type Error = RelayError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Timestamp(ts) => Ok(*ts),
            Value::Text(s) => DateTime::parse_from_rfc3339(s.trim())
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|_| no_conversion(value, "DateTime<Utc>")),
            _ => Err(no_conversion(value, "DateTime<Utc>")),
        }
    }
}

impl TryFrom<&Value> for Failure {
    type Error = RelayError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Failure(f) => Ok(f.clone()),
            _ => Err(no_conversion(value, "Failure")),
        }
    }
}

// ==========================================
// 3. CONVERTER SEAM
// ==========================================

/// Converts exchange values to the types the helpers need.
///
/// Every method returns `None` when no conversion exists; implementations
/// must not panic on unexpected input.
pub trait TypeConverter: Send + Sync {
    fn to_text(&self, value: &Value) -> Option<String>;
    fn to_long(&self, value: &Value) -> Option<i64>;
    fn to_timestamp(&self, value: &Value) -> Option<DateTime<Utc>>;
    fn to_failure(&self, value: &Value) -> Option<Failure>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTypeConverter;

impl TypeConverter for DefaultTypeConverter {
    fn to_text(&self, value: &Value) -> Option<String> {
        String::try_from(value).ok()
    }

    fn to_long(&self, value: &Value) -> Option<i64> {
        i64::try_from(value).ok()
    }

    fn to_timestamp(&self, value: &Value) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::try_from(value).ok()
    }

    fn to_failure(&self, value: &Value) -> Option<Failure> {
        Failure::try_from(value).ok()
    }
}
