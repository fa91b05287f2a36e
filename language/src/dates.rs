//! Dates taken from headers, properties or the exchange itself.
//!
//! Header and property lookups use the part of the command after its last
//! `.` as the key, so `header.file.date` reads `date` and `date` reads `date`.

use chrono::{DateTime, TimeZone, Utc};
use internals::{keys, Exchange, RelayError, Value};
use tracing::trace;

/// Called when a value cannot be read as a date directly. Receives the raw
/// value, or `None` when the key is missing.
pub type DateFallback = dyn Fn(&Exchange, Option<&Value>) -> Option<DateTime<Utc>>;

pub fn command_key(command: &str) -> &str {
    match command.rfind('.') {
        Some(idx) => &command[idx + 1..],
        None => command,
    }
}

fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Reads the [`FILE_LAST_MODIFIED`](keys::FILE_LAST_MODIFIED) header.
///
/// A positive epoch-millis value wins, then a value convertible to a
/// timestamp. Anything else is an [`RelayError::IllegalArgument`] naming
/// `command`.
pub fn date_from_file_last_modified(
    exchange: &Exchange,
    command: &str,
) -> Result<DateTime<Utc>, RelayError> {
    let converter = exchange.context().type_converter();
    let header = exchange.header(keys::FILE_LAST_MODIFIED);

    let millis = header
        .and_then(|value| converter.to_long(value))
        .filter(|millis| *millis > 0);
    if let Some(date) = millis.and_then(from_millis) {
        return Ok(date);
    }

    header
        .and_then(|value| converter.to_timestamp(value))
        .ok_or_else(|| {
            RelayError::IllegalArgument(format!(
                "Cannot find {} header at command: {}",
                keys::FILE_LAST_MODIFIED,
                command
            ))
        })
}

pub fn date_from_exchange_property(
    exchange: &Exchange,
    command: &str,
    fallback: Option<&DateFallback>,
) -> Option<DateTime<Utc>> {
    let key = command_key(command);
    resolve_date(exchange, key, exchange.property(key), fallback)
}

pub fn date_from_header(
    exchange: &Exchange,
    command: &str,
    fallback: Option<&DateFallback>,
) -> Option<DateTime<Utc>> {
    let key = command_key(command);
    resolve_date(exchange, key, exchange.header(key), fallback)
}

pub fn date_from_exchange_created(exchange: &Exchange) -> DateTime<Utc> {
    exchange.created()
}

fn resolve_date(
    exchange: &Exchange,
    key: &str,
    value: Option<&Value>,
    fallback: Option<&DateFallback>,
) -> Option<DateTime<Utc>> {
    match value.filter(|v| !v.is_null()) {
        Some(Value::Timestamp(ts)) => Some(*ts),
        Some(Value::Int(millis)) => from_millis(*millis),
        other => {
            trace!(key, "no direct date value, using fallback: {}", fallback.is_some());
            fallback.and_then(|f| f(exchange, other))
        }
    }
}
