use super::TypeTransformer;
use crate::catalog::ScalarType;
use crate::migration::error::MigrationError;
use crate::migration::field::Field;
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const MICROS_PER_SECOND: i64 = 1_000_000;

/// Converts legacy date strings and unix-second integers into timestamps
/// (microseconds since the Unix epoch, UTC).
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampTransformer;

/// Parse the textual forms legacy rows hold.
fn parse_micros(text: &str) -> Option<i64> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp_micros());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.and_utc().timestamp_micros());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_micros());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_micros());
    }
    text.parse::<i64>()
        .ok()
        .and_then(|secs| secs.checked_mul(MICROS_PER_SECOND))
}

impl TypeTransformer for TimestampTransformer {
    fn name(&self) -> &str {
        "timestamp"
    }

    fn transform(&self, field: &mut Field<'_>) -> Result<(), MigrationError> {
        let meta = field.metadata();
        if meta.field_type != ScalarType::Timestamp || meta.field_type.is_canonical(field.value()) {
            return Ok(());
        }

        let converted = match field.value() {
            Value::Int32(_) | Value::Int64(_) => field
                .value()
                .as_i64()
                .and_then(|secs| secs.checked_mul(MICROS_PER_SECOND))
                .map(Value::Timestamp),
            Value::String(s) => {
                let text = s.trim();
                if text.starts_with("0000-00-00") {
                    meta.is_nullable().then_some(Value::Null)
                } else {
                    parse_micros(text).map(Value::Timestamp)
                }
            }
            _ => None,
        };

        match converted {
            Some(value) => {
                field.set_value(value);
                Ok(())
            }
            None => Err(MigrationError::malformed(
                field.name(),
                field.value(),
                "not a recognized timestamp",
            )),
        }
    }
}
