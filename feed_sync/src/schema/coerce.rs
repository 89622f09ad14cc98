//! Value coercion from raw document values to typed parameters

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};
use crate::schema::types::{PrimitiveType, SqlValue};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Convert `raw` to the column type `target`.
///
/// Null and blank text become [`SqlValue::Null`] whatever the target. Values
/// that already carry a native representation are converted without reparsing.
pub fn coerce(table: &str, column: &str, target: PrimitiveType, raw: &SqlValue) -> Result<SqlValue> {
    match raw {
        SqlValue::Null => return Ok(SqlValue::Null),
        SqlValue::Text(s) if s.trim().is_empty() => return Ok(SqlValue::Null),
        _ => {}
    }

    convert(target, raw).map_err(|reason| Error::CoercionError {
        table: table.to_string(),
        column: column.to_string(),
        target,
        raw: raw.to_string(),
        representation: raw.representation(),
        reason,
    })
}

fn convert(target: PrimitiveType, raw: &SqlValue) -> std::result::Result<SqlValue, String> {
    match (target, raw) {
        (PrimitiveType::Text, SqlValue::Text(s)) => Ok(SqlValue::Text(s.clone())),
        (PrimitiveType::Text, other) => Ok(SqlValue::Text(other.to_string())),

        (PrimitiveType::Integer, SqlValue::Integer(v)) => Ok(SqlValue::Integer(*v)),
        (PrimitiveType::Integer, SqlValue::BigInt(v)) => i32::try_from(*v)
            .map(SqlValue::Integer)
            .map_err(|e| e.to_string()),
        (PrimitiveType::Integer, SqlValue::Text(s)) => s
            .trim()
            .parse::<i32>()
            .map(SqlValue::Integer)
            .map_err(|e| e.to_string()),

        (PrimitiveType::LongInteger, SqlValue::Integer(v)) => Ok(SqlValue::BigInt(i64::from(*v))),
        (PrimitiveType::LongInteger, SqlValue::BigInt(v)) => Ok(SqlValue::BigInt(*v)),
        (PrimitiveType::LongInteger, SqlValue::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(SqlValue::BigInt)
            .map_err(|e| e.to_string()),

        (PrimitiveType::Decimal, SqlValue::Decimal(v)) => Ok(SqlValue::Decimal(v.clone())),
        (PrimitiveType::Decimal, SqlValue::Integer(v)) => Ok(SqlValue::Decimal(BigDecimal::from(i64::from(*v)))),
        (PrimitiveType::Decimal, SqlValue::BigInt(v)) => Ok(SqlValue::Decimal(BigDecimal::from(*v))),
        (PrimitiveType::Decimal, SqlValue::Text(s)) => parse_decimal(s).map(SqlValue::Decimal),

        (PrimitiveType::Boolean, SqlValue::Boolean(v)) => Ok(SqlValue::Boolean(*v)),
        (PrimitiveType::Boolean, SqlValue::Text(s)) => parse_boolean(s).map(SqlValue::Boolean),

        (PrimitiveType::Date, SqlValue::Date(v)) => Ok(SqlValue::Date(*v)),
        (PrimitiveType::Date, SqlValue::Text(s)) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(SqlValue::Date)
            .map_err(|e| e.to_string()),

        (PrimitiveType::Timestamp, SqlValue::Timestamp(v)) => Ok(SqlValue::Timestamp(*v)),
        (PrimitiveType::Timestamp, SqlValue::Text(s)) => parse_timestamp(s).map(SqlValue::Timestamp),

        (target, other) => Err(format!(
            "{} value cannot be stored as {}",
            other.representation(),
            target
        )),
    }
}

/// Arbitrary precision, so every digit of the feed value is kept
fn parse_decimal(raw: &str) -> std::result::Result<BigDecimal, String> {
    let normalized = raw.trim().replace(',', ".");
    BigDecimal::from_str(&normalized).map_err(|e| e.to_string())
}

fn parse_boolean(raw: &str) -> std::result::Result<bool, String> {
    let normalized = raw.trim().to_lowercase();
    match normalized.as_str() {
        "1" | "true" | "t" | "yes" => Ok(true),
        "0" | "false" | "f" | "no" => Ok(false),
        other => other.parse::<bool>().map_err(|e| e.to_string()),
    }
}

fn parse_timestamp(raw: &str) -> std::result::Result<NaiveDateTime, String> {
    let raw = raw.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }
    // offsets are normalized to UTC
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.naive_utc())
        .map_err(|e| e.to_string())
}
