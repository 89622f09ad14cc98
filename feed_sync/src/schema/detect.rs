//! Primitive type detection for raw document values
//!
//! Patterns are tried in a fixed order and the first match wins. The digit
//! length boundaries (9 and 18) decide between `integer` and `bigint` and must
//! stay as they are, or previously created tables stop validating.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::types::PrimitiveType;

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]{1,9}$").expect("valid type pattern"));
static LONG_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]{10,18}$").expect("valid type pattern"));
static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+\.[0-9]+$").expect("valid type pattern"));
static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid type pattern"));
static TIMESTAMP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T.*$").expect("valid type pattern"));

/// Detect the primitive type of a raw string. Falls back to `Text`.
pub fn detect(raw: &str) -> PrimitiveType {
    if is_boolean(raw) {
        PrimitiveType::Boolean
    } else if INTEGER.is_match(raw) {
        PrimitiveType::Integer
    } else if LONG_INTEGER.is_match(raw) {
        PrimitiveType::LongInteger
    } else if DECIMAL.is_match(raw) {
        PrimitiveType::Decimal
    } else if DATE.is_match(raw) {
        PrimitiveType::Date
    } else if TIMESTAMP.is_match(raw) {
        PrimitiveType::Timestamp
    } else {
        PrimitiveType::Text
    }
}

fn is_boolean(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("false")
}
