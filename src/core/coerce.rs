//! Defensive field coercion for API-shaped input.
//!
//! The upstream data layer hands over JSON arrays whose fields are not
//! reliably typed: amounts arrive as numbers or pre-formatted strings
//! (`"$12,500.00"`), timestamps in several shapes, statuses in any casing.
//! Every function here returns a usable value; nothing panics and nothing
//! propagates an error past the field it belongs to.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

use super::types::Status;

/// Coerce an arbitrary JSON value into a monetary amount.
///
/// Unparsable input normalizes to zero — by contract this never fails.
pub fn coerce_amount(value: &serde_json::Value) -> Decimal {
    match value {
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap_or_else(|_| {
            warn!("amount {n} out of decimal range, coerced to 0");
            Decimal::ZERO
        }),
        serde_json::Value::String(s) => coerce_amount_str(s),
        serde_json::Value::Null => Decimal::ZERO,
        other => {
            warn!("non-numeric amount {other}, coerced to 0");
            Decimal::ZERO
        }
    }
}

/// Parse a human-entered or pre-formatted amount string.
///
/// Strips currency symbols and whitespace, then decides which of `.`/`,`
/// is the decimal separator from their relative positions, so both
/// `"1,234.56"` and `"1.234,56"` parse to the same value.
pub fn coerce_amount_str(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    let mut cleaned = String::with_capacity(trimmed.len());
    let mut negative = false;
    for ch in trimmed.chars() {
        match ch {
            '-' => negative = true,
            '(' => negative = true, // accounting negatives: (1,234.00)
            '0'..='9' | '.' | ',' => cleaned.push(ch),
            _ => {} // currency symbols, spaces, code suffixes
        }
    }
    if cleaned.is_empty() {
        warn!("unparsable amount {raw:?}, coerced to 0");
        return Decimal::ZERO;
    }

    let last_dot = cleaned.rfind('.');
    let last_comma = cleaned.rfind(',');
    let normalized = match (last_dot, last_comma) {
        (Some(d), Some(c)) => {
            // The rightmost separator is the decimal point.
            if d > c {
                cleaned.replace(',', "")
            } else {
                cleaned.replace('.', "").replace(',', ".")
            }
        }
        (None, Some(c)) => {
            // A lone comma is decimal iff it is not a thousands group.
            let frac_len = cleaned.len() - c - 1;
            if frac_len == 3 && cleaned.len() > 4 {
                cleaned.replace(',', "")
            } else {
                cleaned.replace(',', ".")
            }
        }
        _ => cleaned,
    };

    match Decimal::from_str(&normalized) {
        Ok(d) => {
            if negative {
                -d
            } else {
                d
            }
        }
        Err(_) => {
            warn!("unparsable amount {raw:?}, coerced to 0");
            Decimal::ZERO
        }
    }
}

/// Coerce a timestamp string into UTC.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]`, and bare `YYYY-MM-DD`
/// (interpreted as midnight). Anything else yields `None`; the range
/// filter excludes such records rather than erroring.
pub fn coerce_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|n| n.and_utc());
    }

    warn!("unparsable timestamp {raw:?}, record will be excluded from ranged periods");
    None
}

// ── serde adapters ──────────────────────────────────────────────────────────

/// `deserialize_with` adapter for amount fields.
pub fn amount_field<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_amount(&value))
}

/// `deserialize_with` adapter for timestamp fields.
pub fn timestamp_field<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => coerce_timestamp(&s),
        serde_json::Value::Number(n) => n
            .as_i64()
            .and_then(|millis| DateTime::<Utc>::from_timestamp_millis(millis)),
        _ => None,
    })
}

/// `deserialize_with` adapter for status fields.
pub fn status_field<'de, D>(deserializer: D) -> Result<Status, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Status::parse(&s),
        _ => Status::parse(""),
    })
}

/// `deserialize_with` adapter for free-text fields that may be missing,
/// null, or numeric.
pub fn text_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amount_plain() {
        assert_eq!(coerce_amount_str("1234.56"), dec!(1234.56));
        assert_eq!(coerce_amount_str("0"), dec!(0));
    }

    #[test]
    fn amount_formatted_en() {
        assert_eq!(coerce_amount_str("$12,500.00"), dec!(12500.00));
        assert_eq!(coerce_amount_str("1,234,567.89"), dec!(1234567.89));
    }

    #[test]
    fn amount_formatted_eu() {
        assert_eq!(coerce_amount_str("1.234,56"), dec!(1234.56));
        assert_eq!(coerce_amount_str("12,50"), dec!(12.50));
    }

    #[test]
    fn amount_negative() {
        assert_eq!(coerce_amount_str("-500"), dec!(-500));
        assert_eq!(coerce_amount_str("(1,000.00)"), dec!(-1000.00));
    }

    #[test]
    fn amount_garbage_is_zero() {
        assert_eq!(coerce_amount_str("n/a"), Decimal::ZERO);
        assert_eq!(coerce_amount_str(""), Decimal::ZERO);
        assert_eq!(coerce_amount_str("---"), Decimal::ZERO);
    }

    #[test]
    fn timestamp_rfc3339() {
        let ts = coerce_timestamp("2026-08-07T15:04:05Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-08-07T15:04:05+00:00");
    }

    #[test]
    fn timestamp_space_separated() {
        assert!(coerce_timestamp("2026-08-07 15:04").is_some());
        assert!(coerce_timestamp("2026-08-07 15:04:05").is_some());
    }

    #[test]
    fn timestamp_bare_date_is_midnight() {
        let ts = coerce_timestamp("2026-08-07").unwrap();
        assert_eq!(ts.format("%H:%M:%S").to_string(), "00:00:00");
    }

    #[test]
    fn timestamp_garbage_is_none() {
        assert!(coerce_timestamp("hace dos días").is_none());
        assert!(coerce_timestamp("").is_none());
    }
}
