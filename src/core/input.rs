//! Input boundary: JSON-shaped record arrays from the data-fetch layer.

use log::warn;
use serde::de::DeserializeOwned;

use super::error::ReportError;
use super::types::Record;

/// Parse a JSON array into records of one variant.
///
/// Field-level problems are already absorbed by the coercion layer, so the
/// only way an element is skipped is when it is not an object at all; that
/// is logged and the rest of the array still parses. A payload that is not
/// an array is the caller's bug and surfaces as [`ReportError::Input`].
///
/// ```
/// use reportes::core::{parse_records, PaymentRequest};
///
/// let records = parse_records::<PaymentRequest>(
///     r#"[{"id": 1, "amount": "$100.00", "status": "pending"}]"#,
/// ).unwrap();
/// assert_eq!(records.len(), 1);
/// ```
pub fn parse_records<T>(json: &str) -> Result<Vec<Record>, ReportError>
where
    T: DeserializeOwned + Into<Record>,
{
    let values: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| ReportError::Input(format!("expected a JSON array of records: {e}")))?;

    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<T>(value) {
            Ok(record) => records.push(record.into()),
            Err(e) => warn!("skipping element {index}: {e}"),
        }
    }
    Ok(records)
}
