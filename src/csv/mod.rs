//! Delimited-text rendering.
//!
//! Produces RFC-4180-compatible output: comma delimiter, CRLF line endings,
//! fields quoted only when they contain the delimiter, a quote, or a line
//! break, with embedded quotes doubled. A naive CSV parser recovers the
//! exact field values.

use crate::core::{Column, Record};

const DELIMITER: char = ',';

/// Serialize records into a single text blob: one header line from the
/// column labels, then one line per record in input order.
///
/// Columns appear exactly in the given order; records are never reordered
/// or dropped. Empty input yields the header line alone.
pub fn render_csv(records: &[Record], columns: &[Column]) -> String {
    let mut out = String::new();

    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        push_field(&mut out, column.label);
    }
    out.push_str("\r\n");

    for record in records {
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                out.push(DELIMITER);
            }
            push_field(&mut out, &(column.get)(record).to_plain_string());
        }
        out.push_str("\r\n");
    }

    out
}

/// Append one field, quoting and escaping only when required.
fn push_field(out: &mut String, value: &str) {
    let needs_quoting = value
        .chars()
        .any(|c| c == DELIMITER || c == '"' || c == '\n' || c == '\r');
    if !needs_quoting {
        out.push_str(value);
        return;
    }

    out.push('"');
    for ch in value.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PaymentRequest, Status, payment_request_columns};
    use rust_decimal_macros::dec;

    fn request(concept: &str) -> Record {
        Record::PaymentRequest(PaymentRequest {
            id: "1".into(),
            folio: "SP-1".into(),
            amount: dec!(1500.5),
            status: Status::Pending,
            created_at: None,
            department: "Compras".into(),
            concept: concept.into(),
            beneficiary: "Proveedor SA".into(),
            bank_account: String::new(),
        })
    }

    #[test]
    fn header_then_one_line_per_record() {
        let records = vec![request("Papelería"), request("Licencias")];
        let csv = render_csv(&records, &payment_request_columns());
        let lines: Vec<_> = csv.trim_end().split("\r\n").collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Folio,Concepto,"));
        assert!(lines[1].contains("Papelería"));
        assert!(lines[2].contains("Licencias"));
    }

    #[test]
    fn delimiter_triggers_quoting() {
        let records = vec![request("Sillas, mesas y escritorios")];
        let csv = render_csv(&records, &payment_request_columns());
        assert!(csv.contains("\"Sillas, mesas y escritorios\""));
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let records = vec![request(r#"Servicio "premium" anual"#)];
        let csv = render_csv(&records, &payment_request_columns());
        assert!(csv.contains(r#""Servicio ""premium"" anual""#));
    }

    #[test]
    fn empty_input_is_header_only() {
        let csv = render_csv(&[], &payment_request_columns());
        assert_eq!(csv.matches("\r\n").count(), 1);
        assert!(csv.starts_with("Folio,"));
    }

    #[test]
    fn amounts_are_plain_decimals() {
        let csv = render_csv(&[request("x")], &payment_request_columns());
        assert!(csv.contains("1500.50"));
        assert!(!csv.contains('$'));
    }
}
