//! Column definitions — the only layer that knows variant-specific fields.
//!
//! Renderers receive a `&[Column]` and apply each column's accessor to every
//! record. A column applied to a record of the wrong variant produces empty
//! text rather than panicking, so mixed collections degrade gracefully.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::format;
use super::types::{Record, Status};

/// A typed cell produced by a column accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Amount(Decimal),
    Date(Option<DateTime<Utc>>),
    Status(Status),
}

impl CellValue {
    /// Plain, machine-readable stringification used by the delimited-text
    /// renderer: amounts as `1234.50`, dates as `YYYY-MM-DD HH:MM`.
    pub fn to_plain_string(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Amount(d) => format!("{:.2}", d.round_dp(2)),
            Self::Date(Some(ts)) => ts.format("%Y-%m-%d %H:%M").to_string(),
            Self::Date(None) => String::new(),
            Self::Status(s) => s.label(),
        }
    }

    /// Human display form used by the styled renderers for text-shaped cells.
    /// Amounts are left to the renderer, which owns locale and number format.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Amount(d) => format!("{:.2}", d.round_dp(2)),
            Self::Date(ts) => format::format_date_short(*ts),
            Self::Status(s) => s.label(),
        }
    }
}

/// Rendering class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Known-short identifier; fixed narrow width.
    Id,
    Text,
    /// Monetary; right-aligned, currency number format, summable.
    Currency,
    Date,
    /// Gets the conditional status fill.
    Status,
}

/// One output column: stable key, header label, kind, and a relative width
/// weight used by the paginated layout.
#[derive(Clone)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ColumnKind,
    /// Relative width weight; the document layout normalizes these against
    /// the printable page width.
    pub weight: f32,
    pub get: fn(&Record) -> CellValue,
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("weight", &self.weight)
            .finish()
    }
}

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

/// Columns for the payment-request report.
pub fn payment_request_columns() -> Vec<Column> {
    vec![
        Column {
            key: "folio",
            label: "Folio",
            kind: ColumnKind::Id,
            weight: 1.0,
            get: |r| match r {
                Record::PaymentRequest(p) => text(&p.folio),
                _ => text(""),
            },
        },
        Column {
            key: "concept",
            label: "Concepto",
            kind: ColumnKind::Text,
            weight: 2.4,
            get: |r| match r {
                Record::PaymentRequest(p) => text(&p.concept),
                _ => text(""),
            },
        },
        Column {
            key: "beneficiary",
            label: "Beneficiario",
            kind: ColumnKind::Text,
            weight: 2.0,
            get: |r| match r {
                Record::PaymentRequest(p) => text(&p.beneficiary),
                _ => text(""),
            },
        },
        Column {
            key: "department",
            label: "Departamento",
            kind: ColumnKind::Text,
            weight: 1.5,
            get: |r| text(r.department()),
        },
        Column {
            key: "amount",
            label: "Monto",
            kind: ColumnKind::Currency,
            weight: 1.2,
            get: |r| CellValue::Amount(r.amount()),
        },
        Column {
            key: "status",
            label: "Estado",
            kind: ColumnKind::Status,
            weight: 1.1,
            get: |r| CellValue::Status(r.status().clone()),
        },
        Column {
            key: "createdAt",
            label: "Fecha de creación",
            kind: ColumnKind::Date,
            weight: 1.5,
            get: |r| CellValue::Date(r.timestamp()),
        },
    ]
}

/// Columns for the recurring-template report.
pub fn recurring_template_columns() -> Vec<Column> {
    vec![
        Column {
            key: "id",
            label: "ID",
            kind: ColumnKind::Id,
            weight: 0.8,
            get: |r| text(r.id()),
        },
        Column {
            key: "concept",
            label: "Concepto",
            kind: ColumnKind::Text,
            weight: 2.4,
            get: |r| match r {
                Record::RecurringTemplate(t) => text(&t.concept),
                _ => text(""),
            },
        },
        Column {
            key: "beneficiary",
            label: "Beneficiario",
            kind: ColumnKind::Text,
            weight: 2.0,
            get: |r| match r {
                Record::RecurringTemplate(t) => text(&t.beneficiary),
                _ => text(""),
            },
        },
        Column {
            key: "frequency",
            label: "Frecuencia",
            kind: ColumnKind::Text,
            weight: 1.2,
            get: |r| match r {
                Record::RecurringTemplate(t) => text(&t.frequency),
                _ => text(""),
            },
        },
        Column {
            key: "amount",
            label: "Monto",
            kind: ColumnKind::Currency,
            weight: 1.2,
            get: |r| CellValue::Amount(r.amount()),
        },
        Column {
            key: "status",
            label: "Estado",
            kind: ColumnKind::Status,
            weight: 1.1,
            get: |r| CellValue::Status(r.status().clone()),
        },
        Column {
            key: "createdAt",
            label: "Fecha de alta",
            kind: ColumnKind::Date,
            weight: 1.5,
            get: |r| CellValue::Date(r.timestamp()),
        },
    ]
}

/// Columns for the travel-expense report.
pub fn travel_expense_columns() -> Vec<Column> {
    vec![
        Column {
            key: "id",
            label: "ID",
            kind: ColumnKind::Id,
            weight: 0.8,
            get: |r| text(r.id()),
        },
        Column {
            key: "employee",
            label: "Empleado",
            kind: ColumnKind::Text,
            weight: 2.0,
            get: |r| match r {
                Record::TravelExpense(e) => text(&e.employee),
                _ => text(""),
            },
        },
        Column {
            key: "destination",
            label: "Destino",
            kind: ColumnKind::Text,
            weight: 1.6,
            get: |r| match r {
                Record::TravelExpense(e) => text(&e.destination),
                _ => text(""),
            },
        },
        Column {
            key: "purpose",
            label: "Motivo",
            kind: ColumnKind::Text,
            weight: 2.0,
            get: |r| match r {
                Record::TravelExpense(e) => text(&e.purpose),
                _ => text(""),
            },
        },
        Column {
            key: "department",
            label: "Departamento",
            kind: ColumnKind::Text,
            weight: 1.5,
            get: |r| text(r.department()),
        },
        Column {
            key: "amount",
            label: "Monto",
            kind: ColumnKind::Currency,
            weight: 1.2,
            get: |r| CellValue::Amount(r.amount()),
        },
        Column {
            key: "status",
            label: "Estado",
            kind: ColumnKind::Status,
            weight: 1.1,
            get: |r| CellValue::Status(r.status().clone()),
        },
        Column {
            key: "createdAt",
            label: "Fecha",
            kind: ColumnKind::Date,
            weight: 1.4,
            get: |r| CellValue::Date(r.timestamp()),
        },
    ]
}

/// Columns for the processed-payment report.
pub fn processed_payment_columns() -> Vec<Column> {
    vec![
        Column {
            key: "id",
            label: "ID",
            kind: ColumnKind::Id,
            weight: 0.8,
            get: |r| text(r.id()),
        },
        Column {
            key: "reference",
            label: "Referencia",
            kind: ColumnKind::Text,
            weight: 1.6,
            get: |r| match r {
                Record::ProcessedPayment(p) => text(&p.reference),
                _ => text(""),
            },
        },
        Column {
            key: "concept",
            label: "Concepto",
            kind: ColumnKind::Text,
            weight: 2.2,
            get: |r| match r {
                Record::ProcessedPayment(p) => text(&p.concept),
                _ => text(""),
            },
        },
        Column {
            key: "beneficiary",
            label: "Beneficiario",
            kind: ColumnKind::Text,
            weight: 2.0,
            get: |r| match r {
                Record::ProcessedPayment(p) => text(&p.beneficiary),
                _ => text(""),
            },
        },
        Column {
            key: "department",
            label: "Departamento",
            kind: ColumnKind::Text,
            weight: 1.4,
            get: |r| text(r.department()),
        },
        Column {
            key: "amount",
            label: "Monto",
            kind: ColumnKind::Currency,
            weight: 1.2,
            get: |r| CellValue::Amount(r.amount()),
        },
        Column {
            key: "status",
            label: "Estado",
            kind: ColumnKind::Status,
            weight: 1.1,
            get: |r| CellValue::Status(r.status().clone()),
        },
        Column {
            key: "paidAt",
            label: "Fecha de pago",
            kind: ColumnKind::Date,
            weight: 1.5,
            get: |r| CellValue::Date(r.timestamp()),
        },
    ]
}
