use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::coerce;

/// Workflow status of a record.
///
/// Parsing is case-insensitive; display is capitalized. Unknown inputs are
/// preserved verbatim in [`Status::Other`] so nothing is lost on round-trip
/// through the renderers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Awaiting approval.
    Pending,
    /// Approved, not yet paid.
    Approved,
    /// Rejected by an approver.
    Rejected,
    /// Paid out by the bank payer.
    Paid,
    /// Recurring template currently generating requests.
    Active,
    /// Recurring template on hold.
    Paused,
    /// Anything the portal sends that we do not model.
    Other(String),
}

impl Status {
    /// Parse a status key, case-insensitively. Trims surrounding whitespace.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pending" | "pendiente" => Self::Pending,
            "approved" | "aprobado" | "aprobada" => Self::Approved,
            "rejected" | "rechazado" | "rechazada" => Self::Rejected,
            "paid" | "pagado" | "pagada" => Self::Paid,
            "active" | "activo" | "activa" => Self::Active,
            "paused" | "pausado" | "pausada" => Self::Paused,
            "" => Self::Other(String::new()),
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    /// Capitalized display label.
    pub fn label(&self) -> String {
        match self {
            Self::Pending => "Pendiente".to_string(),
            Self::Approved => "Aprobado".to_string(),
            Self::Rejected => "Rechazado".to_string(),
            Self::Paid => "Pagado".to_string(),
            Self::Active => "Activo".to_string(),
            Self::Paused => "Pausado".to_string(),
            Self::Other(raw) if raw.is_empty() => "—".to_string(),
            Self::Other(raw) => super::format::title_case(raw),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// A payment request raised by a requester.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub id: String,
    /// Sequential folio shown to users; distinct from the storage id.
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub folio: String,
    #[serde(default, deserialize_with = "coerce::amount_field")]
    pub amount: Decimal,
    #[serde(default = "default_status", deserialize_with = "coerce::status_field")]
    pub status: Status,
    #[serde(default, deserialize_with = "coerce::timestamp_field")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub department: String,
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub concept: String,
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub beneficiary: String,
    /// CLABE or account number of the beneficiary.
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub bank_account: String,
}

/// A recurring-payment template that spawns requests on a schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTemplate {
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub id: String,
    #[serde(default, deserialize_with = "coerce::amount_field")]
    pub amount: Decimal,
    #[serde(default = "default_status", deserialize_with = "coerce::status_field")]
    pub status: Status,
    #[serde(default, deserialize_with = "coerce::timestamp_field")]
    pub created_at: Option<DateTime<Utc>>,
    /// Human schedule label: "quincenal", "mensual", …
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub frequency: String,
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub department: String,
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub concept: String,
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub beneficiary: String,
}

/// A per-diem / travel-expense record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelExpense {
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub id: String,
    #[serde(default, deserialize_with = "coerce::amount_field")]
    pub amount: Decimal,
    #[serde(default = "default_status", deserialize_with = "coerce::status_field")]
    pub status: Status,
    #[serde(default, deserialize_with = "coerce::timestamp_field")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub employee: String,
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub destination: String,
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub purpose: String,
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub department: String,
}

/// A payment already executed by the bank payer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedPayment {
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub id: String,
    #[serde(default, deserialize_with = "coerce::amount_field")]
    pub amount: Decimal,
    #[serde(default = "default_status", deserialize_with = "coerce::status_field")]
    pub status: Status,
    #[serde(default, deserialize_with = "coerce::timestamp_field")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub department: String,
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub concept: String,
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub beneficiary: String,
    /// Bank transaction reference (SPEI tracking key or similar).
    #[serde(default, deserialize_with = "coerce::text_field")]
    pub reference: String,
}

fn default_status() -> Status {
    Status::Other(String::new())
}

/// The record union consumed by the export pipeline.
///
/// Renderers only ever touch the shared projection below; variant-specific
/// fields are reached through the column-definition layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Record {
    PaymentRequest(PaymentRequest),
    RecurringTemplate(RecurringTemplate),
    TravelExpense(TravelExpense),
    ProcessedPayment(ProcessedPayment),
}

impl Record {
    /// Storage identifier.
    pub fn id(&self) -> &str {
        match self {
            Self::PaymentRequest(r) => &r.id,
            Self::RecurringTemplate(r) => &r.id,
            Self::TravelExpense(r) => &r.id,
            Self::ProcessedPayment(r) => &r.id,
        }
    }

    /// Coerced monetary amount. Unparsable input already normalized to zero.
    pub fn amount(&self) -> Decimal {
        match self {
            Self::PaymentRequest(r) => r.amount,
            Self::RecurringTemplate(r) => r.amount,
            Self::TravelExpense(r) => r.amount,
            Self::ProcessedPayment(r) => r.amount,
        }
    }

    pub fn status(&self) -> &Status {
        match self {
            Self::PaymentRequest(r) => &r.status,
            Self::RecurringTemplate(r) => &r.status,
            Self::TravelExpense(r) => &r.status,
            Self::ProcessedPayment(r) => &r.status,
        }
    }

    /// Effective timestamp used by the range filter: creation time for
    /// requests, templates and expenses; execution time for payments.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::PaymentRequest(r) => r.created_at,
            Self::RecurringTemplate(r) => r.created_at,
            Self::TravelExpense(r) => r.created_at,
            Self::ProcessedPayment(r) => r.paid_at,
        }
    }

    pub fn department(&self) -> &str {
        match self {
            Self::PaymentRequest(r) => &r.department,
            Self::RecurringTemplate(r) => &r.department,
            Self::TravelExpense(r) => &r.department,
            Self::ProcessedPayment(r) => &r.department,
        }
    }
}

impl From<PaymentRequest> for Record {
    fn from(r: PaymentRequest) -> Self {
        Self::PaymentRequest(r)
    }
}

impl From<RecurringTemplate> for Record {
    fn from(r: RecurringTemplate) -> Self {
        Self::RecurringTemplate(r)
    }
}

impl From<TravelExpense> for Record {
    fn from(r: TravelExpense) -> Self {
        Self::TravelExpense(r)
    }
}

impl From<ProcessedPayment> for Record {
    fn from(r: ProcessedPayment) -> Self {
        Self::ProcessedPayment(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(Status::parse("PENDING"), Status::Pending);
        assert_eq!(Status::parse("Paid"), Status::Paid);
        assert_eq!(Status::parse("  rejected "), Status::Rejected);
        assert_eq!(Status::parse("aprobado"), Status::Approved);
    }

    #[test]
    fn status_unknown_keeps_raw() {
        assert_eq!(
            Status::parse("en revisión"),
            Status::Other("en revisión".into())
        );
        assert_eq!(Status::parse("en revisión").label(), "En Revisión");
    }

    #[test]
    fn payment_request_from_loose_json() {
        let raw = r#"{
            "id": 4812,
            "folio": "SP-2026-0042",
            "amount": "$12,500.00",
            "status": "PENDING",
            "createdAt": "2026-08-01T09:30:00Z",
            "department": "Compras",
            "concept": "Licencias anuales",
            "beneficiary": "Proveedor SA de CV"
        }"#;
        let req: PaymentRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.id, "4812");
        assert_eq!(req.amount, dec!(12500.00));
        assert_eq!(req.status, Status::Pending);
        assert!(req.created_at.is_some());
        assert_eq!(req.bank_account, "");
    }

    #[test]
    fn bad_fields_do_not_fail_deserialization() {
        let raw = r#"{"id": null, "amount": "n/a", "status": 7, "createdAt": "ayer"}"#;
        let req: PaymentRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.amount, Decimal::ZERO);
        assert_eq!(req.status, Status::Other(String::new()));
        assert!(req.created_at.is_none());
    }
}
