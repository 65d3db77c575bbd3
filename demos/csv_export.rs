//! Delimited-text rendering without the orchestrator.
//!
//! Run with: `cargo run --example csv_export --features csv`

use reportes::core::*;
use reportes::csv::render_csv;

fn main() {
    let records = parse_records::<TravelExpense>(
        r#"[
            {"id": "v-1", "amount": 4800, "status": "approved",
             "createdAt": "2026-08-01T08:00:00Z", "employee": "Ana Reyes",
             "destination": "Monterrey", "purpose": "Auditoría de sucursal",
             "department": "Finanzas"},
            {"id": "v-2", "amount": "1,250.75", "status": "pending",
             "createdAt": "2026-08-03T10:15:00Z", "employee": "Luis Cordero",
             "destination": "Guadalajara", "purpose": "Capacitación",
             "department": "Recursos Humanos"}
        ]"#,
    )
    .expect("parse records");

    let csv = render_csv(&records, &travel_expense_columns());
    print!("{csv}");

    let summary = aggregate(&records);
    eprintln!(
        "{} registros, total {}",
        summary.total.count,
        format_currency(summary.total.total, &ES_MX, "MXN")
    );
}
