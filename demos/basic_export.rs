//! End-to-end export of a payment-request report in all three formats.
//!
//! Run with: `cargo run --example basic_export --features export`

use reportes::core::*;
use reportes::export::*;

fn main() -> Result<(), ReportError> {
    let records = parse_records::<PaymentRequest>(
        r#"[
            {"id": 1, "folio": "SP-2026-0041", "amount": "12,500.00",
             "status": "pending", "createdAt": "2026-08-01T09:30:00Z",
             "department": "Compras", "concept": "Licencias anuales",
             "beneficiary": "Proveedor SA de CV"},
            {"id": 2, "folio": "SP-2026-0042", "amount": 8300.5,
             "status": "PAID", "createdAt": "2026-08-03T14:10:00Z",
             "department": "Sistemas", "concept": "Mantenimiento de servidores",
             "beneficiary": "Servicios TI SA"},
            {"id": 3, "folio": "SP-2026-0043", "amount": "no disponible",
             "status": "rejected", "createdAt": "2026-08-05T11:00:00Z",
             "department": "Compras", "concept": "Papelería",
             "beneficiary": "Papelera del Centro"}
        ]"#,
    )?;

    let config = ReportConfigBuilder::new("Tesorería Central")
        .currency("MXN")
        .build();

    for key in ["csv", "xlsx", "pdf"] {
        let format = ExportFormat::from_key(key)?;
        let request =
            ExportRequest::new(ReportKind::PaymentRequests, Period::Week, format)
                .with_chart(format == ExportFormat::Pdf);
        let artifact = export_report_plain(&records, &request, &config)?;
        std::fs::write(&artifact.filename, &artifact.bytes).expect("write artifact");
        println!(
            "{} — {} bytes ({})",
            artifact.filename,
            artifact.bytes.len(),
            artifact.mime
        );
    }

    Ok(())
}
