//! Paginated document with the categorical chart page.
//!
//! Run with: `cargo run --example pdf_report --features pdf`

use chrono::Utc;
use reportes::core::*;
use reportes::pdf::render_document;
use rust_decimal::Decimal;

fn main() -> Result<(), ReportError> {
    // A collection large enough to force several page breaks.
    let records: Vec<Record> = (0..120i64)
        .map(|i| {
            let status = match i % 5 {
                0 => "pending",
                1 | 2 => "paid",
                3 => "approved",
                _ => "rejected",
            };
            Record::ProcessedPayment(ProcessedPayment {
                id: format!("p-{i:04}"),
                amount: Decimal::new(150_000 + i * 735, 2),
                status: Status::parse(status),
                paid_at: coerce_timestamp("2026-08-01 09:00"),
                department: "Operaciones".into(),
                concept: format!("Dispersión de nómina, lote {}", i / 10),
                beneficiary: "Banco Receptor SA".into(),
                reference: format!("SPEI-{:08}", 44_000_000u64 + i as u64),
            })
        })
        .collect();

    let summary = aggregate(&records);
    let config = ReportConfigBuilder::new("Tesorería Central")
        .confidentiality_notice("Confidencial — distribución restringida a tesorería")
        .build();

    let bytes = render_document(
        &records,
        &summary,
        &processed_payment_columns(),
        "Pagos Procesados",
        Period::Month.label_es(),
        &config,
        &NoAssets,
        Utc::now(),
        true,
    )?;

    std::fs::write("PagosProcesados_demo.pdf", &bytes).expect("write pdf");
    println!("PagosProcesados_demo.pdf — {} bytes", bytes.len());
    Ok(())
}
