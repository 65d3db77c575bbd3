use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use reportes::core::*;
use reportes::csv::render_csv;
use reportes::pdf::render_document;
use reportes::xlsx::render_spreadsheet;

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
}

fn build_records(n: u32) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let status = match i % 4 {
                0 => Status::Pending,
                1 => Status::Approved,
                2 => Status::Paid,
                _ => Status::Rejected,
            };
            Record::PaymentRequest(PaymentRequest {
                id: i.to_string(),
                folio: format!("SP-{i:05}"),
                amount: dec!(1250.75) + rust_decimal::Decimal::from(i),
                status,
                created_at: Some(anchor() - Duration::hours(i as i64 % 720)),
                department: "Compras".into(),
                concept: format!("Pago de servicios profesionales, partida {i}"),
                beneficiary: "Proveedor de Servicios Integrales SA de CV".into(),
                bank_account: "002010077777777771".into(),
            })
        })
        .collect()
}

fn bench_filter_and_aggregate(c: &mut Criterion) {
    let records = build_records(1000);
    c.bench_function("filter_1000_by_week", |b| {
        b.iter(|| filter_by_period(black_box(&records), Period::Week, anchor()))
    });
    c.bench_function("aggregate_1000", |b| {
        b.iter(|| aggregate(black_box(&records)))
    });
}

fn bench_renderers(c: &mut Criterion) {
    let config = ReportConfig::default();
    let columns = payment_request_columns();

    for n in [10u32, 1000] {
        let records = build_records(n);
        let agg = aggregate(&records);

        c.bench_function(&format!("render_csv_{n}"), |b| {
            b.iter(|| render_csv(black_box(&records), &columns))
        });

        c.bench_function(&format!("render_spreadsheet_{n}"), |b| {
            b.iter(|| {
                render_spreadsheet(
                    black_box(&records),
                    &agg,
                    &columns,
                    "Solicitudes de Pago",
                    &config,
                    anchor(),
                )
                .unwrap()
            })
        });

        c.bench_function(&format!("render_document_{n}"), |b| {
            b.iter(|| {
                render_document(
                    black_box(&records),
                    &agg,
                    &columns,
                    "Solicitudes de Pago",
                    Period::All.label_es(),
                    &config,
                    &NoAssets,
                    anchor(),
                    true,
                )
                .unwrap()
            })
        });
    }
}

criterion_group!(benches, bench_filter_and_aggregate, bench_renderers);
criterion_main!(benches);
