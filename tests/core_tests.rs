use chrono::{DateTime, Duration, Utc};
use reportes::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
}

fn request(amount: Decimal, status: Status, created_at: Option<DateTime<Utc>>) -> Record {
    Record::PaymentRequest(PaymentRequest {
        id: "1".into(),
        folio: "SP-0001".into(),
        amount,
        status,
        created_at,
        department: "Compras".into(),
        concept: "Prueba".into(),
        beneficiary: "Proveedor SA".into(),
        bank_account: String::new(),
    })
}

// ── Coercion ────────────────────────────────────────────────────────────────

#[test]
fn amount_coercion_never_fails() {
    assert_eq!(coerce_amount_str("$1,234.56"), dec!(1234.56));
    assert_eq!(coerce_amount_str("1.234,56"), dec!(1234.56));
    assert_eq!(coerce_amount_str("MXN 500"), dec!(500));
    assert_eq!(coerce_amount_str("sin monto"), Decimal::ZERO);
    assert_eq!(coerce_amount_str(""), Decimal::ZERO);
}

#[test]
fn timestamp_coercion_accepts_common_shapes() {
    assert!(coerce_timestamp("2026-08-07T12:00:00Z").is_some());
    assert!(coerce_timestamp("2026-08-07T12:00:00-06:00").is_some());
    assert!(coerce_timestamp("2026-08-07 12:00").is_some());
    assert!(coerce_timestamp("2026-08-07").is_some());
    assert!(coerce_timestamp("07/08/2026").is_none());
}

#[test]
fn records_deserialize_from_loose_payloads() {
    let records = parse_records::<ProcessedPayment>(
        r#"[
            {"id": "p-1", "amount": "2,000.00", "status": "paid",
             "paidAt": "2026-08-01T09:00:00Z", "reference": "SPEI-778"},
            {"id": "p-2", "amount": null, "status": "PAID"}
        ]"#,
    )
    .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].amount(), dec!(2000));
    assert_eq!(records[1].amount(), Decimal::ZERO);
    assert_eq!(*records[1].status(), Status::Paid);
}

// ── Formatters ──────────────────────────────────────────────────────────────

#[test]
fn currency_formatting_is_locale_exact() {
    assert_eq!(format_currency(dec!(1234567.891), &ES_MX, "MXN"), "$1,234,567.89");
    assert_eq!(format_currency(dec!(1234567.891), &ES_ES, "EUR"), "1.234.567,89 €");
    assert_eq!(format_currency(dec!(99.9), &EN_US, "USD"), "US$99.90");
}

#[test]
fn non_numeric_amount_formats_as_zero() {
    // The coercion layer guarantees this: a garbage string becomes zero
    // before it ever reaches the formatter.
    let coerced = coerce_amount_str("no-es-numero");
    assert_eq!(format_currency(coerced, &ES_MX, "MXN"), "$0.00");
}

#[test]
fn long_dates_use_the_fixed_month_table() {
    assert_eq!(
        format_date_long(Some(ts("2026-12-25T18:45:00Z"))),
        "25 de diciembre de 2026, 6:45 PM"
    );
    assert_eq!(format_date_long(None), "—");
}

#[test]
fn title_case_overrides_reserved_acronyms() {
    assert_eq!(title_case("pago por spei"), "Pago Por SPEI");
    assert_eq!(title_case("número de Clabe"), "Número De CLABE");
}

// ── Range filter ────────────────────────────────────────────────────────────

#[test]
fn filter_is_a_subset_anchored_at_now() {
    let now = ts("2026-08-07T12:00:00Z");
    let records = vec![
        request(dec!(1), Status::Pending, Some(now - Duration::hours(2))),
        request(dec!(2), Status::Pending, Some(now - Duration::days(3))),
        request(dec!(3), Status::Pending, Some(now - Duration::days(40))),
    ];

    assert_eq!(filter_by_period(&records, Period::Day, now).len(), 1);
    assert_eq!(filter_by_period(&records, Period::Week, now).len(), 2);
    assert_eq!(filter_by_period(&records, Period::Month, now).len(), 2);
    assert_eq!(filter_by_period(&records, Period::Year, now).len(), 3);
    assert_eq!(filter_by_period(&records, Period::All, now).len(), 3);
}

#[test]
fn eight_day_old_record_straddles_week_and_month() {
    let now = ts("2026-08-07T12:00:00Z");
    let records = vec![request(
        dec!(100),
        Status::Paid,
        Some(now - Duration::days(8)),
    )];
    assert!(filter_by_period(&records, Period::Week, now).is_empty());
    assert_eq!(filter_by_period(&records, Period::Month, now).len(), 1);
}

#[test]
fn filter_preserves_input_order() {
    let now = ts("2026-08-07T12:00:00Z");
    let records: Vec<Record> = (0..10)
        .map(|i| {
            let mut r = request(
                Decimal::from(i),
                Status::Pending,
                Some(now - Duration::hours(i)),
            );
            if let Record::PaymentRequest(inner) = &mut r {
                inner.id = i.to_string();
            }
            r
        })
        .collect();
    let filtered = filter_by_period(&records, Period::Week, now);
    assert_eq!(filtered.len(), 10);
    let ids: Vec<_> = filtered.iter().map(|r| r.id().to_string()).collect();
    let expected: Vec<_> = (0..10).map(|i| i.to_string()).collect();
    assert_eq!(ids, expected);
}

// ── Aggregator ──────────────────────────────────────────────────────────────

#[test]
fn aggregate_matches_portal_scenario() {
    // Amounts [1000, 2000, <unparsable>, 500], statuses
    // [pending, paid, paid, rejected]. The unparsable amount coerces to 0.
    let records = vec![
        request(coerce_amount_str("1000"), Status::Pending, None),
        request(coerce_amount_str("2000"), Status::Paid, None),
        request(coerce_amount_str("-importe-ilegible-"), Status::Paid, None),
        request(coerce_amount_str("500"), Status::Rejected, None),
    ];
    let agg = aggregate(&records);

    let get = |key: &str| agg.groups.iter().find(|g| g.key == key).unwrap();
    assert_eq!((get("Pagado").count, get("Pagado").total), (2, dec!(2000)));
    assert_eq!((get("Pendiente").count, get("Pendiente").total), (1, dec!(1000)));
    assert_eq!((get("Rechazado").count, get("Rechazado").total), (1, dec!(500)));
    assert_eq!((agg.total.count, agg.total.total), (4, dec!(3500)));
}

#[test]
fn aggregate_invariants_hold() {
    let records = vec![
        request(dec!(10.55), Status::Pending, None),
        request(dec!(-3), Status::Approved, None),
        request(dec!(0), Status::Other("en revisión".into()), None),
    ];
    let agg = aggregate(&records);
    let count_sum: usize = agg.groups.iter().map(|g| g.count).sum();
    let total_sum: Decimal = agg.groups.iter().map(|g| g.total).sum();
    assert_eq!(count_sum, records.len());
    assert_eq!(total_sum, records.iter().map(|r| r.amount()).sum());
    assert_eq!(agg.total.count, count_sum);
    assert_eq!(agg.total.total, total_sum);
}

#[test]
fn empty_aggregate_is_a_zero_total() {
    let agg = aggregate(&[]);
    assert!(agg.groups.is_empty());
    assert_eq!((agg.total.count, agg.total.total), (0, Decimal::ZERO));
}

#[test]
fn status_casing_collapses_into_one_group() {
    let records = vec![
        request(dec!(1), Status::parse("PAID"), None),
        request(dec!(2), Status::parse("paid"), None),
        request(dec!(3), Status::parse("Paid"), None),
    ];
    let agg = aggregate(&records);
    assert_eq!(agg.groups.len(), 1);
    assert_eq!(agg.groups[0].key, "Pagado");
    assert_eq!(agg.groups[0].count, 3);
}
