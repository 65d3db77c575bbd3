//! Per-group count/sum summaries consumed by every renderer.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::types::Record;

/// One summary row: a classification key with its count and summed amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateGroup {
    pub key: String,
    pub count: usize,
    pub total: Decimal,
}

/// Grouped counts and totals plus the materialized grand-total row.
///
/// Invariants: `sum(groups.count) == total.count` and
/// `sum(groups.total) == total.total`, which in turn equal the record count
/// and coerced amount sum of the input collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    /// Groups sorted by key so every artifact lists them in the same order.
    pub groups: Vec<AggregateGroup>,
    /// Grand total across all groups; key is always `"Total"`.
    pub total: AggregateGroup,
}

impl Aggregate {
    pub fn is_empty(&self) -> bool {
        self.total.count == 0
    }
}

/// Group records by capitalized status label.
pub fn aggregate(records: &[Record]) -> Aggregate {
    aggregate_by(records, |r| r.status().label())
}

/// Group records by an arbitrary classifier (department summaries use
/// `|r| r.department().to_string()`).
///
/// Empty input produces no groups and a zero/zero total row. Summation uses
/// the coerced decimal amount, never a display string.
pub fn aggregate_by<F>(records: &[Record], classify: F) -> Aggregate
where
    F: Fn(&Record) -> String,
{
    let mut buckets: BTreeMap<String, (usize, Decimal)> = BTreeMap::new();
    for record in records {
        let entry = buckets.entry(classify(record)).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += record.amount();
    }

    let mut total_count = 0usize;
    let mut total_sum = Decimal::ZERO;
    let groups = buckets
        .into_iter()
        .map(|(key, (count, total))| {
            total_count += count;
            total_sum += total;
            AggregateGroup { key, count, total }
        })
        .collect();

    Aggregate {
        groups,
        total: AggregateGroup {
            key: "Total".to_string(),
            count: total_count,
            total: total_sum,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PaymentRequest, Status};
    use rust_decimal_macros::dec;

    fn record(amount: Decimal, status: Status) -> Record {
        Record::PaymentRequest(PaymentRequest {
            id: "1".into(),
            folio: String::new(),
            amount,
            status,
            created_at: None,
            department: String::new(),
            concept: String::new(),
            beneficiary: String::new(),
            bank_account: String::new(),
        })
    }

    #[test]
    fn groups_by_status_with_grand_total() {
        // Scenario from the portal: one amount arrived unparsable and was
        // coerced to zero upstream, but the record still counts.
        let records = vec![
            record(dec!(1000), Status::Pending),
            record(dec!(2000), Status::Paid),
            record(dec!(0), Status::Paid),
            record(dec!(500), Status::Rejected),
        ];
        let agg = aggregate(&records);

        let paid = agg.groups.iter().find(|g| g.key == "Pagado").unwrap();
        assert_eq!(paid.count, 2);
        assert_eq!(paid.total, dec!(2000));

        let pending = agg.groups.iter().find(|g| g.key == "Pendiente").unwrap();
        assert_eq!((pending.count, pending.total), (1, dec!(1000)));

        let rejected = agg.groups.iter().find(|g| g.key == "Rechazado").unwrap();
        assert_eq!((rejected.count, rejected.total), (1, dec!(500)));

        assert_eq!(agg.total.count, 4);
        assert_eq!(agg.total.total, dec!(3500));
    }

    #[test]
    fn empty_input_yields_zero_total() {
        let agg = aggregate(&[]);
        assert!(agg.groups.is_empty());
        assert_eq!(agg.total.count, 0);
        assert_eq!(agg.total.total, Decimal::ZERO);
        assert!(agg.is_empty());
    }

    #[test]
    fn group_order_is_deterministic() {
        let records = vec![
            record(dec!(1), Status::Rejected),
            record(dec!(1), Status::Approved),
            record(dec!(1), Status::Pending),
        ];
        let keys: Vec<_> = aggregate(&records).groups.into_iter().map(|g| g.key).collect();
        assert_eq!(keys, vec!["Aprobado", "Pendiente", "Rechazado"]);
    }

    #[test]
    fn custom_classifier_groups_by_department() {
        let mut a = record(dec!(10), Status::Paid);
        if let Record::PaymentRequest(inner) = &mut a {
            inner.department = "Compras".into();
        }
        let mut b = record(dec!(20), Status::Pending);
        if let Record::PaymentRequest(inner) = &mut b {
            inner.department = "Compras".into();
        }
        let agg = aggregate_by(&[a, b], |r| r.department().to_string());
        assert_eq!(agg.groups.len(), 1);
        assert_eq!(agg.groups[0].key, "Compras");
        assert_eq!(agg.groups[0].total, dec!(30));
    }
}
