//! Symbolic time windows anchored at the invocation instant.

use chrono::{DateTime, Duration, Months, Utc};

use super::types::Record;

/// A symbolic reporting window, always resolved against "now" — never
/// against any record's own timestamp.
///
/// `Day` means a rolling 24 hours, consistent with the rolling definitions
/// of `Week` and `Year`. `Month` and `Year` subtract calendar units, so a
/// month window taken on March 31 starts on the clamped February 28/29.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
    /// No lower bound.
    All,
}

impl Period {
    /// Parse a selector key as the host UI sends it. Case-insensitive;
    /// accepts both the English keys and the Spanish aliases in use.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "day" | "dia" | "día" | "24h" => Some(Self::Day),
            "week" | "semana" => Some(Self::Week),
            "month" | "mes" => Some(Self::Month),
            "year" | "año" | "anio" | "ano" => Some(Self::Year),
            "total" | "all" | "todo" | "historico" | "histórico" => Some(Self::All),
            _ => None,
        }
    }

    /// ASCII key used in filenames.
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Day => "dia",
            Self::Week => "semana",
            Self::Month => "mes",
            Self::Year => "anio",
            Self::All => "total",
        }
    }

    /// Human label used in report headers.
    pub fn label_es(&self) -> &'static str {
        match self {
            Self::Day => "Último día",
            Self::Week => "Última semana",
            Self::Month => "Último mes",
            Self::Year => "Último año",
            Self::All => "Histórico completo",
        }
    }

    /// Lower bound of the window ending at `now`. `None` for [`Period::All`].
    pub fn since(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Day => Some(now - Duration::days(1)),
            Self::Week => Some(now - Duration::days(7)),
            // Calendar arithmetic; checked_sub only fails outside the
            // representable range, in which case the window is unbounded.
            Self::Month => now.checked_sub_months(Months::new(1)),
            Self::Year => now.checked_sub_months(Months::new(12)),
            Self::All => None,
        }
    }
}

/// Keep the records whose timestamp falls in `[since, now]`-ish — the upper
/// bound is not enforced, since "now" is by definition the latest instant.
///
/// Pure: the input is never reordered, records are cloned into the result.
/// Records with an unparsable timestamp are excluded from every bounded
/// period and included in [`Period::All`].
pub fn filter_by_period(records: &[Record], period: Period, now: DateTime<Utc>) -> Vec<Record> {
    match period.since(now) {
        None => records.to_vec(),
        Some(since) => records
            .iter()
            .filter(|r| r.timestamp().is_some_and(|ts| ts >= since))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PaymentRequest, Status};
    use rust_decimal_macros::dec;

    fn record_at(ts: Option<DateTime<Utc>>) -> Record {
        Record::PaymentRequest(PaymentRequest {
            id: "1".into(),
            folio: "SP-1".into(),
            amount: dec!(100),
            status: Status::Pending,
            created_at: ts,
            department: String::new(),
            concept: String::new(),
            beneficiary: String::new(),
            bank_account: String::new(),
        })
    }

    fn ts(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn from_key_accepts_aliases() {
        assert_eq!(Period::from_key("week"), Some(Period::Week));
        assert_eq!(Period::from_key("SEMANA"), Some(Period::Week));
        assert_eq!(Period::from_key("total"), Some(Period::All));
        assert_eq!(Period::from_key("mes"), Some(Period::Month));
        assert_eq!(Period::from_key("quincena"), None);
    }

    #[test]
    fn eight_days_ago_excluded_from_week_included_in_month() {
        let now = ts("2026-08-07T12:00:00Z");
        let eight_days_ago = record_at(Some(now - Duration::days(8)));
        let records = vec![eight_days_ago];

        assert!(filter_by_period(&records, Period::Week, now).is_empty());
        assert_eq!(filter_by_period(&records, Period::Month, now).len(), 1);
    }

    #[test]
    fn month_uses_calendar_arithmetic() {
        // 31 days before March 31 would be Feb 28 minus a bit under a
        // fixed-30-day rule; calendar subtraction clamps to Feb 28.
        let now = ts("2026-03-31T00:00:00Z");
        assert_eq!(Period::Month.since(now), Some(ts("2026-02-28T00:00:00Z")));
    }

    #[test]
    fn boundary_is_inclusive() {
        let now = ts("2026-08-07T12:00:00Z");
        let exactly_seven = record_at(Some(now - Duration::days(7)));
        let records = vec![exactly_seven];
        assert_eq!(filter_by_period(&records, Period::Week, now).len(), 1);
    }

    #[test]
    fn unparsable_timestamp_excluded_from_bounded_periods() {
        let now = ts("2026-08-07T12:00:00Z");
        let records = vec![record_at(None)];
        assert!(filter_by_period(&records, Period::Day, now).is_empty());
        assert_eq!(filter_by_period(&records, Period::All, now).len(), 1);
    }

    #[test]
    fn all_returns_everything_unfiltered() {
        let now = ts("2026-08-07T12:00:00Z");
        let records = vec![
            record_at(Some(ts("1999-01-01T00:00:00Z"))),
            record_at(None),
            record_at(Some(now)),
        ];
        assert_eq!(filter_by_period(&records, Period::All, now).len(), 3);
    }
}
