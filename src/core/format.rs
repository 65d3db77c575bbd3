//! Display formatting for money, dates, and labels.
//!
//! Locale data is a small fixed table — no platform locale database is
//! consulted, so two machines always render the same bytes for the same
//! input. All functions accept degenerate input and return a placeholder
//! instead of failing.

use chrono::{DateTime, Datelike, Timelike, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Number-shaping rules for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// BCP 47 tag, informational.
    pub tag: &'static str,
    /// Thousands separator.
    pub grouping: char,
    /// Decimal separator.
    pub decimal: char,
    /// Symbol goes before the number.
    pub symbol_prefix: bool,
}

/// Mexican Spanish — `$1,234.56`. Default for every report.
pub const ES_MX: Locale = Locale {
    tag: "es-MX",
    grouping: ',',
    decimal: '.',
    symbol_prefix: true,
};

/// Peninsular Spanish — `1.234,56 €`.
pub const ES_ES: Locale = Locale {
    tag: "es-ES",
    grouping: '.',
    decimal: ',',
    symbol_prefix: false,
};

/// US English — `$1,234.56`.
pub const EN_US: Locale = Locale {
    tag: "en-US",
    grouping: ',',
    decimal: '.',
    symbol_prefix: true,
};

/// Display symbol for an ISO 4217 code. Unknown codes render as the code
/// itself followed by a space, which stays unambiguous in mixed exports.
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "MXN" => "$",
        "USD" => "US$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        _ => code,
    }
}

/// Format a monetary amount with grouping, two decimals, and the currency
/// symbol placed per locale.
pub fn format_currency(amount: Decimal, locale: &Locale, currency: &str) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let plain = format!("{abs:.2}");
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let grouped = group_digits(int_part, locale.grouping);

    let symbol = currency_symbol(currency);
    let body = format!("{grouped}{}{frac_part}", locale.decimal);
    let signed = if negative {
        format!("-{body}")
    } else {
        body
    };
    if locale.symbol_prefix {
        format!("{symbol}{signed}")
    } else {
        format!("{signed} {symbol}")
    }
}

/// Compact currency for dense tabular contexts: `$1.2M`, `$45.0k`.
///
/// One decimal at every scale keeps the displayed magnitude ordering
/// monotonic with the underlying value.
pub fn format_currency_compact(amount: Decimal, locale: &Locale, currency: &str) -> String {
    let value = amount.to_f64().unwrap_or(0.0);
    let abs = value.abs();
    let symbol = currency_symbol(currency);
    let sign = if value < 0.0 { "-" } else { "" };

    let body = if abs >= 1_000_000.0 {
        format!("{:.1}M", abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", abs / 1_000.0)
    } else {
        format!("{abs:.2}")
    };
    let body = if locale.decimal != '.' {
        body.replace('.', &locale.decimal.to_string())
    } else {
        body
    };

    if locale.symbol_prefix {
        format!("{symbol}{sign}{body}")
    } else {
        format!("{sign}{body} {symbol}")
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(*b as char);
    }
    out
}

/// Fixed Spanish month names; index 0 = enero.
const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Long-form Spanish date-time: `"7 de agosto de 2026, 3:05 PM"`.
///
/// 12-hour clock with zero-padded minutes. `None` renders as a dash.
pub fn format_date_long(timestamp: Option<DateTime<Utc>>) -> String {
    let Some(ts) = timestamp else {
        return "—".to_string();
    };
    let month = MONTHS_ES[ts.month0() as usize];
    let (is_pm, hour12) = ts.hour12();
    let meridiem = if is_pm { "PM" } else { "AM" };
    format!(
        "{} de {} de {}, {}:{:02} {}",
        ts.day(),
        month,
        ts.year(),
        hour12,
        ts.minute(),
        meridiem
    )
}

/// Short numeric date-time for table cells: `"07/08/2026 15:04"`.
pub fn format_date_short(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(ts) => ts.format("%d/%m/%Y %H:%M").to_string(),
        None => "—".to_string(),
    }
}

/// Machine-sortable stamp for filenames: `"20260807_1504"`.
pub fn format_timestamp_filename(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y%m%d_%H%M").to_string()
}

/// Domain terms that must keep a fixed casing no matter how they arrive.
/// Keys are lowercase and accent-folded.
const RESERVED_TERMS: &[(&str, &str)] = &[
    ("clabe", "CLABE"),
    ("id", "ID"),
    ("iva", "IVA"),
    ("rfc", "RFC"),
    ("spei", "SPEI"),
];

/// Capitalize the first letter of each whitespace-separated token.
///
/// Reserved domain acronyms override the generic rule regardless of the
/// input's casing or accents.
pub fn title_case(label: &str) -> String {
    label
        .split_whitespace()
        .map(|token| {
            let folded = fold_accents(&token.to_lowercase());
            if let Some((_, reserved)) = RESERVED_TERMS.iter().find(|(k, _)| *k == folded) {
                (*reserved).to_string()
            } else {
                capitalize(token)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}

fn fold_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}
