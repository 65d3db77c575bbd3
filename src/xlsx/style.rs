//! Cell formats for the workbook renderer.
//!
//! All styling decisions live here so the sheet-building code reads as pure
//! structure. Formats are value objects; building one per role per render
//! call is cheap.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder};

use crate::core::{Locale, ReportConfig, Rgb, currency_symbol};

pub(crate) fn to_color(rgb: Rgb) -> Color {
    Color::RGB(rgb.to_u32())
}

/// Zebra fill for alternating detail rows.
const ZEBRA: Color = Color::RGB(0xF2F2F2);

/// Excel number-format string for the configured currency.
///
/// The cell keeps its numeric value; only the presentation carries the
/// symbol, so the column stays machine-readable.
pub(crate) fn currency_num_format(locale: &Locale, currency: &str) -> String {
    let symbol = currency_symbol(currency);
    if locale.symbol_prefix {
        format!("\"{symbol}\"#,##0.00")
    } else {
        format!("#,##0.00 \"{symbol}\"")
    }
}

/// Merged title band: brand fill, white bold, centered.
pub(crate) fn title(config: &ReportConfig) -> Format {
    Format::new()
        .set_bold()
        .set_font_size(14)
        .set_font_color(Color::White)
        .set_background_color(to_color(config.brand_color))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

/// Summary table header row.
pub(crate) fn summary_header() -> Format {
    Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_background_color(Color::RGB(0xE8EEF4))
}

/// Ordinary summary row cell.
pub(crate) fn summary_cell() -> Format {
    Format::new().set_border(FormatBorder::Thin)
}

/// Summary row monetary cell.
pub(crate) fn summary_amount(config: &ReportConfig) -> Format {
    summary_cell().set_num_format(currency_num_format(&config.locale, &config.currency))
}

/// The visually distinct grand-total row: bold with a double bottom border.
pub(crate) fn summary_total() -> Format {
    Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_border_bottom(FormatBorder::Double)
}

pub(crate) fn summary_total_amount(config: &ReportConfig) -> Format {
    summary_total().set_num_format(currency_num_format(&config.locale, &config.currency))
}

/// Detail header row: brand fill, white bold text.
pub(crate) fn detail_header(config: &ReportConfig) -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(to_color(config.brand_color))
        .set_align(FormatAlign::Center)
}

pub(crate) fn detail_text(zebra: bool) -> Format {
    let fmt = Format::new();
    if zebra {
        fmt.set_background_color(ZEBRA)
    } else {
        fmt
    }
}

pub(crate) fn detail_amount(config: &ReportConfig, zebra: bool) -> Format {
    detail_text(zebra).set_num_format(currency_num_format(&config.locale, &config.currency))
}

/// Status cell: conditional fill from the palette. Overrides the zebra
/// shading; unrecognized statuses already resolved to neutral upstream.
pub(crate) fn detail_status(fill: Rgb) -> Format {
    Format::new()
        .set_background_color(to_color(fill))
        .set_align(FormatAlign::Center)
}

/// Export-timestamp footer, right-aligned.
pub(crate) fn footer() -> Format {
    Format::new()
        .set_font_size(9)
        .set_font_color(Color::RGB(0x666666))
        .set_align(FormatAlign::Right)
}
