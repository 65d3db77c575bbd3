//! Styled single-sheet workbook rendering.
//!
//! Sheet structure, top to bottom: merged title band, summary table with a
//! grand-total row, one blank gap row, the detail table (brand header,
//! alternating row shading, currency number formats, conditional status
//! fills), and a right-aligned export-timestamp footer.

mod style;

use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Workbook;

use crate::core::{
    Aggregate, CellValue, Column, ColumnKind, Record, ReportConfig, ReportError,
    format_date_long,
};

/// Worksheet names are capped at 31 chars and reject `[ ] : * ? / \`.
fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => ' ',
            other => other,
        })
        .collect();
    cleaned.chars().take(31).collect::<String>().trim().to_string()
}

/// Render the workbook and return its bytes.
///
/// The underlying numeric value is written for every monetary cell — the
/// currency appearance comes from a cell-level number format, so figures
/// stay machine-readable. Column widths are sized to the longest observed
/// value per column; ID columns use a fixed narrow width.
pub fn render_spreadsheet(
    records: &[Record],
    aggregate: &Aggregate,
    columns: &[Column],
    title: &str,
    config: &ReportConfig,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, ReportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let name = sheet_name(title);
    if !name.is_empty() {
        sheet
            .set_name(&name)
            .map_err(|e| ReportError::Xlsx(e.to_string()))?;
    }

    let last_col = (columns.len().max(3) - 1) as u16;
    let mut row: u32 = 0;

    // Title band across the full column span.
    sheet
        .set_row_height(row, 26)
        .map_err(|e| ReportError::Xlsx(e.to_string()))?;
    sheet
        .merge_range(row, 0, row, last_col, title, &style::title(config))
        .map_err(|e| ReportError::Xlsx(e.to_string()))?;
    row += 2;

    // Summary block.
    let header_fmt = style::summary_header();
    for (col, label) in ["Categoría", "Registros", "Monto"].iter().enumerate() {
        sheet
            .write_string_with_format(row, col as u16, *label, &header_fmt)
            .map_err(|e| ReportError::Xlsx(e.to_string()))?;
    }
    row += 1;

    let cell_fmt = style::summary_cell();
    let amount_fmt = style::summary_amount(config);
    for group in &aggregate.groups {
        sheet
            .write_string_with_format(row, 0, &group.key, &cell_fmt)
            .map_err(|e| ReportError::Xlsx(e.to_string()))?;
        sheet
            .write_number_with_format(row, 1, group.count as f64, &cell_fmt)
            .map_err(|e| ReportError::Xlsx(e.to_string()))?;
        sheet
            .write_number_with_format(row, 2, group.total.to_f64().unwrap_or(0.0), &amount_fmt)
            .map_err(|e| ReportError::Xlsx(e.to_string()))?;
        row += 1;
    }

    let total_fmt = style::summary_total();
    let total_amount_fmt = style::summary_total_amount(config);
    sheet
        .write_string_with_format(row, 0, &aggregate.total.key, &total_fmt)
        .map_err(|e| ReportError::Xlsx(e.to_string()))?;
    sheet
        .write_number_with_format(row, 1, aggregate.total.count as f64, &total_fmt)
        .map_err(|e| ReportError::Xlsx(e.to_string()))?;
    sheet
        .write_number_with_format(
            row,
            2,
            aggregate.total.total.to_f64().unwrap_or(0.0),
            &total_amount_fmt,
        )
        .map_err(|e| ReportError::Xlsx(e.to_string()))?;

    // Gap row between summary and detail.
    row += 2;

    // Detail header.
    let detail_header_fmt = style::detail_header(config);
    for (col, column) in columns.iter().enumerate() {
        sheet
            .write_string_with_format(row, col as u16, column.label, &detail_header_fmt)
            .map_err(|e| ReportError::Xlsx(e.to_string()))?;
    }
    row += 1;

    // Detail rows. Width bookkeeping starts from the header labels.
    let mut widths: Vec<usize> = columns.iter().map(|c| c.label.chars().count()).collect();
    for (index, record) in records.iter().enumerate() {
        let zebra = index % 2 == 1;
        for (col, column) in columns.iter().enumerate() {
            let value = (column.get)(record);
            let display = value.to_display_string();
            widths[col] = widths[col].max(display.chars().count());

            match value {
                CellValue::Amount(amount) => {
                    sheet
                        .write_number_with_format(
                            row,
                            col as u16,
                            amount.to_f64().unwrap_or(0.0),
                            &style::detail_amount(config, zebra),
                        )
                        .map_err(|e| ReportError::Xlsx(e.to_string()))?;
                }
                CellValue::Status(status) => {
                    let fill = config.palette.color(&status);
                    sheet
                        .write_string_with_format(
                            row,
                            col as u16,
                            status.label(),
                            &style::detail_status(fill),
                        )
                        .map_err(|e| ReportError::Xlsx(e.to_string()))?;
                }
                other => {
                    sheet
                        .write_string_with_format(
                            row,
                            col as u16,
                            other.to_display_string(),
                            &style::detail_text(zebra),
                        )
                        .map_err(|e| ReportError::Xlsx(e.to_string()))?;
                }
            }
        }
        row += 1;
    }

    // Column widths from the data actually present.
    for (col, column) in columns.iter().enumerate() {
        let width = match column.kind {
            ColumnKind::Id => 10.0,
            _ => (widths[col] as f64 * 1.1).clamp(10.0, 45.0),
        };
        sheet
            .set_column_width(col as u16, width)
            .map_err(|e| ReportError::Xlsx(e.to_string()))?;
    }

    // Footer: export timestamp, right-aligned across the table span.
    row += 1;
    sheet
        .merge_range(
            row,
            0,
            row,
            last_col,
            &format!("Generado: {}", format_date_long(Some(generated_at))),
            &style::footer(),
        )
        .map_err(|e| ReportError::Xlsx(e.to_string()))?;

    debug!(
        "workbook '{}': {} detail rows, {} summary groups",
        name,
        records.len(),
        aggregate.groups.len()
    );

    workbook
        .save_to_buffer()
        .map_err(|e| ReportError::Xlsx(e.to_string()))
}
