//! Paginated document rendering.
//!
//! Pages are laid out top-down with explicit width budgets per column; the
//! detail table breaks across pages with its header repeated, and footers
//! (timestamp + `Página X de Y`) are drawn once pagination has finished and
//! the total page count is known.

mod chart;
mod font;
mod layout;
mod page;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::core::{
    Aggregate, AssetSource, CellValue, Column, ColumnKind, Record, ReportConfig, ReportError,
    format_date_long,
};

use chart::ChartArea;
use font::{Face, text_width};
use layout::{CELL_PADDING, ColumnBudget, column_budgets, truncate_to_width, wrap_to_width};
use page::{LogoImage, PageBuilder, jpeg_dimensions};

const MARGIN: f32 = 40.0;
/// Full branded band on the first page.
const BAND_HEIGHT: f32 = 72.0;
/// Slim brand strip on continuation pages.
const STRIP_HEIGHT: f32 = 10.0;
/// Vertical room reserved for the per-page footer.
const FOOTER_SPACE: f32 = 34.0;

const BODY_SIZE: f32 = 9.0;
const LINE_HEIGHT: f32 = 11.0;
const HEADER_ROW_HEIGHT: f32 = 18.0;

const WHITE: crate::core::Rgb = crate::core::Rgb(0xFF, 0xFF, 0xFF);
const INK: crate::core::Rgb = crate::core::Rgb(0x21, 0x21, 0x21);
const MUTED: crate::core::Rgb = crate::core::Rgb(0x66, 0x66, 0x66);
const GRID: crate::core::Rgb = crate::core::Rgb(0xC0, 0xC0, 0xC0);
const ZEBRA: crate::core::Rgb = crate::core::Rgb(0xF2, 0xF2, 0xF2);

/// Render the paginated report document and return its bytes.
///
/// A missing or unparsable logo degrades to a deterministic text brand
/// mark; an empty record collection short-circuits to a single "no data"
/// page. Neither case is an error.
#[allow(clippy::too_many_arguments)]
pub fn render_document(
    records: &[Record],
    aggregate: &Aggregate,
    columns: &[Column],
    title: &str,
    period_label: &str,
    config: &ReportConfig,
    assets: &dyn AssetSource,
    generated_at: DateTime<Utc>,
    with_chart: bool,
) -> Result<Vec<u8>, ReportError> {
    let (page_w, page_h) = config.paper.dimensions();
    let printable = page_w - 2.0 * MARGIN;

    let logo = resolve_logo(assets);
    let has_logo = logo.is_some();

    let mut pages: Vec<PageBuilder> = Vec::new();

    // First page with the full header band.
    let mut current = PageBuilder::new();
    draw_header_band(
        &mut current,
        title,
        period_label,
        config,
        has_logo,
        page_w,
        page_h,
    );
    let mut y = page_h - BAND_HEIGHT - 24.0;

    if records.is_empty() {
        current.text(
            MARGIN,
            page_h / 2.0,
            "Sin datos para el período seleccionado.",
            Face::Regular,
            12.0,
            MUTED,
        );
        pages.push(current);
        draw_footers(&mut pages, generated_at, page_w);
        return page::assemble(pages, (page_w, page_h), logo);
    }

    // Summary grid, identical in content to the spreadsheet summary.
    y = draw_summary(&mut current, aggregate, config, MARGIN, y);
    y -= 18.0;

    // Detail table with pagination.
    let budgets = column_budgets(columns, printable)?;
    let bottom_limit = MARGIN + FOOTER_SPACE;

    draw_table_header(&mut current, columns, &budgets, config, y);
    y -= HEADER_ROW_HEIGHT;

    for (index, record) in records.iter().enumerate() {
        let cells = layout_row(record, columns, &budgets);
        let lines = cells.iter().map(|c| c.lines.len()).max().unwrap_or(1);
        let row_height = lines as f32 * LINE_HEIGHT + 6.0;

        if y - row_height < bottom_limit {
            pages.push(current);
            current = PageBuilder::new();
            draw_brand_strip(&mut current, config, page_w, page_h);
            y = page_h - STRIP_HEIGHT - 24.0;
            draw_table_header(&mut current, columns, &budgets, config, y);
            y -= HEADER_ROW_HEIGHT;
        }

        draw_row(&mut current, &cells, columns, &budgets, config, y, row_height, index);
        y -= row_height;
    }
    pages.push(current);

    if with_chart {
        let mut chart_page = PageBuilder::new();
        draw_brand_strip(&mut chart_page, config, page_w, page_h);
        let area = ChartArea {
            x: MARGIN,
            y: MARGIN + FOOTER_SPACE + 40.0,
            width: printable,
            height: page_h - STRIP_HEIGHT - MARGIN - FOOTER_SPACE - 140.0,
        };
        chart::draw_chart_page(
            &mut chart_page,
            aggregate,
            "Distribución por categoría",
            config,
            area,
        );
        pages.push(chart_page);
    }

    debug!("document '{title}': {} pages, {} rows", pages.len(), records.len());

    draw_footers(&mut pages, generated_at, page_w);
    page::assemble(pages, (page_w, page_h), logo)
}

fn resolve_logo(assets: &dyn AssetSource) -> Option<LogoImage> {
    let bytes = assets.logo()?;
    match jpeg_dimensions(&bytes) {
        Some((width, height)) if width > 0 && height > 0 => Some(LogoImage {
            bytes,
            width,
            height,
        }),
        _ => {
            warn!("logo asset is not a readable JPEG, using text brand mark");
            None
        }
    }
}

/// Branded header band: logo (or deterministic text mark), title, period
/// label, organization, and the confidentiality notice.
fn draw_header_band(
    page: &mut PageBuilder,
    title: &str,
    period_label: &str,
    config: &ReportConfig,
    has_logo: bool,
    page_w: f32,
    page_h: f32,
) {
    let band_y = page_h - BAND_HEIGHT;
    page.fill_rect(0.0, band_y, page_w, BAND_HEIGHT, config.brand_color);

    let logo_side = 40.0;
    let logo_x = MARGIN;
    let logo_y = band_y + (BAND_HEIGHT - logo_side) / 2.0;
    if has_logo {
        page.logo(logo_x, logo_y, logo_side, logo_side);
    } else {
        // Text fallback: outlined box with the organization's initials.
        page.stroke_rect(logo_x, logo_y, logo_side, logo_side, WHITE, 1.2);
        let initials = brand_initials(&config.organization);
        let w = text_width(&initials, Face::Bold, 16.0);
        page.text(
            logo_x + (logo_side - w) / 2.0,
            logo_y + logo_side / 2.0 - 5.5,
            &initials,
            Face::Bold,
            16.0,
            WHITE,
        );
    }

    let text_x = logo_x + logo_side + 14.0;
    page.text(text_x, band_y + BAND_HEIGHT - 28.0, title, Face::Bold, 16.0, WHITE);
    page.text(
        text_x,
        band_y + BAND_HEIGHT - 44.0,
        &config.organization,
        Face::Regular,
        9.0,
        WHITE,
    );

    let period_w = text_width(period_label, Face::Bold, 10.0);
    page.text(
        page_w - MARGIN - period_w,
        band_y + BAND_HEIGHT - 28.0,
        period_label,
        Face::Bold,
        10.0,
        WHITE,
    );

    let notice = truncate_to_width(
        &config.confidentiality_notice,
        Face::Regular,
        7.5,
        page_w - text_x - MARGIN,
    );
    page.text(text_x, band_y + 8.0, &notice, Face::Regular, 7.5, WHITE);
}

fn draw_brand_strip(page: &mut PageBuilder, config: &ReportConfig, page_w: f32, page_h: f32) {
    page.fill_rect(0.0, page_h - STRIP_HEIGHT, page_w, STRIP_HEIGHT, config.brand_color);
}

/// First two characters of the first two words, uppercased.
fn brand_initials(organization: &str) -> String {
    let initials: String = organization
        .split_whitespace()
        .filter(|w| w.chars().next().is_some_and(char::is_alphabetic))
        .take(2)
        .filter_map(|w| w.chars().next())
        .collect();
    if initials.is_empty() {
        "··".to_string()
    } else {
        initials.to_uppercase()
    }
}

/// Bordered summary grid; returns the y coordinate below the grid.
fn draw_summary(
    page: &mut PageBuilder,
    aggregate: &Aggregate,
    config: &ReportConfig,
    x: f32,
    y_top: f32,
) -> f32 {
    const COL_WIDTHS: [f32; 3] = [180.0, 70.0, 120.0];
    const ROW_H: f32 = 16.0;
    let grid_w: f32 = COL_WIDTHS.iter().sum();

    page.text(x, y_top, "Resumen", Face::Bold, 11.0, config.brand_color);
    let mut y = y_top - 8.0;

    let headers = ["Categoría", "Registros", "Monto"];
    draw_summary_row(page, x, y, &COL_WIDTHS, ROW_H, &headers, Face::Bold);
    y -= ROW_H;

    for group in &aggregate.groups {
        let cells = [
            group.key.clone(),
            group.count.to_string(),
            config.money(group.total),
        ];
        let refs = [cells[0].as_str(), cells[1].as_str(), cells[2].as_str()];
        draw_summary_row(page, x, y, &COL_WIDTHS, ROW_H, &refs, Face::Regular);
        y -= ROW_H;
    }

    let total_cells = [
        aggregate.total.key.clone(),
        aggregate.total.count.to_string(),
        config.money(aggregate.total.total),
    ];
    let refs = [
        total_cells[0].as_str(),
        total_cells[1].as_str(),
        total_cells[2].as_str(),
    ];
    draw_summary_row(page, x, y, &COL_WIDTHS, ROW_H, &refs, Face::Bold);
    // Double rule under the total row.
    let rule_y = y - ROW_H;
    page.line(x, rule_y, x + grid_w, rule_y, INK, 0.9);
    page.line(x, rule_y - 1.6, x + grid_w, rule_y - 1.6, INK, 0.9);
    y -= ROW_H;

    y
}

fn draw_summary_row(
    page: &mut PageBuilder,
    x: f32,
    y_top: f32,
    widths: &[f32; 3],
    row_h: f32,
    cells: &[&str; 3],
    face: Face,
) {
    let mut cx = x;
    for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        page.stroke_rect(cx, y_top - row_h, *width, row_h, GRID, 0.5);
        let size = 9.0;
        let text = truncate_to_width(cell, face, size, width - 2.0 * CELL_PADDING);
        // Numeric columns right-aligned.
        let tx = if i == 0 {
            cx + CELL_PADDING
        } else {
            cx + width - CELL_PADDING - text_width(&text, face, size)
        };
        page.text(tx, y_top - row_h + 4.5, &text, face, size, INK);
        cx += width;
    }
}

/// A laid-out detail cell: wrapped display lines plus its source value.
struct LaidCell {
    lines: Vec<String>,
    value: CellValue,
}

fn layout_row(record: &Record, columns: &[Column], budgets: &[ColumnBudget]) -> Vec<LaidCell> {
    columns
        .iter()
        .zip(budgets.iter())
        .map(|(column, budget)| {
            let value = (column.get)(record);
            let inner = budget.inner_width();
            let lines = match (&value, column.kind) {
                (CellValue::Text(text), ColumnKind::Text) => {
                    wrap_to_width(text, Face::Regular, BODY_SIZE, inner, 2)
                }
                (value, _) => {
                    vec![truncate_to_width(
                        &value.to_display_string(),
                        Face::Regular,
                        BODY_SIZE,
                        inner,
                    )]
                }
            };
            LaidCell { lines, value }
        })
        .collect()
}

fn draw_table_header(
    page: &mut PageBuilder,
    columns: &[Column],
    budgets: &[ColumnBudget],
    config: &ReportConfig,
    y_top: f32,
) {
    let table_w = budgets.last().map(|b| b.x + b.width).unwrap_or(0.0);
    page.fill_rect(MARGIN, y_top - HEADER_ROW_HEIGHT, table_w, HEADER_ROW_HEIGHT, config.brand_color);
    for (column, budget) in columns.iter().zip(budgets.iter()) {
        let label = truncate_to_width(column.label, Face::Bold, BODY_SIZE, budget.inner_width());
        page.text(
            MARGIN + budget.x + CELL_PADDING,
            y_top - HEADER_ROW_HEIGHT + 5.5,
            &label,
            Face::Bold,
            BODY_SIZE,
            WHITE,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_row(
    page: &mut PageBuilder,
    cells: &[LaidCell],
    columns: &[Column],
    budgets: &[ColumnBudget],
    config: &ReportConfig,
    y_top: f32,
    row_height: f32,
    index: usize,
) {
    let table_w = budgets.last().map(|b| b.x + b.width).unwrap_or(0.0);
    if index % 2 == 1 {
        page.fill_rect(MARGIN, y_top - row_height, table_w, row_height, ZEBRA);
    }

    for ((column, budget), cell) in columns.iter().zip(budgets.iter()).zip(cells.iter()) {
        let cell_x = MARGIN + budget.x;
        match (&cell.value, column.kind) {
            (CellValue::Status(status), _) => {
                // Colored chip behind the status label.
                let chip_h = 11.0;
                let chip_y = y_top - (row_height + chip_h) / 2.0;
                page.fill_rect(
                    cell_x + 1.0,
                    chip_y,
                    budget.width - 2.0,
                    chip_h,
                    config.palette.color(status),
                );
                let label = truncate_to_width(
                    &status.label(),
                    Face::Regular,
                    BODY_SIZE - 1.0,
                    budget.inner_width(),
                );
                let lw = text_width(&label, Face::Regular, BODY_SIZE - 1.0);
                page.text(
                    cell_x + (budget.width - lw) / 2.0,
                    chip_y + 2.5,
                    &label,
                    Face::Regular,
                    BODY_SIZE - 1.0,
                    INK,
                );
            }
            (CellValue::Amount(amount), _) => {
                let text = config.money(*amount);
                let text = truncate_to_width(&text, Face::Regular, BODY_SIZE, budget.inner_width());
                let tw = text_width(&text, Face::Regular, BODY_SIZE);
                page.text(
                    cell_x + budget.width - CELL_PADDING - tw,
                    y_top - LINE_HEIGHT + 2.0,
                    &text,
                    Face::Regular,
                    BODY_SIZE,
                    INK,
                );
            }
            _ => {
                for (line_no, line) in cell.lines.iter().enumerate() {
                    page.text(
                        cell_x + CELL_PADDING,
                        y_top - (line_no as f32 + 1.0) * LINE_HEIGHT + 2.0,
                        line,
                        Face::Regular,
                        BODY_SIZE,
                        INK,
                    );
                }
            }
        }
    }

    // Hairline under the row.
    page.line(
        MARGIN,
        y_top - row_height,
        MARGIN + table_w,
        y_top - row_height,
        GRID,
        0.4,
    );
}

/// Draw the footer on every page once the total count is known.
fn draw_footers(pages: &mut [PageBuilder], generated_at: DateTime<Utc>, page_w: f32) {
    let total = pages.len();
    let stamp = format!("Generado: {}", format_date_long(Some(generated_at)));
    for (i, page) in pages.iter_mut().enumerate() {
        page.line(
            MARGIN,
            MARGIN + 14.0,
            page_w - MARGIN,
            MARGIN + 14.0,
            GRID,
            0.5,
        );
        page.text(MARGIN, MARGIN, &stamp, Face::Regular, 8.0, MUTED);
        let indicator = format!("Página {} de {}", i + 1, total);
        let w = text_width(&indicator, Face::Regular, 8.0);
        page.text(page_w - MARGIN - w, MARGIN, &indicator, Face::Regular, 8.0, MUTED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_from_organization_name() {
        assert_eq!(brand_initials("Portal de Pagos"), "PD");
        assert_eq!(brand_initials("Tesorería"), "T");
        assert_eq!(brand_initials("  "), "··");
    }
}
