//! Width budgeting, truncation, and wrapping for the paginated table.

use crate::core::{Column, ReportError};

use super::font::{Face, text_width};

/// Fraction of the printable width the table may actually claim. Keeping
/// the sum strictly below the printable width guarantees no column is ever
/// clipped by the page edge.
const TABLE_WIDTH_RATIO: f32 = 0.98;

/// Inner padding on each side of a cell, in points.
pub(crate) const CELL_PADDING: f32 = 4.0;

/// Resolved horizontal extent of one table column.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnBudget {
    /// Left edge relative to the table origin.
    pub x: f32,
    pub width: f32,
}

impl ColumnBudget {
    /// Width available for glyphs after padding.
    pub fn inner_width(&self) -> f32 {
        self.width - 2.0 * CELL_PADDING
    }
}

/// Distribute the printable width across columns proportionally to their
/// weights. The budgets sum to strictly less than `printable_width`.
pub(crate) fn column_budgets(
    columns: &[Column],
    printable_width: f32,
) -> Result<Vec<ColumnBudget>, ReportError> {
    if columns.is_empty() {
        return Err(ReportError::Layout("no columns to lay out".into()));
    }
    let total_weight: f32 = columns.iter().map(|c| c.weight.max(0.1)).sum();
    let usable = printable_width * TABLE_WIDTH_RATIO;

    let mut budgets = Vec::with_capacity(columns.len());
    let mut x = 0.0;
    for column in columns {
        let width = usable * column.weight.max(0.1) / total_weight;
        if width <= 2.0 * CELL_PADDING {
            return Err(ReportError::Layout(format!(
                "column {:?} has no room at {} columns on this paper",
                column.key,
                columns.len()
            )));
        }
        budgets.push(ColumnBudget { x, width });
        x += width;
    }
    Ok(budgets)
}

/// Shorten `text` with a trailing ellipsis so it fits `max_width` points.
pub(crate) fn truncate_to_width(text: &str, face: Face, size: f32, max_width: f32) -> String {
    if text_width(text, face, size) <= max_width {
        return text.to_string();
    }
    let ellipsis = "…";
    let ellipsis_width = text_width(ellipsis, face, size);
    let mut out = String::new();
    let mut used = 0.0;
    for ch in text.chars() {
        let w = text_width(&ch.to_string(), face, size);
        if used + w + ellipsis_width > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(ellipsis);
    out
}

/// Greedy word wrap into at most `max_lines` lines; the last line is
/// truncated with an ellipsis if the text still overflows.
pub(crate) fn wrap_to_width(
    text: &str,
    face: Face,
    size: f32,
    max_width: f32,
    max_lines: usize,
) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut overflowed = false;
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, face, size) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(current);
            current = word.to_string();
            if lines.len() == max_lines {
                overflowed = true;
                break;
            }
        }
    }
    if !overflowed && !current.is_empty() {
        lines.push(current);
    }

    // Signal dropped content, and re-truncate in case a single long word
    // overflowed its line.
    if let Some(last) = lines.last_mut() {
        if overflowed && !last.ends_with('…') {
            last.push('…');
        }
        if text_width(last, face, size) > max_width {
            *last = truncate_to_width(last, face, size, max_width);
        }
    }
    if lines.is_empty() {
        lines.push(truncate_to_width(text, face, size, max_width));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::payment_request_columns;

    #[test]
    fn budgets_sum_below_printable_width() {
        let columns = payment_request_columns();
        let budgets = column_budgets(&columns, 540.0).unwrap();
        let total: f32 = budgets.iter().map(|b| b.width).sum();
        assert!(total < 540.0);
        assert_eq!(budgets.len(), columns.len());
        // Contiguous: each column starts where the previous one ended.
        for pair in budgets.windows(2) {
            assert!((pair[0].x + pair[0].width - pair[1].x).abs() < 0.01);
        }
    }

    #[test]
    fn empty_columns_is_a_layout_error() {
        assert!(column_budgets(&[], 540.0).is_err());
    }

    #[test]
    fn truncation_appends_ellipsis_only_when_needed() {
        assert_eq!(
            truncate_to_width("corto", Face::Regular, 9.0, 200.0),
            "corto"
        );
        let long = "Pago de servicios profesionales del tercer trimestre";
        let cut = truncate_to_width(long, Face::Regular, 9.0, 80.0);
        assert!(cut.ends_with('…'));
        assert!(text_width(&cut, Face::Regular, 9.0) <= 80.0);
    }

    #[test]
    fn wrapping_respects_line_cap() {
        let text = "uno dos tres cuatro cinco seis siete ocho nueve diez";
        let lines = wrap_to_width(text, Face::Regular, 9.0, 60.0, 3);
        assert!(lines.len() <= 3);
        for line in &lines {
            assert!(text_width(line, Face::Regular, 9.0) <= 60.0 + 0.01);
        }
    }

    #[test]
    fn single_overlong_word_is_truncated() {
        let lines = wrap_to_width(
            "Supercalifragilisticoespialidoso",
            Face::Regular,
            9.0,
            50.0,
            2,
        );
        assert!(lines[0].ends_with('…'));
    }
}
