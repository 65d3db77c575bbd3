//! Trailing bar-chart page for categorical totals.

use rust_decimal::prelude::ToPrimitive;

use crate::core::{Aggregate, ReportConfig, Rgb};

use super::font::{Face, text_width};
use super::layout::truncate_to_width;
use super::page::PageBuilder;

const AXIS_COLOR: Rgb = Rgb(0x66, 0x66, 0x66);
const LABEL_COLOR: Rgb = Rgb(0x33, 0x33, 0x33);

/// Draw the categorical breakdown onto a fresh page: one bar per aggregate
/// group, scaled against the maximum group total, each labeled with its
/// category below and its formatted amount above.
///
/// Zero or negative maxima collapse every bar to the baseline — the page is
/// still drawn so the artifact structure stays predictable.
pub(crate) fn draw_chart_page(
    page: &mut PageBuilder,
    aggregate: &Aggregate,
    title: &str,
    config: &ReportConfig,
    area: ChartArea,
) {
    page.text(
        area.x,
        area.y + area.height + 16.0,
        title,
        Face::Bold,
        13.0,
        config.brand_color,
    );

    // Baseline.
    page.line(
        area.x,
        area.y,
        area.x + area.width,
        area.y,
        AXIS_COLOR,
        0.8,
    );

    if aggregate.groups.is_empty() {
        page.text(
            area.x + area.width / 2.0 - 30.0,
            area.y + area.height / 2.0,
            "Sin datos",
            Face::Regular,
            10.0,
            LABEL_COLOR,
        );
        return;
    }

    let max_total = aggregate
        .groups
        .iter()
        .map(|g| g.total.to_f64().unwrap_or(0.0))
        .fold(0.0_f64, f64::max);

    let n = aggregate.groups.len() as f32;
    let slot = area.width / n;
    let bar_width = (slot * 0.6).min(80.0);
    let label_size = 8.0;
    let value_size = 8.0;

    for (i, group) in aggregate.groups.iter().enumerate() {
        let total = group.total.to_f64().unwrap_or(0.0);
        let ratio = if max_total > 0.0 {
            (total / max_total).max(0.0) as f32
        } else {
            0.0
        };
        let bar_height = area.height * 0.9 * ratio;
        let slot_x = area.x + i as f32 * slot;
        let bar_x = slot_x + (slot - bar_width) / 2.0;

        page.fill_rect(bar_x, area.y, bar_width, bar_height, config.accent_color);

        // Amount on top of the bar, centered on the slot.
        let amount = config.money_compact(group.total);
        let aw = text_width(&amount, Face::Regular, value_size);
        page.text(
            slot_x + (slot - aw) / 2.0,
            area.y + bar_height + 4.0,
            &amount,
            Face::Regular,
            value_size,
            LABEL_COLOR,
        );

        // Category below the baseline.
        let label = truncate_to_width(&group.key, Face::Regular, label_size, slot - 4.0);
        let lw = text_width(&label, Face::Regular, label_size);
        page.text(
            slot_x + (slot - lw) / 2.0,
            area.y - 12.0,
            &label,
            Face::Regular,
            label_size,
            LABEL_COLOR,
        );
    }
}

/// Plot rectangle, in page coordinates (origin bottom-left).
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChartArea {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}
