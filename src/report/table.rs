//! Fixed/dynamic column layout with word-wrapped cells and pagination.
//!
//! Everything here draws through the [`RenderSurface`] capability and works
//! in millimetres with a top-left origin; the cursor moves down the page.

use crate::model::{PageConfig, TableStyle};
use crate::surface::{FontStyle, RenderSurface};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColumnWidth {
    Fixed(f32),
    /// Receives an even share of the width left after fixed columns.
    Dynamic,
}

#[derive(Clone, Debug)]
pub struct ColumnSpec {
    pub title: String,
    pub width: ColumnWidth,
}

impl ColumnSpec {
    pub fn fixed(title: &str, width: f32) -> Self {
        ColumnSpec {
            title: title.to_string(),
            width: ColumnWidth::Fixed(width),
        }
    }

    pub fn dynamic(title: &str) -> Self {
        ColumnSpec {
            title: title.to_string(),
            width: ColumnWidth::Dynamic,
        }
    }
}

/// Resolve per-column widths: fixed columns keep their configured width, the
/// remainder of `usable_width` is split evenly across dynamic columns.
///
/// Invariant: a header set with zero dynamic columns must not divide by zero
/// — the dynamic share is simply never computed. A remainder below zero
/// clamps the share to 0.
pub fn resolve_column_widths(columns: &[ColumnSpec], usable_width: f32) -> Vec<f32> {
    let fixed_sum: f32 = columns
        .iter()
        .filter_map(|c| match c.width {
            ColumnWidth::Fixed(w) => Some(w),
            ColumnWidth::Dynamic => None,
        })
        .sum();
    let dynamic_count = columns
        .iter()
        .filter(|c| c.width == ColumnWidth::Dynamic)
        .count();

    let share = if dynamic_count == 0 {
        0.0
    } else {
        ((usable_width - fixed_sum) / dynamic_count as f32).max(0.0)
    };

    columns
        .iter()
        .map(|c| match c.width {
            ColumnWidth::Fixed(w) => w,
            ColumnWidth::Dynamic => share,
        })
        .collect()
}

pub struct TableLayout<'a> {
    page: &'a PageConfig,
    style: &'a TableStyle,
    columns: &'a [ColumnSpec],
    widths: Vec<f32>,
}

impl<'a> TableLayout<'a> {
    pub fn new(page: &'a PageConfig, style: &'a TableStyle, columns: &'a [ColumnSpec]) -> Self {
        let widths = resolve_column_widths(columns, page.usable_width());
        TableLayout {
            page,
            style,
            columns,
            widths,
        }
    }

    pub fn widths(&self) -> &[f32] {
        &self.widths
    }

    /// Baseline for wrapped line `index` inside a row starting at `row_top`.
    fn line_baseline(&self, row_top: f32, index: usize) -> f32 {
        row_top + self.style.line_height * (index as f32 + 0.8)
    }

    fn draw_header<S: RenderSurface>(&self, surface: &mut S, top: f32) -> f32 {
        let st = self.style;
        surface.set_font(FontStyle::Bold);
        surface.set_font_size(st.header_font_size);

        let mut x = self.page.margin_left;
        for (col, &w) in self.columns.iter().zip(&self.widths) {
            surface.draw_rect(x, top, w, st.header_height);
            surface.draw_text(
                &col.title,
                x + st.cell_padding,
                top + st.header_height * 0.7,
            );
            x += w;
        }

        surface.set_font(FontStyle::Regular);
        surface.set_font_size(st.font_size);
        top + st.header_height
    }

    /// Draw the header and all `rows`, breaking pages as needed. Each cell is
    /// wrapped independently to its column; the row is as tall as its longest
    /// cell (at least one line). Returns the cursor just below the last row.
    pub fn draw<S: RenderSurface>(&self, surface: &mut S, rows: &[Vec<String>], start_y: f32) -> f32 {
        let st = self.style;
        surface.set_font_size(st.font_size);
        let mut cursor = self.draw_header(surface, start_y);

        for (ri, row) in rows.iter().enumerate() {
            let wrapped: Vec<Vec<String>> = self
                .widths
                .iter()
                .enumerate()
                .map(|(ci, &w)| {
                    let text = row.get(ci).map(String::as_str).unwrap_or("");
                    surface.measure_wrapped_lines(text, (w - 2.0 * st.cell_padding).max(0.0))
                })
                .collect();
            let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
            let row_h = line_count as f32 * st.line_height;

            if cursor + row_h > self.page.printable_bottom() {
                log::debug!(
                    "row {}: height {:.1} overflows at cursor {:.1}, breaking page",
                    ri,
                    row_h,
                    cursor
                );
                surface.add_page();
                cursor = self.draw_header(surface, self.page.margin_top);
            }

            let mut x = self.page.margin_left;
            for (lines, &w) in wrapped.iter().zip(&self.widths) {
                surface.draw_rect(x, cursor, w, row_h);
                for (li, line) in lines.iter().enumerate() {
                    surface.draw_text(line, x + st.cell_padding, self.line_baseline(cursor, li));
                }
                x += w;
            }
            cursor += row_h;
        }

        cursor
    }
}
