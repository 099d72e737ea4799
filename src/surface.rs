use std::path::Path;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

/// Drawing capability the layout engine renders against. Coordinates are in
/// millimetres with the origin at the top-left of the current page; `y`
/// grows downward. Font sizes are in points.
///
/// The layout never touches a file or a PDF library directly — a concrete
/// surface ([`crate::pdf::PdfSurface`]) owns that, and tests substitute a
/// recording mock.
pub trait RenderSurface {
    fn set_font(&mut self, style: FontStyle);

    fn set_font_size(&mut self, size: f32);

    /// Stroke a rectangle border. `y` is the top edge.
    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    /// Draw a single line of text. `y` is the baseline.
    fn draw_text(&mut self, text: &str, x: f32, y: f32);

    /// Word-wrap `text` to `max_width` using the current font and size.
    /// Explicit `\n` breaks are honored. Empty text yields no lines.
    fn measure_wrapped_lines(&self, text: &str, max_width: f32) -> Vec<String>;

    /// Start a new page; subsequent draws land on it.
    fn add_page(&mut self);

    /// Finalize and write the artifact.
    fn save(&mut self, path: &Path) -> Result<(), Error>;
}
