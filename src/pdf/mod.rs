//! `pdf-writer`-backed implementation of [`RenderSurface`].
//!
//! The surface records content operators per page in millimetre, top-left
//! coordinates and converts to PDF points (bottom-left origin) at the
//! operator boundary. Fonts are the base-14 Helvetica pair with WinAnsi
//! encoding — nothing is embedded, so the output stays small and
//! deterministic.

use std::path::Path;

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::error::Error;
use crate::fonts::{self, FontMetrics, to_winansi_bytes};
use crate::model::PageConfig;
use crate::surface::{FontStyle, RenderSurface};

const MM_TO_PT: f32 = 72.0 / 25.4;
const BORDER_WIDTH_PT: f32 = 0.5;

const REGULAR_RES: &[u8] = b"F0";
const BOLD_RES: &[u8] = b"F1";

pub struct PdfSurface {
    page_width: f32,
    page_height: f32,
    finished: Vec<Content>,
    current: Content,
    font: FontStyle,
    font_size: f32,
    regular: FontMetrics,
    bold: FontMetrics,
}

impl PdfSurface {
    pub fn new(page: &PageConfig) -> Self {
        PdfSurface {
            page_width: page.width,
            page_height: page.height,
            finished: Vec::new(),
            current: Content::new(),
            font: FontStyle::Regular,
            font_size: 10.0,
            regular: fonts::metrics_for(FontStyle::Regular),
            bold: fonts::metrics_for(FontStyle::Bold),
        }
    }

    pub fn page_count(&self) -> usize {
        self.finished.len() + 1
    }

    fn metrics(&self) -> &FontMetrics {
        match self.font {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
        }
    }

    fn font_resource(&self) -> &'static [u8] {
        match self.font {
            FontStyle::Regular => REGULAR_RES,
            FontStyle::Bold => BOLD_RES,
        }
    }

    /// PDF y for a top-origin millimetre coordinate.
    fn flip_y(&self, y_mm: f32) -> f32 {
        (self.page_height - y_mm) * MM_TO_PT
    }

    /// Assemble the document and return its bytes. The surface is spent
    /// afterwards (pages reset to a single empty one).
    pub fn finish(&mut self) -> Vec<u8> {
        let mut pages = std::mem::take(&mut self.finished);
        pages.push(std::mem::replace(&mut self.current, Content::new()));
        let n = pages.len();

        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let regular_id = alloc();
        let bold_id = alloc();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

        pdf.type1_font(regular_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        for (i, content) in pages.into_iter().enumerate() {
            pdf.stream(content_ids[i], &content.finish());
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        let media = Rect::new(
            0.0,
            0.0,
            self.page_width * MM_TO_PT,
            self.page_height * MM_TO_PT,
        );
        for i in 0..n {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(media).parent(pages_id).contents(content_ids[i]);
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(Name(REGULAR_RES), regular_id);
            fonts.pair(Name(BOLD_RES), bold_id);
        }

        let bytes = pdf.finish();
        log::debug!("assembled pdf: {} pages, {} bytes", n, bytes.len());
        bytes
    }
}

impl RenderSurface for PdfSurface {
    fn set_font(&mut self, style: FontStyle) {
        self.font = style;
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.current.set_line_width(BORDER_WIDTH_PT);
        self.current.rect(
            x * MM_TO_PT,
            self.flip_y(y + h),
            w * MM_TO_PT,
            h * MM_TO_PT,
        );
        self.current.stroke();
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        if text.is_empty() {
            return;
        }
        let bytes = to_winansi_bytes(text);
        self.current.begin_text();
        self.current
            .set_font(Name(self.font_resource()), self.font_size);
        self.current.next_line(x * MM_TO_PT, self.flip_y(y));
        self.current.show(Str(&bytes));
        self.current.end_text();
    }

    fn measure_wrapped_lines(&self, text: &str, max_width: f32) -> Vec<String> {
        fonts::wrap_text(text, self.metrics(), self.font_size, max_width * MM_TO_PT)
    }

    fn add_page(&mut self) {
        self.finished
            .push(std::mem::replace(&mut self.current, Content::new()));
    }

    fn save(&mut self, path: &Path) -> Result<(), Error> {
        let bytes = self.finish();
        std::fs::write(path, &bytes).map_err(Error::Io)?;
        log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}
