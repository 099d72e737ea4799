use std::path::{Path, PathBuf};

use marksheet_pdf::{Error, FontStyle, RenderSurface};

/// Every call the layout makes, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    SetFont(FontStyle),
    SetFontSize(f32),
    Rect { x: f32, y: f32, w: f32, h: f32 },
    Text { text: String, x: f32, y: f32 },
    AddPage,
    Save(PathBuf),
}

/// Recording surface with deterministic fixed-width metrics: every character
/// is `char_width` mm wide, so wrapped line counts are exact in tests.
pub struct MockSurface {
    pub ops: Vec<Op>,
    pub char_width: f32,
}

impl MockSurface {
    pub fn new() -> Self {
        MockSurface {
            ops: Vec::new(),
            char_width: 2.0,
        }
    }

    pub fn page_breaks(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::AddPage).count()
    }

    pub fn rects(&self) -> Vec<(f32, f32, f32, f32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Rect { x, y, w, h } => Some((*x, *y, *w, *h)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for MockSurface {
    fn set_font(&mut self, style: FontStyle) {
        self.ops.push(Op::SetFont(style));
    }

    fn set_font_size(&mut self, size: f32) {
        self.ops.push(Op::SetFontSize(size));
    }

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(Op::Rect { x, y, w, h });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        self.ops.push(Op::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn measure_wrapped_lines(&self, text: &str, max_width: f32) -> Vec<String> {
        let per_line = ((max_width / self.char_width).floor() as usize).max(1);
        let mut lines = Vec::new();
        // Blank lines only between non-empty segments, as the real surface does.
        let mut pending_blanks = 0usize;
        for segment in text.split('\n') {
            if segment.split_whitespace().next().is_none() {
                pending_blanks += 1;
                continue;
            }
            if !lines.is_empty() {
                lines.extend(std::iter::repeat_n(String::new(), pending_blanks));
            }
            pending_blanks = 0;
            let mut current = String::new();
            for word in segment.split_whitespace() {
                if current.is_empty() {
                    current.push_str(word);
                } else if current.len() + 1 + word.len() > per_line {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(word);
                } else {
                    current.push(' ');
                    current.push_str(word);
                }
            }
            if !current.is_empty() {
                lines.push(current);
            }
        }
        lines
    }

    fn add_page(&mut self) {
        self.ops.push(Op::AddPage);
    }

    fn save(&mut self, path: &Path) -> Result<(), Error> {
        self.ops.push(Op::Save(path.to_path_buf()));
        Ok(())
    }
}
