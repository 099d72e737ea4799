//! Text metrics for the base-14 Helvetica family.
//!
//! Result sheets only ever use Helvetica and Helvetica-Bold with WinAnsi
//! encoding, so no font files are read or embedded; approximate width tables
//! drive both line wrapping and the PDF text operators.

use crate::surface::FontStyle;

pub(crate) struct FontMetrics {
    widths_1000: [f32; 224],
}

impl FontMetrics {
    /// Width of a single character in 1000-units per em.
    fn char_width_1000(&self, ch: char) -> f32 {
        let byte = char_to_winansi(ch);
        if byte >= 32 {
            self.widths_1000[(byte - 32) as usize]
        } else {
            0.0
        }
    }

    pub(crate) fn word_width(&self, word: &str, font_size: f32) -> f32 {
        word.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    pub(crate) fn space_width(&self, font_size: f32) -> f32 {
        self.char_width_1000(' ') * font_size / 1000.0
    }
}

/// Map a Unicode char to its WinAnsi (Windows-1252) byte, or b'?' when it has
/// no slot. ASCII passes through; the Latin-1 range and the few typographic
/// marks that show up in names are kept.
pub(crate) fn char_to_winansi(c: char) -> u8 {
    let cp = c as u32;
    match cp {
        0x20..=0x7E => cp as u8,
        0xA0..=0xFF => cp as u8,
        0x2013 => 0x96, // en dash
        0x2014 => 0x97, // em dash
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        _ => b'?',
    }
}

/// Encode a string as WinAnsi bytes for a PDF `Str`.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars().map(char_to_winansi).collect()
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi bytes 32..=255.
fn helvetica_widths() -> [f32; 224] {
    std::array::from_fn(|i| {
        let b = (i + 32) as u8;
        match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 833.0,                          // M (wide)
            65..=90 => 667.0,                     // uppercase A-Z (average)
            91..=96 => 333.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
            109 | 119 => 833.0,                   // m w (wide)
            97..=122 => 556.0,                    // lowercase a-z (average)
            _ => 556.0,
        }
    })
}

/// Helvetica-Bold runs a touch wider than the regular cut.
fn helvetica_bold_widths() -> [f32; 224] {
    std::array::from_fn(|i| {
        let b = (i + 32) as u8;
        match b {
            32 => 278.0,
            33..=47 => 333.0,
            48..=57 => 556.0,
            58..=64 => 333.0,
            73 | 74 => 278.0,
            77 => 889.0,
            65..=90 => 722.0,
            91..=96 => 333.0,
            102 | 105 | 106 | 108 | 116 => 333.0,
            109 | 119 => 889.0,
            97..=122 => 611.0,
            _ => 611.0,
        }
    })
}

pub(crate) fn metrics_for(style: FontStyle) -> FontMetrics {
    FontMetrics {
        widths_1000: match style {
            FontStyle::Regular => helvetica_widths(),
            FontStyle::Bold => helvetica_bold_widths(),
        },
    }
}

/// Greedy word wrap. Explicit `\n` always breaks; within a segment, words
/// accumulate while they fit and a word too wide for an empty line is placed
/// alone rather than split mid-word. `max_width` is in the same unit the
/// metrics yield for `font_size`.
pub(crate) fn wrap_text(
    text: &str,
    metrics: &FontMetrics,
    font_size: f32,
    max_width: f32,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let space_w = metrics.space_width(font_size);

    // Blank segments only materialize between non-empty ones; leading and
    // trailing newlines must not inflate the line count (and with it the row
    // height).
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
        let mut current_w: f32 = 0.0;
        for word in segment.split_whitespace() {
            let ww = metrics.word_width(word, font_size);
            if current.is_empty() {
                current.push_str(word);
                current_w = ww;
                continue;
            }
            if current_w + space_w + ww > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_w = ww;
            } else {
                current.push(' ');
                current.push_str(word);
                current_w += space_w + ww;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}
