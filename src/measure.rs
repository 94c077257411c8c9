//! Block measurement.
//!
//! The arranger only needs a width and height per block. Real glyph extents
//! come from the renderer; here we either estimate from grapheme counts or sum
//! font advances (see `font::metrics`).

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::block::ContentBlock;
use crate::classify::{PresentationMode, math};

/// Scene units per point of font size (a 72pt em is one unit).
pub const UNITS_PER_FONT_SIZE: f32 = 1.0 / 72.0;

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*>").expect("static regex is valid"));

pub trait Measure {
    /// `[width, height]` in scene units.
    fn measure(&self, block: &ContentBlock) -> [f32; 2];
}

/// Em size in scene units.
#[inline]
pub fn em(font_size: f32) -> f32 {
    font_size * UNITS_PER_FONT_SIZE
}

/// What actually gets drawn, line by line: TeX commands and markup tags removed.
pub fn visible_lines(block: &ContentBlock) -> Vec<String> {
    let lines: Vec<String> = match block.mode() {
        PresentationMode::LatexDisplayMath | PresentationMode::LatexInlineOrBlock => {
            vec![math::visible_text(&block.tex_fragments().join(" "))]
        }
        PresentationMode::Markup => block
            .lines
            .iter()
            .map(|l| MARKUP_TAG.replace_all(l, "").into_owned())
            .collect(),
        PresentationMode::PlainShort | PresentationMode::PlainWrapped => block.lines.clone(),
    };

    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

/// Grapheme-count estimate; needs no fonts.
#[derive(Debug, Copy, Clone)]
pub struct EstimatedMetrics {
    /// Advance per grapheme, in ems.
    pub advance_em: f32,
    /// Line height, in ems.
    pub line_height_em: f32,
}

impl Default for EstimatedMetrics {
    fn default() -> Self {
        Self {
            advance_em: 0.55,
            line_height_em: 1.2,
        }
    }
}

impl EstimatedMetrics {
    pub fn line_width(&self, line: &str, font_size: f32) -> f32 {
        line.graphemes(true).count() as f32 * self.advance_em * em(font_size)
    }
}

impl Measure for EstimatedMetrics {
    fn measure(&self, block: &ContentBlock) -> [f32; 2] {
        let size = block.style.font_size;
        let lines = visible_lines(block);
        let width = lines
            .iter()
            .map(|l| self.line_width(l.trim_end(), size))
            .fold(0.0f32, f32::max);
        let height = lines.len() as f32 * self.line_height_em * em(size);
        [width, height]
    }
}
