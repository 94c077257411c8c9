//! Advance-width measurement from installed fonts.
//!
//! Widths are the sum of `hmtx` advances per char (no shaping, so Devanagari
//! conjuncts come out slightly wide). Chars missing from the face, and blocks
//! whose font cannot be loaded at all, fall back to `EstimatedMetrics`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use crate::block::ContentBlock;
use crate::font::{FontError, LoadedFace, SystemFonts, resolve_font};
use crate::measure::{EstimatedMetrics, Measure, em, visible_lines};

/// Vertical metrics in font units.
#[derive(Debug, Copy, Clone)]
pub struct FontVMetrics {
    pub units_per_em: f32,
    pub ascender: f32,
    pub descender: f32,
    pub line_gap: f32,
}

impl FontVMetrics {
    fn line_height_em(&self) -> f32 {
        (self.ascender - self.descender + self.line_gap) / self.units_per_em
    }
}

pub struct FontMetrics {
    fonts: SystemFonts,
    fallbacks: Vec<String>,
    estimate: EstimatedMetrics,
    faces: RefCell<HashMap<(String, u16), Option<Arc<LoadedFace>>>>,
}

impl FontMetrics {
    pub fn new(fonts: SystemFonts, fallbacks: Vec<String>) -> Self {
        Self {
            fonts,
            fallbacks,
            estimate: EstimatedMetrics::default(),
            faces: RefCell::new(HashMap::new()),
        }
    }

    pub fn fonts(&self) -> &SystemFonts {
        &self.fonts
    }

    fn face(&self, family: &str, weight: u16) -> Option<Arc<LoadedFace>> {
        let key = (family.to_string(), weight);
        if let Some(cached) = self.faces.borrow().get(&key) {
            return cached.clone();
        }

        let resolved = resolve_font(family, &self.fallbacks, &self.fonts);
        let loaded = match self.fonts.load_face(&resolved.family, weight) {
            Ok(face) => Some(Arc::new(face)),
            Err(e) => {
                log::debug!("metrics: {e}; estimating {family:?}");
                None
            }
        };

        self.faces.borrow_mut().insert(key, loaded.clone());
        loaded
    }

    /// `[width, height]` of `lines` in `face`, scene units.
    fn measure_with_face(
        &self,
        face: &LoadedFace,
        lines: &[String],
        font_size: f32,
    ) -> Result<[f32; 2], FontError> {
        let parsed =
            ttf_parser::Face::parse(&face.bytes, face.index).map_err(|_| FontError::ParseFailed)?;

        let upm = parsed.units_per_em() as f32;
        let v = FontVMetrics {
            units_per_em: upm,
            ascender: parsed
                .typographic_ascender()
                .unwrap_or_else(|| parsed.ascender()) as f32,
            descender: parsed
                .typographic_descender()
                .unwrap_or_else(|| parsed.descender()) as f32,
            line_gap: parsed
                .typographic_line_gap()
                .unwrap_or_else(|| parsed.line_gap()) as f32,
        };

        let scale = em(font_size) / upm;
        let fallback_advance = self.estimate.advance_em * upm;

        let width = lines
            .iter()
            .map(|line| {
                line.trim_end()
                    .chars()
                    .map(|ch| {
                        parsed
                            .glyph_index(ch)
                            .and_then(|gid| parsed.glyph_hor_advance(gid))
                            .map(f32::from)
                            .unwrap_or(fallback_advance)
                    })
                    .sum::<f32>()
                    * scale
            })
            .fold(0.0f32, f32::max);

        let height = lines.len() as f32 * v.line_height_em() * em(font_size);
        Ok([width, height])
    }
}

impl Measure for FontMetrics {
    fn measure(&self, block: &ContentBlock) -> [f32; 2] {
        let Some(face) = self.face(&block.style.font, block.style.weight.value()) else {
            return self.estimate.measure(block);
        };

        let lines = visible_lines(block);
        match self.measure_with_face(&face, &lines, block.style.font_size) {
            Ok(size) => size,
            Err(e) => {
                log::debug!("metrics: {e}; estimating {:?}", block.name);
                self.estimate.measure(block)
            }
        }
    }
}
