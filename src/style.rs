//! Default styling per (script, presentation mode).
//!
//! One `BlockStyle` record per combination, selected by lookup; there is no
//! per-block computation beyond applying config overrides.

use serde::Deserialize;

use crate::Error;
use crate::classify::{PresentationMode, Script};
use crate::scene::Rgba;
use crate::template::TemplateKind;

/// Generic family resolved by the font module.
pub const DEFAULT_FONT: &str = "sans-serif";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weight {
    #[default]
    Normal,
    Bold,
}

impl Weight {
    /// CSS-ish numeric weight.
    pub fn value(self) -> u16 {
        match self {
            Weight::Normal => 400,
            Weight::Bold => 700,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStyle {
    pub font: String,
    pub font_size: f32,
    pub color: Rgba,
    pub weight: Weight,
    /// Set for LaTeX modes.
    pub template: Option<TemplateKind>,
}

impl BlockStyle {
    fn text(font_size: f32) -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
            font_size,
            color: Rgba::WHITE,
            weight: Weight::Normal,
            template: None,
        }
    }

    fn latex(font_size: f32, template: TemplateKind) -> Self {
        Self {
            template: Some(template),
            ..Self::text(font_size)
        }
    }

    /// Question/Answer/Solution labels.
    pub fn label() -> Self {
        Self {
            font_size: 25.0,
            color: Rgba::GREEN_E,
            weight: Weight::Bold,
            ..Self::text(25.0)
        }
    }

    pub fn apply(&mut self, o: &StyleOverride) {
        if let Some(font) = &o.font {
            self.font = font.clone();
        }
        if let Some(size) = o.font_size {
            self.font_size = size;
        }
        if let Some(color) = o.color {
            self.color = color;
        }
        if let Some(weight) = o.weight {
            self.weight = weight;
        }
    }
}

/// Partial style from config; unset fields keep the default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleOverride {
    pub font: Option<String>,
    pub font_size: Option<f32>,
    pub color: Option<Rgba>,
    pub weight: Option<Weight>,
}

/// 5 modes x 2 scripts.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    entries: [[BlockStyle; 5]; 2],
}

fn script_index(script: Script) -> usize {
    match script {
        Script::Devanagari => 0,
        Script::Latin => 1,
    }
}

fn mode_index(mode: PresentationMode) -> usize {
    match mode {
        PresentationMode::LatexDisplayMath => 0,
        PresentationMode::LatexInlineOrBlock => 1,
        PresentationMode::Markup => 2,
        PresentationMode::PlainShort => 3,
        PresentationMode::PlainWrapped => 4,
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        let deva = TemplateKind::Devanagari;
        let latin = TemplateKind::Latin;
        Self {
            entries: [
                [
                    BlockStyle::latex(20.0, deva),
                    BlockStyle::latex(20.0, deva),
                    BlockStyle::text(15.0),
                    BlockStyle::text(16.0),
                    BlockStyle::text(16.0),
                ],
                [
                    BlockStyle::latex(20.0, latin),
                    BlockStyle::latex(20.0, latin),
                    BlockStyle::text(20.0),
                    BlockStyle::text(20.0),
                    BlockStyle::text(20.0),
                ],
            ],
        }
    }
}

impl StyleTable {
    pub fn get(&self, script: Script, mode: PresentationMode) -> &BlockStyle {
        &self.entries[script_index(script)][mode_index(mode)]
    }

    pub fn get_mut(&mut self, script: Script, mode: PresentationMode) -> &mut BlockStyle {
        &mut self.entries[script_index(script)][mode_index(mode)]
    }

    /// Apply an override addressed as `"<script>.<mode>"`, e.g. `"devanagari.text"`.
    ///
    /// `"*.<mode>"` and `"<script>.*"` address several entries at once.
    pub fn apply_override(&mut self, key: &str, o: &StyleOverride) -> Result<(), Error> {
        let invalid = || Error::InvalidStyleKey(key.to_string());
        let (script_key, mode_key) = key.split_once('.').ok_or_else(invalid)?;

        let scripts: Vec<Script> = match script_key {
            "*" => Script::ALL.to_vec(),
            k => vec![
                Script::ALL
                    .into_iter()
                    .find(|s| s.key() == k)
                    .ok_or_else(invalid)?,
            ],
        };
        let modes: Vec<PresentationMode> = match mode_key {
            "*" => PresentationMode::ALL.to_vec(),
            k => vec![PresentationMode::from_key(k).ok_or_else(invalid)?],
        };

        for &script in &scripts {
            for &mode in &modes {
                self.get_mut(script, mode).apply(o);
            }
        }
        Ok(())
    }
}
