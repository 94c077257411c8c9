//! TOML configuration.
//!
//! Every field is optional; a missing file section keeps the built-in value.
//!
//! ```toml
//! lang = "hi"
//! display_width = 40
//! spacing = 0.3
//! template_font = "Lohit Devanagari"
//!
//! [frame]
//! width = 14.222
//! height = 8.0
//!
//! [styles."devanagari.text"]
//! font = "Hind"
//! font_size = 18
//!
//! [label]
//! color = "#FFFF00"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::block::Wrapper;
use crate::error::{Error, Result};
use crate::font::default_fallbacks;
use crate::labels::Lang;
use crate::layout::{ArrangeOptions, DEFAULT_SPACING, Frame};
use crate::style::{BlockStyle, StyleOverride, StyleTable};

pub const DEFAULT_TEMPLATE_FONT: &str = "Noto Sans";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub lang: Lang,
    /// Plain text longer than this (graphemes) becomes a paragraph.
    pub display_width: usize,
    /// Paragraph line width in columns.
    pub wrap_width: usize,
    pub spacing: f32,
    pub frame: Frame,
    /// Main font of the Devanagari TeX template.
    pub template_font: String,
    pub font_fallbacks: Vec<String>,
    /// Keyed `"<script>.<mode>"`; `*` matches every script or mode.
    pub styles: BTreeMap<String, StyleOverride>,
    pub label: StyleOverride,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lang: Lang::default(),
            display_width: 50,
            wrap_width: 50,
            spacing: DEFAULT_SPACING,
            frame: Frame::default(),
            template_font: DEFAULT_TEMPLATE_FONT.to_string(),
            font_fallbacks: default_fallbacks(),
            styles: BTreeMap::new(),
            label: StyleOverride::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        // Reject unknown style keys up front.
        config.style_table()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("config: loaded {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Default table with the configured overrides applied, in key order.
    pub fn style_table(&self) -> Result<StyleTable> {
        let mut table = StyleTable::default();
        for (key, o) in &self.styles {
            table.apply_override(key, o)?;
        }
        Ok(table)
    }

    pub fn wrapper(&self) -> Result<Wrapper> {
        let mut label_style = BlockStyle::label();
        label_style.apply(&self.label);

        Ok(Wrapper {
            styles: self.style_table()?,
            label_style,
            display_width: self.display_width,
            wrap_width: self.wrap_width,
            lang: self.lang,
        })
    }

    pub fn arrange_options(&self) -> ArrangeOptions {
        ArrangeOptions {
            spacing: self.spacing,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{PresentationMode, Script};
    use crate::layout::Edge;
    use crate::scene::Rgba;
    use crate::style::Weight;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn overrides_reach_the_wrapper() {
        let config = Config::from_toml_str(
            r##"
            lang = "hi"
            display_width = 30

            [styles."devanagari.text"]
            font = "Hind"
            font_size = 18.0

            [styles."*.markup"]
            color = "red"

            [label]
            color = "#FFFF00"
            weight = "normal"
            "##,
        )
        .unwrap();

        let w = config.wrapper().unwrap();
        assert_eq!(w.lang, Lang::Hi);
        assert_eq!(w.display_width, 30);

        let s = w.styles.get(Script::Devanagari, PresentationMode::PlainShort);
        assert_eq!(s.font, "Hind");
        assert_eq!(s.font_size, 18.0);
        // Untouched neighbours keep their defaults.
        let s = w.styles.get(Script::Devanagari, PresentationMode::PlainWrapped);
        assert_eq!(s.font_size, 16.0);

        for script in Script::ALL {
            assert_eq!(w.styles.get(script, PresentationMode::Markup).color, Rgba::RED);
        }

        assert_eq!(w.label_style.color, Rgba::rgb(1.0, 1.0, 0.0));
        assert_eq!(w.label_style.weight, Weight::Normal);
        assert_eq!(w.label_style.font_size, 25.0);
    }

    #[test]
    fn spacing_reaches_arrange_options() {
        let opts = Config::from_toml_str("spacing = 0.5\n")
            .unwrap()
            .arrange_options();
        assert_eq!(opts.spacing, 0.5);
        assert_eq!(opts.aligned_edge, Some(Edge::Left));
        assert!(opts.center);
    }

    #[test]
    fn frame_fields_default_individually() {
        let config = Config::from_toml_str("[frame]\nheight = 9.0\n").unwrap();
        assert_eq!(config.frame.height, 9.0);
        assert_eq!(config.frame.width, Frame::default().width);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            Config::from_toml_str("[styles.\"klingon.text\"]\nfont = \"x\"\n"),
            Err(Error::InvalidStyleKey(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[label]\ncolor = \"mauve\"\n"),
            Err(Error::Toml(_))
        ));
        assert!(matches!(
            Config::from_toml_str("colour = \"red\"\n"),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
