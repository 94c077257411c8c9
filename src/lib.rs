//! `deva_notebook` library crate root.
//!
//! Lays out mixed Devanagari/English notebook content for programmatic
//! educational videos. Text goes through a fixed pipeline:
//! - `classify`: pick a presentation mode and script
//! - `block`: wrap into a styled `ContentBlock`
//! - `measure`: size the block (estimate or system fonts)
//! - `layout`: arrange blocks into a notebook page
//! - `scene`: export positioned blocks as a scene graph for the host renderer
//!
//! Rendering, TeX compilation and animation stay with the host. The binary
//! target is a thin CLI over the entrypoints below.

pub mod block;
pub mod classify;
pub mod config;
pub mod document;
pub mod error;
pub mod font;
pub mod labels;
pub mod layout;
pub mod measure;
pub mod scene;
pub mod shapes;
pub mod style;
pub mod template;

pub use error::{Error, Result};

use std::path::Path;

use block::ContentBlock;
use config::Config;
use document::Document;
use font::{FontResolution, SystemFonts, resolve_font};
use layout::Notebook;
use measure::Measure;

/// Classify and wrap one piece of content with the configured styles.
pub fn wrap_content(
    content: impl Into<classify::ContentString>,
    config: &Config,
) -> Result<ContentBlock> {
    Ok(config.wrapper()?.block(content))
}

/// Load a notebook document and lay it out.
pub fn layout_file(
    path: impl AsRef<Path>,
    config: &Config,
    measure: &dyn Measure,
) -> Result<Notebook> {
    Document::load(path)?.notebook(config, measure)
}

/// Resolve `name` against the installed fonts and the configured fallbacks.
pub fn resolve_system_font(name: &str, config: &Config, fonts: &SystemFonts) -> FontResolution {
    resolve_font(name, &config.font_fallbacks, fonts)
}
