//! Notebook documents.
//!
//! A document is a TOML list of items, top to bottom. Each item is either a
//! block (`text` or `fragments`) or a labelled group:
//!
//! ```toml
//! [[items]]
//! group = "question"
//! number = 1
//! items = [{ text = "गति क्या है?" }]
//!
//! [[items]]
//! group = "solution"
//! items = [
//!     { text = "Speed is distance over time." },
//!     { fragments = ['\text{Speed}', "=", '\dfrac{d}{t}'], mode = "display_math" },
//! ]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::block::{Align, AlignRole, Wrapper};
use crate::classify::{ContentString, PresentationMode};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::labels::LabelKind;
use crate::layout::{LayoutNode, Notebook, answer_group, question_group};
use crate::measure::Measure;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKey {
    #[default]
    Content,
    Cue,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Item {
    pub text: Option<String>,
    pub fragments: Option<Vec<String>>,
    pub name: Option<String>,
    pub align: Option<Align>,
    pub role: Option<RoleKey>,
    /// `display_math`, `latex`, `markup`, `text` or `paragraph`; inferred when unset.
    pub mode: Option<String>,

    pub group: Option<LabelKind>,
    pub number: Option<u32>,
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Document {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Build top-level layout nodes; groups come back already arranged.
    pub fn nodes(
        &self,
        wrapper: &Wrapper,
        measure: &dyn Measure,
        spacing: f32,
    ) -> Result<Vec<LayoutNode>> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item_node(item, wrapper, measure, spacing, true).map_err(|reason| {
                    Error::InvalidItem { index, reason }
                })
            })
            .collect()
    }

    pub fn notebook(&self, config: &Config, measure: &dyn Measure) -> Result<Notebook> {
        let wrapper = config.wrapper()?;
        let nodes = self.nodes(&wrapper, measure, config.spacing)?;
        Ok(Notebook::with_options(
            nodes,
            config.frame,
            &config.arrange_options(),
        ))
    }
}

fn item_node(
    item: &Item,
    wrapper: &Wrapper,
    measure: &dyn Measure,
    spacing: f32,
    top_level: bool,
) -> std::result::Result<LayoutNode, String> {
    let content: Option<ContentString> = match (&item.text, &item.fragments) {
        (Some(_), Some(_)) => return Err("both `text` and `fragments` given".into()),
        (Some(t), None) => Some(t.as_str().into()),
        (None, Some(f)) if f.is_empty() => return Err("`fragments` is empty".into()),
        (None, Some(f)) => Some(f.clone().into()),
        (None, None) => None,
    };

    match (item.group, content) {
        (Some(_), Some(_)) => Err("a group cannot have `text` or `fragments`".into()),
        (None, None) => Err("expected `text`, `fragments` or `group`".into()),
        (Some(kind), None) => {
            if !top_level {
                return Err("groups cannot be nested".into());
            }
            group_node(item, kind, wrapper, measure, spacing)
        }
        (None, Some(content)) => {
            if !item.items.is_empty() || item.number.is_some() {
                return Err("`items` and `number` belong to groups".into());
            }
            block_node(item, content, wrapper, measure)
        }
    }
}

fn group_node(
    item: &Item,
    kind: LabelKind,
    wrapper: &Wrapper,
    measure: &dyn Measure,
    spacing: f32,
) -> std::result::Result<LayoutNode, String> {
    let children = item
        .items
        .iter()
        .enumerate()
        .map(|(i, child)| {
            item_node(child, wrapper, measure, spacing, false)
                .map_err(|reason| format!("group item #{i}: {reason}"))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    match kind {
        LabelKind::Question => Ok(question_group(
            wrapper,
            measure,
            item.number.unwrap_or(0),
            children,
            spacing,
        )),
        _ if item.number.is_some() => Err("only questions are numbered".into()),
        _ => Ok(answer_group(wrapper, measure, kind, children, spacing)),
    }
}

fn block_node(
    item: &Item,
    content: ContentString,
    wrapper: &Wrapper,
    measure: &dyn Measure,
) -> std::result::Result<LayoutNode, String> {
    let mode = match item.mode.as_deref() {
        None => None,
        Some(key) => Some(
            PresentationMode::from_key(key).ok_or_else(|| format!("unknown mode {key:?}"))?,
        ),
    };

    let mut block = wrapper.block_with_mode(content, mode);
    if let Some(name) = &item.name {
        block = block.with_name(name.clone());
    }
    if let Some(align) = item.align {
        block = block.with_align(align, wrapper.wrap_width);
    }
    if item.role == Some(RoleKey::Cue) {
        block = block.with_role(AlignRole::CueColumn);
    }

    Ok(LayoutNode::block(block, measure))
}
