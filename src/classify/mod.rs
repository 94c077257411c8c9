//! Content classification.
//!
//! Guesses how a display string should be typeset:
//! - script: Devanagari (any alphabetic char in U+0900..=U+097F) or Latin
//! - mode: display math, LaTeX (commands or paired `$`), markup, or plain
//!   (short single line vs. wrapped paragraph)
//!
//! The decision is an ordered rule table (`RULES`); the first rule whose
//! predicate fires picks the mode. Every rule is a plain function so it can be
//! tested on its own, and callers can skip inference entirely with
//! [`classify_with_override`].
//!
//! Classification never fails: anything unmatched is `PlainShort`.

pub mod markup;
pub mod math;

use std::fmt;

use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

/// Devanagari Unicode block.
pub const DEVANAGARI: std::ops::RangeInclusive<char> = '\u{0900}'..='\u{097F}';

/// Raw display content: a single string or ordered fragments of one expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentString {
    Single(String),
    Fragments(Vec<String>),
}

impl ContentString {
    /// Text used for detection; fragments are joined with a single space.
    pub fn joined(&self) -> String {
        match self {
            ContentString::Single(s) => s.clone(),
            ContentString::Fragments(parts) => parts.join(" "),
        }
    }

    /// The fragments as given (a single string is one fragment).
    pub fn fragments(&self) -> Vec<&str> {
        match self {
            ContentString::Single(s) => vec![s.as_str()],
            ContentString::Fragments(parts) => parts.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for ContentString {
    fn from(s: &str) -> Self {
        ContentString::Single(s.to_string())
    }
}

impl From<String> for ContentString {
    fn from(s: String) -> Self {
        ContentString::Single(s)
    }
}

impl From<Vec<String>> for ContentString {
    fn from(parts: Vec<String>) -> Self {
        ContentString::Fragments(parts)
    }
}

impl<const N: usize> From<[&str; N]> for ContentString {
    fn from(parts: [&str; N]) -> Self {
        ContentString::Fragments(parts.iter().map(|s| s.to_string()).collect())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    Devanagari,
    Latin,
}

impl Script {
    pub const ALL: [Script; 2] = [Script::Devanagari, Script::Latin];

    pub fn detect(text: &str) -> Self {
        if text
            .chars()
            .any(|c| c.is_alphabetic() && DEVANAGARI.contains(&c))
        {
            Script::Devanagari
        } else {
            Script::Latin
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Script::Devanagari => "devanagari",
            Script::Latin => "latin",
        }
    }
}

/// How a block is presented.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    /// `$$ ... $$`, typeset in math mode on its own.
    LatexDisplayMath,
    /// LaTeX text mode, possibly with inline `$ ... $`.
    LatexInlineOrBlock,
    /// HTML-like tagged text.
    Markup,
    /// A single line of plain text.
    PlainShort,
    /// Plain text longer than the display width, wrapped into a paragraph.
    PlainWrapped,
}

impl PresentationMode {
    pub const ALL: [PresentationMode; 5] = [
        PresentationMode::LatexDisplayMath,
        PresentationMode::LatexInlineOrBlock,
        PresentationMode::Markup,
        PresentationMode::PlainShort,
        PresentationMode::PlainWrapped,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PresentationMode::LatexDisplayMath => "display_math",
            PresentationMode::LatexInlineOrBlock => "latex",
            PresentationMode::Markup => "markup",
            PresentationMode::PlainShort => "text",
            PresentationMode::PlainWrapped => "paragraph",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }

    pub fn is_latex(self) -> bool {
        matches!(
            self,
            PresentationMode::LatexDisplayMath | PresentationMode::LatexInlineOrBlock
        )
    }

    pub fn is_plain(self) -> bool {
        matches!(
            self,
            PresentationMode::PlainShort | PresentationMode::PlainWrapped
        )
    }
}

impl fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Classification {
    pub mode: PresentationMode,
    pub script: Script,
    /// The whole text is one `$ ... $` pair.
    pub inline_math: bool,
}

impl Classification {
    /// Display math, or text that is entirely one inline formula.
    pub fn is_math(&self) -> bool {
        self.mode == PresentationMode::LatexDisplayMath
            || (self.mode == PresentationMode::LatexInlineOrBlock && self.inline_math)
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            mode: PresentationMode::PlainShort,
            script: Script::Latin,
            inline_math: false,
        }
    }
}

/// One entry of the ordered decision table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rule {
    DisplayMath,
    LatexOrBalancedMath,
    Markup,
    Plain,
}

/// Rules in precedence order.
pub const RULES: [Rule; 4] = [
    Rule::DisplayMath,
    Rule::LatexOrBalancedMath,
    Rule::Markup,
    Rule::Plain,
];

impl Rule {
    /// Does this rule fire for `text`?
    pub fn matches(self, text: &str) -> bool {
        match self {
            Rule::DisplayMath => math::is_display_math(text),
            Rule::LatexOrBalancedMath => {
                math::has_latex_command(text) || math::has_balanced_dollars(text)
            }
            Rule::Markup => markup::is_markup(text),
            Rule::Plain => true,
        }
    }

    fn mode(self, text: &str, display_width: usize) -> PresentationMode {
        match self {
            Rule::DisplayMath => PresentationMode::LatexDisplayMath,
            Rule::LatexOrBalancedMath => PresentationMode::LatexInlineOrBlock,
            Rule::Markup => PresentationMode::Markup,
            Rule::Plain => {
                if text.graphemes(true).count() > display_width {
                    PresentationMode::PlainWrapped
                } else {
                    PresentationMode::PlainShort
                }
            }
        }
    }
}

/// Classify `content` using the rule table.
pub fn classify(content: &ContentString, display_width: usize) -> Classification {
    let text = content.joined();
    let script = Script::detect(&text);

    let rule = RULES
        .into_iter()
        .find(|r| r.matches(&text))
        .unwrap_or(Rule::Plain);
    let mode = rule.mode(&text, display_width);

    log::debug!("classify: {rule:?} -> {mode} ({script}) for {text:?}");

    Classification {
        mode,
        script,
        inline_math: mode == PresentationMode::LatexInlineOrBlock && math::is_inline_math(&text),
    }
}

/// Classify with an optional caller-chosen mode; the script is still detected.
pub fn classify_with_override(
    content: &ContentString,
    display_width: usize,
    mode: Option<PresentationMode>,
) -> Classification {
    let Some(mode) = mode else {
        return classify(content, display_width);
    };

    let text = content.joined();
    Classification {
        mode,
        script: Script::detect(&text),
        inline_math: mode == PresentationMode::LatexInlineOrBlock && math::is_inline_math(&text),
    }
}

/// The content handed to the block constructor.
///
/// Non-plain modes keep the original fragment boundaries (multi-part LaTeX is
/// colored/animated per fragment); plain modes get the joined string.
pub fn content_for_mode(content: ContentString, mode: PresentationMode) -> ContentString {
    match content {
        ContentString::Fragments(parts) if mode.is_plain() => {
            ContentString::Single(parts.join(" "))
        }
        other => other,
    }
}
