//! Content blocks: classified text with its styling and layout hints.
//!
//! A block is what the layout arranger positions and what the host renderer
//! eventually draws. It keeps the caller's original text untouched; wrapped
//! paragraph lines and stripped math delimiters are derived views.

use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::classify::{
    self, Classification, ContentString, PresentationMode, Script, math,
};
use crate::labels::{self, LabelKind, Lang};
use crate::style::{BlockStyle, StyleTable};
use crate::template::TexTemplate;

/// Horizontal alignment of a block against its predecessor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

/// What part a block plays in the arrangement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AlignRole {
    #[default]
    Content,
    /// Pulled to the left margin; the next block goes to its right.
    CueColumn,
    /// A Question/Answer/Solution label; behaves like a cue.
    Label(LabelKind),
}

impl AlignRole {
    /// Next block is placed to the right of this one.
    pub fn is_cue(self) -> bool {
        !matches!(self, AlignRole::Content)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    pub name: String,
    pub content: ContentString,
    pub classification: Classification,
    pub style: BlockStyle,
    /// Cross-axis alignment against the previous block; `None` uses the
    /// arrangement's default edge.
    pub align: Option<Align>,
    pub role: AlignRole,
    /// Rendered lines: wrapped for paragraphs, the joined text otherwise.
    pub lines: Vec<String>,
}

impl ContentBlock {
    /// Build a block from already classified content.
    ///
    /// Plain fragments are joined; other modes keep their fragment boundaries.
    pub fn wrap(
        content: ContentString,
        classification: Classification,
        styles: &StyleTable,
        wrap_width: usize,
    ) -> Self {
        let content = classify::content_for_mode(content, classification.mode);
        let style = styles
            .get(classification.script, classification.mode)
            .clone();

        let joined = content.joined();
        let lines = match classification.mode {
            PresentationMode::PlainWrapped => wrap_lines(&joined, wrap_width, Align::Left),
            _ => joined.lines().map(str::to_string).collect(),
        };

        Self {
            name: classification.mode.key().to_string(),
            content,
            classification,
            style,
            align: None,
            role: AlignRole::Content,
            lines,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the alignment; paragraphs are re-justified to match.
    pub fn with_align(mut self, align: Align, wrap_width: usize) -> Self {
        self.align = Some(align);
        if self.mode() == PresentationMode::PlainWrapped {
            self.lines = wrap_lines(&self.text(), wrap_width, align);
        }
        self
    }

    pub fn with_role(mut self, role: AlignRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_style(mut self, style: BlockStyle) -> Self {
        self.style = style;
        self
    }

    #[inline]
    pub fn mode(&self) -> PresentationMode {
        self.classification.mode
    }

    #[inline]
    pub fn script(&self) -> Script {
        self.classification.script
    }

    #[inline]
    pub fn is_math(&self) -> bool {
        self.classification.is_math()
    }

    /// The original text (fragments joined with a space).
    pub fn text(&self) -> String {
        self.content.joined()
    }

    pub fn fragments(&self) -> Vec<&str> {
        self.content.fragments()
    }

    /// Fragments as handed to TeX: display delimiters removed from the ends.
    pub fn tex_fragments(&self) -> Vec<String> {
        let mut parts: Vec<String> = self.fragments().into_iter().map(str::to_string).collect();
        if self.mode() != PresentationMode::LatexDisplayMath {
            return parts;
        }

        if parts.len() == 1 {
            parts[0] = math::strip_display_delimiters(&parts[0]).to_string();
            return parts;
        }
        if let Some(first) = parts.first_mut() {
            *first = first.trim_start_matches("$$").trim_start().to_string();
        }
        if let Some(last) = parts.last_mut() {
            *last = last.trim_end_matches("$$").trim_end().to_string();
        }
        parts
    }

    /// Complete TeX document for LaTeX blocks, `None` for everything else.
    pub fn tex_source(&self, devanagari_font: &str) -> Option<String> {
        let kind = self.style.template?;
        let template = TexTemplate::for_kind(kind, devanagari_font);
        let body = self.tex_fragments().join(" ");

        match self.mode() {
            PresentationMode::LatexDisplayMath => Some(template.document_in_env(&body, "align*")),
            PresentationMode::LatexInlineOrBlock => Some(template.document_for(&body)),
            _ => None,
        }
    }
}

/// Classifies and wraps content with one shared configuration.
#[derive(Debug, Clone)]
pub struct Wrapper {
    pub styles: StyleTable,
    pub label_style: BlockStyle,
    /// Plain text longer than this (graphemes) becomes a paragraph.
    pub display_width: usize,
    /// Paragraph line width in columns.
    pub wrap_width: usize,
    pub lang: Lang,
}

impl Default for Wrapper {
    fn default() -> Self {
        Self {
            styles: StyleTable::default(),
            label_style: BlockStyle::label(),
            display_width: 50,
            wrap_width: 50,
            lang: Lang::En,
        }
    }
}

impl Wrapper {
    /// Classify and wrap.
    pub fn block(&self, content: impl Into<ContentString>) -> ContentBlock {
        self.block_with_mode(content, None)
    }

    /// Classify (unless `mode` is given) and wrap.
    pub fn block_with_mode(
        &self,
        content: impl Into<ContentString>,
        mode: Option<PresentationMode>,
    ) -> ContentBlock {
        let content = content.into();
        let classification = classify::classify_with_override(&content, self.display_width, mode);
        ContentBlock::wrap(content, classification, &self.styles, self.wrap_width)
    }

    pub fn text(&self, text: &str) -> ContentBlock {
        self.block_with_mode(text, Some(PresentationMode::PlainShort))
    }

    pub fn paragraph(&self, text: &str) -> ContentBlock {
        self.block_with_mode(text, Some(PresentationMode::PlainWrapped))
    }

    pub fn tex(&self, content: impl Into<ContentString>) -> ContentBlock {
        self.block_with_mode(content, Some(PresentationMode::LatexInlineOrBlock))
    }

    pub fn math_tex(&self, content: impl Into<ContentString>) -> ContentBlock {
        self.block_with_mode(content, Some(PresentationMode::LatexDisplayMath))
    }

    pub fn markup(&self, text: &str) -> ContentBlock {
        self.block_with_mode(text, Some(PresentationMode::Markup))
    }

    pub fn question_label(&self, number: u32) -> ContentBlock {
        self.label(labels::question_text(number, self.lang), LabelKind::Question)
    }

    pub fn answer_label(&self, kind: LabelKind) -> ContentBlock {
        self.label(labels::answer_text(kind, self.lang), kind)
    }

    fn label(&self, text: String, kind: LabelKind) -> ContentBlock {
        self.text(&text)
            .with_style(self.label_style.clone())
            .with_role(AlignRole::Label(kind))
            .with_name(format!("{kind:?}").to_lowercase())
    }
}

/// Greedy word wrap to `width` display columns, each line padded to `width`
/// according to `align`. Words wider than `width` are split.
pub fn wrap_lines(text: &str, width: usize, align: Align) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            for piece in split_long_word(word, width) {
                let extra = if line.is_empty() { 0 } else { 1 };
                if !line.is_empty() && line.width() + extra + piece.width() > width {
                    out.push(std::mem::take(&mut line));
                }
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&piece);
            }
        }
        if !line.is_empty() {
            out.push(line);
        }
    }

    out.into_iter().map(|l| justify(&l, width, align)).collect()
}

fn split_long_word(word: &str, width: usize) -> Vec<String> {
    if word.width() <= width {
        return vec![word.to_string()];
    }

    let mut pieces = Vec::new();
    let mut cur = String::new();
    for g in word.graphemes(true) {
        if !cur.is_empty() && cur.width() + g.width() > width {
            pieces.push(std::mem::take(&mut cur));
        }
        cur.push_str(g);
    }
    if !cur.is_empty() {
        pieces.push(cur);
    }
    pieces
}

fn justify(line: &str, width: usize, align: Align) -> String {
    let pad = width.saturating_sub(line.width());
    match align {
        Align::Left => format!("{line}{}", " ".repeat(pad)),
        Align::Right => format!("{}{line}", " ".repeat(pad)),
        Align::Center => {
            let left = pad / 2;
            format!("{}{line}{}", " ".repeat(left), " ".repeat(pad - left))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_round_trips() {
        let w = Wrapper::default();
        for s in [
            "What is speed?",
            r"\text{Speed} = \dfrac{d}{t}",
            "$$E = mc^2$$",
            "<b>bold</b>",
            "गति क्या है?",
            "A long paragraph that definitely goes past the fifty column display width.",
        ] {
            assert_eq!(w.block(s).text(), s);
        }
    }

    #[test]
    fn styles_follow_script_and_mode() {
        let w = Wrapper::default();
        let b = w.block("गति क्या है?");
        assert_eq!(b.script(), Script::Devanagari);
        assert_eq!(b.mode(), PresentationMode::PlainShort);
        assert_eq!(b.style.font_size, 16.0);

        let b = w.block("$$x$$");
        assert!(b.style.template.is_some());
        assert!(b.is_math());
    }

    #[test]
    fn latex_fragments_are_preserved() {
        let w = Wrapper::default();
        let b = w.block([r"\text{Speed}", "=", r"\dfrac{d}{t}"]);
        assert_eq!(b.fragments(), vec![r"\text{Speed}", "=", r"\dfrac{d}{t}"]);

        let b = w.block(["plain", "words"]);
        assert_eq!(b.fragments(), vec!["plain words"]);
    }

    #[test]
    fn display_math_delimiters_stripped_for_tex() {
        let w = Wrapper::default();
        let b = w.block("$$ a^2 + b^2 = c^2 $$");
        assert_eq!(b.tex_fragments(), vec!["a^2 + b^2 = c^2"]);

        let b = w.block(["$$a^2", "+", "b^2$$"]);
        assert_eq!(b.tex_fragments(), vec!["a^2", "+", "b^2"]);
    }

    #[test]
    fn tex_source_only_for_latex() {
        let w = Wrapper::default();
        let doc = w.block("$$x = 1$$").tex_source("Noto Sans").unwrap();
        assert!(doc.contains("\\begin{align*}\nx = 1\n\\end{align*}"));
        assert!(doc.contains(r"\usepackage[english]{babel}"));

        let doc = w.block(r"गति \textbf{v}").tex_source("Noto Sans").unwrap();
        assert!(doc.contains("polyglossia"));

        assert!(w.block("plain").tex_source("Noto Sans").is_none());
    }

    #[test]
    fn labels_carry_roles() {
        let w = Wrapper {
            lang: Lang::Hi,
            ..Default::default()
        };
        let q = w.question_label(2);
        assert_eq!(q.text(), "प्रश्‍न 2:");
        assert_eq!(q.role, AlignRole::Label(LabelKind::Question));
        assert!(q.role.is_cue());

        let a = w.answer_label(LabelKind::Solution);
        assert_eq!(a.text(), "हल :");
        assert_eq!(a.style, BlockStyle::label());
    }

    #[test]
    fn wraps_and_justifies() {
        let lines = wrap_lines("aa bb cc dd", 5, Align::Left);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);

        let lines = wrap_lines("aa bb c", 5, Align::Right);
        assert_eq!(lines, vec!["aa bb", "    c"]);

        let lines = wrap_lines("abc", 7, Align::Center);
        assert_eq!(lines, vec!["  abc  "]);

        let lines = wrap_lines("abcdefgh", 3, Align::Left);
        assert_eq!(lines, vec!["abc", "def", "gh "]);
    }

    #[test]
    fn paragraph_alignment_rejustifies() {
        let w = Wrapper {
            wrap_width: 10,
            ..Default::default()
        };
        let p = w.paragraph("one two three").with_align(Align::Right, 10);
        assert_eq!(p.lines, vec!["   one two", "     three"]);
        assert_eq!(p.text(), "one two three");
    }
}
