//! TeX templates handed to the host LaTeX compiler.
//!
//! The Devanagari template needs xelatex (fontspec + polyglossia), which
//! produces `.xdv` instead of `.dvi`.

use serde::Deserialize;

/// Which template a LaTeX block is typeset with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Devanagari,
    Latin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexTemplate {
    pub tex_compiler: String,
    pub output_format: String,
    pub documentclass: String,
    pub preamble: String,
    /// Replaced by the expression in `document_for`.
    pub placeholder: String,
}

const PLACEHOLDER: &str = "YourTextHere";

impl TexTemplate {
    /// xelatex template with Hindi as secondary language and `main_font` set
    /// for the Devanagari script.
    pub fn devanagari(main_font: &str) -> Self {
        let preamble = [
            r"\usepackage{fontspec}",
            r"\usepackage{polyglossia}",
            r"\usepackage{cancel}",
            r"\setmainlanguage{english}",
            r"\setotherlanguage{hindi}",
            format!(r"\setmainfont[Script=Devanagari]{{{main_font}}}").as_str(),
            r"\usepackage{amsmath}",
            r"\usepackage{amssymb}",
        ]
        .join("\n");

        Self {
            tex_compiler: "xelatex".to_string(),
            output_format: ".xdv".to_string(),
            documentclass: r"\documentclass[preview]{standalone}".to_string(),
            preamble,
            placeholder: PLACEHOLDER.to_string(),
        }
    }

    pub fn latin() -> Self {
        Self {
            tex_compiler: "latex".to_string(),
            output_format: ".dvi".to_string(),
            documentclass: r"\documentclass[preview]{standalone}".to_string(),
            preamble: [
                r"\usepackage[english]{babel}",
                r"\usepackage{amsmath}",
                r"\usepackage{amssymb}",
            ]
            .join("\n"),
            placeholder: PLACEHOLDER.to_string(),
        }
    }

    pub fn for_kind(kind: TemplateKind, devanagari_font: &str) -> Self {
        match kind {
            TemplateKind::Devanagari => Self::devanagari(devanagari_font),
            TemplateKind::Latin => Self::latin(),
        }
    }

    fn body(&self) -> String {
        format!(
            "{}\n{}\n\\begin{{document}}\n{}\n\\end{{document}}\n",
            self.documentclass, self.preamble, self.placeholder
        )
    }

    /// Full document with `expression` in text mode.
    pub fn document_for(&self, expression: &str) -> String {
        self.body().replace(&self.placeholder, expression)
    }

    /// Full document with `expression` wrapped in `\begin{env}...\end{env}`.
    pub fn document_in_env(&self, expression: &str, environment: &str) -> String {
        let wrapped = format!("\\begin{{{environment}}}\n{expression}\n\\end{{{environment}}}");
        self.document_for(&wrapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devanagari_uses_xelatex_and_font() {
        let t = TexTemplate::devanagari("Noto Sans");
        assert_eq!(t.tex_compiler, "xelatex");
        assert_eq!(t.output_format, ".xdv");
        assert!(t.preamble.contains(r"\setotherlanguage{hindi}"));
        assert!(
            t.preamble
                .contains(r"\setmainfont[Script=Devanagari]{Noto Sans}")
        );
    }

    #[test]
    fn document_wraps_expression() {
        let doc = TexTemplate::latin().document_for("hello");
        assert!(doc.starts_with(r"\documentclass[preview]{standalone}"));
        assert!(doc.contains("\\begin{document}\nhello\n\\end{document}"));
        assert!(!doc.contains(PLACEHOLDER));
    }

    #[test]
    fn math_environment() {
        let doc = TexTemplate::devanagari("Hind").document_in_env("x = 1", "align*");
        assert!(doc.contains("\\begin{align*}\nx = 1\n\\end{align*}"));
    }
}
