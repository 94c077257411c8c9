//! Dollar-delimiter and LaTeX command detectors.

use std::sync::LazyLock;

use regex::Regex;

static LATEX_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[A-Za-z]+").expect("static regex is valid"));

/// `$$ ... $$` around the whole text.
pub fn is_display_math(text: &str) -> bool {
    text.len() >= 4 && text.starts_with("$$") && text.ends_with("$$")
}

/// `$ ... $` around the whole text, with display math ruled out.
pub fn is_inline_math(text: &str) -> bool {
    !is_display_math(text) && text.len() >= 2 && text.starts_with('$') && text.ends_with('$')
}

/// A backslash followed by at least one ASCII letter, e.g. `\frac`.
pub fn has_latex_command(text: &str) -> bool {
    LATEX_COMMAND.is_match(text)
}

/// Number of `$` not immediately preceded by a backslash.
pub fn unescaped_dollar_count(text: &str) -> usize {
    let mut count = 0;
    let mut prev = None;
    for ch in text.chars() {
        if ch == '$' && prev != Some('\\') {
            count += 1;
        }
        prev = Some(ch);
    }
    count
}

/// Even, non-zero number of unescaped `$`.
pub fn has_balanced_dollars(text: &str) -> bool {
    let n = unescaped_dollar_count(text);
    n > 0 && n % 2 == 0
}

/// Drop a surrounding `$$` pair, if any.
pub fn strip_display_delimiters(text: &str) -> &str {
    if is_display_math(text) {
        text[2..text.len() - 2].trim()
    } else {
        text
    }
}

/// Remove LaTeX commands and grouping punctuation, leaving roughly what gets drawn.
pub fn visible_text(text: &str) -> String {
    LATEX_COMMAND
        .replace_all(text, "")
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '$' | '^' | '_' | '&' | '\\'))
        .collect()
}
