//! Tag-balance check for HTML-like markup.
//!
//! Only well-formed markup is treated as markup: every `<name ...>` must be
//! closed by a matching `</name>` in stack order. `<name/>` is self-closing.

/// True if `text` has both angle brackets and its tags balance.
pub fn is_markup(text: &str) -> bool {
    text.contains('<') && text.contains('>') && tags_balanced(text)
}

/// Stack-based scan; any structural problem returns false.
pub fn tags_balanced(text: &str) -> bool {
    let mut stack: Vec<&str> = Vec::new();
    let mut tag_start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        match (ch, tag_start) {
            ('<', None) => tag_start = Some(i + 1),
            ('<', Some(_)) => return false,
            ('>', Some(start)) => {
                tag_start = None;
                let body = text[start..i].trim();

                if let Some(name) = body.strip_prefix('/') {
                    let name = name.trim();
                    if stack.pop() != Some(name) {
                        return false;
                    }
                } else if body.ends_with('/') {
                    if tag_name(body.trim_end_matches('/')).is_none() {
                        return false;
                    }
                } else {
                    match tag_name(body) {
                        Some(name) => stack.push(name),
                        None => return false,
                    }
                }
            }
            _ => {}
        }
    }

    tag_start.is_none() && stack.is_empty()
}

fn tag_name(body: &str) -> Option<&str> {
    body.split_whitespace().next().filter(|n| !n.is_empty())
}
