//! Utility functions for DOM processing

/// Case-insensitive equality over each character's Unicode lowercase mapping.
///
/// This is not full case folding: `ſ` and `s` stay distinct, as do final
/// `ς` and `Σ` (which lowers to `σ`).
pub fn eq_fold(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Normalizer that leaves text untouched
pub fn identity(text: &str) -> String {
    text.to_string()
}

/// Collapse every whitespace run to a single space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Replace the entities parsers commonly leave behind in text nodes
pub fn normalize_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .replace("&amp;", "&")
}
