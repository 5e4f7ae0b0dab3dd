//! Text extraction helpers
//!
//! Locates text nodes under an element and stitches several fragments into
//! one string.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::NodeId;
use regex::Regex;
use std::sync::LazyLock;

/// Visible ASCII graphic characters, `!` through `~`
static PRINTABLE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[!-~]").expect("printable token pattern is valid"));

/// True when `text` holds at least one visible ASCII character.
///
/// Whitespace-only fragments are rejected, and so is text made only of
/// non-ASCII characters (`"日本"`, `"€"`).
pub fn has_printable_token(text: &str) -> bool {
    PRINTABLE_TOKEN.is_match(text)
}

/// First text node at or below `node_id`
pub fn first_text_descendant(arena: &DomArena, node_id: NodeId) -> Option<NodeId> {
    arena.first_match(node_id, |node| node.is_text())
}

/// First text node at or below `node_id` whose content passes `filter`
pub fn first_text_descendant_matching<F>(
    arena: &DomArena,
    node_id: NodeId,
    filter: F,
) -> Option<NodeId>
where
    F: Fn(&str) -> bool,
{
    arena.first_match(node_id, |node| node.is_text() && filter(&node.node_value))
}

/// All text nodes at or below `node_id`, optionally filtered by content
pub fn all_text_descendants(
    arena: &DomArena,
    node_id: NodeId,
    filter: Option<&dyn Fn(&str) -> bool>,
) -> Vec<NodeId> {
    arena.all_matches(node_id, |node| {
        node.is_text() && filter.map_or(true, |f| f(&node.node_value))
    })
}

/// Normalize each fragment and join them with `delimiter`.
///
/// Fails with [`DomError::EmptyComposite`] when there is nothing to join.
pub fn join<S, N>(fragments: &[S], delimiter: &str, normalizer: N) -> Result<String>
where
    S: AsRef<str>,
    N: Fn(&str) -> String,
{
    let (last, rest) = fragments.split_last().ok_or(DomError::EmptyComposite)?;
    let mut out = String::new();
    for fragment in rest {
        out.push_str(&normalizer(fragment.as_ref()));
        out.push_str(delimiter);
    }
    out.push_str(&normalizer(last.as_ref()));
    Ok(out)
}

/// [`join`] without normalization
pub fn composite<S: AsRef<str>>(fragments: &[S], delimiter: &str) -> Result<String> {
    join(fragments, delimiter, |s| s.to_string())
}

/// Contents of the given text nodes, skipping ids the arena doesn't have
pub fn texts<'a>(arena: &'a DomArena, ids: &[NodeId]) -> Vec<&'a str> {
    ids.iter()
        .filter_map(|&id| arena.get(id).ok())
        .map(|node| node.node_value.as_str())
        .collect()
}
