//! `<select>` extraction

use crate::error::{ExtractError, Result};
use ahash::AHashMap;
use dom::text::first_text_descendant;
use dom::{by_tag, DomArena, DomError, NodeId};
use serde::Serialize;

/// Options of a `<select>` keyed by display text, plus the selected one
#[derive(Debug, Clone, Default, Serialize)]
pub struct SelectResult {
    options: AHashMap<String, String>,
    selected_key: String,
}

impl SelectResult {
    /// Display text → `value` attribute
    pub fn options(&self) -> &AHashMap<String, String> {
        &self.options
    }

    /// Display text of the selected option; empty when there are no options
    pub fn selected_key(&self) -> &str {
        &self.selected_key
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.value_of(&self.selected_key)
    }

    pub fn value_of(&self, text: &str) -> Option<&str> {
        self.options.get(text).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Read every `<option>` at or below `select`.
///
/// Options with the same text overwrite each other, last one wins. The
/// selected key is the last option carrying a `selected` attribute, or the
/// first option when none does. No options at all is an empty result, not
/// an error.
pub fn extract_select(arena: &DomArena, select: NodeId) -> Result<SelectResult> {
    if !arena.contains(select) {
        return Err(ExtractError::InvalidNode(format!(
            "node {select} is not in the tree"
        )));
    }

    let option_ids = arena.all_matches(select, by_tag("option"));
    if option_ids.is_empty() {
        tracing::warn!("Select {} has no options", select);
        return Ok(SelectResult::default());
    }

    let mut options = AHashMap::with_capacity(option_ids.len());
    let mut first_key = None;
    let mut selected_key = None;

    for option_id in option_ids {
        let value = match arena.get_attribute(option_id, "value") {
            Ok(attr) => attr.value.clone(),
            Err(DomError::AttributeNotFound { key, .. }) => {
                return Err(ExtractError::MissingAttribute { key })
            }
            Err(e) => return Err(e.into()),
        };

        let text = first_text_descendant(arena, option_id)
            .and_then(|id| arena.get(id).ok())
            .map(|node| node.node_value.clone())
            .ok_or_else(|| {
                ExtractError::MissingContent(format!("option {option_id} has no text"))
            })?;

        if arena.get(option_id)?.has_attr("selected") {
            selected_key = Some(text.clone());
        }
        first_key.get_or_insert_with(|| text.clone());
        options.insert(text, value);
    }

    let selected_key = selected_key.or(first_key).unwrap_or_default();
    tracing::debug!(
        "Extracted select {}: {} options, selected '{}'",
        select,
        options.len(),
        selected_key
    );

    Ok(SelectResult {
        options,
        selected_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::DomNode;

    /// `<select>` with (text, value, selected) options; `None` value omits the attribute
    fn build(options: &[(Option<&str>, Option<&str>, bool)]) -> (DomArena, NodeId) {
        let mut arena = DomArena::new();
        let select = arena.add_node(DomNode::element("select"));
        for (text, value, selected) in options {
            let mut attrs = Vec::new();
            if let Some(value) = value {
                attrs.push(("value", *value));
            }
            if *selected {
                attrs.push(("selected", ""));
            }
            let option = arena
                .append_child(select, DomNode::element_with_attrs("option", &attrs))
                .unwrap();
            if let Some(text) = text {
                arena.append_child(option, DomNode::text(*text)).unwrap();
            }
        }
        (arena, select)
    }

    #[test]
    fn test_selected_option() {
        let (arena, select) = build(&[
            (Some("Yes"), Some("1"), false),
            (Some("No"), Some("2"), true),
            (Some("Maybe"), Some("3"), false),
        ]);
        let result = extract_select(&arena, select).unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result.value_of("Yes"), Some("1"));
        assert_eq!(result.value_of("No"), Some("2"));
        assert_eq!(result.value_of("Maybe"), Some("3"));
        assert_eq!(result.selected_key(), "No");
        assert_eq!(result.selected_value(), Some("2"));
    }

    #[test]
    fn test_first_option_is_fallback() {
        let (arena, select) = build(&[
            (Some("Yes"), Some("1"), false),
            (Some("No"), Some("2"), false),
        ]);
        let result = extract_select(&arena, select).unwrap();
        assert_eq!(result.selected_key(), "Yes");
    }

    #[test]
    fn test_last_selected_wins() {
        let (arena, select) = build(&[
            (Some("a"), Some("1"), true),
            (Some("b"), Some("2"), false),
            (Some("c"), Some("3"), true),
        ]);
        assert_eq!(extract_select(&arena, select).unwrap().selected_key(), "c");
    }

    #[test]
    fn test_duplicate_text_last_write_wins() {
        let (arena, select) = build(&[
            (Some("a"), Some("1"), false),
            (Some("b"), Some("2"), false),
            (Some("a"), Some("3"), false),
        ]);
        let result = extract_select(&arena, select).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.value_of("a"), Some("3"));
        assert_eq!(result.value_of("b"), Some("2"));
        assert_eq!(result.selected_key(), "a");
    }

    #[test]
    fn test_no_options() {
        let (arena, select) = build(&[]);
        let result = extract_select(&arena, select).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.selected_key(), "");
        assert_eq!(result.selected_value(), None);
    }

    #[test]
    fn test_missing_value() {
        let (arena, select) = build(&[(Some("a"), Some("1"), false), (Some("b"), None, false)]);
        assert!(matches!(
            extract_select(&arena, select),
            Err(ExtractError::MissingAttribute { key }) if key == "value"
        ));
    }

    #[test]
    fn test_missing_text() {
        let (arena, select) = build(&[(None, Some("1"), false)]);
        assert!(matches!(
            extract_select(&arena, select),
            Err(ExtractError::MissingContent(_))
        ));
    }

    #[test]
    fn test_absent_node() {
        let (arena, _) = build(&[]);
        assert!(matches!(
            extract_select(&arena, 42),
            Err(ExtractError::InvalidNode(_))
        ));
    }
}
