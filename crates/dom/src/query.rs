//! Predicate-based tree queries
//!
//! Every query walks the arena depth-first in document order and returns
//! `NodeId`s into it. A start node the arena doesn't know about is treated
//! as absent: traversals over it yield nothing instead of failing.
//!
//! Predicates are plain closures over `&DomNode`. The builders below cover
//! the common lookups (tag, class, attribute, id); anything else is a
//! closure, and [`and`], [`or`] and [`not`] glue them together.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::{Attribute, DomNode, NodeId};
use crate::utils::eq_fold;

/// What the traversal does after visiting a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Descend,
    Skip,
    Stop,
}

impl DomArena {
    /// Pre-order traversal over the descendants of `node_id` (not the node itself).
    ///
    /// Returning `false` from `visit` skips that node's subtree; traversal
    /// continues with its next sibling.
    pub fn walk<F>(&self, node_id: NodeId, mut visit: F)
    where
        F: FnMut(&DomNode) -> bool,
    {
        self.walk_with(node_id, |node| {
            if visit(node) {
                Visit::Descend
            } else {
                Visit::Skip
            }
        });
    }

    /// Iterative walk, no recursion
    fn walk_with<F>(&self, node_id: NodeId, mut visit: F)
    where
        F: FnMut(&DomNode) -> Visit,
    {
        let Ok(start) = self.get(node_id) else {
            return;
        };

        // Push children in reverse order (so they're visited left-to-right)
        let mut stack: Vec<NodeId> = start.children_ids.iter().rev().copied().collect();

        while let Some(child_id) = stack.pop() {
            let Ok(child) = self.get(child_id) else {
                continue;
            };
            match visit(child) {
                Visit::Descend => stack.extend(child.children_ids.iter().rev()),
                Visit::Skip => {}
                Visit::Stop => return,
            }
        }
    }

    /// First node matching `predicate`, testing `start` itself first
    pub fn first_match<P>(&self, start: NodeId, predicate: P) -> Option<NodeId>
    where
        P: Fn(&DomNode) -> bool,
    {
        let node = self.get(start).ok()?;
        if predicate(node) {
            return Some(start);
        }
        self.first_match_excluding_start(start, predicate)
    }

    /// First descendant of `start` matching `predicate`
    pub fn first_match_excluding_start<P>(&self, start: NodeId, predicate: P) -> Option<NodeId>
    where
        P: Fn(&DomNode) -> bool,
    {
        let mut found = None;
        self.walk_with(start, |node| {
            if predicate(node) {
                found = Some(node.node_id);
                Visit::Stop
            } else {
                Visit::Descend
            }
        });
        found
    }

    /// All nodes matching `predicate` in pre-order, `start` included if it matches
    pub fn all_matches<P>(&self, start: NodeId, predicate: P) -> Vec<NodeId>
    where
        P: Fn(&DomNode) -> bool,
    {
        let Ok(node) = self.get(start) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        if predicate(node) {
            found.push(start);
        }
        found.extend(self.all_matches_excluding_start(start, predicate));
        found
    }

    /// All descendants of `start` matching `predicate` in pre-order
    pub fn all_matches_excluding_start<P>(&self, start: NodeId, predicate: P) -> Vec<NodeId>
    where
        P: Fn(&DomNode) -> bool,
    {
        let mut found = Vec::new();
        self.walk(start, |node| {
            if predicate(node) {
                found.push(node.node_id);
            }
            true
        });
        found
    }

    /// First element with the given tag, `start` included
    pub fn element_by_tag(&self, name: &str, start: NodeId) -> Option<NodeId> {
        self.first_match(start, by_tag(name))
    }

    /// First attribute of `node_id` with this key (case-sensitive key match).
    ///
    /// A missing node and a missing key are reported as different errors.
    pub fn get_attribute(&self, node_id: NodeId, key: &str) -> Result<&Attribute> {
        self.get(node_id)?
            .attribute(key)
            .ok_or_else(|| DomError::AttributeNotFound {
                node: node_id,
                key: key.to_string(),
            })
    }
}

/// Elements whose tag is exactly `name`
pub fn by_tag(name: impl Into<String>) -> impl Fn(&DomNode) -> bool {
    let name = name.into();
    move |node| node.is_element_named(&name)
}

/// Nodes whose `class` attribute has a token equal to `class_name`, ignoring case
pub fn by_class_name(class_name: impl Into<String>) -> impl Fn(&DomNode) -> bool {
    let class_name = class_name.into();
    move |node| {
        node.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| eq_fold(c, &class_name)))
    }
}

/// Nodes whose first `key` attribute equals `value`, ignoring case
pub fn by_attribute(key: impl Into<String>, value: impl Into<String>) -> impl Fn(&DomNode) -> bool {
    let key = key.into();
    let value = value.into();
    move |node| node.attr(&key).is_some_and(|v| eq_fold(v, &value))
}

pub fn by_id(id: impl Into<String>) -> impl Fn(&DomNode) -> bool {
    by_attribute("id", id)
}

pub fn and<A, B>(a: A, b: B) -> impl Fn(&DomNode) -> bool
where
    A: Fn(&DomNode) -> bool,
    B: Fn(&DomNode) -> bool,
{
    move |node| a(node) && b(node)
}

pub fn or<A, B>(a: A, b: B) -> impl Fn(&DomNode) -> bool
where
    A: Fn(&DomNode) -> bool,
    B: Fn(&DomNode) -> bool,
{
    move |node| a(node) || b(node)
}

pub fn not<A>(a: A) -> impl Fn(&DomNode) -> bool
where
    A: Fn(&DomNode) -> bool,
{
    move |node| !a(node)
}
