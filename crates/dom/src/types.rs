//! Core node types
//!
//! Key design principles:
//! 1. Use u32 for indices (4 bytes vs 8 bytes pointer)
//! 2. Keep attributes in document order, duplicates included
//! 3. Use SmallVec for small arrays (avoid heap allocation)

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Node identifier (index into arena)
/// u32 allows 4 billion nodes, enough for any webpage
pub type NodeId = u32;

/// Node type, numbered like the DOM specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            3 => Some(NodeType::Text),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Element => "element",
            NodeType::Text => "text",
            NodeType::Comment => "comment",
            NodeType::Document => "document",
            NodeType::DocumentType => "doctype",
        }
    }
}

/// A single `key="value"` pair on an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The main DOM tree node structure
///
/// Design philosophy:
/// - Small fixed-size fields first (better packing)
/// - Use indices instead of pointers
/// - `node_name` is the tag for elements, `node_value` the text for text/comment nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomNode {
    // Assigned by the arena on insertion
    pub node_id: NodeId,
    pub node_type: NodeType,

    // Navigation indices
    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>, // Most nodes have <4 children

    pub node_name: String,
    pub node_value: String,
    pub attributes: SmallVec<[Attribute; 4]>,
}

impl DomNode {
    /// Create a detached node; the arena fills in ids and links
    pub fn new(node_type: NodeType, node_name: impl Into<String>) -> Self {
        Self {
            node_id: 0,
            node_type,
            parent_id: None,
            children_ids: SmallVec::new(),
            node_name: node_name.into(),
            node_value: String::new(),
            attributes: SmallVec::new(),
        }
    }

    pub fn document() -> Self {
        Self::new(NodeType::Document, "#document")
    }

    pub fn element(tag: impl Into<String>) -> Self {
        Self::new(NodeType::Element, tag)
    }

    pub fn element_with_attrs<K, V>(tag: impl Into<String>, attrs: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut node = Self::element(tag);
        node.attributes = attrs
            .iter()
            .map(|(k, v)| Attribute::new(k.as_ref(), v.as_ref()))
            .collect();
        node
    }

    pub fn text(value: impl Into<String>) -> Self {
        let mut node = Self::new(NodeType::Text, "#text");
        node.node_value = value.into();
        node
    }

    pub fn comment(value: impl Into<String>) -> Self {
        let mut node = Self::new(NodeType::Comment, "#comment");
        node.node_value = value.into();
        node
    }

    pub fn doctype(name: impl Into<String>) -> Self {
        Self::new(NodeType::DocumentType, name)
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        if self.node_type == NodeType::Element {
            Some(&self.node_name)
        } else {
            None
        }
    }

    /// Check if node is an element
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if node is an element with exactly this tag
    pub fn is_element_named(&self, tag: &str) -> bool {
        self.is_element() && self.node_name == tag
    }

    /// Check if node is text
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Text content of a text node
    pub fn text_content(&self) -> Option<&str> {
        if self.is_text() {
            Some(&self.node_value)
        } else {
            None
        }
    }

    /// First attribute with this key (case-sensitive)
    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.key == key)
    }

    /// Get attribute value
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attribute(key).map(|attr| attr.value.as_str())
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }
}
