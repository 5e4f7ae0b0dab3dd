//! Tree loader - builds a `DomArena` from a parser's JSON dump
//!
//! Markup parsing happens elsewhere (a headless browser, an HTML5 parser
//! service). The loader accepts the tree in the shape of CDP's
//! `DOM.getDocument` response:
//!
//! ```json
//! {
//!   "root": {
//!     "nodeType": 9,
//!     "nodeName": "#document",
//!     "children": [{
//!       "nodeType": 1,
//!       "nodeName": "table",
//!       "attributes": ["class", "prices", "id", "t1"],
//!       "children": [...]
//!     }]
//!   }
//! }
//! ```

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::*;
use serde_json::Value;

/// Configuration for the loader
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Deepest nesting accepted before giving up
    pub max_depth: usize,
    pub keep_comments: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_depth: 512,
            keep_comments: true,
        }
    }
}

pub struct DomLoader {
    config: LoaderConfig,
}

impl DomLoader {
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Build an arena from a full `{"root": ...}` response
    pub fn load_document(&self, response: &Value) -> Result<DomArena> {
        let root = response
            .get("root")
            .ok_or_else(|| DomError::CdpError("Missing 'root' in CDP response".to_string()))?;
        self.load_node(root)
    }

    /// Build an arena from a bare node object; that node becomes the root
    pub fn load_node(&self, node: &Value) -> Result<DomArena> {
        let mut arena = DomArena::new();
        let root_id = self
            .parse_node(&mut arena, node, None, 0)?
            .ok_or_else(|| DomError::CdpError("Root node was filtered out".to_string()))?;
        arena.set_root(root_id)?;
        tracing::trace!("Loaded {} nodes", arena.len());
        Ok(arena)
    }

    /// Parse a JSON string holding a `{"root": ...}` response
    pub fn load_str(&self, json: &str) -> Result<DomArena> {
        let value: Value = serde_json::from_str(json)?;
        self.load_document(&value)
    }

    /// Recursively parse a node; `None` when the node is dropped by config
    fn parse_node(
        &self,
        arena: &mut DomArena,
        json: &Value,
        parent_id: Option<NodeId>,
        depth: usize,
    ) -> Result<Option<NodeId>> {
        if depth > self.config.max_depth {
            return Err(DomError::MaxDepthExceeded {
                current: depth,
                max: self.config.max_depth,
            });
        }

        let node_type_val = json["nodeType"]
            .as_u64()
            .ok_or_else(|| DomError::CdpError("Missing nodeType".to_string()))?;

        let node_type = u8::try_from(node_type_val)
            .ok()
            .and_then(NodeType::from_u8)
            .ok_or_else(|| DomError::InvalidNodeType {
                expected: "element, text, comment, document or doctype".to_string(),
                actual: node_type_val.to_string(),
            })?;

        if node_type == NodeType::Comment && !self.config.keep_comments {
            return Ok(None);
        }

        let mut node = DomNode::new(node_type, json["nodeName"].as_str().unwrap_or(""));
        node.node_value = json["nodeValue"].as_str().unwrap_or("").to_string();
        node.parent_id = parent_id;

        // Attributes arrive flattened: [k0, v0, k1, v1, ...]
        if let Some(attrs) = json["attributes"].as_array() {
            for pair in attrs.chunks_exact(2) {
                if let (Some(key), Some(value)) = (pair[0].as_str(), pair[1].as_str()) {
                    node.attributes.push(Attribute::new(key, value));
                }
            }
        }

        let node_id = arena.add_node(node);

        if let Some(children) = json["children"].as_array() {
            let mut child_ids = smallvec::SmallVec::new();
            for child in children {
                if let Some(child_id) = self.parse_node(arena, child, Some(node_id), depth + 1)? {
                    child_ids.push(child_id);
                }
            }
            arena.get_mut(node_id)?.children_ids = child_ids;
        }

        Ok(Some(node_id))
    }
}

impl Default for DomLoader {
    fn default() -> Self {
        Self::new()
    }
}
