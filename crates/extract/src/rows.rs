//! Row-level cell helpers

use dom::{DomArena, DomNode, NodeId};

/// Every `td` directly under a `tr` whose subtree (row included) has a node
/// matching `cond`, in document order.
///
/// Handy for picking out the cells of rows that contain a marker element,
/// e.g. a link with a given class.
pub fn row_cells_where<P>(arena: &DomArena, table: NodeId, cond: P) -> Vec<NodeId>
where
    P: Fn(&DomNode) -> bool,
{
    arena.all_matches(table, |node| {
        if !node.is_element_named("td") {
            return false;
        }
        match node.parent_id.and_then(|id| arena.get(id).ok()) {
            Some(parent) if parent.is_element_named("tr") => {
                arena.first_match(parent.node_id, &cond).is_some()
            }
            _ => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::by_class_name;

    #[test]
    fn test_cells_of_marked_rows() {
        let mut arena = DomArena::new();
        let table = arena.add_node(DomNode::element("table"));

        let plain = arena.append_child(table, DomNode::element("tr")).unwrap();
        arena.append_child(plain, DomNode::element("td")).unwrap();

        let marked = arena.append_child(table, DomNode::element("tr")).unwrap();
        let a = arena.append_child(marked, DomNode::element("td")).unwrap();
        let b = arena.append_child(marked, DomNode::element("td")).unwrap();
        arena
            .append_child(b, DomNode::element_with_attrs("a", &[("class", "hot")]))
            .unwrap();

        // td outside a tr never counts
        let stray = arena.append_child(table, DomNode::element("td")).unwrap();
        arena
            .append_child(stray, DomNode::element_with_attrs("a", &[("class", "hot")]))
            .unwrap();

        let hot = row_cells_where(&arena, table, by_class_name("hot"));
        assert_eq!(hot, vec![a, b]);
        let cold = row_cells_where(&arena, table, by_class_name("cold"));
        assert!(cold.is_empty());
    }
}
