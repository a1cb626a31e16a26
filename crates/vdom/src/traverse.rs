use crate::Node;

/// Number of nodes in the subtree rooted at `node`, `node` included.
pub fn subtree_len(node: &Node) -> usize {
    1 + node.children().iter().map(subtree_len).sum::<usize>()
}

/// Find the node visited at `index` by a pre-order walk starting at `root`
/// (index 0).
pub fn find_node_by_index(root: &Node, index: usize) -> Option<&Node> {
    fn walk<'a>(node: &'a Node, target: usize, next: &mut usize) -> Option<&'a Node> {
        if *next == target {
            return Some(node);
        }
        *next += 1;
        for child in node.children() {
            if let Some(found) = walk(child, target, next) {
                return Some(found);
            }
        }
        None
    }

    let mut next = 0;
    walk(root, index, &mut next)
}

/// True when both trees have the same node kinds, element names and child
/// counts at every level.
pub fn same_shape(a: &Node, b: &Node) -> bool {
    match (a, b) {
        (Node::Text { .. }, Node::Text { .. }) => true,
        (
            Node::Element {
                name: a_name,
                children: a_children,
                ..
            },
            Node::Element {
                name: b_name,
                children: b_children,
                ..
            },
        ) => {
            a_name == b_name
                && a_children.len() == b_children.len()
                && a_children
                    .iter()
                    .zip(b_children)
                    .all(|(a, b)| same_shape(a, b))
        }
        _ => false,
    }
}
