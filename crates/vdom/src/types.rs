use std::collections::BTreeMap;

/// Attribute map of an element snapshot. Keys are unique; iteration order is
/// by key so that diffs and snapshots are deterministic.
pub type Attributes = BTreeMap<String, String>;

/// Immutable description of a UI tree at one point in time.
///
/// Snapshots carry no identity: children are matched purely by position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element {
        name: String,
        attributes: Attributes,
        children: Vec<Node>,
    },
    Text {
        text: String,
    },
}

impl Node {
    /// Build an element snapshot. No validation happens here; a bad tag name
    /// is only reported once the snapshot is rendered.
    pub fn element<N, A, K, V, C>(name: N, attributes: A, children: C) -> Node
    where
        N: Into<String>,
        A: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
        C: IntoIterator<Item = Node>,
    {
        Node::Element {
            name: name.into(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            children: children.into_iter().collect(),
        }
    }

    pub fn text(text: impl Into<String>) -> Node {
        Node::Text { text: text.into() }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            Node::Text { .. } => None,
        }
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            Node::Element { attributes, .. } => Some(attributes),
            Node::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text { .. } => &[],
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::text(text)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text { text }
    }
}
