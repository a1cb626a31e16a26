//! In-memory host tree.
//!
//! Nodes live in a flat arena and are addressed by [`HostId`]. Detached nodes
//! keep their slot so handles held by a caller never dangle.
//!
//! Element state mirrors what a browser keeps per element:
//! - an ordered attribute list,
//! - an inline style declaration (the reflected `style` attribute),
//! - a live `value` that diverges from the `value` attribute once written.

use crate::error::HostError;
use crate::host::{HostNodeKind, HostTree};
use crate::types::{Attributes, Node};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostId(pub u32);

#[derive(Default)]
pub struct HostArena {
    nodes: Vec<NodeRecord>,
}

struct NodeRecord {
    kind: NodeKind,
    parent: Option<HostId>,
    children: Vec<HostId>,
}

impl NodeRecord {
    fn allows_children(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }
}

enum NodeKind {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        style_text: String,
        value: Option<String>,
    },
    Text {
        text: String,
    },
}

impl HostArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of nodes ever created, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn attribute(&self, id: HostId, key: &str) -> Option<&str> {
        match &self.record(id).ok()?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn style_text(&self, id: HostId) -> Option<&str> {
        match &self.record(id).ok()?.kind {
            NodeKind::Element { style_text, .. } => Some(style_text.as_str()),
            NodeKind::Text { .. } => None,
        }
    }

    /// The value a user would see in a form control: the live value once it
    /// has been written, the `value` attribute before that.
    pub fn value(&self, id: HostId) -> Option<&str> {
        match &self.record(id).ok()?.kind {
            NodeKind::Element { value: Some(v), .. } => Some(v.as_str()),
            NodeKind::Element { .. } => self.attribute(id, "value"),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn text(&self, id: HostId) -> Option<&str> {
        match &self.record(id).ok()?.kind {
            NodeKind::Text { text } => Some(text.as_str()),
            NodeKind::Element { .. } => None,
        }
    }

    /// Simulate a user typing into a control.
    pub fn user_edit(&mut self, id: HostId, typed: &str) -> Result<(), HostError> {
        match &mut self.record_mut(id)?.kind {
            NodeKind::Element { value, .. } => {
                *value = Some(typed.to_string());
                Ok(())
            }
            NodeKind::Text { .. } => Err(HostError::not_an_element(id)),
        }
    }

    /// Read a live subtree back as a snapshot.
    ///
    /// A non-empty style declaration is reported as the `style` attribute and
    /// a written live value as the `value` attribute.
    pub fn materialize(&self, id: HostId) -> Result<Node, HostError> {
        let record = self.record(id)?;
        let node = match &record.kind {
            NodeKind::Element {
                name,
                attributes,
                style_text,
                value,
            } => {
                let mut attrs: Attributes = attributes.iter().cloned().collect();
                if !style_text.is_empty() {
                    attrs.insert("style".to_string(), style_text.clone());
                }
                if let Some(value) = value {
                    attrs.insert("value".to_string(), value.clone());
                }
                let children = record
                    .children
                    .iter()
                    .map(|child| self.materialize(*child))
                    .collect::<Result<Vec<_>, _>>()?;
                Node::Element {
                    name: name.clone(),
                    attributes: attrs,
                    children,
                }
            }
            NodeKind::Text { text } => Node::Text { text: text.clone() },
        };
        Ok(node)
    }

    fn insert_node(&mut self, kind: NodeKind) -> HostId {
        let id = slot_id(self.nodes.len());
        self.nodes.push(NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn record(&self, id: HostId) -> Result<&NodeRecord, HostError> {
        self.nodes
            .get(id.0 as usize)
            .ok_or_else(|| HostError::unknown_node(id))
    }

    fn record_mut(&mut self, id: HostId) -> Result<&mut NodeRecord, HostError> {
        self.nodes
            .get_mut(id.0 as usize)
            .ok_or_else(|| HostError::unknown_node(id))
    }

    fn ensure_attachable(&self, parent: HostId, child: HostId) -> Result<(), HostError> {
        if !self.record(parent)?.allows_children() {
            debug_assert!(false, "parent node cannot have children");
            return Err(HostError::not_an_element(parent));
        }
        if self.record(child)?.parent.is_some() {
            debug_assert!(false, "child already has a parent");
            return Err(HostError::already_attached(child));
        }
        if parent == child || self.is_descendant(child, parent) {
            debug_assert!(false, "cannot create cycle");
            return Err(HostError::cycle_detected(parent, child));
        }
        Ok(())
    }

    fn child_position(&self, parent: HostId, child: HostId) -> Result<usize, HostError> {
        self.record(parent)?
            .children
            .iter()
            .position(|k| *k == child)
            .ok_or_else(|| HostError::not_a_child(parent, child))
    }

    fn is_descendant(&self, ancestor: HostId, maybe_descendant: HostId) -> bool {
        let Ok(record) = self.record(ancestor) else {
            return false;
        };
        let mut stack = record.children.clone();
        while let Some(current) = stack.pop() {
            if current == maybe_descendant {
                return true;
            }
            if let Ok(record) = self.record(current) {
                stack.extend(record.children.iter().copied());
            }
        }
        false
    }
}

impl HostTree for HostArena {
    type Handle = HostId;

    fn create_element(&mut self, name: &str) -> HostId {
        self.insert_node(NodeKind::Element {
            name: name.to_string(),
            attributes: Vec::new(),
            style_text: String::new(),
            value: None,
        })
    }

    fn create_text(&mut self, text: &str) -> HostId {
        self.insert_node(NodeKind::Text {
            text: text.to_string(),
        })
    }

    fn append_child(&mut self, parent: HostId, child: HostId) -> Result<(), HostError> {
        self.ensure_attachable(parent, child)?;
        self.record_mut(parent)?.children.push(child);
        self.record_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn replace_child(
        &mut self,
        parent: HostId,
        old_child: HostId,
        new_child: HostId,
    ) -> Result<(), HostError> {
        let pos = self.child_position(parent, old_child)?;
        self.ensure_attachable(parent, new_child)?;
        self.record_mut(parent)?.children[pos] = new_child;
        self.record_mut(old_child)?.parent = None;
        self.record_mut(new_child)?.parent = Some(parent);
        Ok(())
    }

    fn remove_child(&mut self, parent: HostId, child: HostId) -> Result<(), HostError> {
        let pos = self.child_position(parent, child)?;
        self.record_mut(parent)?.children.remove(pos);
        self.record_mut(child)?.parent = None;
        Ok(())
    }

    fn set_attribute(&mut self, node: HostId, key: &str, value: &str) -> Result<(), HostError> {
        match &mut self.record_mut(node)?.kind {
            NodeKind::Element { style_text, .. } if key == "style" => {
                style_text.clear();
                style_text.push_str(value);
                Ok(())
            }
            NodeKind::Element { attributes, .. } => {
                match attributes.iter_mut().find(|(k, _)| k == key) {
                    Some((_, existing)) => {
                        existing.clear();
                        existing.push_str(value);
                    }
                    None => attributes.push((key.to_string(), value.to_string())),
                }
                Ok(())
            }
            NodeKind::Text { .. } => Err(HostError::not_an_element(node)),
        }
    }

    fn remove_attribute(&mut self, node: HostId, key: &str) -> Result<(), HostError> {
        match &mut self.record_mut(node)?.kind {
            NodeKind::Element { style_text, .. } if key == "style" => {
                style_text.clear();
                Ok(())
            }
            NodeKind::Element { attributes, .. } => {
                attributes.retain(|(k, _)| k != key);
                Ok(())
            }
            NodeKind::Text { .. } => Err(HostError::not_an_element(node)),
        }
    }

    fn set_style_text(&mut self, node: HostId, css: &str) -> Result<(), HostError> {
        match &mut self.record_mut(node)?.kind {
            NodeKind::Element { style_text, .. } => {
                style_text.clear();
                style_text.push_str(css);
                Ok(())
            }
            NodeKind::Text { .. } => Err(HostError::not_an_element(node)),
        }
    }

    fn set_value(&mut self, node: HostId, value: &str) -> Result<(), HostError> {
        match &mut self.record_mut(node)?.kind {
            NodeKind::Element { value: live, .. } => {
                *live = Some(value.to_string());
                Ok(())
            }
            NodeKind::Text { .. } => Err(HostError::not_an_element(node)),
        }
    }

    fn set_text(&mut self, node: HostId, text: &str) -> Result<(), HostError> {
        match &mut self.record_mut(node)?.kind {
            NodeKind::Text { text: existing } => {
                existing.clear();
                existing.push_str(text);
                Ok(())
            }
            NodeKind::Element { .. } => Err(HostError::not_a_text(node)),
        }
    }

    fn kind(&self, node: HostId) -> Result<HostNodeKind, HostError> {
        Ok(match self.record(node)?.kind {
            NodeKind::Element { .. } => HostNodeKind::Element,
            NodeKind::Text { .. } => HostNodeKind::Text,
        })
    }

    fn tag_name(&self, node: HostId) -> Result<Option<&str>, HostError> {
        Ok(match &self.record(node)?.kind {
            NodeKind::Element { name, .. } => Some(name.as_str()),
            NodeKind::Text { .. } => None,
        })
    }

    fn child_nodes(&self, node: HostId) -> Result<&[HostId], HostError> {
        Ok(&self.record(node)?.children)
    }

    fn parent_node(&self, node: HostId) -> Result<Option<HostId>, HostError> {
        Ok(self.record(node)?.parent)
    }
}

/// Handle for the slot at `len`. Node creation has no error path, so running
/// out of `u32` handles panics like a `Vec` capacity overflow would.
fn slot_id(len: usize) -> HostId {
    let raw = u32::try_from(len);
    debug_assert!(raw.is_ok(), "host arena ran out of node handles");
    match raw {
        Ok(raw) => HostId(raw),
        Err(_) => panic!("host arena ran out of node handles at {len} nodes"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_ids_follow_arena_order() {
        let mut arena = HostArena::new();
        let first = arena.create_element("ul");
        let second = arena.create_text("a");
        assert_eq!((first, second), (HostId(0), HostId(1)));
        assert_eq!(slot_id(u32::MAX as usize), HostId(u32::MAX));
    }

    #[test]
    #[should_panic(expected = "ran out of node handles")]
    fn slot_ids_never_wrap() {
        slot_id(u32::MAX as usize + 1);
    }

    fn list_with_items(arena: &mut HostArena, items: &[&str]) -> (HostId, Vec<HostId>) {
        let list = arena.create_element("ul");
        let children = items
            .iter()
            .map(|text| {
                let li = arena.create_element("li");
                let t = arena.create_text(text);
                arena.append_child(li, t).unwrap();
                arena.append_child(list, li).unwrap();
                li
            })
            .collect();
        (list, children)
    }

    #[test]
    fn append_and_remove_keep_sibling_order() {
        let mut arena = HostArena::new();
        let (list, items) = list_with_items(&mut arena, &["a", "b", "c"]);
        arena.remove_child(list, items[1]).unwrap();
        assert_eq!(arena.child_nodes(list).unwrap(), &[items[0], items[2]]);
        assert_eq!(arena.parent_node(items[1]).unwrap(), None);
    }

    #[test]
    fn replace_child_keeps_position() {
        let mut arena = HostArena::new();
        let (list, items) = list_with_items(&mut arena, &["a", "b", "c"]);
        let heading = arena.create_element("h1");
        arena.replace_child(list, items[1], heading).unwrap();
        assert_eq!(arena.child_nodes(list).unwrap(), &[items[0], heading, items[2]]);
        assert_eq!(arena.parent_node(heading).unwrap(), Some(list));
        assert_eq!(arena.parent_node(items[1]).unwrap(), None);
    }

    #[test]
    fn remove_of_non_child_is_rejected() {
        let mut arena = HostArena::new();
        let (list, _) = list_with_items(&mut arena, &["a"]);
        let stray = arena.create_element("p");
        let err = arena.remove_child(list, stray).unwrap_err();
        assert!(matches!(err, HostError::NotAChild { .. }));
    }

    #[test]
    fn text_nodes_reject_attributes() {
        let mut arena = HostArena::new();
        let text = arena.create_text("hi");
        let err = arena.set_attribute(text, "id", "x").unwrap_err();
        assert!(matches!(err, HostError::NotAnElement { .. }));
    }

    #[test]
    fn style_attribute_reflects_declaration() {
        let mut arena = HostArena::new();
        let div = arena.create_element("div");
        arena.set_style_text(div, "color:blue").unwrap();
        assert_eq!(arena.style_text(div), Some("color:blue"));
        arena.remove_attribute(div, "style").unwrap();
        assert_eq!(arena.style_text(div), Some(""));
    }

    #[test]
    fn live_value_diverges_from_attribute() {
        let mut arena = HostArena::new();
        let input = arena.create_element("input");
        arena.set_attribute(input, "value", "initial").unwrap();
        assert_eq!(arena.value(input), Some("initial"));
        arena.user_edit(input, "typed").unwrap();
        assert_eq!(arena.value(input), Some("typed"));
        assert_eq!(arena.attribute(input, "value"), Some("initial"));
    }

    #[test]
    fn materialize_reads_back_snapshot() {
        let mut arena = HostArena::new();
        let (list, items) = list_with_items(&mut arena, &["a"]);
        arena.set_attribute(list, "id", "list").unwrap();
        arena.set_style_text(items[0], "color:red").unwrap();
        let expected = Node::element(
            "ul",
            [("id", "list")],
            [Node::element(
                "li",
                [("style", "color:red")],
                [Node::text("a")],
            )],
        );
        assert_eq!(arena.materialize(list).unwrap(), expected);
    }
}
