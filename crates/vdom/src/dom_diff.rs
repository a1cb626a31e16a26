//! Positional snapshot diffing to patch sets.
//!
//! Contract:
//! - Nodes are matched by position only; there are no keys.
//! - Indices follow the pre-order walk the patcher performs over the live tree
//!   rendered from `old`, so index `k` names the `k`-th live node.
//! - Children are compared pairwise over the old child list. New children past
//!   the old length have no live counterpart and are not visited.
//! - Removed and replaced subtrees are not descended into, but their
//!   descendants still consume indices because the live walk visits them.
//! - Attribute changes are computed over the attribute map only.
//!
//! Complexity: O(n) in the number of old nodes.

use crate::dom_patch::{AttributeChanges, PatchOp, PatchSet};
use crate::traverse::subtree_len;
use crate::types::{Attributes, Node};

/// Traversal cursor carried through one diff.
///
/// [`diff_dom`] always starts from a fresh state. Keeping a state across
/// [`diff_dom_with_state`] calls continues numbering where the previous call
/// stopped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DomDiffState {
    next_index: usize,
}

impl DomDiffState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number from `index`, for a subtree whose root sits at that position in
    /// a larger live walk.
    pub fn starting_at(index: usize) -> Self {
        Self { next_index: index }
    }

    /// Index the next visited node will receive.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    fn take_index(&mut self) -> usize {
        let index = self.next_index;
        self.next_index += 1;
        index
    }

    fn skip_descendants(&mut self, node: &Node) {
        self.next_index += subtree_len(node) - 1;
    }
}

pub fn diff_dom(old: &Node, new: &Node) -> PatchSet {
    let mut state = DomDiffState::new();
    diff_dom_with_state(&mut state, old, new)
}

pub fn diff_dom_with_state(state: &mut DomDiffState, old: &Node, new: &Node) -> PatchSet {
    let first = state.next_index();
    let mut patches = PatchSet::new();
    let index = state.take_index();
    walk(old, Some(new), index, state, &mut patches);
    log::debug!(
        target: "vdom.diff",
        "diffed indices {first}..{}: {} operations at {} indices",
        state.next_index(),
        patches.op_count(),
        patches.len()
    );
    patches
}

fn walk(
    old: &Node,
    new: Option<&Node>,
    index: usize,
    state: &mut DomDiffState,
    patches: &mut PatchSet,
) {
    let mut ops = Vec::new();
    match (old, new) {
        (_, None) => {
            ops.push(PatchOp::Remove);
            state.skip_descendants(old);
        }
        (Node::Text { text: old_text }, Some(Node::Text { text: new_text })) => {
            if old_text != new_text {
                ops.push(PatchOp::ModifyText {
                    data: new_text.clone(),
                });
            }
        }
        (
            Node::Element {
                name: old_name,
                attributes: old_attrs,
                children: old_children,
            },
            Some(Node::Element {
                name: new_name,
                attributes: new_attrs,
                children: new_children,
            }),
        ) if old_name == new_name => {
            let changes = diff_attributes(old_attrs, new_attrs);
            if !changes.is_empty() {
                ops.push(PatchOp::ModifyAttributes { changes });
            }
            for (i, child) in old_children.iter().enumerate() {
                let child_index = state.take_index();
                walk(child, new_children.get(i), child_index, state, patches);
            }
        }
        (_, Some(new)) => {
            ops.push(PatchOp::Replace { node: new.clone() });
            state.skip_descendants(old);
        }
    }

    for op in &ops {
        log::trace!(target: "vdom.diff", "index {index}: {}", op.label());
    }
    if !ops.is_empty() {
        patches.insert(index, ops);
    }
}

/// Keys whose value changed or disappeared, plus keys that are new.
pub fn diff_attributes(old: &Attributes, new: &Attributes) -> AttributeChanges {
    let mut changes = AttributeChanges::new();
    for (key, old_value) in old {
        match new.get(key) {
            Some(new_value) if new_value == old_value => {}
            new_value => {
                changes.insert(key.clone(), new_value.cloned());
            }
        }
    }
    for (key, value) in new {
        if !old.contains_key(key) {
            changes.insert(key.clone(), Some(value.clone()));
        }
    }
    changes
}
