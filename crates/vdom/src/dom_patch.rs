//! Positional patch protocol.
//!
//! A [`PatchSet`] is produced by one diff and consumed by one patch walk.
//!
//! Invariants:
//! - Indices are pre-order positions: the root is 0, a parent comes before its
//!   children, siblings left to right.
//! - Operations recorded under one index are applied in order.
//! - An index with no operation has no entry; an entry is never empty.
//! - Attribute changes map a key to `Some(value)` to set it and `None` to
//!   remove it.

use crate::types::Node;
use std::collections::BTreeMap;

pub type AttributeChanges = BTreeMap<String, Option<String>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatchOp {
    /// Detach the node from its parent.
    Remove,
    /// Overwrite the data of a text node.
    ModifyText { data: String },
    /// Set or remove attributes on an element.
    ModifyAttributes { changes: AttributeChanges },
    /// Swap the node, with its whole subtree, for a freshly rendered one.
    Replace { node: Node },
}

impl PatchOp {
    pub fn label(&self) -> &'static str {
        match self {
            PatchOp::Remove => "REMOVE",
            PatchOp::ModifyText { .. } => "MODIFY_TEXT",
            PatchOp::ModifyAttributes { .. } => "MODIFY_ATTRIBUTES",
            PatchOp::Replace { .. } => "REPLACE",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatchSet {
    entries: BTreeMap<usize, Vec<PatchOp>>,
}

impl PatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of indices with at least one operation.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of operations across all indices.
    pub fn op_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn get(&self, index: usize) -> Option<&[PatchOp]> {
        self.entries.get(&index).map(Vec::as_slice)
    }

    pub fn max_index(&self) -> Option<usize> {
        self.entries.keys().next_back().copied()
    }

    /// Entries in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[PatchOp])> + '_ {
        self.entries
            .iter()
            .map(|(index, ops)| (*index, ops.as_slice()))
    }

    /// Append `op` to the operations recorded at `index`.
    pub fn push(&mut self, index: usize, op: PatchOp) {
        self.entries.entry(index).or_default().push(op);
    }

    pub(crate) fn insert(&mut self, index: usize, ops: Vec<PatchOp>) {
        debug_assert!(!ops.is_empty(), "patch entries must not be empty");
        self.entries.insert(index, ops);
    }
}
