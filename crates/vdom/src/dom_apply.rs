//! Patch application over a live host tree.
//!
//! The walk numbers live nodes in pre-order, the same way the differ numbered
//! the old snapshot, and applies the operations recorded for a node only after
//! all of its children were handled. Child lists are copied before descending,
//! so a removal or replacement never shifts the numbering of later siblings.
//!
//! With [`PatchOptions::validate`] set (the default), every index and target
//! kind is checked before the first mutation, and a failing patch set leaves
//! the live tree untouched.

use crate::attrs::{apply_attribute, remove_attribute};
use crate::dom_patch::{PatchOp, PatchSet};
use crate::error::ReconcileError;
use crate::host::{HostNodeKind, HostTree};
use crate::render::{check_snapshot, render};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatchOptions {
    /// Check indices, target kinds and replacement snapshots up front.
    pub validate: bool,
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self { validate: true }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatchReport<Handle> {
    /// Root of the patched tree. Differs from the input root when index 0 was
    /// replaced.
    pub root: Handle,
    /// Live nodes numbered by the walk.
    pub visited: usize,
    /// Operations applied.
    pub applied: usize,
}

pub fn apply_patches<H: HostTree>(
    host: &mut H,
    root: H::Handle,
    patches: &PatchSet,
) -> Result<PatchReport<H::Handle>, ReconcileError> {
    apply_patches_with_options(host, root, patches, PatchOptions::default())
}

pub fn apply_patches_with_options<H: HostTree>(
    host: &mut H,
    root: H::Handle,
    patches: &PatchSet,
    options: PatchOptions,
) -> Result<PatchReport<H::Handle>, ReconcileError> {
    if options.validate {
        validate(host, root, patches)?;
    }

    let mut walker = PatchWalker {
        host,
        patches,
        root,
        next_index: 0,
        applied: 0,
    };
    walker.walk(root)?;

    let visited = walker.next_index;
    if let Some(index) = patches.max_index().filter(|index| *index >= visited) {
        return Err(ReconcileError::IndexOutOfRange { index, visited });
    }

    log::debug!(
        target: "vdom.patch",
        "applied {} operations over {visited} live nodes",
        walker.applied
    );
    Ok(PatchReport {
        root: walker.root,
        visited,
        applied: walker.applied,
    })
}

fn validate<H: HostTree>(
    host: &H,
    root: H::Handle,
    patches: &PatchSet,
) -> Result<(), ReconcileError> {
    fn collect<H: HostTree>(
        host: &H,
        node: H::Handle,
        out: &mut Vec<H::Handle>,
    ) -> Result<(), ReconcileError> {
        out.push(node);
        for &child in host.child_nodes(node)? {
            collect(host, child, out)?;
        }
        Ok(())
    }

    let mut slots = Vec::new();
    collect(host, root, &mut slots)?;

    for (index, ops) in patches.iter() {
        let Some(&node) = slots.get(index) else {
            return Err(ReconcileError::IndexOutOfRange {
                index,
                visited: slots.len(),
            });
        };
        let kind = host.kind(node)?;
        // after a REMOVE or REPLACE the node is out of the tree
        let mut detached = false;
        for op in ops {
            if detached {
                return Err(ReconcileError::DetachedTarget { index });
            }
            match op {
                PatchOp::ModifyAttributes { .. } if kind == HostNodeKind::Text => {
                    return Err(ReconcileError::UnsupportedAttributeTarget { index });
                }
                PatchOp::ModifyText { .. } if kind == HostNodeKind::Element => {
                    return Err(ReconcileError::UnsupportedTextTarget { index });
                }
                PatchOp::Remove | PatchOp::Replace { .. } if host.parent_node(node)?.is_none() => {
                    return Err(ReconcileError::DetachedTarget { index });
                }
                _ => {}
            }
            match op {
                PatchOp::Replace { node: replacement } => {
                    check_snapshot(replacement)?;
                    detached = true;
                }
                PatchOp::Remove => detached = true,
                _ => {}
            }
        }
    }
    Ok(())
}

struct PatchWalker<'a, H: HostTree> {
    host: &'a mut H,
    patches: &'a PatchSet,
    root: H::Handle,
    next_index: usize,
    applied: usize,
}

impl<H: HostTree> PatchWalker<'_, H> {
    fn walk(&mut self, node: H::Handle) -> Result<(), ReconcileError> {
        let index = self.next_index;
        self.next_index += 1;

        let children = self.host.child_nodes(node)?.to_vec();
        for child in children {
            self.walk(child)?;
        }

        let patches = self.patches;
        if let Some(ops) = patches.get(index) {
            log::debug!(
                target: "vdom.patch",
                "index {index}: {} operations on {node:?}",
                ops.len()
            );
            for op in ops {
                self.apply(node, index, op)?;
            }
        }
        Ok(())
    }

    fn apply(&mut self, node: H::Handle, index: usize, op: &PatchOp) -> Result<(), ReconcileError> {
        log::trace!(target: "vdom.patch", "index {index}: {} on {node:?}", op.label());
        match op {
            PatchOp::ModifyAttributes { changes } => {
                if self.host.kind(node)? != HostNodeKind::Element {
                    return Err(ReconcileError::UnsupportedAttributeTarget { index });
                }
                for (key, value) in changes {
                    match value {
                        Some(value) => apply_attribute(&mut *self.host, node, key, value)?,
                        None => remove_attribute(&mut *self.host, node, key)?,
                    }
                }
            }
            PatchOp::ModifyText { data } => {
                if self.host.kind(node)? != HostNodeKind::Text {
                    return Err(ReconcileError::UnsupportedTextTarget { index });
                }
                self.host.set_text(node, data)?;
            }
            PatchOp::Replace { node: replacement } => {
                let parent = self.parent_of(node, index)?;
                let fresh = render(&mut *self.host, replacement)?;
                self.host.replace_child(parent, node, fresh)?;
                if node == self.root {
                    self.root = fresh;
                }
            }
            PatchOp::Remove => {
                let parent = self.parent_of(node, index)?;
                self.host.remove_child(parent, node)?;
            }
        }
        self.applied += 1;
        Ok(())
    }

    fn parent_of(&self, node: H::Handle, index: usize) -> Result<H::Handle, ReconcileError> {
        self.host
            .parent_node(node)?
            .ok_or(ReconcileError::DetachedTarget { index })
    }
}
