//! Host tree capability consumed by the renderer and the patcher.
//!
//! The engine never owns a live tree. It materializes and mutates one only
//! through this trait, so a real UI toolkit binding and the in-memory
//! [`HostArena`](crate::HostArena) are interchangeable.
//!
//! # Contract
//!
//! - Handles are cheap copies that stay valid after their node is detached.
//! - `child_nodes` reflects the current order of children; callers that mutate
//!   while iterating take a copy first.
//! - Implementations report broken preconditions (unknown handle, wrong node
//!   kind, non-child) as [`HostError`] instead of panicking.

use crate::error::HostError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostNodeKind {
    Element,
    Text,
}

pub trait HostTree {
    type Handle: Copy + Eq + std::fmt::Debug;

    // =========================================================================
    // Creation
    // =========================================================================

    fn create_element(&mut self, name: &str) -> Self::Handle;

    fn create_text(&mut self, text: &str) -> Self::Handle;

    // =========================================================================
    // Structure
    // =========================================================================

    /// Append `child` as the last child of `parent`. `child` must be detached.
    fn append_child(
        &mut self,
        parent: Self::Handle,
        child: Self::Handle,
    ) -> Result<(), HostError>;

    /// Put detached `new_child` at the position of `old_child`, detaching the
    /// latter.
    fn replace_child(
        &mut self,
        parent: Self::Handle,
        old_child: Self::Handle,
        new_child: Self::Handle,
    ) -> Result<(), HostError>;

    fn remove_child(
        &mut self,
        parent: Self::Handle,
        child: Self::Handle,
    ) -> Result<(), HostError>;

    // =========================================================================
    // Content
    // =========================================================================

    fn set_attribute(
        &mut self,
        node: Self::Handle,
        key: &str,
        value: &str,
    ) -> Result<(), HostError>;

    fn remove_attribute(&mut self, node: Self::Handle, key: &str) -> Result<(), HostError>;

    /// Replace the whole inline style declaration of an element.
    fn set_style_text(&mut self, node: Self::Handle, css: &str) -> Result<(), HostError>;

    /// Write the live value of a form control (not its `value` attribute).
    fn set_value(&mut self, node: Self::Handle, value: &str) -> Result<(), HostError>;

    /// Overwrite the data of a text node.
    fn set_text(&mut self, node: Self::Handle, text: &str) -> Result<(), HostError>;

    // =========================================================================
    // Queries
    // =========================================================================

    fn kind(&self, node: Self::Handle) -> Result<HostNodeKind, HostError>;

    /// Tag name as created; `None` for text nodes.
    fn tag_name(&self, node: Self::Handle) -> Result<Option<&str>, HostError>;

    fn child_nodes(&self, node: Self::Handle) -> Result<&[Self::Handle], HostError>;

    fn parent_node(&self, node: Self::Handle) -> Result<Option<Self::Handle>, HostError>;
}
