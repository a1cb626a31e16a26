use std::fmt::Debug;

use thiserror::Error;

/// Contract violations reported by a host tree implementation.
///
/// Handles are rendered with their `Debug` form so the error type stays
/// independent of the host's handle type.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("unknown host node {node}")]
    UnknownNode { node: String },

    #[error("host node {node} is not an element")]
    NotAnElement { node: String },

    #[error("host node {node} is not a text node")]
    NotAText { node: String },

    #[error("host node {child} is not a child of {parent}")]
    NotAChild { parent: String, child: String },

    #[error("host node {child} already has a parent")]
    AlreadyAttached { child: String },

    #[error("attaching {child} under {parent} would create a cycle")]
    CycleDetected { parent: String, child: String },
}

impl HostError {
    pub fn unknown_node(node: impl Debug) -> Self {
        Self::UnknownNode {
            node: format!("{node:?}"),
        }
    }

    pub fn not_an_element(node: impl Debug) -> Self {
        Self::NotAnElement {
            node: format!("{node:?}"),
        }
    }

    pub fn not_a_text(node: impl Debug) -> Self {
        Self::NotAText {
            node: format!("{node:?}"),
        }
    }

    pub fn not_a_child(parent: impl Debug, child: impl Debug) -> Self {
        Self::NotAChild {
            parent: format!("{parent:?}"),
            child: format!("{child:?}"),
        }
    }

    pub fn already_attached(child: impl Debug) -> Self {
        Self::AlreadyAttached {
            child: format!("{child:?}"),
        }
    }

    pub fn cycle_detected(parent: impl Debug, child: impl Debug) -> Self {
        Self::CycleDetected {
            parent: format!("{parent:?}"),
            child: format!("{child:?}"),
        }
    }
}

/// Failures surfaced while rendering snapshots or applying a patch set.
///
/// None of these are retryable: each one means the caller handed the engine
/// inputs that break its contract.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("malformed node at {path}: {reason}")]
    MalformedNode { path: String, reason: String },

    #[error("patch set references index {index} but the live tree has {visited} nodes")]
    IndexOutOfRange { index: usize, visited: usize },

    #[error("attribute changes target the text node at index {index}")]
    UnsupportedAttributeTarget { index: usize },

    #[error("text change targets the element at index {index}")]
    UnsupportedTextTarget { index: usize },

    #[error("node at index {index} has no parent to detach it from")]
    DetachedTarget { index: usize },

    #[error(transparent)]
    Host(#[from] HostError),
}

impl ReconcileError {
    pub fn malformed(path: &[String], reason: impl Into<String>) -> Self {
        Self::MalformedNode {
            path: format!("/{}", path.join("/")),
            reason: reason.into(),
        }
    }
}
