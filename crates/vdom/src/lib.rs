pub mod arena;
pub mod debug;
pub mod dom_apply;
pub mod dom_diff;
#[cfg(any(test, feature = "dom-snapshot"))]
pub mod dom_snapshot;
pub mod fixtures;
pub mod host;
pub mod traverse;

mod attrs;
mod dom_patch;
mod error;
mod render;
mod types;

pub use crate::arena::{HostArena, HostId};
pub use crate::attrs::{apply_attribute, remove_attribute};
pub use crate::dom_apply::{PatchOptions, PatchReport, apply_patches, apply_patches_with_options};
pub use crate::dom_diff::{DomDiffState, diff_attributes, diff_dom, diff_dom_with_state};
pub use crate::dom_patch::{AttributeChanges, PatchOp, PatchSet};
pub use crate::error::{HostError, ReconcileError};
pub use crate::host::{HostNodeKind, HostTree};
pub use crate::render::{check_snapshot, mount, render};
pub use crate::types::{Attributes, Node};
