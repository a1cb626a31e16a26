//! Materialization of snapshots into a host tree.

use crate::attrs::apply_attribute;
use crate::error::ReconcileError;
use crate::host::HostTree;
use crate::types::Node;

/// Build a detached live subtree for `node` and return its root handle.
///
/// Element names must be non-empty and free of whitespace; anything else is
/// reported as [`ReconcileError::MalformedNode`] with the path of the
/// offending node. Nodes created before the error stay detached.
pub fn render<H: HostTree>(host: &mut H, node: &Node) -> Result<H::Handle, ReconcileError> {
    let mut path = vec![node_label(node, None)];
    render_node(host, node, &mut path)
}

/// Render `node` and append it as the last child of `target`.
pub fn mount<H: HostTree>(
    host: &mut H,
    target: H::Handle,
    node: &Node,
) -> Result<H::Handle, ReconcileError> {
    let root = render(host, node)?;
    host.append_child(target, root)?;
    log::debug!(target: "vdom.render", "mounted {root:?} under {target:?}");
    Ok(root)
}

fn render_node<H: HostTree>(
    host: &mut H,
    node: &Node,
    path: &mut Vec<String>,
) -> Result<H::Handle, ReconcileError> {
    match node {
        Node::Text { text } => Ok(host.create_text(text)),
        Node::Element {
            name,
            attributes,
            children,
        } => {
            check_name(name, path)?;
            let element = host.create_element(name);
            log::trace!(target: "vdom.render", "created <{name}> as {element:?}");
            for (key, value) in attributes {
                apply_attribute(host, element, key, value)?;
            }
            for (idx, child) in children.iter().enumerate() {
                path.push(node_label(child, Some(idx)));
                let rendered = render_node(host, child, path);
                path.pop();
                host.append_child(element, rendered?)?;
            }
            Ok(element)
        }
    }
}

/// Check a snapshot the way [`render`] would, without touching a host.
pub fn check_snapshot(node: &Node) -> Result<(), ReconcileError> {
    fn walk(node: &Node, path: &mut Vec<String>) -> Result<(), ReconcileError> {
        if let Node::Element { name, children, .. } = node {
            check_name(name, path)?;
            for (idx, child) in children.iter().enumerate() {
                path.push(node_label(child, Some(idx)));
                let result = walk(child, path);
                path.pop();
                result?;
            }
        }
        Ok(())
    }

    let mut path = vec![node_label(node, None)];
    walk(node, &mut path)
}

fn check_name(name: &str, path: &[String]) -> Result<(), ReconcileError> {
    if name.is_empty() {
        return Err(ReconcileError::malformed(path, "element without a tag name"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(ReconcileError::malformed(
            path,
            format!("tag name {name:?} contains whitespace"),
        ));
    }
    Ok(())
}

fn node_label(node: &Node, idx: Option<usize>) -> String {
    let base = match node {
        Node::Element { name, .. } if name.is_empty() => "<unnamed>".to_string(),
        Node::Element { name, .. } => name.clone(),
        Node::Text { .. } => "#text".to_string(),
    };
    match idx {
        Some(idx) => format!("{base}[{idx}]"),
        None => base,
    }
}
