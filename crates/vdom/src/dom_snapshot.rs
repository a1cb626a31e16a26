//! Structural comparison of snapshots for reconcile tests.
//!
//! [`DomSnapshot`] flattens a tree into one line per node so two trees can be
//! diffed line by line; [`compare_dom`] walks both trees together and reports
//! the first difference with the path of the node where it was found.

use crate::Node;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq)]
pub struct DomSnapshot {
    lines: Vec<String>,
}

impl DomSnapshot {
    pub fn new(root: &Node) -> Self {
        fn walk(node: &Node, depth: usize, out: &mut Vec<String>) {
            let indent = "  ".repeat(depth);
            match node {
                Node::Element {
                    name, attributes, ..
                } => {
                    let attrs: String = attributes
                        .iter()
                        .map(|(key, value)| format!(" {key}={value:?}"))
                        .collect();
                    out.push(format!("{indent}<{name}{attrs}>"));
                }
                Node::Text { text } => out.push(format!("{indent}{text:?}")),
            }
            for child in node.children() {
                walk(child, depth + 1, out);
            }
        }

        let mut lines = Vec::new();
        walk(root, 0, &mut lines);
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for DomSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// First difference between two trees, located by a path such as
/// `/ul#list/li[1]/#text[0]`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("snapshot mismatch at {path}: {detail}")]
pub struct DomMismatch {
    path: String,
    detail: String,
}

impl DomMismatch {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

pub fn compare_dom(expected: &Node, actual: &Node) -> Result<(), DomMismatch> {
    let mut path = vec![label(expected, None)];
    compare_nodes(expected, actual, &mut path).map_err(|detail| DomMismatch {
        path: format!("/{}", path.join("/")),
        detail,
    })
}

pub fn assert_dom_eq(expected: &Node, actual: &Node) {
    if let Err(mismatch) = compare_dom(expected, actual) {
        panic!(
            "{mismatch}\nexpected:\n{}\nactual:\n{}",
            DomSnapshot::new(expected),
            DomSnapshot::new(actual)
        );
    }
}

// On failure `path` is left pointing at the differing node.
fn compare_nodes(expected: &Node, actual: &Node, path: &mut Vec<String>) -> Result<(), String> {
    match (expected, actual) {
        (Node::Text { text: want }, Node::Text { text: got }) => {
            if want != got {
                return Err(format!("text {want:?} != {got:?}"));
            }
            Ok(())
        }
        (
            Node::Element {
                name: want_name,
                attributes: want_attrs,
                children: want_children,
            },
            Node::Element {
                name: got_name,
                attributes: got_attrs,
                children: got_children,
            },
        ) => {
            if want_name != got_name {
                return Err(format!("tag <{want_name}> != <{got_name}>"));
            }
            let keys: BTreeSet<&String> = want_attrs.keys().chain(got_attrs.keys()).collect();
            for key in keys {
                let (want, got) = (want_attrs.get(key), got_attrs.get(key));
                if want != got {
                    return Err(format!("attribute {key}: {want:?} != {got:?}"));
                }
            }
            if want_children.len() != got_children.len() {
                return Err(format!(
                    "child count {} != {}",
                    want_children.len(),
                    got_children.len()
                ));
            }
            for (idx, (want, got)) in want_children.iter().zip(got_children).enumerate() {
                path.push(label(want, Some(idx)));
                compare_nodes(want, got, path)?;
                path.pop();
            }
            Ok(())
        }
        (Node::Element { .. }, Node::Text { .. }) => Err("expected element, found text".into()),
        (Node::Text { .. }, Node::Element { .. }) => Err("expected text, found element".into()),
    }
}

fn label(node: &Node, idx: Option<usize>) -> String {
    let mut label = match node {
        Node::Element {
            name, attributes, ..
        } => match attributes.get("id").filter(|id| !id.is_empty()) {
            Some(id) => format!("{name}#{id}"),
            None => name.clone(),
        },
        Node::Text { .. } => "#text".to_string(),
    };
    if let Some(idx) = idx {
        label.push_str(&format!("[{idx}]"));
    }
    label
}
