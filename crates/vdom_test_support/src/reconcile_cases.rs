//! Declarative reconcile cases stored as TOML.
//!
//! Each case names an old and a new tree, the patch lines the diff must
//! produce, and whether patching a render of the old tree must read back as
//! the new one. Trees are written inline: a string is a text node, a table is
//! an element with `tag`, optional `attributes` and optional `children`.

use crate::escape_text;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use vdom::{Node, PatchOp, PatchSet, ReconcileError};

pub const RECONCILE_CASES_FORMAT_V1: &str = "vdom-reconcile-v1";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum NodeSpec {
    Text(String),
    Element(ElementSpec),
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ElementSpec {
    pub tag: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    /// Convert to a snapshot. An element without `tag` is reported as a
    /// malformed node with the same path format rendering uses.
    pub fn to_node(&self) -> Result<Node, ReconcileError> {
        let mut path = vec![self.label(None)];
        self.to_node_at(&mut path)
    }

    fn to_node_at(&self, path: &mut Vec<String>) -> Result<Node, ReconcileError> {
        match self {
            NodeSpec::Text(text) => Ok(Node::text(text.as_str())),
            NodeSpec::Element(element) => {
                let Some(tag) = element.tag.as_deref() else {
                    return Err(ReconcileError::malformed(path, "element without a tag name"));
                };
                let mut children = Vec::with_capacity(element.children.len());
                for (idx, child) in element.children.iter().enumerate() {
                    path.push(child.label(Some(idx)));
                    let converted = child.to_node_at(path);
                    path.pop();
                    children.push(converted?);
                }
                Ok(Node::Element {
                    name: tag.to_string(),
                    attributes: element.attributes.clone(),
                    children,
                })
            }
        }
    }

    fn label(&self, idx: Option<usize>) -> String {
        let base = match self {
            NodeSpec::Text(_) => "#text",
            NodeSpec::Element(ElementSpec { tag: Some(tag), .. }) if !tag.is_empty() => {
                tag.as_str()
            }
            NodeSpec::Element(_) => "<unnamed>",
        };
        match idx {
            Some(idx) => format!("{base}[{idx}]"),
            None => base.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconcileCase {
    pub id: String,
    pub covers: String,
    pub old: NodeSpec,
    pub new: NodeSpec,
    /// Expected output of [`patch_lines`] for the diff of `old` and `new`.
    #[serde(default)]
    pub patches: Vec<String>,
    #[serde(default = "default_converges")]
    pub converges: bool,
    /// Set when one of the trees cannot be converted; holds the reported path.
    pub malformed_path: Option<String>,
}

fn default_converges() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReconcileManifest {
    format: String,
    cases: Vec<ReconcileCase>,
}

pub fn load_reconcile_cases(path: &Path) -> Vec<ReconcileCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read reconcile cases {path:?}: {err}"));
    let manifest: ReconcileManifest = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse reconcile cases {path:?}: {err}"));
    assert_eq!(
        manifest.format, RECONCILE_CASES_FORMAT_V1,
        "unsupported reconcile case format in {path:?}"
    );
    assert!(
        !manifest.cases.is_empty(),
        "reconcile case file {path:?} has no cases"
    );
    let mut ids = BTreeSet::new();
    for case in &manifest.cases {
        assert!(
            !case.id.trim().is_empty(),
            "case id must be non-empty in {path:?}"
        );
        assert!(
            ids.insert(case.id.as_str()),
            "duplicate case id in {path:?}: {}",
            case.id
        );
        assert!(
            case.malformed_path.is_none() || case.patches.is_empty(),
            "malformed case {} must not list patches",
            case.id
        );
    }
    manifest.cases
}

/// One line per operation: `<index> <LABEL>` followed by the operation's
/// payload in a compact form.
pub fn patch_lines(patches: &PatchSet) -> Vec<String> {
    let mut out = Vec::with_capacity(patches.op_count());
    for (index, ops) in patches.iter() {
        for op in ops {
            let mut line = format!("{index} {}", op.label());
            match op {
                PatchOp::Remove => {}
                PatchOp::ModifyText { data } => {
                    line.push_str(&format!(" \"{}\"", escape_text(data)));
                }
                PatchOp::ModifyAttributes { changes } => {
                    for (key, value) in changes {
                        match value {
                            Some(value) => {
                                line.push_str(&format!(" {key}=\"{}\"", escape_text(value)))
                            }
                            None => line.push_str(&format!(" -{key}")),
                        }
                    }
                }
                PatchOp::Replace { node } => match node {
                    Node::Element { name, .. } => line.push_str(&format!(" <{name}>")),
                    Node::Text { text } => {
                        line.push_str(&format!(" \"{}\"", escape_text(text)))
                    }
                },
            }
            out.push(line);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(spec: &str) -> NodeSpec {
        #[derive(Deserialize)]
        struct Wrapper {
            node: NodeSpec,
        }
        toml::from_str::<Wrapper>(&format!("node = {spec}"))
            .expect("node spec")
            .node
    }

    #[test]
    fn converts_inline_trees() {
        let spec = parse(r#"{ tag = "p", attributes = { class = "msg" }, children = ["hi"] }"#);
        assert_eq!(
            spec.to_node().unwrap(),
            Node::element("p", [("class", "msg")], [Node::text("hi")])
        );
    }

    #[test]
    fn missing_tag_reports_path() {
        let spec = parse(r#"{ tag = "ul", children = ["a", { children = ["b"] }] }"#);
        let err = spec.to_node().unwrap_err();
        assert_eq!(err, ReconcileError::MalformedNode {
            path: "/ul/<unnamed>[1]".to_string(),
            reason: "element without a tag name".to_string(),
        });
    }

    #[test]
    fn patch_lines_are_compact() {
        let mut patches = PatchSet::new();
        patches.push(0, PatchOp::ModifyAttributes {
            changes: [
                ("id".to_string(), Some("new".to_string())),
                ("title".to_string(), None),
            ]
            .into_iter()
            .collect(),
        });
        patches.push(3, PatchOp::Replace {
            node: Node::element("h1", [("class", "x")], [Node::text("t")]),
        });
        patches.push(5, PatchOp::Remove);
        assert_eq!(patch_lines(&patches), [
            r#"0 MODIFY_ATTRIBUTES id="new" -title"#,
            "3 REPLACE <h1>",
            "5 REMOVE",
        ]);
    }
}
