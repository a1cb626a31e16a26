use crate::Node;
use crate::dom_patch::{PatchOp, PatchSet};
use crate::traverse::find_node_by_index;
use std::fmt::Write;

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;

/// One line per node, indented by depth, stopping after `cap` nodes.
pub fn outline(root: &Node, cap: usize) -> Vec<String> {
    fn walk(node: &Node, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let mut line = INDENT_STEP.repeat(depth);
        match node {
            Node::Element {
                name, attributes, ..
            } => {
                line.push('<');
                line.push_str(name);
                for key in ["id", "class"] {
                    if let Some(value) = attributes.get(key).filter(|v| !v.is_empty()) {
                        let _ = write!(line, r#" {key}="{value}""#);
                    }
                }
                line.push('>');
                if let Some(style) = attributes.get("style").filter(|v| !v.is_empty()) {
                    line.push_str("  /* ");
                    line.push_str(style);
                    line.push_str(" */");
                }
            }
            Node::Text { text } => {
                line.push('"');
                push_preview(&mut line, text.trim(), PREVIEW_CHARS);
                line.push('"');
            }
        }
        out.push(line);
        for child in node.children() {
            walk(child, depth + 1, out, left);
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(root, 0, &mut out, &mut left);
    out
}

/// Human-readable listing of a patch set against the snapshot it was diffed
/// from, one line per operation.
pub fn describe_patches(old: &Node, patches: &PatchSet) -> Vec<String> {
    let mut out = Vec::with_capacity(patches.op_count());
    for (index, ops) in patches.iter() {
        let target = match find_node_by_index(old, index) {
            Some(Node::Element { name, .. }) => format!("<{name}>"),
            Some(Node::Text { text }) => {
                let mut label = String::from("\"");
                push_preview(&mut label, text, PREVIEW_CHARS);
                label.push('"');
                label
            }
            None => "<out of range>".to_string(),
        };
        for op in ops {
            let mut line = format!("{index:>4} {target} {}", op.label());
            match op {
                PatchOp::Remove => {}
                PatchOp::ModifyText { data } => {
                    line.push_str(" -> \"");
                    push_preview(&mut line, data, PREVIEW_CHARS);
                    line.push('"');
                }
                PatchOp::ModifyAttributes { changes } => {
                    for (key, value) in changes {
                        match value {
                            Some(value) => {
                                let _ = write!(line, " {key}={value:?}");
                            }
                            None => {
                                let _ = write!(line, " -{key}");
                            }
                        }
                    }
                }
                PatchOp::Replace { node } => {
                    let _ = write!(line, " -> {}", outline(node, 1).concat());
                }
            }
            out.push(line);
        }
    }
    out
}

fn push_preview(out: &mut String, s: &str, max_chars: usize) {
    for (i, ch) in s.chars().enumerate() {
        if i == max_chars {
            out.push('…');
            break;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
}
