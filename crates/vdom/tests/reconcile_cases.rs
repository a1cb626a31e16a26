use std::path::{Path, PathBuf};
use vdom::{HostArena, HostTree, Node, apply_patches, diff_dom, mount, render};
use vdom_test_support::diff_lines;
use vdom_test_support::reconcile_cases::{ReconcileCase, load_reconcile_cases, patch_lines};

#[derive(Clone, Debug)]
struct CaseFailure {
    id: String,
    message: String,
}

fn cases_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/reconcile.toml")
}

#[test]
fn reconcile_cases() {
    let path = cases_path();
    let cases = load_reconcile_cases(&path);
    let mut failures = Vec::new();
    for case in &cases {
        if let Err(message) = run_case(case) {
            failures.push(CaseFailure {
                id: case.id.clone(),
                message,
            });
        }
    }
    if !failures.is_empty() {
        let mut report = format!("{} of {} reconcile cases failed\n", failures.len(), cases.len());
        for failure in &failures {
            report.push_str(&format!("--- {}\n{}\n", failure.id, failure.message));
        }
        panic!("{report}");
    }
}

fn run_case(case: &ReconcileCase) -> Result<(), String> {
    let converted = case.old.to_node().and_then(|old| case.new.to_node().map(|new| (old, new)));
    let (old, new) = match (converted, case.malformed_path.as_deref()) {
        (Ok(trees), None) => trees,
        (Err(vdom::ReconcileError::MalformedNode { path, .. }), Some(expected)) => {
            return if path == expected {
                Ok(())
            } else {
                Err(format!("malformed at {path}, expected {expected}"))
            };
        }
        (Ok(_), Some(expected)) => {
            return Err(format!("expected a malformed node at {expected}"));
        }
        (Err(err), _) => return Err(format!("could not build trees: {err}")),
    };

    let patches = diff_dom(&old, &new);
    let lines = patch_lines(&patches);
    if lines != case.patches {
        return Err(format!("patch lines differ\n{}", diff_lines(&case.patches, &lines)));
    }

    let patched = patch_mounted(&old, &new)?;
    match (case.converges, patched == new) {
        (true, false) | (false, true) => Err(format!(
            "converges = {} but patched tree was {patched:?}",
            case.converges
        )),
        _ => Ok(()),
    }
}

fn patch_mounted(old: &Node, new: &Node) -> Result<Node, String> {
    let mut arena = HostArena::new();
    let body = arena.create_element("body");
    let root = mount(&mut arena, body, old).map_err(|err| err.to_string())?;
    let report =
        apply_patches(&mut arena, root, &diff_dom(old, new)).map_err(|err| err.to_string())?;
    if arena.child_nodes(body).map_err(|err| err.to_string())? != [report.root] {
        return Err("patched root is no longer the only child of its container".to_string());
    }
    arena.materialize(report.root).map_err(|err| err.to_string())
}

#[test]
fn malformed_case_fails_to_render_too() {
    let cases = load_reconcile_cases(&cases_path());
    let case = cases
        .iter()
        .find(|case| case.malformed_path.is_some())
        .expect("a malformed case");
    let with_empty_tag = Node::element("ul", [("id", "list")], [Node::element(
        "",
        [("class", "x")],
        [Node::text("x")],
    )]);
    let err = render(&mut HostArena::new(), &with_empty_tag).unwrap_err();
    assert_eq!(
        err,
        case.old.to_node().unwrap_err(),
        "render and case loading disagree on the malformed path"
    );
}
