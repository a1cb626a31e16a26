use vdom::dom_snapshot::{assert_dom_eq, compare_dom};
use vdom::fixtures::{chapter_list, chapter_list_next, fixtures, make_list};
use vdom::{
    DomDiffState, HostArena, HostId, HostTree, Node, PatchOp, PatchSet, ReconcileError,
    apply_patches, diff_dom, diff_dom_with_state, mount,
};
use vdom_test_support::assert_same_snapshot;

fn mounted(node: &Node) -> (HostArena, HostId, HostId) {
    let mut arena = HostArena::new();
    let body = arena.create_element("body");
    let root = mount(&mut arena, body, node).expect("mount");
    (arena, body, root)
}

#[test]
fn chapter_list_end_to_end() {
    let (mut arena, body, root) = mounted(&chapter_list());
    let patches = diff_dom(&chapter_list(), &chapter_list_next());
    let report = apply_patches(&mut arena, root, &patches).expect("apply");

    assert_eq!(report.root, root);
    assert_eq!(arena.child_nodes(body).unwrap(), &[root]);
    assert_eq!(arena.attribute(root, "id"), Some("list-new"));

    let items = arena.child_nodes(root).unwrap().to_vec();
    assert_eq!(items.len(), 3);
    assert_eq!(arena.style_text(items[1]), Some("color:blue"));
    assert_eq!(arena.tag_name(items[2]).unwrap(), Some("h1"));
    assert_eq!(arena.attribute(items[2], "class"), Some("chapter-new"));

    assert_same_snapshot(
        "chapter list",
        &chapter_list_next(),
        &arena.materialize(root).unwrap(),
    );
}

#[test]
fn value_change_overrides_user_input() {
    let form = |value: &str| {
        Node::element("form", [("action", "/search")], [Node::element(
            "input",
            [("name", "q"), ("value", value)],
            Vec::new(),
        )])
    };
    let (mut arena, _, root) = mounted(&form("a"));
    let input = arena.child_nodes(root).unwrap()[0];
    arena.user_edit(input, "typed by hand").unwrap();

    let patches = diff_dom(&form("a"), &form("x"));
    assert_eq!(
        patches.get(1),
        Some(
            &[PatchOp::ModifyAttributes {
                changes: [("value".to_string(), Some("x".to_string()))]
                    .into_iter()
                    .collect(),
            }][..]
        )
    );
    apply_patches(&mut arena, root, &patches).unwrap();
    assert_eq!(arena.value(input), Some("x"));
}

#[test]
fn unchanged_value_keeps_user_input() {
    let form = Node::element("form", [("action", "/search")], [Node::element(
        "input",
        [("name", "q"), ("value", "a")],
        Vec::new(),
    )]);
    let (mut arena, _, root) = mounted(&form);
    let input = arena.child_nodes(root).unwrap()[0];
    arena.user_edit(input, "typed by hand").unwrap();

    let patches = diff_dom(&form, &form);
    assert!(patches.is_empty());
    apply_patches(&mut arena, root, &patches).unwrap();
    assert_eq!(arena.value(input), Some("typed by hand"));
}

#[test]
fn fixtures_converge_under_snapshot_comparison() {
    for fixture in fixtures().iter().filter(|fixture| fixture.converges) {
        let (old, new) = ((fixture.old)(), (fixture.new)());
        let (mut arena, _, root) = mounted(&old);
        let report = apply_patches(&mut arena, root, &diff_dom(&old, &new))
            .unwrap_or_else(|err| panic!("{}: {err}", fixture.name));
        let patched = arena.materialize(report.root).unwrap();
        if let Err(mismatch) = compare_dom(&new, &patched) {
            panic!("{}: {mismatch}", fixture.name);
        }
    }
}

#[test]
fn shrinking_list_removes_every_trailing_item() {
    let (mut arena, _, root) = mounted(&make_list(5));
    let patches = diff_dom(&make_list(5), &make_list(1));
    assert_eq!(patches.op_count(), 4);
    let report = apply_patches(&mut arena, root, &patches).unwrap();
    assert_eq!(report.applied, 4);
    assert_dom_eq(&make_list(1), &arena.materialize(root).unwrap());
}

#[test]
fn subtree_diff_numbered_from_its_live_position() {
    let (mut arena, _, root) = mounted(&chapter_list());
    let old_item = chapter_list().children()[1].clone();
    let new_item = Node::element("li", [("class", "chapter")], [Node::text("chapter two")]);

    // the second item sits at index 3 of the live walk
    let mut state = DomDiffState::starting_at(3);
    let patches = diff_dom_with_state(&mut state, &old_item, &new_item);
    assert_eq!(state.next_index(), 5);
    assert_eq!(patches.max_index(), Some(4));

    apply_patches(&mut arena, root, &patches).unwrap();
    let mut expected = chapter_list();
    if let Node::Element { children, .. } = &mut expected {
        children[1] = new_item;
    }
    assert_same_snapshot("second item", &expected, &arena.materialize(root).unwrap());
}

#[test]
fn rejected_patch_set_leaves_live_tree_untouched() {
    let (mut arena, _, root) = mounted(&chapter_list());
    let mut patches: PatchSet = diff_dom(&chapter_list(), &chapter_list_next());
    patches.push(4, PatchOp::ModifyAttributes {
        changes: [("class".to_string(), None)].into_iter().collect(),
    });

    let err = apply_patches(&mut arena, root, &patches).unwrap_err();
    assert_eq!(err, ReconcileError::UnsupportedAttributeTarget { index: 4 });
    assert_same_snapshot(
        "after rejection",
        &chapter_list(),
        &arena.materialize(root).unwrap(),
    );

    let mut too_far = PatchSet::new();
    too_far.push(7, PatchOp::Remove);
    let err = apply_patches(&mut arena, root, &too_far).unwrap_err();
    assert_eq!(err, ReconcileError::IndexOutOfRange {
        index: 7,
        visited: 7
    });
}
