use crate::types::Node;

/// Three chapters in a list, the tree most reconcile tests start from.
pub fn chapter_list() -> Node {
    Node::element(
        "ul",
        [("id", "list")],
        (1..=3).map(|n| {
            Node::element("li", [("class", "chapter")], [Node::text(format!(
                "chapter{n}"
            ))])
        }),
    )
}

/// Successor of [`chapter_list`]: every attribute and text changes, the second
/// item gains a style and the third item turns into a heading.
pub fn chapter_list_next() -> Node {
    Node::element("ul", [("id", "list-new")], [
        Node::element("li", [("class", "chapter-new")], [Node::text("chapter1-new")]),
        Node::element("li", [("class", "chapter-new"), ("style", "color:blue")], [
            Node::text("chapter2-new"),
        ]),
        Node::element("h1", [("class", "chapter-new")], [Node::text("chapter3-new")]),
    ])
}

/// `ul` with `len` items, each holding a single text node.
pub fn make_list(len: usize) -> Node {
    Node::element(
        "ul",
        [("id", "list")],
        (0..len).map(|i| {
            Node::element("li", [("class", "item")], [Node::text(format!("item {i}"))])
        }),
    )
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum FixtureKind {
    Attribute,
    Text,
    Replace,
    Remove,
    Append,
    Property,
    Mixed,
}

#[derive(Clone, Copy, Debug)]
pub struct ReconcileFixture {
    pub name: &'static str,
    pub covers: &'static str,
    pub kind: FixtureKind,
    pub old: fn() -> Node,
    pub new: fn() -> Node,
    /// Whether patching a render of `old` must read back as `new`. False when
    /// `new` appends children, which the positional walk never visits.
    pub converges: bool,
}

const RECONCILE_CORPUS_V1: &[ReconcileFixture] = &[
    ReconcileFixture {
        name: "chapter_list",
        covers: "Attribute, text and tag changes across a three item list.",
        kind: FixtureKind::Mixed,
        old: chapter_list,
        new: chapter_list_next,
        converges: true,
    },
    ReconcileFixture {
        name: "text_only",
        covers: "Single text change under an unchanged element.",
        kind: FixtureKind::Text,
        old: greeting,
        new: farewell,
        converges: true,
    },
    ReconcileFixture {
        name: "attribute_removal",
        covers: "Attribute present in old and absent in new is removed.",
        kind: FixtureKind::Attribute,
        old: titled_link,
        new: plain_link,
        converges: true,
    },
    ReconcileFixture {
        name: "style_change",
        covers: "Inline style is replaced as a whole declaration.",
        kind: FixtureKind::Attribute,
        old: red_box,
        new: blue_box,
        converges: true,
    },
    ReconcileFixture {
        name: "trailing_removal",
        covers: "Children missing from new are removed without skipping siblings.",
        kind: FixtureKind::Remove,
        old: list_of_four,
        new: list_of_two,
        converges: true,
    },
    ReconcileFixture {
        name: "appended_children",
        covers: "Children added past the old length are not inserted.",
        kind: FixtureKind::Append,
        old: list_of_two,
        new: list_of_four,
        converges: false,
    },
    ReconcileFixture {
        name: "nested_replace",
        covers: "Replaced subtree is not descended and later indices stay aligned.",
        kind: FixtureKind::Replace,
        old: paragraph_and_span,
        new: heading_and_span,
        converges: true,
    },
    ReconcileFixture {
        name: "input_value",
        covers: "Value change on an input updates the live value.",
        kind: FixtureKind::Property,
        old: query_form,
        new: query_form_next,
        converges: true,
    },
];

pub fn fixtures() -> &'static [ReconcileFixture] {
    RECONCILE_CORPUS_V1
}

fn greeting() -> Node {
    Node::element("p", [("class", "msg")], [Node::text("hello")])
}

fn farewell() -> Node {
    Node::element("p", [("class", "msg")], [Node::text("goodbye")])
}

fn titled_link() -> Node {
    Node::element("a", [("href", "/"), ("title", "home")], [Node::text("home")])
}

fn plain_link() -> Node {
    Node::element("a", [("href", "/")], [Node::text("home")])
}

fn red_box() -> Node {
    Node::element("div", [("style", "color:red;margin:0")], [Node::text("box")])
}

fn blue_box() -> Node {
    Node::element("div", [("style", "color:blue")], [Node::text("box")])
}

fn list_of_two() -> Node {
    make_list(2)
}

fn list_of_four() -> Node {
    make_list(4)
}

fn paragraph_and_span() -> Node {
    Node::element("div", [("id", "root")], [
        Node::element("p", [("id", "p")], [Node::text("x"), Node::text("y")]),
        Node::element("span", [("id", "s")], [Node::text("old")]),
    ])
}

fn heading_and_span() -> Node {
    Node::element("div", [("id", "root")], [
        Node::element("h1", [("id", "p")], [Node::text("x")]),
        Node::element("span", [("id", "s")], [Node::text("new")]),
    ])
}

fn query_form() -> Node {
    Node::element("form", [("action", "/search")], [Node::element(
        "input",
        [("name", "q"), ("value", "rust")],
        Vec::new(),
    )])
}

fn query_form_next() -> Node {
    Node::element("form", [("action", "/search")], [Node::element(
        "input",
        [("name", "q"), ("value", "rust diff")],
        Vec::new(),
    )])
}
