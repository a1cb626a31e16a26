use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use vdom::fixtures::make_list;
use vdom::{HostArena, HostTree, Node, apply_patches, diff_dom, mount, render};

const SMALL_ITEMS: usize = 64;
const LARGE_ITEMS: usize = 20_000;

/// Same shape as `make_list(len)` with every item's class and text changed,
/// so the diff touches two indices per item.
fn make_changed_list(len: usize) -> Node {
    Node::element(
        "ul",
        [("id", "list")],
        (0..len).map(|i| {
            Node::element("li", [("class", "item-new")], [Node::text(format!("item {i} new"))])
        }),
    )
}

fn bench_diff_identical_large(c: &mut Criterion) {
    let old = make_list(LARGE_ITEMS);
    let new = make_list(LARGE_ITEMS);
    c.bench_function("bench_diff_identical_large", |b| {
        b.iter(|| {
            let patches = diff_dom(black_box(&old), black_box(&new));
            black_box(patches.len());
        });
    });
}

fn bench_diff_changed_small(c: &mut Criterion) {
    let old = make_list(SMALL_ITEMS);
    let new = make_changed_list(SMALL_ITEMS);
    c.bench_function("bench_diff_changed_small", |b| {
        b.iter(|| {
            let patches = diff_dom(black_box(&old), black_box(&new));
            black_box(patches.op_count());
        });
    });
}

fn bench_diff_changed_large(c: &mut Criterion) {
    let old = make_list(LARGE_ITEMS);
    let new = make_changed_list(LARGE_ITEMS);
    c.bench_function("bench_diff_changed_large", |b| {
        b.iter(|| {
            let patches = diff_dom(black_box(&old), black_box(&new));
            black_box(patches.op_count());
        });
    });
}

fn bench_render_large(c: &mut Criterion) {
    let tree = make_list(LARGE_ITEMS);
    c.bench_function("bench_render_large", |b| {
        b.iter(|| {
            let mut arena = HostArena::new();
            let root = render(&mut arena, black_box(&tree)).expect("render");
            black_box((root, arena.len()));
        });
    });
}

fn bench_patch_changed_large(c: &mut Criterion) {
    let old = make_list(LARGE_ITEMS);
    let new = make_changed_list(LARGE_ITEMS);
    let patches = diff_dom(&old, &new);
    c.bench_function("bench_patch_changed_large", |b| {
        b.iter_batched(
            || {
                let mut arena = HostArena::new();
                let body = arena.create_element("body");
                let root = mount(&mut arena, body, &old).expect("mount");
                (arena, root)
            },
            |(mut arena, root)| {
                let report = apply_patches(&mut arena, root, black_box(&patches)).expect("apply");
                black_box(report.applied);
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_diff_identical_large,
    bench_diff_changed_small,
    bench_diff_changed_large,
    bench_render_large,
    bench_patch_changed_large
);
criterion_main!(benches);
