use std::process;

use clap::{Parser, ValueEnum};
use mimalloc::MiMalloc;
use vdom::debug::{describe_patches, outline};
use vdom::fixtures::{chapter_list, chapter_list_next, make_list};
use vdom::{
    HostArena, HostTree, Node, PatchOptions, ReconcileError, apply_patches_with_options,
    diff_dom, mount,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Render a tree into an in-memory host, diff it against its successor and
/// patch the live tree in place.
#[derive(Debug, Parser)]
#[command(name = "vdom-demo", version, about)]
struct Options {
    /// Which pair of trees to reconcile.
    #[arg(long, value_enum, default_value_t = Scenario::Chapters)]
    scenario: Scenario,

    /// Item count for the list scenarios.
    #[arg(long, default_value_t = 5)]
    items: usize,

    /// Apply patches without checking them against the live tree first.
    #[arg(long)]
    no_validate: bool,

    /// Sets verbosity level. Can be specified multiple times.
    #[arg(long = "verbose", short, action = clap::ArgAction::Count)]
    verbosity: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Three chapters whose attributes, text and tags all change.
    Chapters,
    /// A list losing all but its first item.
    Shrink,
    /// A list gaining items, which positional patching leaves out.
    Grow,
}

impl Scenario {
    fn trees(self, items: usize) -> (Node, Node) {
        match self {
            Scenario::Chapters => (chapter_list(), chapter_list_next()),
            Scenario::Shrink => (make_list(items), make_list(1)),
            Scenario::Grow => (make_list(items), make_list(items * 2)),
        }
    }
}

fn main() {
    let options = Options::parse();

    let log_filter = match options.verbosity {
        0 => "info",
        1 => "info,vdom=debug",
        2 => "info,vdom=trace",
        _ => "trace",
    };

    let log_env = env_logger::Env::default().default_filter_or(log_filter);

    env_logger::Builder::from_env(log_env)
        .format_module_path(false)
        .format_timestamp(None)
        .format_indent(Some(8))
        .init();

    if let Err(err) = run(&options) {
        log::error!("{err}");
        process::exit(1);
    }
}

fn run(options: &Options) -> Result<(), ReconcileError> {
    let (old, new) = options.scenario.trees(options.items);

    let mut host = HostArena::new();
    let body = host.create_element("body");
    let root = mount(&mut host, body, &old)?;
    print_section("before", &host.materialize(root)?);

    let patches = diff_dom(&old, &new);
    log::info!(
        "{:?}: {} operations at {} indices",
        options.scenario,
        patches.op_count(),
        patches.len()
    );
    println!("patches:");
    for line in describe_patches(&old, &patches) {
        println!("  {line}");
    }

    let patch_options = PatchOptions {
        validate: !options.no_validate,
    };
    let report = apply_patches_with_options(&mut host, root, &patches, patch_options)?;
    log::info!(
        "applied {} operations over {} live nodes",
        report.applied,
        report.visited
    );

    let patched = host.materialize(report.root)?;
    print_section("after", &patched);
    if patched != new {
        log::warn!("live tree differs from the new snapshot; positional patching never inserts");
    }
    Ok(())
}

fn print_section(title: &str, tree: &Node) {
    println!("{title}:");
    for line in outline(tree, usize::MAX) {
        println!("  {line}");
    }
}
