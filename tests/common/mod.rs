#![allow(dead_code)]

pub use lk_reducer_test_utils::builders;
pub use lk_reducer_test_utils::{init_tracing, with_timeout};

use std::path::Path;

use lk_reducer::registry::PathRegistry;
use lk_reducer::watch::WatchTable;

/// Registry + watch table for a tree of:
///
/// ```text
/// README.md
/// src/main.c
/// build/
/// ```
///
/// with handles `1 -> ""`, `2 -> "src"`, `3 -> "build"`.
pub fn sample_snapshot() -> (PathRegistry, WatchTable<u32>) {
    let mut registry = PathRegistry::new();
    registry.register_existing("README.md").unwrap();
    registry.register_existing("src/main.c").unwrap();

    let mut watches = WatchTable::new();
    watches.insert(1, "").unwrap();
    watches.insert(2, "src").unwrap();
    watches.insert(3, "build").unwrap();

    (registry, watches)
}

/// Lines of the report as a sorted list, for order-independent comparisons.
pub fn verdict_lines(registry: &PathRegistry) -> Vec<String> {
    let mut lines: Vec<String> = registry
        .iter()
        .map(|(path, verdict)| format!("{} {}", verdict.tag(), path_str(path)))
        .collect();
    lines.sort();
    lines
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
