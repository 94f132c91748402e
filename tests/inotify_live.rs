// tests/inotify_live.rs
//
// End-to-end runs against a real inotify instance on a temporary tree.

mod common;

use std::fs;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::ExitStatus;

use tokio::sync::oneshot;

use lk_reducer::config::model::DEFAULT_EVENT_BUFFER_SIZE;
use lk_reducer::engine::{Classifier, Collection, Collector};
use lk_reducer::registry::PathRegistry;
use lk_reducer::scan::scan_tree;
use lk_reducer::types::Verdict;
use lk_reducer::watch::{InotifyBackend, InotifySource, WatchTable};
use lk_reducer_test_utils::builders::{TreeBuilder, canonical_root};

use crate::common::{init_tracing, verdict_lines, with_timeout};

fn start(root: &Path) -> Collector<InotifySource> {
    let mut backend = InotifyBackend::init().unwrap();
    let mut registry = PathRegistry::new();
    let mut watches = WatchTable::new();
    scan_tree(root, &mut backend, &mut registry, &mut watches).unwrap();
    let source = backend.into_source(DEFAULT_EVENT_BUFFER_SIZE).unwrap();
    Collector::new(Classifier::new(registry, watches), source)
}

/// Signal shell exit right away; everything already queued still counts.
async fn finish(collector: Collector<InotifySource>) -> Collection {
    let (tx, rx) = oneshot::channel();
    tx.send(Ok(ExitStatus::from_raw(0))).unwrap();
    collector.run(rx).await.unwrap()
}

#[tokio::test]
async fn test_compile_like_activity_is_classified() {
    with_timeout(async {
        init_tracing();
        let dir = TreeBuilder::new()
            .file("src/main.c")
            .file("README.md")
            .dir("build")
            .build();
        let root = canonical_root(&dir);
        let collector = start(&root);

        fs::read(root.join("src/main.c")).unwrap();
        fs::write(root.join("build/main.o"), b"obj").unwrap();

        let collection = finish(collector).await;

        assert_eq!(
            verdict_lines(&collection.registry),
            vec!["A src/main.c", "G build/main.o", "U README.md"]
        );
    })
    .await
}

#[tokio::test]
async fn test_files_in_directories_created_during_the_build_are_invisible() {
    with_timeout(async {
        init_tracing();
        let dir = TreeBuilder::new().dir("build").build();
        let root = canonical_root(&dir);
        let collector = start(&root);

        fs::create_dir(root.join("build/tmp")).unwrap();
        fs::write(root.join("build/tmp/obj.o"), b"obj").unwrap();

        let collection = finish(collector).await;

        assert_eq!(collection.registry.get("build/tmp"), Some(Verdict::Generated));
        assert!(!collection.registry.contains("build/tmp/obj.o"));
        assert_eq!(collection.registry.len(), 1);
    })
    .await
}

#[tokio::test]
async fn test_rename_into_watched_directory_is_generated() {
    with_timeout(async {
        init_tracing();
        let dir = TreeBuilder::new().file("README.md").dir("build").build();
        let root = canonical_root(&dir);
        let collector = start(&root);

        fs::rename(root.join("README.md"), root.join("build/README.md")).unwrap();

        let collection = finish(collector).await;

        // A rename is not an open of the source.
        assert_eq!(collection.registry.get("README.md"), Some(Verdict::Untouched));
        assert_eq!(
            collection.registry.get("build/README.md"),
            Some(Verdict::Generated)
        );
    })
    .await
}

#[tokio::test]
async fn test_untouched_tree_reports_untouched() {
    with_timeout(async {
        init_tracing();
        let dir = TreeBuilder::new().file("README.md").file("docs/guide.md").build();
        let root = canonical_root(&dir);
        let collector = start(&root);

        let collection = finish(collector).await;

        assert_eq!(
            verdict_lines(&collection.registry),
            vec!["U README.md", "U docs/guide.md"]
        );
        assert_eq!(collection.stats.notifications, 0);
    })
    .await
}

#[tokio::test]
async fn test_many_events_span_several_reads() {
    with_timeout(async {
        init_tracing();
        let dir = TreeBuilder::new().dir("out").build();
        let root = canonical_root(&dir);

        let mut backend = InotifyBackend::init().unwrap();
        let mut registry = PathRegistry::new();
        let mut watches = WatchTable::new();
        scan_tree(&root, &mut backend, &mut registry, &mut watches).unwrap();
        // Small buffer: each read holds only a few records.
        let source = backend.into_source(256).unwrap();
        let collector = Collector::new(Classifier::new(registry, watches), source);

        for i in 0..200 {
            fs::write(root.join(format!("out/file-{i:03}.o")), b"x").unwrap();
        }

        let collection = finish(collector).await;

        assert_eq!(collection.registry.counts().generated, 200);
        assert!(collection.stats.batches > 1);
    })
    .await
}
