//! Property tests: convergence and idempotence over generated trees.

use std::collections::BTreeMap;

use mirror_core::{MemorySink, SyncEngine};
use mirror_test_utils::{MirrorFixture, tree_snapshot};
use proptest::prelude::*;

/// A generated tree: relative path -> Some(content) for files, None for dirs.
type Layout = BTreeMap<String, Option<Vec<u8>>>;

fn segment() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d.txt", "e.bin"]).prop_map(String::from)
}

fn layout() -> impl Strategy<Value = Layout> {
    let entry = (
        prop::collection::vec(segment(), 1..4),
        prop::option::of(prop::collection::vec(any::<u8>(), 0..64)),
    );
    prop::collection::vec(entry, 0..12).prop_map(|entries| {
        let mut layout = Layout::new();
        for (segments, content) in entries {
            let path = segments.join("/");
            // A path cannot be both a file and a parent of something else.
            let clashes = layout.keys().any(|existing: &String| {
                existing.starts_with(&format!("{path}/")) || path.starts_with(&format!("{existing}/"))
            });
            if !clashes && !layout.contains_key(&path) {
                layout.insert(path, content);
            }
        }
        layout
    })
}

fn materialize(root: &std::path::Path, layout: &Layout) {
    for (path, content) in layout {
        let full = root.join(path);
        match content {
            Some(bytes) => {
                std::fs::create_dir_all(full.parent().unwrap()).unwrap();
                std::fs::write(&full, bytes).unwrap();
            }
            None => std::fs::create_dir_all(&full).unwrap(),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn one_pass_converges_and_second_is_silent(source in layout(), replica in layout()) {
        let fx = MirrorFixture::new();
        materialize(&fx.source, &source);
        materialize(&fx.replica, &replica);
        let engine = SyncEngine::new(&fx.source, &fx.replica);

        // A file/directory clash between the trees is logged as an error in
        // the first pass and settled by the second.
        let mut first = MemorySink::new();
        let report = engine.run_pass(&mut first).unwrap();
        if report.errors > 0 {
            engine.run_pass(&mut MemorySink::new()).unwrap();
        }

        prop_assert_eq!(tree_snapshot(&fx.source), tree_snapshot(&fx.replica));

        let mut again = MemorySink::new();
        let report = engine.run_pass(&mut again).unwrap();
        prop_assert!(report.is_clean());
        prop_assert!(again.lines().is_empty(), "unexpected lines: {:?}", again.lines());
    }

    #[test]
    fn orphans_are_removed_children_first(replica in layout()) {
        let fx = MirrorFixture::new();
        materialize(&fx.replica, &replica);

        let mut sink = MemorySink::new();
        SyncEngine::new(&fx.source, &fx.replica).run_pass(&mut sink).unwrap();

        prop_assert!(tree_snapshot(&fx.replica).is_empty());
        let removed: Vec<&str> = sink
            .lines()
            .iter()
            .filter_map(|l| l.strip_prefix("Removed file: ").or_else(|| l.strip_prefix("Removed directory: ")))
            .collect();
        for (i, path) in removed.iter().enumerate() {
            for later in &removed[i + 1..] {
                prop_assert!(
                    !later.starts_with(&format!("{path}/")),
                    "{} removed before its descendant {}", path, later
                );
            }
        }
    }
}
