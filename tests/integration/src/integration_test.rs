//! Scenario tests across crates: schedule, audit log file and engine together.

use std::time::Duration;

use mirror_core::{MemorySink, Schedule, SyncEngine, open_log_file, run_schedule};
use mirror_fs::{Fingerprint, checksum};
use mirror_test_utils::{MirrorFixture, Node, tree_snapshot};
use pretty_assertions::assert_eq;

#[test]
fn source_changes_between_passes_are_picked_up() {
    let fx = MirrorFixture::new();
    fx.source_file("notes/today.md", "draft");
    let engine = SyncEngine::new(&fx.source, &fx.replica);

    let mut sink = MemorySink::new();
    engine.run_pass(&mut sink).unwrap();
    assert_eq!(fx.read_replica("notes/today.md"), "draft");

    std::fs::remove_dir_all(fx.source.join("notes")).unwrap();
    fx.source_file("archive/today.md", "final");

    sink.clear();
    engine.run_pass(&mut sink).unwrap();

    let snap = tree_snapshot(&fx.replica);
    assert_eq!(snap.get("archive/today.md"), Some(&Node::File(b"final".to_vec())));
    assert!(!snap.contains_key("notes"));
    let removed_file = sink
        .lines()
        .iter()
        .position(|l| l.starts_with("Removed file: ") && l.ends_with("today.md"))
        .unwrap();
    let removed_dir = sink
        .lines()
        .iter()
        .position(|l| l.starts_with("Removed directory: "))
        .unwrap();
    assert!(removed_file < removed_dir);
}

#[test]
fn scheduled_run_writes_timestamped_audit_file() {
    let fx = MirrorFixture::new();
    fx.source_file("a.txt", "Hello A");
    fx.source_file("b.txt", "Hello B");
    let engine = SyncEngine::new(&fx.source, &fx.replica);

    {
        let mut sink = open_log_file(&fx.log_path()).unwrap();
        let total = run_schedule(&engine, Schedule::new(2, Duration::from_secs(30)), &mut sink, |_| {}).unwrap();
        assert_eq!(total.files_copied, 2);
        assert_eq!(total.mutations(), 2);
    }

    let text = std::fs::read_to_string(fx.log_path()).unwrap();
    let bodies: Vec<&str> = text.lines().map(|l| &l[22..]).collect();
    assert_eq!(bodies.len(), 6);
    assert_eq!(bodies[0], "--- Synchronization 1/2 started ---");
    assert!(bodies[1].starts_with("Copied file: "));
    assert!(bodies[2].starts_with("Copied file: "));
    assert_eq!(bodies[3], "--- Synchronization 1/2 finished ---");
    assert_eq!(bodies[4], "--- Synchronization 2/2 started ---");
    assert_eq!(bodies[5], "--- Synchronization 2/2 finished ---");
}

#[test]
fn replica_fingerprints_match_source_after_pass() {
    let fx = MirrorFixture::new();
    let big: Vec<u8> = (0..100_000u32).map(|i| (i * 7 % 256) as u8).collect();
    fx.source_file("blob.bin", &big);
    fx.replica_file("blob.bin", &big[..50_000]);

    SyncEngine::new(&fx.source, &fx.replica)
        .run_pass(&mut MemorySink::new())
        .unwrap();

    assert_eq!(
        checksum::fingerprint(&fx.replica.join("blob.bin")),
        Some(Fingerprint::of_bytes(&big))
    );
}

#[test]
fn empty_source_directories_are_mirrored() {
    let fx = MirrorFixture::new();
    fx.source_dir("a/b/c");
    fx.source_dir("d");

    SyncEngine::new(&fx.source, &fx.replica)
        .run_pass(&mut MemorySink::new())
        .unwrap();

    assert_eq!(tree_snapshot(&fx.source), tree_snapshot(&fx.replica));
}
