use road_racer::score_store::{ScoreStore, StoreError};

use tempfile::TempDir;

fn scratch_store(dir: &TempDir) -> ScoreStore {
    ScoreStore::new(dir.path().join("scores.txt"))
}

fn seed_store(dir: &TempDir) -> ScoreStore {
    let store = scratch_store(dir);
    for score in [30, 10, 50, 20, 40, 5] {
        store.append(score).unwrap();
    }
    store
}

// ── read_top ──────────────────────────────────────────────────────────────────

#[test]
fn absent_store_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = scratch_store(&dir);
    assert!(store.read_top(5).unwrap().is_empty());
}

#[test]
fn read_top_returns_highest_descending() {
    let dir = TempDir::new().unwrap();
    let store = seed_store(&dir);
    assert_eq!(store.read_top(5).unwrap(), vec![50, 40, 30, 20, 10]);
}

#[test]
fn read_top_respects_n() {
    let dir = TempDir::new().unwrap();
    let store = seed_store(&dir);
    assert_eq!(store.read_top(3).unwrap(), vec![50, 40, 30]);
}

#[test]
fn read_top_with_large_n_returns_full_history() {
    let dir = TempDir::new().unwrap();
    let store = seed_store(&dir);
    assert_eq!(store.read_top(10).unwrap(), vec![50, 40, 30, 20, 10, 5]);
}

#[test]
fn garbage_line_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.txt");
    std::fs::write(&path, "12\nnot-a-score\n7\n").unwrap();
    let store = ScoreStore::new(path);
    match store.read_top(5) {
        Err(StoreError::Parse { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected parse error, got {other:?}"),
    }
}

// ── append ────────────────────────────────────────────────────────────────────

#[test]
fn append_creates_file_and_accumulates() {
    let dir = TempDir::new().unwrap();
    let store = scratch_store(&dir);
    store.append(7).unwrap();
    store.append(3).unwrap();
    assert_eq!(store.read_top(5).unwrap(), vec![7, 3]);
}

#[test]
fn append_to_unwritable_path_fails() {
    let dir = TempDir::new().unwrap();
    let store = ScoreStore::new(dir.path().join("missing-dir").join("scores.txt"));
    assert!(matches!(store.append(1), Err(StoreError::Io { .. })));
}

// ── replace ───────────────────────────────────────────────────────────────────

#[test]
fn replace_swaps_value_inside_snapshot() {
    let dir = TempDir::new().unwrap();
    let store = seed_store(&dir);
    store.replace(40, 60).unwrap();
    assert_eq!(store.read_top(5).unwrap(), vec![60, 50, 30, 20, 10]);
}

#[test]
fn replace_rewrites_store_to_snapshot() {
    // A matching replace materialises the top-5 view; the 6th entry (5)
    // is discarded from the file.
    let dir = TempDir::new().unwrap();
    let store = seed_store(&dir);
    store.replace(40, 60).unwrap();
    assert_eq!(store.read_top(10).unwrap(), vec![60, 50, 30, 20, 10]);
}

#[test]
fn replace_outside_snapshot_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let store = seed_store(&dir);
    // 5 ranks 6th, outside the top-5 snapshot
    store.replace(5, 99).unwrap();
    assert_eq!(store.read_top(10).unwrap(), vec![50, 40, 30, 20, 10, 5]);
}

#[test]
fn replace_unknown_value_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let store = seed_store(&dir);
    store.replace(99, 1).unwrap();
    assert_eq!(store.read_top(10).unwrap(), vec![50, 40, 30, 20, 10, 5]);
}

// ── remove ────────────────────────────────────────────────────────────────────

#[test]
fn remove_drops_value_inside_snapshot() {
    let dir = TempDir::new().unwrap();
    let store = seed_store(&dir);
    store.remove(30).unwrap();
    assert_eq!(store.read_top(10).unwrap(), vec![50, 40, 20, 10]);
}

#[test]
fn remove_unknown_value_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let store = seed_store(&dir);
    store.remove(99).unwrap();
    assert_eq!(store.read_top(10).unwrap(), vec![50, 40, 30, 20, 10, 5]);
}

#[test]
fn remove_on_absent_store_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let store = scratch_store(&dir);
    store.remove(1).unwrap();
    assert!(store.read_top(5).unwrap().is_empty());
}
