// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use saku::{Session, SnapshotStore};
use tempfile::TempDir;

/// Helper to open a session on a snapshot inside a fresh temporary directory
pub fn test_session() -> (Session, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let session = Session::open(SnapshotStore::new(snapshot_path(&temp_dir)));
    (session, temp_dir)
}

pub fn snapshot_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("data.json")
}

/// Reopens the snapshot as a new process would
pub fn reopen(temp_dir: &TempDir) -> Session {
    Session::open(SnapshotStore::new(snapshot_path(temp_dir)))
}
