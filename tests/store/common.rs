//! Shared helpers for the store suite.

#![allow(dead_code)]

use kvbridge::Store;
use tempfile::TempDir;

/// Fresh in-memory store.
pub fn memory_store() -> Store {
    Store::memory().expect("in-memory store opens")
}

/// A durable store in a fresh temporary directory.
///
/// The directory lives as long as the returned `TempDir`.
pub fn durable_store() -> (Store, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    let store = Store::open(dir.path()).expect("durable store opens");
    (store, dir)
}
