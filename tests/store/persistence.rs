//! Durable stores: reopen, lock, and command log damage.

use std::fs::OpenOptions;
use std::io::Write;

use kvbridge::{Status, Store};
use kvbridge_engine::wal::encode_record;
use kvbridge_engine::WAL_FILE_NAME;
use tempfile::TempDir;

use crate::common::durable_store;

#[test]
fn test_reopen_recovers_every_operation() {
    let (mut s, dir) = durable_store();
    s.set("name", "John").unwrap();
    s.append("name", " Smith").unwrap();
    s.incr_by("age", 29).unwrap();
    s.setnx("name", "ignored").unwrap();
    s.getset("title", "dr").unwrap();
    s.copy("name", "alias").unwrap();
    s.move_key("title", "prefix").unwrap();
    s.msetnx(&[("x", "1"), ("y", "2")]).unwrap();
    s.hmset("user", &[("a", "1"), ("b", "2")]).unwrap();
    s.hdel("user", "a").unwrap();
    s.del("y").unwrap();
    s.close().unwrap();

    let mut s = Store::open(dir.path()).unwrap();
    assert_eq!(
        s.mget(&["name", "age", "alias", "prefix", "title", "x", "y"]).unwrap(),
        vec!["John Smith", "29", "John Smith", "dr", "", "1", ""]
    );
    assert_eq!(s.hkeys("user").unwrap(), vec!["b"]);
}

#[test]
fn test_dropped_store_releases_lock() {
    let dir = TempDir::new().unwrap();
    {
        let mut s = Store::open(dir.path()).unwrap();
        s.set("k", "v").unwrap();
    }
    let mut s = Store::open(dir.path()).unwrap();
    assert_eq!(s.get("k").unwrap(), "v");
}

#[test]
fn test_concurrent_open_is_busy() {
    let (_s, dir) = durable_store();
    let err = Store::open(dir.path()).err().unwrap();
    assert_eq!(err.code(), Some(Status::Busy.code()));
}

#[test]
fn test_torn_tail_is_discarded() {
    let (mut s, dir) = durable_store();
    s.set("kept", "1").unwrap();
    s.close().unwrap();

    let record = encode_record(r#"SET "lost" "2""#).unwrap();
    let mut file = OpenOptions::new()
        .append(true)
        .open(dir.path().join(WAL_FILE_NAME))
        .unwrap();
    file.write_all(&record[..record.len() / 2]).unwrap();
    drop(file);

    let mut s = Store::open(dir.path()).unwrap();
    assert_eq!(s.mget(&["kept", "lost"]).unwrap(), vec!["1", ""]);
}

#[test]
fn test_corrupt_log_fails_open() {
    let (mut s, dir) = durable_store();
    s.set("k", "v").unwrap();
    s.close().unwrap();

    let path = dir.path().join(WAL_FILE_NAME);
    let mut bytes = std::fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    std::fs::write(&path, bytes).unwrap();

    let err = Store::open(dir.path()).err().unwrap();
    assert_eq!(err.code(), Some(Status::Corrupt.code()));
}
