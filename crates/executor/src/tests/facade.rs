//! Store facade tests against the real engine, in memory.

use crate::{Error, Status, Store};

fn store() -> Store {
    Store::memory().unwrap()
}

// =============================================================================
// Keys
// =============================================================================

#[test]
fn test_set_get() {
    let mut s = store();
    assert!(s.set("name", "John Smith").unwrap());
    assert_eq!(s.get("name").unwrap(), "John Smith");
    assert_eq!(s.get("missing").unwrap(), "");
}

#[test]
fn test_del_counts() {
    let mut s = store();
    s.set("k", "v").unwrap();
    assert_eq!(s.del("k").unwrap(), 1);
    assert_eq!(s.del("k").unwrap(), 0);
    assert!(!s.exists("k").unwrap());
}

#[test]
fn test_append_is_cumulative() {
    let mut s = store();
    assert_eq!(s.append("log", "hello").unwrap(), 5);
    assert_eq!(s.append("log", " world").unwrap(), 11);
    assert_eq!(s.get("log").unwrap(), "hello world");
}

#[test]
fn test_setnx_only_when_absent() {
    let mut s = store();
    assert!(s.setnx("k", "first").unwrap());
    assert!(!s.setnx("k", "second").unwrap());
    assert_eq!(s.get("k").unwrap(), "first");
}

#[test]
fn test_getset_returns_previous() {
    let mut s = store();
    assert_eq!(s.getset("k", "a").unwrap(), "");
    assert_eq!(s.getset("k", "b").unwrap(), "a");
    assert_eq!(s.get("k").unwrap(), "b");
}

#[test]
fn test_counters() {
    let mut s = store();
    assert_eq!(s.incr("n").unwrap(), 1);
    assert_eq!(s.incr_by("n", 10).unwrap(), 11);
    assert_eq!(s.decr("n").unwrap(), 10);
    assert_eq!(s.decr_by("n", 15).unwrap(), -5);
    assert_eq!(s.incr_by("n", -5).unwrap(), -10);
    assert_eq!(s.get("n").unwrap(), "-10");
}

#[test]
fn test_copy_is_independent() {
    let mut s = store();
    s.set("src", "v1").unwrap();
    assert!(s.copy("src", "dst").unwrap());
    s.set("src", "v2").unwrap();
    assert_eq!(s.get("dst").unwrap(), "v1");
    assert!(!s.copy("absent", "dst").unwrap());
}

#[test]
fn test_append_to_copy_source_leaves_destination() {
    let mut s = store();
    s.set("src", "base").unwrap();
    assert!(s.copy("src", "dst").unwrap());
    s.append("src", "-more").unwrap();
    assert_eq!(s.get("src").unwrap(), "base-more");
    assert_eq!(s.get("dst").unwrap(), "base");

    s.append("dst", "!").unwrap();
    assert_eq!(s.get("src").unwrap(), "base-more");
}

#[test]
fn test_move_removes_source() {
    let mut s = store();
    s.set("src", "v").unwrap();
    s.set("dst", "old").unwrap();
    assert!(s.move_key("src", "dst").unwrap());
    assert!(!s.exists("src").unwrap());
    assert_eq!(s.get("dst").unwrap(), "v");
}

// =============================================================================
// Batch
// =============================================================================

#[test]
fn test_mset_mget_positional() {
    let mut s = store();
    assert!(s.mset(&[("name", "John"), ("age", "29")]).unwrap());
    assert_eq!(
        s.mget(&["name", "age", "email"]).unwrap(),
        vec!["John", "29", ""]
    );
}

#[test]
fn test_msetnx_all_or_nothing() {
    let mut s = store();
    assert!(s.msetnx(&[("a", "1"), ("b", "2")]).unwrap());
    assert!(!s.msetnx(&[("b", "x"), ("c", "3")]).unwrap());
    assert_eq!(s.mget(&["a", "b", "c"]).unwrap(), vec!["1", "2", ""]);
}

#[test]
fn test_mset_accepts_owned_strings() {
    let mut s = store();
    let pairs: Vec<(String, String)> = (0..3).map(|i| (format!("k{}", i), i.to_string())).collect();
    assert!(s.mset(&pairs).unwrap());
    let keys: Vec<String> = pairs.iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(s.mget(&keys).unwrap(), vec!["0", "1", "2"]);
}

#[test]
fn test_empty_batch_is_engine_error() {
    let mut s = store();
    let err = s.mget::<&str>(&[]).unwrap_err();
    assert_eq!(err.code(), Some(Status::Invalid.code()));
}

// =============================================================================
// Hashes
// =============================================================================

#[test]
fn test_hash_roundtrip() {
    let mut s = store();
    assert!(s.hset("user", "name", "John").unwrap());
    assert_eq!(s.hmset("user", &[("age", "29"), ("email", "j@x.io")]).unwrap(), 2);
    assert_eq!(s.hget("user", "name").unwrap(), "John");
    assert_eq!(s.hget("user", "phone").unwrap(), "");
    assert_eq!(s.hlen("user").unwrap(), 3);
    assert!(s.hexists("user", "age").unwrap());
    assert_eq!(s.hkeys("user").unwrap(), vec!["age", "email", "name"]);
    assert_eq!(s.hvals("user").unwrap(), vec!["29", "j@x.io", "John"]);
    assert_eq!(
        s.hmget("user", &["name", "phone"]).unwrap(),
        vec!["John", ""]
    );
}

#[test]
fn test_hdel_last_field_removes_key() {
    let mut s = store();
    s.hset("h", "f", "v").unwrap();
    assert_eq!(s.hdel("h", "f").unwrap(), 1);
    assert_eq!(s.hdel("h", "f").unwrap(), 0);
    assert!(!s.exists("h").unwrap());
    assert!(s.hkeys("h").unwrap().is_empty());
    assert_eq!(s.hlen("h").unwrap(), 0);
}

#[test]
fn test_wrong_type_is_engine_error() {
    let mut s = store();
    s.hset("h", "f", "v").unwrap();
    let err = s.get("h").unwrap_err();
    assert_eq!(err.code(), Some(Status::Invalid.code()));

    // The store stays usable after a failed command
    assert_eq!(s.hget("h", "f").unwrap(), "v");
}

#[test]
fn test_quote_in_value_rejected() {
    let mut s = store();
    let err = s.set("k", r#"say "hi""#).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert!(!s.exists("k").unwrap());
}

#[test]
fn test_close_then_reopen_memory_is_empty() {
    let mut s = store();
    s.set("k", "v").unwrap();
    s.close().unwrap();
    let mut s = store();
    assert_eq!(s.get("k").unwrap(), "");
}

#[test]
fn test_durable_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut s = Store::open(dir.path()).unwrap();
        s.mset(&[("name", "John"), ("age", "29")]).unwrap();
        s.hset("user", "email", "j@x.io").unwrap();
        s.close().unwrap();
    }
    let mut s = Store::open(dir.path()).unwrap();
    assert_eq!(s.mget(&["name", "age"]).unwrap(), vec!["John", "29"]);
    assert_eq!(s.hget("user", "email").unwrap(), "j@x.io");
}

#[test]
fn test_second_store_on_same_dir_is_busy() {
    let dir = tempfile::tempdir().unwrap();
    let _first = Store::open(dir.path()).unwrap();
    let err = Store::open(dir.path()).err().unwrap();
    assert_eq!(err.code(), Some(Status::Busy.code()));
}
