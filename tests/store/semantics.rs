//! Observable behavior of each operation.

use kvbridge::{Error, Status};

use crate::common::memory_store;

#[test]
fn test_set_overwrites() {
    let mut s = memory_store();
    assert!(s.set("k", "a").unwrap());
    assert!(s.set("k", "b").unwrap());
    assert_eq!(s.get("k").unwrap(), "b");
}

#[test]
fn test_del_never_errors_on_missing() {
    let mut s = memory_store();
    assert_eq!(s.del("never-set").unwrap(), 0);
}

#[test]
fn test_append_first_call_uses_argument_length() {
    let mut s = memory_store();
    assert_eq!(s.append("k", "ключ").unwrap(), "ключ".len() as i64);
    assert_eq!(s.append("k", "!").unwrap(), "ключ!".len() as i64);
}

#[test]
fn test_exists_tracks_lifecycle() {
    let mut s = memory_store();
    assert!(!s.exists("k").unwrap());
    s.set("k", "").unwrap();
    assert!(s.exists("k").unwrap());
    s.del("k").unwrap();
    assert!(!s.exists("k").unwrap());
}

#[test]
fn test_exists_after_hash_writes() {
    let mut s = memory_store();
    assert!(!s.exists("h").unwrap());
    assert!(s.hset("h", "f", "v").unwrap());
    assert!(s.exists("h").unwrap());

    assert!(!s.exists("profile").unwrap());
    s.hmset("profile", &[("name", "Ann"), ("age", "40")]).unwrap();
    assert!(s.exists("profile").unwrap());

    s.hdel("h", "f").unwrap();
    assert!(!s.exists("h").unwrap());
}

#[test]
fn test_copy_survives_append_to_source() {
    let mut s = memory_store();
    s.set("src", "abc").unwrap();
    assert!(s.copy("src", "dst").unwrap());
    s.append("src", "def").unwrap();
    assert_eq!(s.get("dst").unwrap(), "abc");
    assert_eq!(s.get("src").unwrap(), "abcdef");
}

#[test]
fn test_non_numeric_counter_starts_from_zero() {
    let mut s = memory_store();
    s.set("n", "abc").unwrap();
    assert_eq!(s.incr("n").unwrap(), 1);
    s.set("m", "12abc").unwrap();
    assert_eq!(s.incr("m").unwrap(), 13);
}

#[test]
fn test_counter_overflow_is_engine_error() {
    let mut s = memory_store();
    s.set("n", &i64::MAX.to_string()).unwrap();
    let err = s.incr("n").unwrap_err();
    assert_eq!(err.code(), Some(Status::Invalid.code()));
}

#[test]
fn test_move_onto_itself() {
    let mut s = memory_store();
    s.set("k", "v").unwrap();
    assert!(s.move_key("k", "k").unwrap());
    assert_eq!(s.get("k").unwrap(), "v");
}

#[test]
fn test_copy_hash() {
    let mut s = memory_store();
    s.hmset("h", &[("a", "1"), ("b", "2")]).unwrap();
    assert!(s.copy("h", "h2").unwrap());
    s.hdel("h", "a").unwrap();
    assert_eq!(s.hkeys("h2").unwrap(), vec!["a", "b"]);
}

#[test]
fn test_mget_skips_hash_keys() {
    let mut s = memory_store();
    s.set("a", "1").unwrap();
    s.hset("h", "f", "v").unwrap();
    assert_eq!(s.mget(&["a", "h"]).unwrap(), vec!["1", ""]);
}

#[test]
fn test_hmset_counts_distinct_fields() {
    let mut s = memory_store();
    assert_eq!(s.hmset("h", &[("a", "1")]).unwrap(), 1);
    assert_eq!(s.hmset("h", &[("a", "2"), ("b", "3")]).unwrap(), 2);
    assert_eq!(s.hlen("h").unwrap(), 2);
    assert_eq!(s.hget("h", "a").unwrap(), "2");

    assert_eq!(s.hmset("dup", &[("f", "1"), ("f", "2")]).unwrap(), 1);
    assert_eq!(s.hlen("dup").unwrap(), 1);
    assert_eq!(s.hget("dup", "f").unwrap(), "2");
}

#[test]
fn test_backslash_rejected_for_every_position() {
    let mut s = memory_store();
    assert!(matches!(
        s.hset(r"k\", "f", "v"),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        s.hmget("k", &["ok", "bad\""]),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        s.msetnx(&[("k", r"\n")]),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn test_store_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<kvbridge::Store>();
}

#[test]
fn test_shared_behind_mutex() {
    use std::sync::{Arc, Mutex};

    let store = Arc::new(Mutex::new(memory_store()));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..25 {
                    store.lock().unwrap().incr("hits").unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(store.lock().unwrap().get("hits").unwrap(), "100");
}
