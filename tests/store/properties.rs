//! Property tests for the store.

use proptest::prelude::*;

use crate::common::memory_store;

/// Text the command builder accepts.
fn quote_free() -> impl Strategy<Value = String> {
    "[^\"\\\\]{0,32}"
}

proptest! {
    #[test]
    fn prop_set_get_roundtrip(key in quote_free(), value in quote_free()) {
        let mut s = memory_store();
        prop_assert!(s.set(&key, &value).unwrap());
        prop_assert_eq!(s.get(&key).unwrap(), value);
    }

    #[test]
    fn prop_append_is_cumulative(a in quote_free(), b in quote_free()) {
        let mut s = memory_store();
        prop_assert_eq!(s.append("k", &a).unwrap(), a.len() as i64);
        prop_assert_eq!(s.append("k", &b).unwrap(), (a.len() + b.len()) as i64);
        prop_assert_eq!(s.get("k").unwrap(), format!("{}{}", a, b));
    }

    #[test]
    fn prop_del_reports_existence(key in quote_free(), create in any::<bool>()) {
        let mut s = memory_store();
        if create {
            s.set(&key, "v").unwrap();
        }
        prop_assert_eq!(s.del(&key).unwrap(), i64::from(create));
        prop_assert_eq!(s.del(&key).unwrap(), 0);
    }

    #[test]
    fn prop_mget_is_positional(
        entries in proptest::collection::btree_map("[a-z]{1,8}", quote_free(), 1..8),
        missing in "[A-Z]{1,8}",
    ) {
        let mut s = memory_store();
        let pairs: Vec<(String, String)> = entries.clone().into_iter().collect();
        prop_assert!(s.mset(&pairs).unwrap());

        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.push(missing);
        let values = s.mget(&keys).unwrap();

        let mut expected: Vec<String> = entries.values().cloned().collect();
        expected.push(String::new());
        prop_assert_eq!(values, expected);
    }

    #[test]
    fn prop_setnx_only_first_wins(key in quote_free(), first in quote_free(), second in quote_free()) {
        let mut s = memory_store();
        prop_assert!(s.setnx(&key, &first).unwrap());
        prop_assert!(!s.setnx(&key, &second).unwrap());
        prop_assert_eq!(s.get(&key).unwrap(), first);
    }
}
