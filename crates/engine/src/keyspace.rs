//! In-memory keyspace.
//!
//! A single namespace maps keys to either a string or a hash. Hash fields are
//! kept in a `BTreeMap` so HKEYS/HVALS return a deterministic order.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::error::CommandError;

/// A stored entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Plain string value
    Str(String),
    /// Field → value map
    Hash(BTreeMap<String, String>),
}

/// All keys of one engine instance.
#[derive(Debug, Default)]
pub struct Keyspace {
    entries: FxHashMap<String, Entry>,
}

impl Keyspace {
    /// Create an empty keyspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a key exists, whatever its kind.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get a raw entry.
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Insert or replace an entry, regardless of the previous kind.
    pub fn put(&mut self, key: &str, entry: Entry) -> Option<Entry> {
        self.entries.insert(key.to_string(), entry)
    }

    /// Remove a key, returning its entry.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        self.entries.remove(key)
    }

    /// Copy the given keys into a new keyspace.
    ///
    /// A write can run against the copy, and be committed with
    /// [`absorb`](Self::absorb) only once it is known to be durable.
    pub fn extract(&self, keys: &[&str]) -> Keyspace {
        let entries = keys
            .iter()
            .filter_map(|k| self.entries.get(*k).map(|e| (k.to_string(), e.clone())))
            .collect();
        Keyspace { entries }
    }

    /// Replace the given keys with their state in `staged`.
    ///
    /// Keys absent from `staged` are removed. `staged` must only hold keys
    /// named in `keys`.
    pub fn absorb(&mut self, staged: Keyspace, keys: &[&str]) {
        for key in keys {
            self.entries.remove(*key);
        }
        self.entries.extend(staged.entries);
    }

    // =========================================================================
    // Strings
    // =========================================================================

    /// Read a string value.
    ///
    /// Errors if the key holds a hash.
    pub fn get_str(&self, key: &str) -> Result<Option<&String>, CommandError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Entry::Str(s)) => Ok(Some(s)),
            Some(Entry::Hash(_)) => Err(wrong_type(key)),
        }
    }

    /// Store a string value, replacing whatever the key held.
    pub fn set_str(&mut self, key: &str, value: &str) -> Option<Entry> {
        self.put(key, Entry::Str(value.to_string()))
    }

    /// Mutable access to an existing string value.
    pub fn str_mut(&mut self, key: &str) -> Result<Option<&mut String>, CommandError> {
        match self.entries.get_mut(key) {
            None => Ok(None),
            Some(Entry::Str(s)) => Ok(Some(s)),
            Some(Entry::Hash(_)) => Err(wrong_type(key)),
        }
    }

    // =========================================================================
    // Hashes
    // =========================================================================

    /// Read a hash.
    ///
    /// Errors if the key holds a string.
    pub fn get_hash(&self, key: &str) -> Result<Option<&BTreeMap<String, String>>, CommandError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Entry::Hash(h)) => Ok(Some(h)),
            Some(Entry::Str(_)) => Err(wrong_type(key)),
        }
    }

    /// Mutable access to a hash, creating an empty one if the key is absent.
    pub fn hash_mut_or_create(
        &mut self,
        key: &str,
    ) -> Result<&mut BTreeMap<String, String>, CommandError> {
        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Hash(BTreeMap::new()));
        match entry {
            Entry::Hash(h) => Ok(h),
            Entry::Str(_) => Err(wrong_type(key)),
        }
    }

    /// Remove fields from a hash; drops the key once the hash is empty.
    ///
    /// Returns the number of fields removed.
    pub fn remove_fields(&mut self, key: &str, fields: &[String]) -> Result<i64, CommandError> {
        let (removed, now_empty) = match self.entries.get_mut(key) {
            None => return Ok(0),
            Some(Entry::Str(_)) => return Err(wrong_type(key)),
            Some(Entry::Hash(h)) => {
                let removed = fields.iter().filter(|f| h.remove(f.as_str()).is_some()).count();
                (removed, h.is_empty())
            }
        };
        if now_empty {
            self.entries.remove(key);
        }
        Ok(removed as i64)
    }
}

fn wrong_type(key: &str) -> CommandError {
    CommandError::WrongType {
        key: key.to_string(),
    }
}
