//! Hash field operations.

use super::Store;
use crate::bridge::Engine;
use crate::command::{Command, Verb};
use crate::Result;

impl<E: Engine> Store<E> {
    /// Set `field` of hash `key`.
    pub fn hset(&mut self, key: &str, field: &str, value: &str) -> Result<bool> {
        let cmd = Command::new(Verb::HSet).arg(key)?.arg(field)?.arg(value)?;
        self.bridge.execute(&cmd)?.into_bool()
    }

    /// Get `field` of hash `key`, `""` if absent.
    pub fn hget(&mut self, key: &str, field: &str) -> Result<String> {
        let cmd = Command::new(Verb::HGet).arg(key)?.arg(field)?;
        self.bridge.execute(&cmd)?.into_string()
    }

    /// Remove `field` from hash `key`. Returns the number removed.
    pub fn hdel(&mut self, key: &str, field: &str) -> Result<i64> {
        let cmd = Command::new(Verb::HDel).arg(key)?.arg(field)?;
        self.bridge.execute(&cmd)?.into_int()
    }

    /// Number of fields in hash `key`.
    pub fn hlen(&mut self, key: &str) -> Result<i64> {
        let cmd = Command::new(Verb::HLen).arg(key)?;
        self.bridge.execute(&cmd)?.into_int()
    }

    /// Check if `field` exists in hash `key`.
    pub fn hexists(&mut self, key: &str, field: &str) -> Result<bool> {
        let cmd = Command::new(Verb::HExists).arg(key)?.arg(field)?;
        self.bridge.execute(&cmd)?.into_bool()
    }

    /// Field names of hash `key`, sorted.
    pub fn hkeys(&mut self, key: &str) -> Result<Vec<String>> {
        let cmd = Command::new(Verb::HKeys).arg(key)?;
        self.bridge.execute(&cmd)?.into_array()
    }

    /// Field values of hash `key`, in field-name order.
    pub fn hvals(&mut self, key: &str) -> Result<Vec<String>> {
        let cmd = Command::new(Verb::HVals).arg(key)?;
        self.bridge.execute(&cmd)?.into_array()
    }

    /// Set every `(field, value)` pair of hash `key`.
    ///
    /// Returns the number of distinct fields written. When a field repeats,
    /// the last value wins and the field counts once.
    pub fn hmset<F, V>(&mut self, key: &str, pairs: &[(F, V)]) -> Result<i64>
    where
        F: AsRef<str>,
        V: AsRef<str>,
    {
        let cmd = Command::new(Verb::HMSet)
            .arg(key)?
            .pairs(pairs.iter().map(|(f, v)| (f, v)))?;
        self.bridge.execute(&cmd)?.into_int()
    }

    /// Get `fields` of hash `key`, positionally. Missing fields yield `""`.
    pub fn hmget<F: AsRef<str>>(&mut self, key: &str, fields: &[F]) -> Result<Vec<String>> {
        let cmd = Command::new(Verb::HMGet).arg(key)?.args(fields)?;
        self.bridge.execute(&cmd)?.into_array_of_len(fields.len())
    }
}
