//! Multi-key operations.

use super::Store;
use crate::bridge::Engine;
use crate::command::{Command, Verb};
use crate::Result;

impl<E: Engine> Store<E> {
    /// Set every `(key, value)` pair.
    pub fn mset<K, V>(&mut self, pairs: &[(K, V)]) -> Result<bool>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let cmd = Command::new(Verb::MSet).pairs(pairs.iter().map(|(k, v)| (k, v)))?;
        self.bridge.execute(&cmd)?.into_bool()
    }

    /// Get the values of `keys`, positionally. Missing keys yield `""`.
    pub fn mget<K: AsRef<str>>(&mut self, keys: &[K]) -> Result<Vec<String>> {
        let cmd = Command::new(Verb::MGet).args(keys)?;
        self.bridge.execute(&cmd)?.into_array_of_len(keys.len())
    }

    /// Set every pair only if none of the keys exist.
    pub fn msetnx<K, V>(&mut self, pairs: &[(K, V)]) -> Result<bool>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let cmd = Command::new(Verb::MSetNx).pairs(pairs.iter().map(|(k, v)| (k, v)))?;
        self.bridge.execute(&cmd)?.into_bool()
    }
}
