//! Single-key operations.

use super::Store;
use crate::bridge::Engine;
use crate::command::{Command, Verb};
use crate::decode;
use crate::Result;

impl<E: Engine> Store<E> {
    // =========================================================================
    // Strings
    // =========================================================================

    /// Set `key` to `value`, overwriting any previous value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool> {
        let cmd = Command::new(Verb::Set).arg(key)?.arg(value)?;
        self.bridge.execute(&cmd)?.into_bool()
    }

    /// Set `key` only if it does not exist. Returns whether it was written.
    pub fn setnx(&mut self, key: &str, value: &str) -> Result<bool> {
        let cmd = Command::new(Verb::SetNx).arg(key)?.arg(value)?;
        self.bridge.execute(&cmd)?.into_bool()
    }

    /// Get the value of `key`, `""` if absent.
    pub fn get(&mut self, key: &str) -> Result<String> {
        let cmd = Command::new(Verb::Get).arg(key)?;
        self.bridge.execute(&cmd)?.into_string()
    }

    /// Set `key` to `value` and return the previous value, `""` if absent.
    pub fn getset(&mut self, key: &str, value: &str) -> Result<String> {
        let cmd = Command::new(Verb::GetSet).arg(key)?.arg(value)?;
        self.bridge.execute(&cmd)?.into_string()
    }

    /// Delete `key`. Returns 1 if it existed, 0 otherwise.
    pub fn del(&mut self, key: &str) -> Result<i64> {
        let cmd = Command::new(Verb::Del).arg(key)?;
        self.bridge.execute(&cmd)?.into_int()
    }

    /// Append `value` to `key`, creating it if absent.
    ///
    /// Returns the new length in bytes. When the engine does not report an
    /// integer (it answers `true` for a freshly created key), the length of
    /// `value` is returned instead.
    pub fn append(&mut self, key: &str, value: &str) -> Result<i64> {
        let cmd = Command::new(Verb::Append).arg(key)?.arg(value)?;
        let result = self.bridge.execute(&cmd)?.fetch()?;
        if result.is_int() {
            Ok(decode::to_int(result))
        } else {
            Ok(value.len() as i64)
        }
    }

    /// Check if `key` exists.
    pub fn exists(&mut self, key: &str) -> Result<bool> {
        let cmd = Command::new(Verb::Exists).arg(key)?;
        self.bridge.execute(&cmd)?.into_bool()
    }

    // =========================================================================
    // Counters
    // =========================================================================

    /// Increment `key` by one. Missing or non-numeric values count as 0.
    pub fn incr(&mut self, key: &str) -> Result<i64> {
        let cmd = Command::new(Verb::Incr).arg(key)?;
        self.bridge.execute(&cmd)?.into_int()
    }

    /// Increment `key` by `delta`.
    pub fn incr_by(&mut self, key: &str, delta: i64) -> Result<i64> {
        let cmd = Command::new(Verb::IncrBy).arg(key)?.arg(delta.to_string())?;
        self.bridge.execute(&cmd)?.into_int()
    }

    /// Decrement `key` by one.
    pub fn decr(&mut self, key: &str) -> Result<i64> {
        let cmd = Command::new(Verb::Decr).arg(key)?;
        self.bridge.execute(&cmd)?.into_int()
    }

    /// Decrement `key` by `delta`.
    pub fn decr_by(&mut self, key: &str, delta: i64) -> Result<i64> {
        let cmd = Command::new(Verb::DecrBy).arg(key)?.arg(delta.to_string())?;
        self.bridge.execute(&cmd)?.into_int()
    }

    // =========================================================================
    // Copy / Move
    // =========================================================================

    /// Copy `src` to `dst`, overwriting `dst`. False if `src` is absent.
    pub fn copy(&mut self, src: &str, dst: &str) -> Result<bool> {
        let cmd = Command::new(Verb::Copy).arg(src)?.arg(dst)?;
        self.bridge.execute(&cmd)?.into_bool()
    }

    /// Move `src` to `dst`, overwriting `dst`. False if `src` is absent.
    pub fn move_key(&mut self, src: &str, dst: &str) -> Result<bool> {
        let cmd = Command::new(Verb::Move).arg(src)?.arg(dst)?;
        self.bridge.execute(&cmd)?.into_bool()
    }
}
