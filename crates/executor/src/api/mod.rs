//! Typed facade over the bridge.
//!
//! [`Store`] is the public API. Every method builds one command, executes it
//! through the [`Bridge`], and decodes the reply:
//!
//! | Methods | Returns |
//! |---------|---------|
//! | `set`, `setnx`, `msetnx`, `exists`, `copy`, `move_key`, `mset`, `hset`, `hexists` | `bool` |
//! | `get`, `getset`, `hget` | `String`, `""` when absent |
//! | `del`, `hlen`, `incr`, `incr_by`, `decr`, `decr_by`, `hdel`, `hmset` | `i64` |
//! | `append` | `i64` new length |
//! | `mget`, `hkeys`, `hvals`, `hmget` | `Vec<String>`, `""` for missing positions |
//!
//! # Example
//!
//! ```text
//! use kvbridge_executor::Store;
//!
//! let mut store = Store::memory()?;
//! store.set("name", "John")?;
//! assert_eq!(store.get("name")?, "John");
//! store.close()?;
//! ```

mod batch;
mod hash;
mod keys;

use kvbridge_engine::{Handle, Target};

use crate::bridge::{Bridge, Engine};
use crate::Result;

/// Typed client for one engine instance.
///
/// Methods take `&mut self`: one command is in flight per store. Share a
/// store across threads behind a mutex.
pub struct Store<E: Engine = Handle> {
    bridge: Bridge<E>,
}

impl Store<Handle> {
    /// Open a store at a data directory, or in memory for `":mem:"`.
    ///
    /// Accepts a [`Target`], a path, or a descriptor string.
    pub fn open(target: impl Into<Target>) -> Result<Self> {
        Self::open_target(&target.into())
    }

    /// Open an in-memory store.
    pub fn memory() -> Result<Self> {
        Self::open_target(&Target::Memory)
    }
}

impl<E: Engine> Store<E> {
    /// Open a store on any engine implementation.
    pub fn open_target(target: &Target) -> Result<Self> {
        Ok(Store {
            bridge: Bridge::open(target)?,
        })
    }

    /// Wrap an already-open engine.
    pub fn from_engine(engine: E) -> Self {
        Store {
            bridge: Bridge::from_engine(engine),
        }
    }

    /// Borrow the underlying engine.
    pub fn engine(&self) -> &E {
        self.bridge.engine()
    }

    /// Close the store, reporting any engine failure.
    ///
    /// A store that is dropped without `close` is closed best effort.
    pub fn close(self) -> Result<()> {
        self.bridge.close()
    }
}
