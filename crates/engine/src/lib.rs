//! Embedded command-driven key-value engine
//!
//! The engine is driven entirely through command text and exposes four
//! primitives on a [`Handle`]:
//! - [`Handle::open`]: open an instance at a [`Target`]
//! - [`Handle::exec`]: execute one command, returning a [`Status`]
//! - [`Handle::exec_result`]: read the [`Value`] of the last command
//! - [`Handle::last_error`]: read the diagnostic of the last failure
//!
//! plus [`Handle::close`].
//!
//! Durable instances (`Target::Path`) keep a command log (see [`wal`]) and a
//! `kvbridge.toml` config file in their data directory.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commands;
pub mod config;
pub mod error;
pub mod handle;
pub mod keyspace;
pub mod parse;
pub mod status;
pub mod target;
pub mod value;
pub mod wal;

pub use config::{Durability, EngineConfig, CONFIG_FILE_NAME};
pub use error::{CommandError, ConfigError, OpenError, WalError};
pub use handle::{Handle, LOCK_FILE_NAME};
pub use status::Status;
pub use target::{Target, MEMORY_MARKER};
pub use value::Value;
pub use wal::WAL_FILE_NAME;
