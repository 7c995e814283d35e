//! Engine error types.
//!
//! Errors never cross the primitive boundary as Rust values: [`Handle`]
//! converts them to a [`Status`] plus a diagnostic message stored in the
//! handle's error slot. Each error knows its status through `status()`.
//!
//! [`Handle`]: crate::Handle

use std::path::PathBuf;

use crate::Status;

/// Failure while executing a single command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Command text could not be tokenized
    #[error("malformed command: {reason}")]
    Malformed { reason: String },

    /// Verb not recognized
    #[error("unknown command '{verb}'")]
    UnknownCommand { verb: String },

    /// Wrong number of arguments
    #[error("wrong number of arguments for '{verb}' command")]
    Arity { verb: &'static str },

    /// Key holds a different kind of value
    #[error("operation against key '{key}' holding the wrong kind of value")]
    WrongType { key: String },

    /// Integer arithmetic left the i64 range
    #[error("increment or decrement would overflow for key '{key}'")]
    Overflow { key: String },

    /// Command log could not be written
    #[error("command log write failed: {0}")]
    Wal(#[from] WalError),

    /// Handle was already closed
    #[error("handle is closed")]
    Closed,
}

impl CommandError {
    /// Status code reported for this error.
    pub fn status(&self) -> Status {
        match self {
            CommandError::Malformed { .. }
            | CommandError::Arity { .. }
            | CommandError::WrongType { .. }
            | CommandError::Overflow { .. } => Status::Invalid,
            CommandError::UnknownCommand { .. } => Status::Unknown,
            CommandError::Wal(e) => e.status(),
            CommandError::Closed => Status::Abort,
        }
    }
}

/// Command log (WAL) failures.
#[derive(Debug, thiserror::Error)]
pub enum WalError {
    /// Underlying file I/O failed
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Header magic or version mismatch
    #[error("'{path}' is not a command log: {reason}")]
    BadHeader { path: PathBuf, reason: String },

    /// Record checksum mismatch
    #[error("checksum mismatch in '{path}' at offset {offset}")]
    Checksum { path: PathBuf, offset: u64 },

    /// Record framing is invalid
    #[error("invalid record in '{path}' at offset {offset}: {reason}")]
    Record {
        path: PathBuf,
        offset: u64,
        reason: String,
    },

    /// Command is too long for the record length field
    #[error("command of {len} bytes is too large for '{path}'")]
    RecordTooLarge { path: PathBuf, len: usize },

    /// A failed append could not be rolled back
    #[error("'{path}' holds an unrecoverable partial record; reopen the instance")]
    Poisoned { path: PathBuf },
}

impl WalError {
    /// Status code reported for this error.
    pub fn status(&self) -> Status {
        match self {
            WalError::Io { .. } | WalError::Poisoned { .. } => Status::IoErr,
            WalError::RecordTooLarge { .. } => Status::Invalid,
            WalError::BadHeader { .. } | WalError::Checksum { .. } | WalError::Record { .. } => {
                Status::Corrupt
            }
        }
    }
}

/// Configuration file failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read or written
    #[error("config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("failed to parse config file '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },

    /// A setting holds an unsupported value
    #[error("invalid setting: {reason}")]
    Invalid { reason: String },
}

/// Failure while opening an instance.
///
/// Carries the status and message a client would otherwise read from the
/// handle's error slot.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct OpenError {
    /// Status code of the failure
    pub status: Status,
    /// Diagnostic message
    pub message: String,
}

impl OpenError {
    pub(crate) fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<WalError> for OpenError {
    fn from(e: WalError) -> Self {
        OpenError::new(e.status(), e.to_string())
    }
}

impl From<ConfigError> for OpenError {
    fn from(e: ConfigError) -> Self {
        OpenError::new(Status::CantOpen, e.to_string())
    }
}
