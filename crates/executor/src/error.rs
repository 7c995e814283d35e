//! Error types for bridge operations.
//!
//! All failures surfaced by the bridge and the [`Store`](crate::Store) facade
//! are represented by the [`Error`] enum. Errors are:
//! - **Structured**: Each variant has typed fields
//! - **Serializable**: Can be converted to/from JSON
//!
//! Absent keys are never errors: they decode to `""`, `0`, `false`, or an
//! empty list.

use serde::{Deserialize, Serialize};

use kvbridge_engine::Status;

/// Bridge errors.
///
/// | Variant | Raised by | Cause |
/// |---------|-----------|-------|
/// | `Engine` | open, execute, fetch, close | Engine reported a non-success status |
/// | `Decode` | list decoding | Result text is not a JSON list, or has the wrong length |
/// | `InvalidArgument` | command builder | Argument would break command framing |
///
/// # Example
///
/// ```ignore
/// use kvbridge_executor::{Error, Store};
///
/// match store.set("name", "say \"hi\"") {
///     Err(Error::InvalidArgument { reason }) => println!("rejected: {}", reason),
///     Err(Error::Engine { code, message }) => println!("engine {}: {}", code, message),
///     other => { /* ... */ }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// Engine reported a failure status
    #[error("engine error {code}: {message}")]
    Engine { code: i32, message: String },

    /// Result value could not be decoded as a list
    #[error("decode error: {reason}")]
    Decode { reason: String },

    /// Argument rejected by the command builder
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl Error {
    /// Build an engine error from a status and the engine's diagnostic.
    pub fn engine(status: Status, message: impl Into<String>) -> Self {
        Error::Engine {
            code: status.code(),
            message: message.into(),
        }
    }

    /// Engine status code, if this is an engine error.
    pub fn code(&self) -> Option<i32> {
        match self {
            Error::Engine { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<kvbridge_engine::OpenError> for Error {
    fn from(e: kvbridge_engine::OpenError) -> Self {
        Error::engine(e.status, e.message)
    }
}
