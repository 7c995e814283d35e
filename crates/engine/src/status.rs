//! Status codes returned by the engine primitives.
//!
//! Every primitive that can fail reports a [`Status`]. The numeric codes are
//! stable and are surfaced unchanged to clients (see `Status::code`).

use std::fmt;

/// Result status of an engine primitive.
///
/// | Status | Code | Meaning |
/// |--------|------|---------|
/// | `Ok` | 0 | Success |
/// | `IoErr` | -2 | Command log write or sync failed |
/// | `NotFound` | -6 | No result available |
/// | `Invalid` | -9 | Malformed command, bad arity, wrong type, overflow |
/// | `Abort` | -10 | Handle already closed |
/// | `Unknown` | -13 | Unknown command verb |
/// | `Busy` | -14 | Data directory locked by another handle |
/// | `Corrupt` | -24 | Command log checksum or format mismatch |
/// | `CantOpen` | -74 | Data directory or config cannot be opened |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    /// Success
    Ok = 0,
    /// I/O failure on the command log
    IoErr = -2,
    /// Nothing to return
    NotFound = -6,
    /// Invalid command or argument
    Invalid = -9,
    /// Operation aborted (closed handle)
    Abort = -10,
    /// Unknown command
    Unknown = -13,
    /// Resource busy
    Busy = -14,
    /// On-disk data is corrupt
    Corrupt = -24,
    /// Cannot open the instance
    CantOpen = -74,
}

impl Status {
    /// Numeric status code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// True only for [`Status::Ok`].
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }

    /// Short lowercase name, used in log fields.
    pub fn name(self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::IoErr => "io error",
            Status::NotFound => "not found",
            Status::Invalid => "invalid",
            Status::Abort => "abort",
            Status::Unknown => "unknown command",
            Status::Busy => "busy",
            Status::Corrupt => "corrupt",
            Status::CantOpen => "cannot open",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}
