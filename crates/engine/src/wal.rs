//! Append-only command log for durable instances.
//!
//! Every successful write command is appended as its command text. Opening a
//! durable instance replays the log into an empty keyspace; commands are
//! deterministic so replay reproduces the state exactly.
//!
//! # File Layout
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header: magic "KVBW" (4) | ver (4)   │
//! ├──────────────────────────────────────┤
//! │ Record 1                             │
//! ├──────────────────────────────────────┤
//! │ ...                                  │
//! └──────────────────────────────────────┘
//! ```
//!
//! # Record Layout
//!
//! ```text
//! ┌─────────────────┬────────────────┬──────────────────────┬───────────┐
//! │ Length (4 bytes)│ Format Ver (1) │ Command text (UTF-8) │ CRC32 (4) │
//! └─────────────────┴────────────────┴──────────────────────┴───────────┘
//! ```
//!
//! The length covers format version, text, and CRC. The CRC covers format
//! version and text.
//!
//! A record cut short at the end of the file (a torn write) is discarded and
//! the file truncated. A checksum mismatch anywhere is corruption.
//!
//! A failed append truncates the file back to its last committed length, so
//! a record whose write reported an error never reaches a later replay.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crc32fast::Hasher;
use tracing::{info, warn};

use crate::config::Durability;
use crate::error::WalError;

/// Log file name inside the data directory.
pub const WAL_FILE_NAME: &str = "commands.wal";

/// Magic bytes identifying a command log: "KVBW"
pub const WAL_MAGIC: [u8; 4] = *b"KVBW";

/// Current log file format version
pub const WAL_FORMAT_VERSION: u32 = 1;

/// Size of the file header in bytes
pub const WAL_HEADER_SIZE: usize = 8;

/// Current record format version
pub const RECORD_FORMAT_VERSION: u8 = 1;

/// Minimum value of the length field: format version + CRC
const MIN_RECORD_LEN: usize = 5;

// =============================================================================
// Record codec
// =============================================================================

/// Why a record could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Not enough bytes for a complete record
    InsufficientData,
    /// Framing or content is invalid
    InvalidFormat(String),
    /// Stored CRC does not match
    ChecksumMismatch,
    /// Command does not fit the 32-bit length field
    TooLarge(usize),
}

/// Encode one command as a log record.
pub fn encode_record(command: &str) -> Result<Vec<u8>, RecordError> {
    let mut payload = Vec::with_capacity(1 + command.len());
    payload.push(RECORD_FORMAT_VERSION);
    payload.extend_from_slice(command.as_bytes());

    let crc = compute_crc(&payload);

    let total_len = payload.len() + 4;
    let length = length_field(total_len)?;
    let mut record = Vec::with_capacity(4 + total_len);
    record.extend_from_slice(&length.to_le_bytes());
    record.extend_from_slice(&payload);
    record.extend_from_slice(&crc.to_le_bytes());
    Ok(record)
}

fn length_field(total_len: usize) -> Result<u32, RecordError> {
    u32::try_from(total_len).map_err(|_| RecordError::TooLarge(total_len))
}

/// Decode one record from the front of `bytes`.
///
/// Returns the command text and the number of bytes consumed.
pub fn decode_record(bytes: &[u8]) -> Result<(String, usize), RecordError> {
    let Some(len_bytes) = bytes.get(0..4) else {
        return Err(RecordError::InsufficientData);
    };
    let length = u32::from_le_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]]) as usize;

    if length < MIN_RECORD_LEN {
        return Err(RecordError::InvalidFormat(format!(
            "record length {} below minimum {}",
            length, MIN_RECORD_LEN
        )));
    }
    let Some(body) = bytes.get(4..4 + length) else {
        return Err(RecordError::InsufficientData);
    };

    let (payload, crc_bytes) = body.split_at(length - 4);
    let stored_crc = u32::from_le_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
    if compute_crc(payload) != stored_crc {
        return Err(RecordError::ChecksumMismatch);
    }

    if payload[0] != RECORD_FORMAT_VERSION {
        return Err(RecordError::InvalidFormat(format!(
            "unsupported record version {}",
            payload[0]
        )));
    }
    let command = std::str::from_utf8(&payload[1..])
        .map_err(|e| RecordError::InvalidFormat(format!("command is not UTF-8: {}", e)))?;

    Ok((command.to_string(), 4 + length))
}

fn compute_crc(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

fn header_bytes() -> [u8; WAL_HEADER_SIZE] {
    let mut bytes = [0u8; WAL_HEADER_SIZE];
    bytes[0..4].copy_from_slice(&WAL_MAGIC);
    bytes[4..8].copy_from_slice(&WAL_FORMAT_VERSION.to_le_bytes());
    bytes
}

// =============================================================================
// Log file
// =============================================================================

/// Outcome of reading an existing log.
#[derive(Debug, Default)]
pub struct Recovery {
    /// Commands in log order
    pub commands: Vec<String>,
    /// Bytes discarded from a torn tail, if any
    pub truncated_bytes: u64,
}

/// Open command log, positioned for appending.
pub struct Wal {
    path: PathBuf,
    file: File,
    /// Length of the header plus every committed record
    committed_len: u64,
    durability: Durability,
    appends: u64,
    /// Set when a failed append could not be rolled back
    poisoned: bool,
}

impl Wal {
    /// Open (or create) the log at `path` and read back its commands.
    pub fn open(path: &Path, durability: Durability) -> Result<(Wal, Recovery), WalError> {
        let io_err = |source| WalError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(io_err)?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(io_err)?;

        let (recovery, committed_len) = if bytes.is_empty() {
            file.write_all(&header_bytes()).map_err(io_err)?;
            file.sync_all().map_err(io_err)?;
            (Recovery::default(), WAL_HEADER_SIZE as u64)
        } else {
            let (recovery, valid_len) = Self::read_records(path, &bytes)?;
            if recovery.truncated_bytes > 0 {
                warn!(
                    target: "kvbridge::wal",
                    path = %path.display(),
                    discarded = recovery.truncated_bytes,
                    "Truncating torn record at end of command log"
                );
                file.set_len(valid_len).map_err(io_err)?;
                file.sync_all().map_err(io_err)?;
            }
            (recovery, valid_len)
        };

        let file = OpenOptions::new().append(true).open(path).map_err(io_err)?;

        info!(
            target: "kvbridge::wal",
            path = %path.display(),
            records = recovery.commands.len(),
            "Command log opened"
        );

        Ok((
            Wal {
                path: path.to_path_buf(),
                file,
                committed_len,
                durability,
                appends: 0,
                poisoned: false,
            },
            recovery,
        ))
    }

    /// Validate the header and decode all complete records.
    ///
    /// Returns the recovery and the length of the valid prefix.
    fn read_records(path: &Path, bytes: &[u8]) -> Result<(Recovery, u64), WalError> {
        if bytes.len() < WAL_HEADER_SIZE {
            return Err(WalError::BadHeader {
                path: path.to_path_buf(),
                reason: format!("file is only {} bytes", bytes.len()),
            });
        }
        if bytes[0..4] != WAL_MAGIC {
            return Err(WalError::BadHeader {
                path: path.to_path_buf(),
                reason: "magic mismatch".to_string(),
            });
        }
        let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if version != WAL_FORMAT_VERSION {
            return Err(WalError::BadHeader {
                path: path.to_path_buf(),
                reason: format!("unsupported format version {}", version),
            });
        }

        let mut recovery = Recovery::default();
        let mut offset = WAL_HEADER_SIZE;
        while offset < bytes.len() {
            match decode_record(&bytes[offset..]) {
                Ok((command, consumed)) => {
                    recovery.commands.push(command);
                    offset += consumed;
                }
                Err(RecordError::InsufficientData) => {
                    recovery.truncated_bytes = (bytes.len() - offset) as u64;
                    break;
                }
                Err(RecordError::ChecksumMismatch) => {
                    return Err(WalError::Checksum {
                        path: path.to_path_buf(),
                        offset: offset as u64,
                    });
                }
                Err(RecordError::InvalidFormat(reason)) => {
                    return Err(WalError::Record {
                        path: path.to_path_buf(),
                        offset: offset as u64,
                        reason,
                    });
                }
                Err(RecordError::TooLarge(len)) => {
                    return Err(WalError::Record {
                        path: path.to_path_buf(),
                        offset: offset as u64,
                        reason: format!("record length {} exceeds the length field", len),
                    });
                }
            }
        }
        Ok((recovery, offset as u64))
    }

    /// Append one command.
    ///
    /// The record is written with a single unbuffered write. `Always`
    /// durability syncs before returning; `Standard` leaves the record in
    /// the OS page cache. On failure the file is cut back to its committed
    /// length and nothing of the record remains.
    pub fn append(&mut self, command: &str) -> Result<(), WalError> {
        if self.poisoned {
            return Err(WalError::Poisoned {
                path: self.path.clone(),
            });
        }
        let record = encode_record(command).map_err(|_| WalError::RecordTooLarge {
            path: self.path.clone(),
            len: command.len(),
        })?;

        if let Err(source) = self.write_record(&record) {
            self.rollback();
            return Err(self.io_err(source));
        }
        self.committed_len += record.len() as u64;
        self.appends += 1;
        Ok(())
    }

    fn write_record(&mut self, record: &[u8]) -> std::io::Result<()> {
        self.file.write_all(record)?;
        if self.durability == Durability::Always {
            self.file.sync_data()?;
        }
        Ok(())
    }

    /// Drop whatever part of a failed record reached the file.
    fn rollback(&mut self) {
        if let Err(e) = self.file.set_len(self.committed_len) {
            warn!(
                target: "kvbridge::wal",
                path = %self.path.display(),
                error = %e,
                "Failed to roll back partial record, refusing further appends"
            );
            self.poisoned = true;
        }
    }

    /// Sync the file.
    pub fn sync(&mut self) -> Result<(), WalError> {
        self.file.sync_all().map_err(|e| self.io_err(e))
    }

    /// Records appended since open.
    pub fn appends(&self) -> u64 {
        self.appends
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes of header and committed records.
    pub fn committed_len(&self) -> u64 {
        self.committed_len
    }

    fn io_err(&self, source: std::io::Error) -> WalError {
        WalError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
