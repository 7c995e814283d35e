//! Engine handle: the four primitives plus close.
//!
//! A handle owns one keyspace. Durable handles additionally own the data
//! directory lock and the command log.
//!
//! ```text
//! exec(text) ──► parse ──► dispatch ──► keyspace
//!                   │
//!                   └─ write verb on a durable handle:
//!                      dispatch on staged keys ──► command log ──► keyspace
//! ```
//!
//! A write whose log append fails leaves the keyspace unchanged.
//!
//! The result slot and the error slot hold the outcome of the most recent
//! `exec` only. Every `exec` clears both before running.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::commands::{dispatch, is_write, write_keys};
use crate::config::{EngineConfig, CONFIG_FILE_NAME};
use crate::error::{CommandError, OpenError};
use crate::keyspace::Keyspace;
use crate::parse::parse;
use crate::wal::{Wal, WAL_FILE_NAME};
use crate::{Status, Target, Value};

/// Lock file name inside the data directory.
pub const LOCK_FILE_NAME: &str = "LOCK";

/// Files held by a durable handle.
struct Durable {
    dir: PathBuf,
    wal: Wal,
    // Released when dropped
    _lock: File,
}

/// An open engine instance.
pub struct Handle {
    keyspace: Keyspace,
    durable: Option<Durable>,
    last_result: Option<Value>,
    last_error: String,
    closed: bool,
}

impl std::fmt::Debug for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("keys", &self.keyspace.len())
            .field("dir", &self.durable.as_ref().map(|d| &d.dir))
            .field("closed", &self.closed)
            .finish()
    }
}

impl Handle {
    /// Open an instance.
    ///
    /// `Target::Memory` starts empty. `Target::Path(dir)` creates the
    /// directory if needed, takes the directory lock, loads
    /// `kvbridge.toml`, and replays the command log.
    pub fn open(target: &Target) -> Result<Handle, OpenError> {
        match target {
            Target::Memory => {
                debug!(target: "kvbridge::engine", "Opened in-memory instance");
                Ok(Self::with_keyspace(Keyspace::new(), None))
            }
            Target::Path(dir) => Self::open_dir(dir),
        }
    }

    fn with_keyspace(keyspace: Keyspace, durable: Option<Durable>) -> Self {
        Handle {
            keyspace,
            durable,
            last_result: None,
            last_error: String::new(),
            closed: false,
        }
    }

    fn open_dir(dir: &Path) -> Result<Handle, OpenError> {
        std::fs::create_dir_all(dir).map_err(|e| {
            OpenError::new(
                Status::CantOpen,
                format!("cannot create data directory '{}': {}", dir.display(), e),
            )
        })?;

        let lock_path = dir.join(LOCK_FILE_NAME);
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(|e| {
                OpenError::new(
                    Status::CantOpen,
                    format!("cannot open lock file '{}': {}", lock_path.display(), e),
                )
            })?;
        fs2::FileExt::try_lock_exclusive(&lock).map_err(|_| {
            OpenError::new(
                Status::Busy,
                format!("data directory '{}' is already in use", dir.display()),
            )
        })?;

        let config_path = dir.join(CONFIG_FILE_NAME);
        EngineConfig::write_default_if_missing(&config_path)?;
        let config = EngineConfig::from_file(&config_path)?;
        let durability = config.durability_mode()?;

        let (wal, recovery) = Wal::open(&dir.join(WAL_FILE_NAME), durability)?;

        let mut keyspace = Keyspace::new();
        for (index, text) in recovery.commands.iter().enumerate() {
            replay_one(&mut keyspace, text).map_err(|e| {
                OpenError::new(
                    Status::Corrupt,
                    format!("command log record {} cannot be replayed: {}", index, e),
                )
            })?;
        }

        info!(
            target: "kvbridge::engine",
            path = %dir.display(),
            ?durability,
            commands_replayed = recovery.commands.len(),
            bytes_truncated = recovery.truncated_bytes,
            keys = keyspace.len(),
            "Recovery complete"
        );

        Ok(Self::with_keyspace(
            keyspace,
            Some(Durable {
                dir: dir.to_path_buf(),
                wal,
                _lock: lock,
            }),
        ))
    }

    /// Execute one command.
    ///
    /// On `Status::Ok` the result is available through
    /// [`exec_result`](Self::exec_result). Otherwise the diagnostic is
    /// available through [`last_error`](Self::last_error).
    pub fn exec(&mut self, text: &str) -> Status {
        self.last_result = None;
        self.last_error.clear();

        match self.run(text) {
            Ok(value) => {
                self.last_result = Some(value);
                Status::Ok
            }
            Err(e) => {
                let status = e.status();
                debug!(target: "kvbridge::engine", %status, error = %e, "Command failed");
                self.last_error = e.to_string();
                status
            }
        }
    }

    fn run(&mut self, text: &str) -> Result<Value, CommandError> {
        if self.closed {
            return Err(CommandError::Closed);
        }
        let cmd = parse(text)?;
        let durable = match self.durable.as_mut() {
            Some(durable) if is_write(&cmd.verb) => durable,
            _ => return dispatch(&mut self.keyspace, &cmd),
        };

        // Stage the write on a copy of the keys it touches; commit only once
        // the record is in the log.
        let keys = write_keys(&cmd);
        let mut staged = self.keyspace.extract(&keys);
        let value = dispatch(&mut staged, &cmd)?;
        durable.wal.append(text)?;
        self.keyspace.absorb(staged, &keys);
        Ok(value)
    }

    /// The result of the most recent successful `exec`.
    ///
    /// Fails with `NotFound` when the last `exec` failed or none has run, and
    /// with `Abort` once the handle is closed.
    pub fn exec_result(&self) -> Result<&Value, Status> {
        if self.closed {
            return Err(Status::Abort);
        }
        self.last_result.as_ref().ok_or(Status::NotFound)
    }

    /// Diagnostic text of the most recent failure, empty if none.
    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// Number of keys currently stored.
    pub fn key_count(&self) -> usize {
        self.keyspace.len()
    }

    /// Data directory of a durable handle.
    pub fn dir(&self) -> Option<&Path> {
        self.durable.as_ref().map(|d| d.dir.as_path())
    }

    /// Check if the handle has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Close the instance, syncing the command log and releasing the lock.
    ///
    /// Closing twice returns `Abort`.
    pub fn close(&mut self) -> Status {
        if self.closed {
            self.last_error = CommandError::Closed.to_string();
            return Status::Abort;
        }
        self.closed = true;
        self.last_result = None;

        let Some(mut durable) = self.durable.take() else {
            return Status::Ok;
        };
        let appends = durable.wal.appends();
        match durable.wal.sync() {
            Ok(()) => {
                info!(
                    target: "kvbridge::engine",
                    path = %durable.dir.display(),
                    appends,
                    "Instance closed"
                );
                Status::Ok
            }
            Err(e) => {
                warn!(target: "kvbridge::engine", error = %e, "Command log sync failed on close");
                let status = e.status();
                self.last_error = e.to_string();
                status
            }
        }
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.close();
        }
    }
}

fn replay_one(keyspace: &mut Keyspace, text: &str) -> Result<(), CommandError> {
    let cmd = parse(text)?;
    dispatch(keyspace, &cmd)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_result_slot_cleared_by_next_exec() {
        let mut h = Handle::open(&Target::Memory).unwrap();
        assert_eq!(h.exec(r#"SET "a" "1""#), Status::Ok);
        assert_eq!(h.exec_result(), Ok(&Value::Bool(true)));

        assert_eq!(h.exec("NOPE"), Status::Unknown);
        assert_eq!(h.exec_result(), Err(Status::NotFound));
        assert!(h.last_error().contains("NOPE"));

        assert_eq!(h.exec(r#"GET "a""#), Status::Ok);
        assert_eq!(h.last_error(), "");
    }

    #[test]
    fn test_exec_result_before_any_exec() {
        let h = Handle::open(&Target::Memory).unwrap();
        assert_eq!(h.exec_result(), Err(Status::NotFound));
    }

    #[test]
    fn test_closed_handle_aborts() {
        let mut h = Handle::open(&Target::Memory).unwrap();
        assert_eq!(h.close(), Status::Ok);
        assert!(h.is_closed());
        assert_eq!(h.exec(r#"GET "a""#), Status::Abort);
        assert_eq!(h.exec_result(), Err(Status::Abort));
        assert_eq!(h.close(), Status::Abort);
    }

    #[test]
    fn test_durable_roundtrip() {
        let dir = tempdir().unwrap();
        let target = Target::from(dir.path());
        {
            let mut h = Handle::open(&target).unwrap();
            assert_eq!(h.exec(r#"SET "a" "1""#), Status::Ok);
            assert_eq!(h.exec(r#"HSET "h" "f" "v""#), Status::Ok);
            assert_eq!(h.exec(r#"GET "a""#), Status::Ok);
            assert_eq!(h.close(), Status::Ok);
        }
        let mut h = Handle::open(&target).unwrap();
        assert_eq!(h.key_count(), 2);
        assert_eq!(h.exec(r#"HGET "h" "f""#), Status::Ok);
        assert_eq!(h.exec_result(), Ok(&Value::Str("v".into())));
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_second_open_is_busy() {
        let dir = tempdir().unwrap();
        let target = Target::from(dir.path());
        let _first = Handle::open(&target).unwrap();
        let err = Handle::open(&target).unwrap_err();
        assert_eq!(err.status, Status::Busy);
    }

    #[test]
    fn test_failed_writes_are_not_logged() {
        let dir = tempdir().unwrap();
        let target = Target::from(dir.path());
        {
            let mut h = Handle::open(&target).unwrap();
            assert_eq!(h.exec(r#"SET "s" "x""#), Status::Ok);
            assert_eq!(h.exec(r#"HSET "s" "f" "v""#), Status::Invalid);
        }
        // Replay would fail with Corrupt if the rejected HSET had been logged
        let h = Handle::open(&target).unwrap();
        assert_eq!(h.key_count(), 1);
    }

    #[test]
    fn test_invalid_config_cannot_open() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "durability = \"turbo\"").unwrap();
        let err = Handle::open(&Target::from(dir.path())).unwrap_err();
        assert_eq!(err.status, Status::CantOpen);
    }
}
