//! Execution bridge: the only code that talks to the engine.
//!
//! The engine is reached through the [`Engine`] trait, which mirrors the
//! engine's primitives one to one. [`Bridge`] owns one engine instance,
//! turns non-success statuses into [`Error::Engine`], and hands out the
//! result of each command as a single-use [`Reply`].
//!
//! ```text
//! Bridge::execute(&Command)
//!     │  render ──► Engine::exec ──► Status
//!     │                              ├─ not Ok ──► Engine::last_error ──► Error::Engine
//!     ▼                              └─ Ok
//! Reply<'_> ──► Engine::exec_result ──► &Value ──► decode
//! ```
//!
//! A `Reply` borrows the bridge mutably, so no other command can run until it
//! has been consumed or dropped.

use kvbridge_engine::{Handle, Status, Target, Value};
use tracing::{debug, warn};

use crate::command::Command;
use crate::decode;
use crate::{Error, Result};

// =============================================================================
// Engine seam
// =============================================================================

/// Primitives of an embedded command-driven engine.
pub trait Engine: Sized {
    /// Open an instance.
    fn open(target: &Target) -> Result<Self>;

    /// Execute one command.
    fn exec(&mut self, command: &str) -> Status;

    /// Result of the most recent successful command.
    fn exec_result(&self) -> std::result::Result<&Value, Status>;

    /// Diagnostic of the most recent failure.
    fn last_error(&self) -> String;

    /// Release the instance.
    fn close(&mut self) -> Status;
}

impl Engine for Handle {
    fn open(target: &Target) -> Result<Self> {
        Handle::open(target).map_err(Error::from)
    }

    fn exec(&mut self, command: &str) -> Status {
        Handle::exec(self, command)
    }

    fn exec_result(&self) -> std::result::Result<&Value, Status> {
        Handle::exec_result(self)
    }

    fn last_error(&self) -> String {
        Handle::last_error(self).to_string()
    }

    fn close(&mut self) -> Status {
        Handle::close(self)
    }
}

// =============================================================================
// Bridge
// =============================================================================

/// Owns one engine instance for its whole life.
///
/// Closed by [`close`](Bridge::close), or on drop.
pub struct Bridge<E: Engine = Handle> {
    engine: E,
    open: bool,
}

impl<E: Engine> Bridge<E> {
    /// Open an engine instance at `target`.
    pub fn open(target: &Target) -> Result<Self> {
        let engine = E::open(target)?;
        debug!(target: "kvbridge::bridge", %target, "Engine opened");
        Ok(Self::from_engine(engine))
    }

    /// Wrap an already-open engine.
    pub fn from_engine(engine: E) -> Self {
        Bridge { engine, open: true }
    }

    /// Submit a command.
    ///
    /// On success the returned [`Reply`] grants access to the result.
    pub fn execute(&mut self, command: &Command) -> Result<Reply<'_, E>> {
        let text = command.render();
        debug!(
            target: "kvbridge::bridge",
            verb = %command.verb(),
            args = command.arguments().len(),
            "Executing command"
        );

        let status = self.engine.exec(&text);
        if !status.is_ok() {
            let message = self.engine.last_error();
            warn!(
                target: "kvbridge::bridge",
                verb = %command.verb(),
                code = status.code(),
                %message,
                "Engine rejected command"
            );
            return Err(Error::engine(status, message));
        }
        Ok(Reply {
            engine: &self.engine,
        })
    }

    /// Borrow the underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Close the engine, reporting any failure.
    pub fn close(mut self) -> Result<()> {
        self.open = false;
        let status = self.engine.close();
        if status.is_ok() {
            debug!(target: "kvbridge::bridge", "Engine closed");
            Ok(())
        } else {
            Err(Error::engine(status, self.engine.last_error()))
        }
    }
}

impl<E: Engine> Drop for Bridge<E> {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        let status = self.engine.close();
        if !status.is_ok() {
            warn!(
                target: "kvbridge::bridge",
                code = status.code(),
                message = %self.engine.last_error(),
                "Engine close failed during drop"
            );
        }
    }
}

// =============================================================================
// Reply
// =============================================================================

/// Read access to the result of one successful command.
///
/// Consumed by exactly one of the accessors below.
pub struct Reply<'a, E: Engine = Handle> {
    engine: &'a E,
}

impl<'a, E: Engine> Reply<'a, E> {
    /// The raw result value.
    pub fn fetch(self) -> Result<&'a Value> {
        let engine = self.engine;
        engine
            .exec_result()
            .map_err(|status| Error::engine(status, engine.last_error()))
    }

    /// Decode as text.
    pub fn into_string(self) -> Result<String> {
        self.fetch().map(decode::to_string)
    }

    /// Decode as an integer.
    pub fn into_int(self) -> Result<i64> {
        self.fetch().map(decode::to_int)
    }

    /// Decode as a boolean.
    pub fn into_bool(self) -> Result<bool> {
        self.fetch().map(decode::to_bool)
    }

    /// Decode as a list of strings.
    pub fn into_array(self) -> Result<Vec<String>> {
        self.fetch().and_then(decode::to_array)
    }

    /// Decode as a list of exactly `len` strings.
    pub fn into_array_of_len(self, len: usize) -> Result<Vec<String>> {
        self.fetch().and_then(|v| decode::to_array_of_len(v, len))
    }
}
