//! # kvbridge executor
//!
//! Typed client bridge over an embedded command-driven key-value engine.
//!
//! Each operation flows through four layers:
//!
//! ```text
//! Store::set("k", "v")
//!   └─ Command   SET "k" "v"          (command.rs)
//!   └─ Bridge    exec → status        (bridge.rs)
//!   └─ Reply     exec_result → Value
//!   └─ decode    Value → bool         (decode.rs)
//! ```
//!
//! ## Quick Start
//!
//! ```text
//! use kvbridge_executor::Store;
//!
//! let mut store = Store::open("/path/to/data")?;
//! store.mset(&[("name", "John"), ("age", "29")])?;
//! let values = store.mget(&["name", "age", "email"])?;
//! assert_eq!(values, vec!["John", "29", ""]);
//! store.close()?;
//! ```

#![warn(missing_docs)]

mod api;
pub mod bridge;
pub mod command;
pub mod decode;
mod error;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API
// =============================================================================

pub use api::Store;
pub use bridge::{Bridge, Engine, Reply};
pub use command::{Command, Verb};
pub use error::Error;

pub use kvbridge_engine::{Handle, Status, Target, Value};

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, Error>;
