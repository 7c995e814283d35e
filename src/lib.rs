//! kvbridge - typed client bridge over an embedded key-value engine
//!
//! Callers use typed operations (SET, GET, DEL, APPEND, counters, hash fields,
//! multi-key batches). Each one is rendered into a textual command, executed
//! synchronously by the engine, and its result decoded into a string,
//! integer, boolean, or list of strings.
//!
//! # Quick Start
//!
//! ```ignore
//! use kvbridge::Store;
//!
//! // In-memory instance
//! let mut store = Store::memory()?;
//!
//! store.set("name", "John")?;
//! assert_eq!(store.get("name")?, "John");
//! assert_eq!(store.append("name", " Smith")?, 10);
//!
//! store.hmset("user", &[("age", "29"), ("email", "j@x.io")])?;
//! assert_eq!(store.hkeys("user")?, vec!["age", "email"]);
//!
//! store.close()?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the executor's [`Bridge`], which is the only
//! code that talks to the engine. The engine itself (`kvbridge-engine`) is
//! reached solely through the [`Engine`] trait.

// Re-export the public API from kvbridge-executor
pub use kvbridge_executor::*;
