//! Store integration suite.
//!
//! Exercises the public `kvbridge` API end to end against the real engine.

mod common;
mod persistence;
mod properties;
mod semantics;
