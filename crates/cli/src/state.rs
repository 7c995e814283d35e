//! Session wrapper around an open store.

use kvbridge_executor::{Result, Store};
use serde::Serialize;

use crate::parse::Action;

/// Typed result of one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<String>),
}

/// Holds the store for the lifetime of the process.
pub struct SessionState {
    store: Store,
}

impl SessionState {
    /// Create a new SessionState from an open store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Run one action against the store.
    pub fn execute(&mut self, action: Action) -> Result<Output> {
        let s = &mut self.store;
        let output = match action {
            Action::Set { key, value } => Output::Bool(s.set(&key, &value)?),
            Action::SetNx { key, value } => Output::Bool(s.setnx(&key, &value)?),
            Action::Get { key } => Output::Text(s.get(&key)?),
            Action::GetSet { key, value } => Output::Text(s.getset(&key, &value)?),
            Action::Del { key } => Output::Int(s.del(&key)?),
            Action::Append { key, value } => Output::Int(s.append(&key, &value)?),
            Action::Exists { key } => Output::Bool(s.exists(&key)?),
            Action::Incr { key } => Output::Int(s.incr(&key)?),
            Action::IncrBy { key, delta } => Output::Int(s.incr_by(&key, delta)?),
            Action::Decr { key } => Output::Int(s.decr(&key)?),
            Action::DecrBy { key, delta } => Output::Int(s.decr_by(&key, delta)?),
            Action::Copy { src, dst } => Output::Bool(s.copy(&src, &dst)?),
            Action::Move { src, dst } => Output::Bool(s.move_key(&src, &dst)?),
            Action::MSet { pairs } => Output::Bool(s.mset(&pairs)?),
            Action::MGet { keys } => Output::List(s.mget(&keys)?),
            Action::MSetNx { pairs } => Output::Bool(s.msetnx(&pairs)?),
            Action::HSet { key, field, value } => Output::Bool(s.hset(&key, &field, &value)?),
            Action::HGet { key, field } => Output::Text(s.hget(&key, &field)?),
            Action::HDel { key, field } => Output::Int(s.hdel(&key, &field)?),
            Action::HLen { key } => Output::Int(s.hlen(&key)?),
            Action::HExists { key, field } => Output::Bool(s.hexists(&key, &field)?),
            Action::HKeys { key } => Output::List(s.hkeys(&key)?),
            Action::HVals { key } => Output::List(s.hvals(&key)?),
            Action::HMSet { key, pairs } => Output::Int(s.hmset(&key, &pairs)?),
            Action::HMGet { key, fields } => Output::List(s.hmget(&key, &fields)?),
        };
        Ok(output)
    }

    /// Close the store, reporting any failure.
    pub fn close(self) -> Result<()> {
        self.store.close()
    }
}
