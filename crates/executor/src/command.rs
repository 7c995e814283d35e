//! Command builder.
//!
//! A [`Command`] is a [`Verb`] plus arguments, rendered as
//!
//! ```text
//! VERB "arg1" "arg2" ...
//! ```
//!
//! The engine's command grammar has no escape sequences, so an argument
//! containing `"` would end its quoted token early. Such arguments, and any
//! containing `\`, are rejected when added.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Command verbs understood by the engine.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    // Keys
    Set,
    SetNx,
    Get,
    GetSet,
    Del,
    Append,
    Exists,
    Incr,
    IncrBy,
    Decr,
    DecrBy,
    Copy,
    Move,
    // Batch
    MSet,
    MGet,
    MSetNx,
    // Hashes
    HSet,
    HGet,
    HDel,
    HLen,
    HExists,
    HKeys,
    HVals,
    HMSet,
    HMGet,
}

impl Verb {
    /// Every verb, in declaration order.
    pub const ALL: [Verb; 25] = [
        Verb::Set,
        Verb::SetNx,
        Verb::Get,
        Verb::GetSet,
        Verb::Del,
        Verb::Append,
        Verb::Exists,
        Verb::Incr,
        Verb::IncrBy,
        Verb::Decr,
        Verb::DecrBy,
        Verb::Copy,
        Verb::Move,
        Verb::MSet,
        Verb::MGet,
        Verb::MSetNx,
        Verb::HSet,
        Verb::HGet,
        Verb::HDel,
        Verb::HLen,
        Verb::HExists,
        Verb::HKeys,
        Verb::HVals,
        Verb::HMSet,
        Verb::HMGet,
    ];

    /// The verb token as sent to the engine.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Set => "SET",
            Verb::SetNx => "SETNX",
            Verb::Get => "GET",
            Verb::GetSet => "GETSET",
            Verb::Del => "DEL",
            Verb::Append => "APPEND",
            Verb::Exists => "EXISTS",
            Verb::Incr => "INCR",
            Verb::IncrBy => "INCRBY",
            Verb::Decr => "DECR",
            Verb::DecrBy => "DECRBY",
            Verb::Copy => "COPY",
            Verb::Move => "MOVE",
            Verb::MSet => "MSET",
            Verb::MGet => "MGET",
            Verb::MSetNx => "MSETNX",
            Verb::HSet => "HSET",
            Verb::HGet => "HGET",
            Verb::HDel => "HDEL",
            Verb::HLen => "HLEN",
            Verb::HExists => "HEXISTS",
            Verb::HKeys => "HKEYS",
            Verb::HVals => "HVALS",
            Verb::HMSet => "HMSET",
            Verb::HMGet => "HMGET",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    verb: Verb,
    args: Vec<String>,
}

impl Command {
    /// Start a command with no arguments.
    pub fn new(verb: Verb) -> Self {
        Command {
            verb,
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl AsRef<str>) -> Result<Self> {
        let arg = arg.as_ref();
        validate_arg(self.verb, arg)?;
        self.args.push(arg.to_string());
        Ok(self)
    }

    /// Append one argument per item, in order.
    pub fn args<I, S>(self, items: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        items.into_iter().try_fold(self, |cmd, item| cmd.arg(item))
    }

    /// Flatten `(key, value)` pairs into alternating arguments, in order.
    pub fn pairs<I, K, V>(self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        pairs
            .into_iter()
            .try_fold(self, |cmd, (k, v)| cmd.arg(k)?.arg(v))
    }

    /// The command verb.
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// The arguments, unquoted.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Render the command text.
    pub fn render(&self) -> String {
        let capacity = self.verb.as_str().len() + self.args.iter().map(|a| a.len() + 3).sum::<usize>();
        let mut text = String::with_capacity(capacity);
        text.push_str(self.verb.as_str());
        for arg in &self.args {
            text.push_str(" \"");
            text.push_str(arg);
            text.push('"');
        }
        text
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn validate_arg(verb: Verb, arg: &str) -> Result<()> {
    if let Some(c) = arg.chars().find(|c| matches!(c, '"' | '\\')) {
        return Err(Error::InvalidArgument {
            reason: format!(
                "{} argument contains '{}', which cannot be sent unescaped",
                verb, c
            ),
        });
    }
    Ok(())
}
