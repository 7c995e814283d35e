//! Command implementations.
//!
//! [`dispatch`] routes a parsed command to its handler. Handlers validate
//! arity, apply the command to the [`Keyspace`], and return the result
//! [`Value`].
//!
//! # Result conventions
//!
//! | Command | Result |
//! |---------|--------|
//! | SET, MSET, HSET | `Bool(true)` |
//! | SETNX, MSETNX | `Bool(written)` |
//! | GET, GETSET, HGET | `Str` or `Null` |
//! | DEL, HDEL, HLEN | `Int(count)` |
//! | HMSET | `Int(distinct fields written)` |
//! | INCR, INCRBY, DECR, DECRBY | `Int(new value)` |
//! | APPEND | `Int(new length)`, or `Bool(true)` when the key was created |
//! | EXISTS, HEXISTS, COPY, MOVE | `Bool` |
//! | MGET, HMGET, HKEYS, HVALS | `Array` |

use std::collections::BTreeSet;

use crate::error::CommandError;
use crate::keyspace::{Entry, Keyspace};
use crate::parse::Parsed;
use crate::value::parse_int_prefix;
use crate::Value;

/// Verbs whose successful execution changes the keyspace and is recorded in
/// the command log.
const WRITE_VERBS: &[&str] = &[
    "SET", "SETNX", "GETSET", "DEL", "APPEND", "INCR", "INCRBY", "DECR", "DECRBY", "COPY", "MOVE",
    "MSET", "MSETNX", "HSET", "HDEL", "HMSET",
];

/// Check whether a verb mutates the keyspace.
pub fn is_write(verb: &str) -> bool {
    WRITE_VERBS.contains(&verb)
}

/// Keys a write command may create, change, or remove.
///
/// Lenient about arity: [`dispatch`] reports arity errors.
pub fn write_keys(cmd: &Parsed) -> Vec<&str> {
    let args = cmd.args.iter().map(String::as_str);
    match cmd.verb.as_str() {
        "DEL" => args.collect(),
        "COPY" | "MOVE" => args.take(2).collect(),
        "MSET" | "MSETNX" => args.step_by(2).collect(),
        _ => args.take(1).collect(),
    }
}

/// Execute a parsed command against the keyspace.
pub fn dispatch(ks: &mut Keyspace, cmd: &Parsed) -> Result<Value, CommandError> {
    let args = cmd.args.as_slice();
    match cmd.verb.as_str() {
        // Strings
        "SET" => {
            let [key, value] = exact::<2>("SET", args)?;
            ks.set_str(key, value);
            Ok(Value::Bool(true))
        }
        "SETNX" => {
            let [key, value] = exact::<2>("SETNX", args)?;
            if ks.contains(key) {
                return Ok(Value::Bool(false));
            }
            ks.set_str(key, value);
            Ok(Value::Bool(true))
        }
        "GET" => {
            let [key] = exact::<1>("GET", args)?;
            Ok(ks.get_str(key)?.cloned().into())
        }
        "GETSET" => {
            let [key, value] = exact::<2>("GETSET", args)?;
            let previous = ks.get_str(key)?.cloned();
            ks.set_str(key, value);
            Ok(previous.into())
        }
        "APPEND" => {
            let [key, value] = exact::<2>("APPEND", args)?;
            match ks.str_mut(key)? {
                Some(existing) => {
                    existing.push_str(value);
                    Ok(Value::Int(existing.len() as i64))
                }
                None => {
                    ks.set_str(key, value);
                    Ok(Value::Bool(true))
                }
            }
        }
        "INCR" => {
            let [key] = exact::<1>("INCR", args)?;
            incr_by(ks, key, 1)
        }
        "DECR" => {
            let [key] = exact::<1>("DECR", args)?;
            incr_by(ks, key, -1)
        }
        "INCRBY" => {
            let [key, delta] = exact::<2>("INCRBY", args)?;
            incr_by(ks, key, parse_int_prefix(delta))
        }
        "DECRBY" => {
            let [key, delta] = exact::<2>("DECRBY", args)?;
            let delta = parse_int_prefix(delta)
                .checked_neg()
                .ok_or_else(|| CommandError::Overflow { key: key.clone() })?;
            incr_by(ks, key, delta)
        }

        // Keys
        "DEL" => {
            let keys = at_least("DEL", args, 1)?;
            let removed = keys.iter().filter(|k| ks.remove(k).is_some()).count();
            Ok(Value::Int(removed as i64))
        }
        "EXISTS" => {
            let [key] = exact::<1>("EXISTS", args)?;
            Ok(Value::Bool(ks.contains(key)))
        }
        "COPY" => {
            let [src, dst] = exact::<2>("COPY", args)?;
            match ks.entry(src).cloned() {
                Some(entry) => {
                    ks.put(dst, entry);
                    Ok(Value::Bool(true))
                }
                None => Ok(Value::Bool(false)),
            }
        }
        "MOVE" => {
            let [src, dst] = exact::<2>("MOVE", args)?;
            if src == dst {
                return Ok(Value::Bool(ks.contains(src)));
            }
            match ks.remove(src) {
                Some(entry) => {
                    ks.put(dst, entry);
                    Ok(Value::Bool(true))
                }
                None => Ok(Value::Bool(false)),
            }
        }

        // Batch
        "MSET" => {
            let pairs = pairs("MSET", args)?;
            for pair in pairs.chunks_exact(2) {
                ks.set_str(&pair[0], &pair[1]);
            }
            Ok(Value::Bool(true))
        }
        "MSETNX" => {
            let pairs = pairs("MSETNX", args)?;
            if pairs.chunks_exact(2).any(|pair| ks.contains(&pair[0])) {
                return Ok(Value::Bool(false));
            }
            for pair in pairs.chunks_exact(2) {
                ks.set_str(&pair[0], &pair[1]);
            }
            Ok(Value::Bool(true))
        }
        "MGET" => {
            let keys = at_least("MGET", args, 1)?;
            let values: Vec<Option<String>> = keys
                .iter()
                .map(|k| match ks.entry(k) {
                    Some(Entry::Str(s)) => Some(s.clone()),
                    _ => None,
                })
                .collect();
            Ok(Value::Array(values))
        }

        // Hashes
        "HSET" => {
            let [key, field, value] = exact::<3>("HSET", args)?;
            ks.hash_mut_or_create(key)?
                .insert(field.clone(), value.clone());
            Ok(Value::Bool(true))
        }
        "HGET" => {
            let [key, field] = exact::<2>("HGET", args)?;
            Ok(ks
                .get_hash(key)?
                .and_then(|h| h.get(field.as_str()))
                .cloned()
                .into())
        }
        "HDEL" => {
            let (key, fields) = key_and_rest("HDEL", args)?;
            Ok(Value::Int(ks.remove_fields(key, fields)?))
        }
        "HLEN" => {
            let [key] = exact::<1>("HLEN", args)?;
            Ok(Value::Int(ks.get_hash(key)?.map_or(0, |h| h.len() as i64)))
        }
        "HEXISTS" => {
            let [key, field] = exact::<2>("HEXISTS", args)?;
            Ok(Value::Bool(
                ks.get_hash(key)?
                    .is_some_and(|h| h.contains_key(field.as_str())),
            ))
        }
        "HKEYS" => {
            let [key] = exact::<1>("HKEYS", args)?;
            let fields: Vec<Option<String>> = ks
                .get_hash(key)?
                .map(|h| h.keys().cloned().map(Some).collect())
                .unwrap_or_default();
            Ok(Value::Array(fields))
        }
        "HVALS" => {
            let [key] = exact::<1>("HVALS", args)?;
            let values: Vec<Option<String>> = ks
                .get_hash(key)?
                .map(|h| h.values().cloned().map(Some).collect())
                .unwrap_or_default();
            Ok(Value::Array(values))
        }
        "HMSET" => {
            let (key, rest) = key_and_rest("HMSET", args)?;
            if rest.len() % 2 != 0 {
                return Err(CommandError::Arity { verb: "HMSET" });
            }
            let hash = ks.hash_mut_or_create(key)?;
            for pair in rest.chunks_exact(2) {
                hash.insert(pair[0].clone(), pair[1].clone());
            }
            let distinct: BTreeSet<&str> = rest.iter().step_by(2).map(String::as_str).collect();
            Ok(Value::Int(distinct.len() as i64))
        }
        "HMGET" => {
            let (key, fields) = key_and_rest("HMGET", args)?;
            let hash = ks.get_hash(key)?;
            let values: Vec<Option<String>> = fields
                .iter()
                .map(|f| hash.and_then(|h| h.get(f.as_str())).cloned())
                .collect();
            Ok(Value::Array(values))
        }

        other => Err(CommandError::UnknownCommand {
            verb: other.to_string(),
        }),
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn incr_by(ks: &mut Keyspace, key: &str, delta: i64) -> Result<Value, CommandError> {
    let current = ks.get_str(key)?.map_or(0, |s| parse_int_prefix(s));
    let next = current
        .checked_add(delta)
        .ok_or_else(|| CommandError::Overflow {
            key: key.to_string(),
        })?;
    ks.set_str(key, &next.to_string());
    Ok(Value::Int(next))
}

fn exact<'a, const N: usize>(
    verb: &'static str,
    args: &'a [String],
) -> Result<&'a [String; N], CommandError> {
    args.try_into().map_err(|_| CommandError::Arity { verb })
}

fn at_least<'a>(
    verb: &'static str,
    args: &'a [String],
    min: usize,
) -> Result<&'a [String], CommandError> {
    if args.len() < min {
        return Err(CommandError::Arity { verb });
    }
    Ok(args)
}

/// Non-empty, even-length key/value list.
fn pairs<'a>(verb: &'static str, args: &'a [String]) -> Result<&'a [String], CommandError> {
    if args.is_empty() || args.len() % 2 != 0 {
        return Err(CommandError::Arity { verb });
    }
    Ok(args)
}

/// A key followed by at least one more argument.
fn key_and_rest<'a>(
    verb: &'static str,
    args: &'a [String],
) -> Result<(&'a String, &'a [String]), CommandError> {
    match args {
        [key, rest @ ..] if !rest.is_empty() => Ok((key, rest)),
        _ => Err(CommandError::Arity { verb }),
    }
}
