//! ArgMatches → Action conversion.

use clap::ArgMatches;

/// One facade operation with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Set { key: String, value: String },
    SetNx { key: String, value: String },
    Get { key: String },
    GetSet { key: String, value: String },
    Del { key: String },
    Append { key: String, value: String },
    Exists { key: String },
    Incr { key: String },
    IncrBy { key: String, delta: i64 },
    Decr { key: String },
    DecrBy { key: String, delta: i64 },
    Copy { src: String, dst: String },
    Move { src: String, dst: String },
    MSet { pairs: Vec<(String, String)> },
    MGet { keys: Vec<String> },
    MSetNx { pairs: Vec<(String, String)> },
    HSet { key: String, field: String, value: String },
    HGet { key: String, field: String },
    HDel { key: String, field: String },
    HLen { key: String },
    HExists { key: String, field: String },
    HKeys { key: String },
    HVals { key: String },
    HMSet { key: String, pairs: Vec<(String, String)> },
    HMGet { key: String, fields: Vec<String> },
}

/// Convert clap ArgMatches into an Action.
pub fn matches_to_action(matches: &ArgMatches) -> Result<Action, String> {
    let (name, m) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    let action = match name {
        "set" => Action::Set {
            key: one(m, "first")?,
            value: one(m, "second")?,
        },
        "setnx" => Action::SetNx {
            key: one(m, "first")?,
            value: one(m, "second")?,
        },
        "get" => Action::Get { key: one(m, "key")? },
        "getset" => Action::GetSet {
            key: one(m, "first")?,
            value: one(m, "second")?,
        },
        "del" => Action::Del { key: one(m, "key")? },
        "append" => Action::Append {
            key: one(m, "first")?,
            value: one(m, "second")?,
        },
        "exists" => Action::Exists { key: one(m, "key")? },
        "incr" => Action::Incr { key: one(m, "key")? },
        "incrby" => Action::IncrBy {
            key: one(m, "key")?,
            delta: delta(m)?,
        },
        "decr" => Action::Decr { key: one(m, "key")? },
        "decrby" => Action::DecrBy {
            key: one(m, "key")?,
            delta: delta(m)?,
        },
        "copy" => Action::Copy {
            src: one(m, "first")?,
            dst: one(m, "second")?,
        },
        "move" => Action::Move {
            src: one(m, "first")?,
            dst: one(m, "second")?,
        },
        "mset" => Action::MSet {
            pairs: pairs(many(m, "pairs"))?,
        },
        "mget" => Action::MGet {
            keys: many(m, "names"),
        },
        "msetnx" => Action::MSetNx {
            pairs: pairs(many(m, "pairs"))?,
        },
        "hset" => Action::HSet {
            key: one(m, "key")?,
            field: one(m, "field")?,
            value: one(m, "value")?,
        },
        "hget" => Action::HGet {
            key: one(m, "first")?,
            field: one(m, "second")?,
        },
        "hdel" => Action::HDel {
            key: one(m, "first")?,
            field: one(m, "second")?,
        },
        "hlen" => Action::HLen { key: one(m, "key")? },
        "hexists" => Action::HExists {
            key: one(m, "first")?,
            field: one(m, "second")?,
        },
        "hkeys" => Action::HKeys { key: one(m, "key")? },
        "hvals" => Action::HVals { key: one(m, "key")? },
        "hmset" => Action::HMSet {
            key: one(m, "key")?,
            pairs: pairs(many(m, "pairs"))?,
        },
        "hmget" => Action::HMGet {
            key: one(m, "key")?,
            fields: many(m, "names"),
        },
        other => return Err(format!("Unknown command: {}", other)),
    };
    Ok(action)
}

fn one(m: &ArgMatches, id: &str) -> Result<String, String> {
    m.get_one::<String>(id)
        .cloned()
        .ok_or_else(|| format!("Missing argument: {}", id))
}

fn many(m: &ArgMatches, id: &str) -> Vec<String> {
    m.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn delta(m: &ArgMatches) -> Result<i64, String> {
    m.get_one::<i64>("delta")
        .copied()
        .ok_or_else(|| "Missing argument: delta".to_string())
}

fn pairs(values: Vec<String>) -> Result<Vec<(String, String)>, String> {
    if values.len() % 2 != 0 {
        return Err("Arguments must be name/value pairs".to_string());
    }
    let mut iter = values.into_iter();
    let mut out = Vec::new();
    while let (Some(name), Some(value)) = (iter.next(), iter.next()) {
        out.push((name, value));
    }
    Ok(out)
}
