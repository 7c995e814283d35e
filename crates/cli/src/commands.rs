//! Clap command tree definition.
//!
//! Builds the `clap::Command` tree used by shell mode (directly) and pipe
//! mode (via `try_get_matches_from` on each input line).

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("kvbridge")
        .about("Redis-style CLI for the kvbridge key-value engine")
        .subcommand_required(false)
        .arg(
            Arg::new("db")
                .long("db")
                .value_name("DIR")
                .help("Data directory (default: .kvbridge)")
                .global(true),
        )
        .arg(
            Arg::new("mem")
                .long("mem")
                .help("Ephemeral in-memory instance, no disk")
                .action(ArgAction::SetTrue)
                .conflicts_with("db")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .conflicts_with("raw")
                .global(true),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .help("Raw output mode (no type prefixes, no quotes)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommands(data_commands())
}

/// Build a command tree for pipe mode (no global flags).
pub fn build_pipe_cmd() -> Command {
    Command::new("pipe")
        .multicall(true)
        .subcommand_required(true)
        .subcommands(data_commands())
}

fn data_commands() -> Vec<Command> {
    vec![
        // Keys
        binary("set", "Set a key to a value", "KEY", "VALUE"),
        binary("setnx", "Set a key only if it does not exist", "KEY", "VALUE"),
        unary("get", "Get the value of a key"),
        binary("getset", "Set a key and return its previous value", "KEY", "VALUE"),
        unary("del", "Delete a key"),
        binary("append", "Append to the value of a key", "KEY", "VALUE"),
        unary("exists", "Check if a key exists"),
        // Counters
        unary("incr", "Increment a key by one"),
        by("incrby", "Increment a key by DELTA"),
        unary("decr", "Decrement a key by one"),
        by("decrby", "Decrement a key by DELTA"),
        binary("copy", "Copy SRC to DST", "SRC", "DST"),
        binary("move", "Move SRC to DST", "SRC", "DST"),
        // Batch
        pairs("mset", "Set several keys", false),
        list("mget", "Get several keys", false),
        pairs("msetnx", "Set several keys only if none exist", false),
        // Hashes
        Command::new("hset")
            .about("Set a hash field")
            .arg(positional("key", "KEY"))
            .arg(positional("field", "FIELD"))
            .arg(positional("value", "VALUE")),
        binary("hget", "Get a hash field", "KEY", "FIELD"),
        binary("hdel", "Delete a hash field", "KEY", "FIELD"),
        unary("hlen", "Number of fields in a hash"),
        binary("hexists", "Check if a hash field exists", "KEY", "FIELD"),
        unary("hkeys", "List the field names of a hash"),
        unary("hvals", "List the field values of a hash"),
        pairs("hmset", "Set several hash fields", true),
        list("hmget", "Get several hash fields", true),
    ]
}

fn positional(id: &'static str, value_name: &'static str) -> Arg {
    Arg::new(id).value_name(value_name).required(true)
}

fn unary(name: &'static str, about: &'static str) -> Command {
    Command::new(name).about(about).arg(positional("key", "KEY"))
}

fn binary(
    name: &'static str,
    about: &'static str,
    first: &'static str,
    second: &'static str,
) -> Command {
    Command::new(name)
        .about(about)
        .arg(positional("first", first))
        .arg(positional("second", second))
}

fn by(name: &'static str, about: &'static str) -> Command {
    Command::new(name).about(about).arg(positional("key", "KEY")).arg(
        positional("delta", "DELTA")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i64)),
    )
}

fn pairs(name: &'static str, about: &'static str, keyed: bool) -> Command {
    let cmd = Command::new(name).about(about);
    let cmd = if keyed {
        cmd.arg(positional("key", "KEY"))
    } else {
        cmd
    };
    cmd.arg(
        Arg::new("pairs")
            .num_args(2..)
            .required(true)
            .value_name(if keyed { "FIELD VALUE" } else { "KEY VALUE" })
            .help("Alternating names and values"),
    )
}

fn list(name: &'static str, about: &'static str, keyed: bool) -> Command {
    let cmd = Command::new(name).about(about);
    let cmd = if keyed {
        cmd.arg(positional("key", "KEY"))
    } else {
        cmd
    };
    cmd.arg(
        Arg::new("names")
            .num_args(1..)
            .required(true)
            .value_name(if keyed { "FIELD" } else { "KEY" }),
    )
}
