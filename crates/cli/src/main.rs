//! kvbridge CLI: Redis-style front end for the kvbridge store.
//!
//! Two modes:
//! - **Shell mode**: `kvbridge [flags] COMMAND` runs a single command and exits
//! - **Pipe mode**: `echo "set k v" | kvbridge` runs one command per stdin line
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default: `warn`).

mod commands;
mod format;
mod parse;
mod pipe;
mod state;

use std::process;

use kvbridge_executor::Store;
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_error, OutputMode};
use state::SessionState;

fn main() {
    init_logging();

    let cli = build_cli();
    let matches = cli.get_matches();

    // Determine output mode
    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else if matches.get_flag("raw") {
        OutputMode::Raw
    } else {
        OutputMode::Human
    };

    let store = match open_store(&matches) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(1);
        }
    };
    let mut state = SessionState::new(store);

    // Dispatch mode
    let mut exit_code = if matches.subcommand().is_some() {
        if pipe::execute_action(&matches, &mut state, output_mode) {
            0
        } else {
            1
        }
    } else {
        pipe::run_pipe(&mut state, output_mode)
    };

    // process::exit skips destructors, so close explicitly
    if let Err(e) = state.close() {
        eprintln!("{}", format_error(&e, output_mode));
        exit_code = 1;
    }
    process::exit(exit_code);
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(matches: &clap::ArgMatches) -> kvbridge_executor::Result<Store> {
    if matches.get_flag("mem") {
        Store::memory()
    } else {
        let path = matches
            .get_one::<String>("db")
            .map(|s| s.as_str())
            .unwrap_or(".kvbridge");
        Store::open(std::path::Path::new(path))
    }
}
