//! Pipe mode: read commands from stdin, one per line.

use std::io::{self, BufRead};

use crate::commands::build_pipe_cmd;
use crate::format::{format_error, format_output, OutputMode};
use crate::parse::matches_to_action;
use crate::state::SessionState;

/// Run in pipe mode: read lines from stdin, execute each.
///
/// Blank lines and lines starting with `#` are skipped. Returns the process
/// exit code: 1 if any line failed.
pub fn run_pipe(state: &mut SessionState, mode: OutputMode) -> i32 {
    let stdin = io::stdin();
    let mut exit_code = 0;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if !run_line(state, &line, mode) {
            exit_code = 1;
        }
    }

    exit_code
}

/// Execute one input line. Returns true on success or when the line is
/// skipped.
pub fn run_line(state: &mut SessionState, line: &str, mode: OutputMode) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return true;
    }

    let tokens = match shlex::split(trimmed) {
        Some(t) if !t.is_empty() => t,
        Some(_) => return true,
        None => {
            eprintln!("(error) Invalid quoting: {}", trimmed);
            return false;
        }
    };

    let matches = match build_pipe_cmd().try_get_matches_from(tokens) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{}", e);
            return false;
        }
    };

    execute_action(&matches, state, mode)
}

/// Execute a parsed action. Returns true on success, false on error.
pub fn execute_action(matches: &clap::ArgMatches, state: &mut SessionState, mode: OutputMode) -> bool {
    let action = match matches_to_action(matches) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("(error) {}", e);
            return false;
        }
    };
    match state.execute(action) {
        Ok(output) => {
            println!("{}", format_output(&output, mode));
            true
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvbridge_executor::Store;

    #[test]
    fn test_lines_share_one_store() {
        let mut state = SessionState::new(Store::memory().unwrap());
        assert!(run_line(&mut state, "set name 'John Smith'", OutputMode::Raw));
        assert!(run_line(&mut state, "# comment", OutputMode::Raw));
        assert!(run_line(&mut state, "   ", OutputMode::Raw));
        assert!(run_line(&mut state, "get name", OutputMode::Raw));
        assert!(!run_line(&mut state, "fly away", OutputMode::Raw));
        assert!(!run_line(&mut state, "set k 'unterminated", OutputMode::Raw));
        assert!(!run_line(&mut state, "set k 'say \"hi\"'", OutputMode::Raw));
    }
}
