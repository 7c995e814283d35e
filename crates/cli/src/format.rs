//! Output → human/json/raw string formatting.
//!
//! Three modes:
//! - **Human** (default): Redis-style, e.g. `"value"`, `(integer) 42`, `(boolean) true`
//! - **JSON** (`--json`): `serde_json::to_string_pretty`
//! - **Raw** (`--raw`): Bare values, no quotes, no type prefixes

use kvbridge_executor::Error;

use crate::state::Output;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Raw,
}

/// Format a successful output.
pub fn format_output(output: &Output, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => format_json(output),
        OutputMode::Raw => format_raw(output),
        OutputMode::Human => format_human(output),
    }
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "error": format!("{}", err),
            "code": err.code(),
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Raw => format!("{}", err),
        OutputMode::Human => format!("(error) {}", err),
    }
}

fn format_json(output: &Output) -> String {
    serde_json::to_string_pretty(output).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

fn format_raw(output: &Output) -> String {
    match output {
        Output::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
        Output::Int(i) => i.to_string(),
        Output::Text(s) => s.clone(),
        Output::List(items) => items.join("\n"),
    }
}

fn format_human(output: &Output) -> String {
    match output {
        Output::Bool(b) => format!("(boolean) {}", b),
        Output::Int(i) => format!("(integer) {}", i),
        Output::Text(s) => format!("\"{}\"", s),
        Output::List(items) => format_string_list(items),
    }
}

fn format_string_list(items: &[String]) -> String {
    if items.is_empty() {
        "(empty list)".to_string()
    } else {
        items
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}) \"{}\"", i + 1, s))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
