//! Command text tokenizer.
//!
//! Grammar:
//!
//! ```text
//! command := ws* verb (ws+ arg)* ws*
//! arg     := '"' [^"]* '"' | [^ \t\r\n"]+
//! ```
//!
//! Quoted arguments have no escape sequences: the first `"` after the opening
//! one closes the argument. Verbs are matched case-insensitively.

use crate::error::CommandError;

/// A tokenized command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// Uppercased verb
    pub verb: String,
    /// Arguments in order, quotes removed
    pub args: Vec<String>,
}

/// Tokenize command text into a verb and its arguments.
pub fn parse(text: &str) -> Result<Parsed, CommandError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c == '"' {
            chars.next();
            let body_start = start + 1;
            let mut end = None;
            for (i, ch) in chars.by_ref() {
                if ch == '"' {
                    end = Some(i);
                    break;
                }
            }
            let end = end.ok_or_else(|| CommandError::Malformed {
                reason: format!("unterminated quoted argument at offset {}", start),
            })?;
            tokens.push(text[body_start..end].to_string());
            if let Some(&(next, ch)) = chars.peek() {
                if !ch.is_whitespace() {
                    return Err(CommandError::Malformed {
                        reason: format!("unexpected character after quoted argument at offset {}", next),
                    });
                }
            }
            continue;
        }

        let mut end = text.len();
        while let Some(&(i, ch)) = chars.peek() {
            if ch.is_whitespace() {
                end = i;
                break;
            }
            if ch == '"' {
                return Err(CommandError::Malformed {
                    reason: format!("unexpected quote inside bare argument at offset {}", i),
                });
            }
            chars.next();
        }
        tokens.push(text[start..end].to_string());
    }

    let mut tokens = tokens.into_iter();
    let verb = tokens.next().ok_or_else(|| CommandError::Malformed {
        reason: "empty command".to_string(),
    })?;

    Ok(Parsed {
        verb: verb.to_ascii_uppercase(),
        args: tokens.collect(),
    })
}
