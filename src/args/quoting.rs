//! Command-line quoting in the convention the target's C runtime parses.
//!
//! [`quote_argument`] and [`split_command_line`] are inverses: splitting a
//! line made of quoted arguments yields the original arguments byte for byte.

use std::borrow::Cow;

/// Whether `arg` must be wrapped in double quotes to survive re-tokenization.
pub fn needs_quotes(arg: &str) -> bool {
    arg.is_empty() || arg.contains([' ', '\t', '"'])
}

/// Quote a single argument.
///
/// Arguments without whitespace or double quotes are returned unchanged.
/// Otherwise the argument is wrapped in double quotes, every embedded quote
/// is escaped with a backslash, and backslash runs that end up in front of a
/// quote are doubled so they stay literal.
pub fn quote_argument(arg: &str) -> Cow<'_, str> {
    if !needs_quotes(arg) {
        return Cow::Borrowed(arg);
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');

    let mut backslashes = 0usize;
    for c in arg.chars() {
        if c == '\\' {
            backslashes += 1;
            continue;
        }
        let escaped = if c == '"' {
            backslashes * 2 + 1
        } else {
            backslashes
        };
        push_backslashes(&mut quoted, escaped);
        backslashes = 0;
        quoted.push(c);
    }
    // Closing quote follows: pending backslashes must not escape it.
    push_backslashes(&mut quoted, backslashes * 2);
    quoted.push('"');

    Cow::Owned(quoted)
}

/// Split a command line into arguments.
///
/// - Space and tab separate arguments outside double quotes.
/// - `2n` backslashes before a quote yield `n` backslashes; the quote toggles
///   quoted mode.
/// - `2n + 1` backslashes before a quote yield `n` backslashes and a literal
///   quote.
/// - Backslashes not followed by a quote are literal.
pub fn split_command_line(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut in_quotes = false;
    let mut backslashes = 0usize;

    for c in line.chars() {
        match c {
            '\\' => {
                backslashes += 1;
                in_arg = true;
            }
            '"' => {
                push_backslashes(&mut current, backslashes / 2);
                if backslashes % 2 == 1 {
                    current.push('"');
                } else {
                    in_quotes = !in_quotes;
                }
                backslashes = 0;
                in_arg = true;
            }
            ' ' | '\t' if !in_quotes => {
                push_backslashes(&mut current, backslashes);
                backslashes = 0;
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            _ => {
                push_backslashes(&mut current, backslashes);
                backslashes = 0;
                current.push(c);
                in_arg = true;
            }
        }
    }

    push_backslashes(&mut current, backslashes);
    if in_arg {
        args.push(current);
    }
    args
}

fn push_backslashes(buf: &mut String, count: usize) {
    buf.extend(std::iter::repeat('\\').take(count));
}
