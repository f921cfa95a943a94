//! Syntax pass over rendered code
//!
//! Checks that delimiters are balanced and literals terminated, then prints
//! the text in canonical form: tab indentation by brace depth, single spaces
//! between tokens, no trailing whitespace, at most one blank line in a row and
//! exactly one trailing newline. Works for the Go, proto and JSON artifacts;
//! string, raw string, rune and comment contents are never touched.

use crate::error::{CodegenError, CodegenResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Str,
    Rune,
    RawStr,
    BlockComment,
}

fn closer_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

struct Formatter<'a> {
    emitter: &'a str,
    stack: Vec<(char, usize)>,
    state: State,
}

impl<'a> Formatter<'a> {
    fn error(&self, message: String) -> CodegenError {
        CodegenError::Syntax {
            emitter: self.emitter.to_string(),
            message,
        }
    }

    /// Normalize one line and update the delimiter stack
    fn line(&mut self, raw: &str, line_no: usize) -> CodegenResult<String> {
        // Continuation of a multi-line raw string or block comment stays verbatim
        let continued = matches!(self.state, State::RawStr | State::BlockComment);
        let text = if continued { raw.trim_end() } else { raw.trim() };

        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();
        let mut escaped = false;

        while let Some(ch) = chars.next() {
            match self.state {
                State::Code => match ch {
                    ' ' | '\t' | '\r' => {
                        if !out.ends_with(' ') {
                            out.push(' ');
                        }
                        continue;
                    }
                    '"' => self.state = State::Str,
                    '\'' => self.state = State::Rune,
                    '`' => self.state = State::RawStr,
                    '/' if chars.peek() == Some(&'/') => {
                        out.push_str("/");
                        out.extend(chars.by_ref());
                        break;
                    }
                    '/' if chars.peek() == Some(&'*') => {
                        out.push('/');
                        out.push('*');
                        chars.next();
                        self.state = State::BlockComment;
                        continue;
                    }
                    '(' | '[' | '{' => self.stack.push((ch, line_no)),
                    ')' | ']' | '}' => match self.stack.pop() {
                        Some((open, _)) if closer_for(open) == ch => {}
                        Some((open, open_line)) => {
                            return Err(self.error(format!(
                                "line {}: `{}` does not close `{}` from line {}",
                                line_no, ch, open, open_line
                            )));
                        }
                        None => {
                            return Err(self.error(format!("line {}: unexpected `{}`", line_no, ch)));
                        }
                    },
                    _ => {}
                },
                State::Str | State::Rune => {
                    let quote = if self.state == State::Str { '"' } else { '\'' };
                    if escaped {
                        escaped = false;
                    } else if ch == '\\' {
                        escaped = true;
                    } else if ch == quote {
                        self.state = State::Code;
                    }
                }
                State::RawStr => {
                    if ch == '`' {
                        self.state = State::Code;
                    }
                }
                State::BlockComment => {
                    if ch == '*' && chars.peek() == Some(&'/') {
                        out.push('*');
                        out.push('/');
                        chars.next();
                        self.state = State::Code;
                        continue;
                    }
                }
            }
            out.push(ch);
        }

        if matches!(self.state, State::Str | State::Rune) {
            return Err(self.error(format!("line {}: unterminated literal", line_no)));
        }
        Ok(out.trim_end().to_string())
    }
}

/// Check and canonicalize rendered code
///
/// `emitter` names the artifact in the error.
///
/// # Errors
///
/// [`CodegenError::Syntax`] for unbalanced delimiters or unterminated
/// literals.
///
/// # Example
///
/// ```rust
/// use sql2code::validation::format_source;
///
/// let out = format_source("model", "type A struct {\n  ID   uint64\n\n\n}").unwrap();
/// assert_eq!(out, "type A struct {\n\tID uint64\n\n}\n");
/// ```
pub fn format_source(emitter: &str, text: &str) -> CodegenResult<String> {
    let mut formatter = Formatter {
        emitter,
        stack: Vec::new(),
        state: State::Code,
    };

    let mut lines: Vec<String> = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let continued = matches!(formatter.state, State::RawStr | State::BlockComment);
        let depth = formatter.stack.len();
        let body = formatter.line(raw, idx + 1)?;

        if continued {
            lines.push(body);
            continue;
        }
        if body.is_empty() {
            if lines.last().is_some_and(|l| !l.is_empty()) {
                lines.push(String::new());
            }
            continue;
        }

        let leading_closers = body
            .chars()
            .take_while(|c| matches!(c, ')' | ']' | '}'))
            .count();
        let indent = depth.saturating_sub(leading_closers.min(1));
        lines.push(format!("{}{}", "\t".repeat(indent), body));
    }

    match formatter.state {
        State::RawStr => return Err(formatter.error("unterminated raw string".to_string())),
        State::BlockComment => return Err(formatter.error("unterminated comment".to_string())),
        _ => {}
    }
    if let Some((open, line)) = formatter.stack.last() {
        return Err(formatter.error(format!("`{}` from line {} is never closed", open, line)));
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}
