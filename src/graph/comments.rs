// src/graph/comments.rs
//! Comment blanking ahead of declaration matching.
//!
//! Comments are overwritten with spaces instead of removed so byte offsets
//! and line numbers in the blanked text match the original source.
//! String literals are tracked so `//` inside a URL specifier survives.

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Str(char),
}

/// Blanks `//` and `/* */` comments in curly-brace source.
#[must_use]
pub fn strip_curly(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::BlockComment;
                }
                '\'' | '"' | '`' => {
                    out.push(c);
                    state = State::Str(c);
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                } else {
                    blank(&mut out, c);
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = State::Code;
                } else {
                    blank(&mut out, c);
                }
            }
            State::Str(quote) => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == quote || (c == '\n' && quote != '`') {
                    state = State::Code;
                }
            }
        }
    }

    out
}

/// Blanks `#` comments and triple-quoted strings in indentation-family source.
#[must_use]
pub fn strip_hash(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut triple: Option<char> = None;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(q) = triple {
            if c == q && take_pair(&mut chars, q) {
                out.push_str("   ");
                triple = None;
            } else {
                blank(&mut out, c);
            }
            continue;
        }

        match state {
            State::Code => match c {
                '#' => {
                    out.push(' ');
                    state = State::LineComment;
                }
                '\'' | '"' => {
                    if take_pair(&mut chars, c) {
                        out.push_str("   ");
                        triple = Some(c);
                    } else {
                        out.push(c);
                        state = State::Str(c);
                    }
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                } else {
                    blank(&mut out, c);
                }
            }
            State::Str(quote) => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == quote || c == '\n' {
                    state = State::Code;
                }
            }
            State::BlockComment => out.push(c),
        }
    }

    out
}

/// Consumes two more `q` characters if both follow; returns whether it did.
fn take_pair(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, q: char) -> bool {
    let mut ahead = chars.clone();
    if ahead.next() == Some(q) && ahead.next() == Some(q) {
        chars.next();
        chars.next();
        return true;
    }
    false
}

fn blank(out: &mut String, c: char) {
    if c == '\n' {
        out.push('\n');
    } else {
        for _ in 0..c.len_utf8() {
            out.push(' ');
        }
    }
}
