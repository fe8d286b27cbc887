//! Comment stripping for fixture files.
//!
//! Fixtures are JSON documents that may carry `//` line comments and
//! `/* */` block comments. Both are removed before parsing; comment
//! markers inside string literals are left untouched.

/// Remove `//` and `/* */` comments from `input`, preserving string
/// literal contents (including escaped quotes).
pub fn strip_comments(input: &str) -> String {
    enum State {
        Code,
        Str,
        StrEscape,
        LineComment,
        BlockComment,
    }

    let mut out = String::with_capacity(input.len());
    let mut state = State::Code;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '"' => {
                    out.push(c);
                    state = State::Str;
                }
                '/' => match chars.peek() {
                    Some('/') => {
                        chars.next();
                        state = State::LineComment;
                    }
                    Some('*') => {
                        chars.next();
                        state = State::BlockComment;
                    }
                    _ => out.push(c),
                },
                _ => out.push(c),
            },
            State::Str => {
                out.push(c);
                match c {
                    '\\' => state = State::StrEscape,
                    '"' => state = State::Code,
                    _ => {}
                }
            }
            State::StrEscape => {
                out.push(c);
                state = State::Str;
            }
            State::LineComment => {
                // Keep the newline so line numbers in parse errors stay useful.
                if c == '\n' {
                    out.push(c);
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
        }
    }

    out
}
