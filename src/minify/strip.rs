//! String-aware comment stripping shared by the built-in minifiers.
//!
//! Unlike the obfuscation pass, which strips comments by pattern and is
//! blind to string literals, the minifiers must not corrupt working code,
//! so this stripper tracks quote state and only removes delimiters that
//! open a real comment.

enum State {
    Normal,
    InString(char),
    InStringEscape(char),
    AfterSlash,
    InBlockComment,
    InBlockCommentEnd,
    InLineComment,
}

pub fn strip_script_comments(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut state = State::Normal;

    for ch in input.chars() {
        match state {
            State::Normal => {
                match ch {
                    '"' | '\'' | '`' => state = State::InString(ch),
                    '/' => state = State::AfterSlash,
                    _ => {}
                }
                output.push(ch);
            }
            State::AfterSlash => match ch {
                '*' => {
                    output.pop();
                    state = State::InBlockComment;
                }
                '/' => {
                    output.pop();
                    state = State::InLineComment;
                }
                _ => {
                    output.push(ch);
                    state = match ch {
                        '"' | '\'' | '`' => State::InString(ch),
                        _ => State::Normal,
                    };
                }
            },
            State::InString(quote) => {
                output.push(ch);
                if ch == '\\' {
                    state = State::InStringEscape(quote);
                } else if ch == quote {
                    state = State::Normal;
                }
            }
            State::InStringEscape(quote) => {
                output.push(ch);
                state = State::InString(quote);
            }
            State::InBlockComment => {
                if ch == '*' {
                    state = State::InBlockCommentEnd;
                }
            }
            State::InBlockCommentEnd => {
                if ch == '/' {
                    state = State::Normal;
                } else if ch != '*' {
                    state = State::InBlockComment;
                }
            }
            State::InLineComment => {
                if ch == '\n' || ch == '\r' {
                    output.push(ch);
                    state = State::Normal;
                }
            }
        }
    }

    output
}

/// Applies `transform` to the code between string literals, emitting the
/// literals themselves (quotes included) verbatim. Tracks `"`, `'`, and
/// backtick quoting with escapes, so regex-based rewrites can run over
/// code without touching literal interiors.
pub fn map_outside_strings<F>(input: &str, mut transform: F) -> String
where
    F: FnMut(&str) -> String,
{
    enum State {
        Code,
        InString(char),
        InStringEscape(char),
    }

    let mut output = String::with_capacity(input.len());
    let mut code = String::new();
    let mut state = State::Code;

    for ch in input.chars() {
        match state {
            State::Code => match ch {
                '"' | '\'' | '`' => {
                    output.push_str(&transform(&code));
                    code.clear();
                    output.push(ch);
                    state = State::InString(ch);
                }
                _ => code.push(ch),
            },
            State::InString(quote) => {
                output.push(ch);
                if ch == '\\' {
                    state = State::InStringEscape(quote);
                } else if ch == quote {
                    state = State::Code;
                }
            }
            State::InStringEscape(quote) => {
                output.push(ch);
                state = State::InString(quote);
            }
        }
    }

    output.push_str(&transform(&code));
    output
}
