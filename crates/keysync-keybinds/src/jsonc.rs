//! JSON-with-comments support
//!
//! Keybinding fragments are written as JSONC: strict JSON plus `//` line
//! comments, `/* */` block comments and a trailing comma before a closing
//! `}` or `]`. [`strip`] turns such text into strict JSON with a single
//! string-aware scan, so comment markers inside string literals (a URL in
//! a `when` clause, a path in `args`) are left alone.

use serde_json::Value;

/// Text substituted for empty documents so they parse as an empty list
pub const EMPTY_DOCUMENT: &str = "[]";

/// Convert JSONC text to strict JSON text
///
/// Total: malformed input is passed through for the JSON parser to reject.
/// An unterminated block comment swallows the rest of the input.
pub fn strip(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    strip_trailing_commas(&strip_comments(text))
}

/// Strip comments, substitute `[]` for blank documents, and parse
pub fn parse(text: &str) -> serde_json::Result<Value> {
    let stripped = strip(or_empty_document(text));
    serde_json::from_str(or_empty_document(&stripped))
}

fn or_empty_document(text: &str) -> &str {
    if text.trim().is_empty() {
        EMPTY_DOCUMENT
    } else {
        text
    }
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                // The newline itself is kept
                while chars.peek().is_some_and(|&ch| ch != '\n') {
                    chars.next();
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for ch in chars.by_ref() {
                    if prev == '*' && ch == '/' {
                        break;
                    }
                    prev = ch;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (idx, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            ',' => {
                let closes = chars[idx + 1..]
                    .iter()
                    .find(|ch| !ch.is_whitespace())
                    .is_some_and(|&ch| ch == '}' || ch == ']');
                if closes {
                    continue;
                }
            }
            _ => {}
        }
        out.push(c);
    }

    out
}
