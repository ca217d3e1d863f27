//! Translation of ECMA 262 regular expressions into the syntax `fancy-regex`
//! understands.
//!
//! Three things differ: `\cX` control escapes do not exist in Rust regexes,
//! ECMA's `\d`/`\w`/`\s` shorthand classes are ASCII-plus-a-fixed-list rather
//! than Unicode-aware, and `\a` is not a valid ECMA escape at all. Control
//! escapes and whitespace class members are written as literal characters so
//! nothing depends on the target engine's own escape grammar; shorthand
//! replacements rely on nested character classes, so `[\d]` becomes
//! `[[0-9]]`.
use fancy_regex::Regex;

const DIGIT: &str = "[0-9]";
const NOT_DIGIT: &str = "[^0-9]";
const WORD: &str = "[A-Za-z0-9_]";
const NOT_WORD: &str = "[^A-Za-z0-9_]";
const SPACE: &str =
    "[ \t\n\r\u{000b}\u{000c}\u{00a0}\u{1680}\u{2000}-\u{200a}\u{2028}\u{2029}\u{202f}\u{205f}\u{3000}\u{feff}]";
const NOT_SPACE: &str =
    "[^ \t\n\r\u{000b}\u{000c}\u{00a0}\u{1680}\u{2000}-\u{200a}\u{2028}\u{2029}\u{202f}\u{205f}\u{3000}\u{feff}]";

/// Rewrite an ECMA 262 pattern into Rust regex syntax.
pub(crate) fn to_rust_regex(pattern: &str) -> Result<String, ()> {
    let mut buffer = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            buffer.push(ch);
            continue;
        }
        match chars.next() {
            Some('c') => match chars.next() {
                Some(letter) if letter.is_ascii_alphabetic() => {
                    buffer.push((letter as u8 % 32) as char);
                }
                _ => return Err(()),
            },
            Some('d') => buffer.push_str(DIGIT),
            Some('D') => buffer.push_str(NOT_DIGIT),
            Some('w') => buffer.push_str(WORD),
            Some('W') => buffer.push_str(NOT_WORD),
            Some('s') => buffer.push_str(SPACE),
            Some('S') => buffer.push_str(NOT_SPACE),
            // `\a` is not an ECMA 262 escape.
            Some('a') => return Err(()),
            Some(other) => {
                buffer.push('\\');
                buffer.push(other);
            }
            None => return Err(()),
        }
    }
    Ok(buffer)
}

/// Translate and compile an ECMA 262 pattern.
pub(crate) fn compile(pattern: &str) -> Result<Regex, ()> {
    let translated = to_rust_regex(pattern)?;
    Regex::new(&translated).map_err(|_| ())
}
