//! Line-oriented `.properties` codec.
//!
//! Supports the grammar used by message files in the wild:
//!
//! - `\n`, `\r\n` and lone `\r` line terminators
//! - `#` and `!` comment lines, blank lines
//! - `key=value`, `key:value` and `key value` separators
//! - a trailing odd backslash continues the logical line; leading
//!   whitespace of the continuation is dropped
//! - `\t`, `\n`, `\r`, `\f`, `\uXXXX` escapes (surrogate pairs included);
//!   any other escaped character stands for itself
//!
//! Input is expected to be already decoded as UTF-8.

use thiserror::Error;

/// Errors raised while decoding a properties unit
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertiesError {
    /// `\u` not followed by four hex digits
    #[error("malformed \\uxxxx encoding on line {line}")]
    MalformedUnicodeEscape {
        /// 1-based line where the logical line starts
        line: usize,
    },
}

/// One decoded `key=value` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Unescaped key
    pub key: String,
    /// Unescaped value
    pub value: String,
    /// 1-based line where the entry starts
    pub line: usize,
}

const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Decode every entry of a properties document, in document order.
///
/// Duplicate keys are returned as they appear; consumers decide which wins.
pub fn parse(input: &str) -> Result<Vec<Entry>, PropertiesError> {
    let mut entries = Vec::new();
    let mut lines = PhysicalLines { rest: input }.enumerate();

    while let Some((index, raw)) = lines.next() {
        let line = index + 1;
        let trimmed = raw.trim_start_matches(is_blank);
        if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
            continue;
        }

        let mut logical = trimmed.to_string();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_key_value(&logical);
        entries.push(Entry {
            key: unescape(key, line)?,
            value: unescape(value, line)?,
            line,
        });
    }

    Ok(entries)
}

/// Lines split on `\n`, `\r\n` or `\r`, terminators removed
struct PhysicalLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for PhysicalLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let Some(end) = self.rest.find(['\r', '\n']) else {
            return Some(std::mem::take(&mut self.rest));
        };
        let line = &self.rest[..end];
        let terminator = if self.rest[end..].starts_with("\r\n") { 2 } else { 1 };
        self.rest = &self.rest[end + terminator..];
        Some(line)
    }
}

fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                let value = line[i + 1..].trim_start_matches(is_blank);
                return (&line[..i], value);
            }
            c if is_blank(c) => {
                let rest = line[i..].trim_start_matches(is_blank);
                let rest = rest
                    .strip_prefix(['=', ':'])
                    .map_or(rest, |r| r.trim_start_matches(is_blank));
                return (&line[..i], rest);
            }
            _ => {}
        }
    }

    (line, "")
}

fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    if hex.len() != 4 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                        return Err(PropertiesError::MalformedUnicodeEscape { line });
                    }
                    let unit = u16::from_str_radix(&hex, 16)
                        .map_err(|_| PropertiesError::MalformedUnicodeEscape { line })?;
                    units.push(unit);
                    continue;
                }
                Some(escaped) => {
                    flush_units(&mut units, &mut out);
                    out.push(match escaped {
                        't' => '\t',
                        'n' => '\n',
                        'r' => '\r',
                        'f' => '\x0c',
                        other => other,
                    });
                }
                None => flush_units(&mut units, &mut out),
            }
        } else {
            flush_units(&mut units, &mut out);
            out.push(c);
        }
    }
    flush_units(&mut units, &mut out);

    Ok(out)
}

fn flush_units(units: &mut Vec<u16>, out: &mut String) {
    if units.is_empty() {
        return;
    }
    out.extend(
        char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}
