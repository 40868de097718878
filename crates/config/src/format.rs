//! Line-oriented `key=value` text form of session parameters.
//!
//! The format follows the classic properties-file conventions: `#` and `!`
//! start comment lines, the key ends at the first unescaped `=`, `:` or
//! blank, a trailing odd backslash continues the logical line, and
//! backslash escapes cover separators, control characters and `\uXXXX`.
//! Everything [`format_entries`] writes is read back unchanged by
//! [`parse_entries`].

use cmis_core::{Error, Result};
use indexmap::IndexMap;
use std::fmt::Write as _;

/// Render entries, one `key=value` line each, in iteration order
pub fn format_entries<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();
    for (key, value) in entries {
        escape_into(&mut out, key, true);
        out.push('=');
        escape_into(&mut out, value, false);
        out.push('\n');
    }
    out
}

/// Parse text produced by [`format_entries`] or written by hand.
/// Later duplicates of a key replace earlier ones.
///
/// # Errors
///
/// `Configuration` on a malformed `\uXXXX` escape.
pub fn parse_entries(text: &str) -> Result<IndexMap<String, String>> {
    let mut entries = IndexMap::new();
    let mut lines = text.lines().enumerate();

    while let Some((number, line)) = lines.next() {
        let mut logical = line.trim_start_matches(is_blank).to_string();
        if logical.is_empty() || logical.starts_with('#') || logical.starts_with('!') {
            continue;
        }
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key, number + 1)?;
        let value = unescape(raw_value, number + 1)?;
        entries.insert(key, value);
    }

    Ok(entries)
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\x0c'
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_blank);
    if let Some(stripped) = rest.strip_prefix(&['=', ':'][..]) {
        rest = stripped.trim_start_matches(is_blank);
    }
    (key, rest)
}

fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' if is_key => {
                out.push('\\');
                out.push(c);
            }
            '#' | '!' if is_key && i == 0 => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
}

fn unescape(raw: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        Error::configuration(format!(
                            "malformed \\u escape '\\u{hex}' on line {line}"
                        ))
                    })?;
                out.push(code);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_simple_entries() {
        let text = format_entries([
            ("cmis.user", "alice"),
            ("cmis.binding.atompub.url", "http://h/a"),
        ]);
        assert_eq!(text, "cmis.user=alice\ncmis.binding.atompub.url=http://h/a\n");
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let entries = parse_entries("# header\n\n! other\n  a = 1\nb:2\nc 3\n").unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries["a"], "1");
        assert_eq!(entries["b"], "2");
        assert_eq!(entries["c"], "3");
    }

    #[test]
    fn test_parse_line_continuation() {
        let entries = parse_entries("long=first \\\n    second\n").unwrap();
        assert_eq!(entries["long"], "first second");
    }

    #[test]
    fn test_escaped_separators_in_keys() {
        let text = format_entries([("a=b:c d", " leading space"), ("#hash", "x")]);
        let entries = parse_entries(&text).unwrap();
        assert_eq!(entries["a=b:c d"], " leading space");
        assert_eq!(entries["#hash"], "x");
    }

    #[test]
    fn test_control_characters_round_trip() {
        let value = "line1\nline2\r\ttab\u{1}\\end\\";
        let text = format_entries([("k", value)]);
        assert_eq!(text.lines().count(), 1);
        let entries = parse_entries(&text).unwrap();
        assert_eq!(entries["k"], value);
    }

    #[test]
    fn test_unicode_escape() {
        let entries = parse_entries("k=caf\\u00E9\n").unwrap();
        assert_eq!(entries["k"], "café");
    }

    #[test]
    fn test_malformed_unicode_escape_is_configuration_error() {
        let err = parse_entries("k=\\u12\n").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_empty_value() {
        let entries = parse_entries("empty=\nalso\n").unwrap();
        assert_eq!(entries["empty"], "");
        assert_eq!(entries["also"], "");
    }
}
