//! Quoting rules for TOON strings and keys.

/// Escape special characters in a string for quoted output.
///
/// # Examples
/// ```
/// use toon::escape_string;
///
/// assert_eq!(escape_string("hello\nworld"), "hello\\nworld");
/// ```
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_string_into(&mut out, s);
    out
}

pub(crate) fn escape_string_into(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
}

/// Unescape a quoted string body (the part between the surrounding quotes).
///
/// Returns `None` if an invalid escape sequence or an unterminated escape is
/// found.
pub(crate) fn unescape_string(body: &str) -> Result<String, UnescapeError> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some((_, 'n')) => out.push('\n'),
            Some((_, 'r')) => out.push('\r'),
            Some((_, 't')) => out.push('\t'),
            Some((_, '"')) => out.push('"'),
            Some((_, '\\')) => out.push('\\'),
            Some((escape_idx, other)) => {
                return Err(UnescapeError {
                    sequence: format!("\\{other}"),
                    position: escape_idx - 1,
                })
            }
            None => {
                return Err(UnescapeError {
                    sequence: "\\".into(),
                    position: idx,
                })
            }
        }
    }
    Ok(out)
}

pub(crate) struct UnescapeError {
    pub sequence: String,
    pub position: usize,
}

fn is_keyword(s: &str) -> bool {
    matches!(s, "true" | "false" | "null")
}

fn is_numeric_like(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let mut i = 0;
    if bytes[0] == b'-' {
        i = 1;
    }
    if i >= bytes.len() || !bytes[i].is_ascii_digit() {
        return false;
    }
    bytes[i..]
        .iter()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
}

fn is_literal_like(s: &str) -> bool {
    is_keyword(s) || is_numeric_like(s)
}

pub(crate) fn is_structural_char(ch: char) -> bool {
    matches!(ch, '[' | ']' | '{' | '}' | ':' | '-')
}

/// Check if a key can be written without quotes: starts with a letter or
/// underscore, and contains only alphanumerics, underscores, or dots after
/// that.
///
/// # Examples
/// ```
/// use toon::is_valid_unquoted_key;
///
/// assert!(is_valid_unquoted_key("user_name"));
/// assert!(!is_valid_unquoted_key("1bad"));
/// ```
pub fn is_valid_unquoted_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let first = bytes[0];
    if !first.is_ascii_alphabetic() && first != b'_' {
        return false;
    }
    bytes[1..]
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'.')
}

/// Determine if a string value needs quoting under the given delimiter.
///
/// # Examples
/// ```
/// use toon::needs_quoting;
///
/// assert!(needs_quoting("true", ','));
/// assert!(!needs_quoting("hello", ','));
/// ```
pub fn needs_quoting(s: &str, delimiter: char) -> bool {
    if s.is_empty() || is_literal_like(s) {
        return true;
    }

    let mut chars = s.chars();
    let first = chars.next().expect("non-empty checked above");

    if first.is_whitespace() || first == '-' {
        return true;
    }
    if is_structural_char(first)
        || first == '\\'
        || first == '"'
        || first == delimiter
        || matches!(first, '\n' | '\r' | '\t')
    {
        return true;
    }
    if first == '0' && chars.clone().next().is_some_and(|c| c.is_ascii_digit()) {
        return true;
    }

    let mut last = first;
    for ch in chars {
        if is_structural_char(ch)
            || ch == '\\'
            || ch == '"'
            || ch == delimiter
            || matches!(ch, '\n' | '\r' | '\t')
        {
            return true;
        }
        last = ch;
    }

    last.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_escape_string() {
        assert_eq!(escape_string("hello"), "hello");
        assert_eq!(escape_string("hello\nworld"), "hello\\nworld");
        assert_eq!(escape_string("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_string("back\\slash"), "back\\\\slash");
    }

    #[rstest::rstest]
    fn test_unescape_roundtrip() {
        let original = "hello\nworld \"quoted\" \\ end";
        let escaped = escape_string(original);
        let unescaped = unescape_string(&escaped).ok().unwrap();
        assert_eq!(unescaped, original);
    }

    #[rstest::rstest]
    fn test_unescape_rejects_invalid_sequence() {
        assert!(unescape_string("bad\\qescape").is_err());
    }

    #[rstest::rstest]
    fn test_needs_quoting() {
        let comma = ',';
        assert!(needs_quoting("", comma));
        assert!(needs_quoting("true", comma));
        assert!(needs_quoting("false", comma));
        assert!(needs_quoting("null", comma));
        assert!(needs_quoting("123", comma));
        assert!(needs_quoting("hello[world]", comma));
        assert!(needs_quoting("key:value", comma));
        assert!(needs_quoting("a,b", comma));
        assert!(!needs_quoting("a,b", '|'));
        assert!(!needs_quoting("hello world", comma));
        assert!(needs_quoting(" hello", comma));
        assert!(needs_quoting("hello ", comma));
        assert!(!needs_quoting("hello", comma));
        assert!(!needs_quoting("helloworld", comma));
    }

    #[rstest::rstest]
    fn test_is_valid_unquoted_key() {
        assert!(is_valid_unquoted_key("normal_key"));
        assert!(is_valid_unquoted_key("key123"));
        assert!(is_valid_unquoted_key("key.value"));
        assert!(is_valid_unquoted_key("_private"));
        assert!(is_valid_unquoted_key("a"));
        assert!(is_valid_unquoted_key("_"));

        assert!(!is_valid_unquoted_key(""));
        assert!(!is_valid_unquoted_key("123"));
        assert!(!is_valid_unquoted_key("key:value"));
        assert!(!is_valid_unquoted_key("key-value"));
        assert!(!is_valid_unquoted_key("key value"));
        assert!(!is_valid_unquoted_key(".key"));
        assert!(!is_valid_unquoted_key("key[value]"));
        assert!(!is_valid_unquoted_key("key{value}"));
    }
}
