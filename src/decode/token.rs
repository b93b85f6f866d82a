//! Parses primitives, delimited values, keys, and array headers out of a
//! line's content (indentation already stripped by [`super::scanner`]).

use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::error::{ToonError, ToonResult};
use crate::options::Delimiter;
use crate::text::quote::{is_valid_unquoted_key, unescape_string};
use crate::value::Value;

/// Parse a single primitive token (already trimmed of surrounding
/// whitespace by the caller's split). Per the decode asymmetry (spec §3),
/// an unquoted numeric-looking token still becomes a `String`.
pub(crate) fn parse_primitive(raw: &str, line: usize) -> ToonResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::String(SmolStr::new("")));
    }

    if let Some(body) = trimmed.strip_prefix('"') {
        return parse_quoted(body, line);
    }

    match trimmed {
        "null" => Ok(Value::Null),
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => Ok(Value::String(SmolStr::new(trimmed))),
    }
}

/// Parse the body of a quoted token; `body` begins just after the opening
/// `"`. Finds the matching unescaped closing quote, unescapes the interior,
/// and rejects any trailing garbage after the closing quote (other than
/// whitespace).
fn parse_quoted(body: &str, line: usize) -> ToonResult<Value> {
    let (inner, rest) = split_quoted(body, line)?;
    if !rest.trim().is_empty() {
        return Err(ToonError::ParseError {
            message: format!("unexpected trailing content after quoted string: '{rest}'"),
            line,
            column: 0,
        });
    }
    let unescaped =
        unescape_string(inner).map_err(|e| ToonError::InvalidEscape {
            sequence: e.sequence,
            position: e.position,
        })?;
    Ok(Value::String(SmolStr::new(unescaped)))
}

/// Find the end of a quoted string starting right after its opening `"`.
/// Returns `(interior, trailing)` where `interior` is the text between the
/// quotes (still escaped) and `trailing` is everything after the closing
/// quote.
fn split_quoted(body: &str, line: usize) -> ToonResult<(&str, &str)> {
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Ok((&body[..i], &body[i + 1..])),
            _ => i += 1,
        }
    }
    Err(ToonError::UnterminatedString { position: line })
}

/// Split `s` on `delimiter`, honoring quoted spans (an unescaped `"`
/// toggles quote state; delimiters inside quotes are not split points).
/// Each returned piece still carries its original quoting, ready for
/// [`parse_primitive`].
pub(crate) fn split_delimited(s: &str, delimiter: Delimiter) -> ToonResult<SmallVec<[String; 8]>> {
    let delim = delimiter.as_char();
    let mut pieces: SmallVec<[String; 8]> = SmallVec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            current.push(ch);
            if ch == '\\' {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            } else if ch == '"' {
                in_quotes = false;
            }
            continue;
        }

        if ch == '"' {
            in_quotes = true;
            current.push(ch);
        } else if ch == delim {
            pieces.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }

    if in_quotes {
        return Err(ToonError::UnterminatedString { position: s.len() });
    }

    pieces.push(current);
    Ok(pieces)
}

/// Split a line's content into `(key, rest, was_quoted)`, where `rest` is
/// everything after the key's colon (not yet trimmed). Keys may be quoted;
/// an unquoted key is everything up to the first unquoted `:`. `was_quoted`
/// tells strict-mode validation whether the bareword-key shape check
/// applies (a quoted key is never subject to it).
pub(crate) fn parse_key(content: &str, line: usize) -> ToonResult<(SmolStr, &str, bool)> {
    if let Some(body) = content.strip_prefix('"') {
        let (inner, rest) = split_quoted(body, line)?;
        let key = unescape_string(inner)
            .map_err(|e| ToonError::InvalidEscape { sequence: e.sequence, position: e.position })?;
        let rest = rest.trim_start();
        let rest = rest
            .strip_prefix(':')
            .ok_or(ToonError::MissingColon { line })?;
        return Ok((SmolStr::new(key), rest, true));
    }

    match find_unquoted_colon(content) {
        Some(idx) => Ok((SmolStr::new(content[..idx].trim()), &content[idx + 1..], false)),
        None => Err(ToonError::MissingColon { line }),
    }
}

/// Locate the first `:` not nested inside a quoted string or brackets that
/// are still open (array headers carry their own `:` handling upstream).
pub(crate) fn find_unquoted_colon(s: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut chars = s.char_indices();
    while let Some((idx, ch)) = chars.next() {
        if in_quotes {
            if ch == '\\' {
                chars.next();
            } else if ch == '"' {
                in_quotes = false;
            }
            continue;
        }
        match ch {
            '"' => in_quotes = true,
            ':' => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Whether a raw (unvalidated, not-yet-parsed) bareword key is structurally
/// valid per spec §4.1. Used by strict mode to reject a bareword key that
/// would have required quoting.
pub(crate) fn is_valid_bareword_key(key: &str) -> bool {
    is_valid_unquoted_key(key)
}

/// Parsed array header: optional key, declared length, optional
/// scope-delimiter symbol, and optional tabular field list.
#[derive(Debug, Clone)]
pub(crate) struct Header {
    pub key: Option<SmolStr>,
    pub length: usize,
    pub delimiter: Delimiter,
    pub fields: Option<Vec<SmolStr>>,
    /// Text remaining after the header's `:` (possibly inline values),
    /// with leading whitespace trimmed.
    pub inline: Option<String>,
}

/// Attempt to parse `content` as an array header. Returns `None` if there
/// is no `[` at all (not a header line); returns an error for a `[` that
/// doesn't resolve to a well-formed header.
pub(crate) fn try_parse_header(content: &str, line: usize) -> ToonResult<Option<Header>> {
    let Some(bracket_pos) = find_header_bracket(content, line)? else {
        return Ok(None);
    };

    let key_part = content[..bracket_pos].trim();
    let key = if key_part.is_empty() {
        None
    } else if let Some(body) = key_part.strip_prefix('"') {
        let (inner, rest) = split_quoted(body, line)?;
        if !rest.trim().is_empty() {
            return Ok(None);
        }
        let unescaped = unescape_string(inner)
            .map_err(|e| ToonError::InvalidEscape { sequence: e.sequence, position: e.position })?;
        Some(SmolStr::new(unescaped))
    } else {
        Some(SmolStr::new(key_part))
    };

    let after_bracket = &content[bracket_pos + 1..];
    let mut rest = after_bracket;

    rest = rest.strip_prefix('#').unwrap_or(rest);

    let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return Err(ToonError::InvalidHeader {
            message: "array header is missing its length".into(),
            line,
        });
    }
    let length: usize = rest[..digit_count].parse().map_err(|_| ToonError::InvalidHeader {
        message: "array length is not a valid number".into(),
        line,
    })?;
    rest = &rest[digit_count..];

    let delimiter = if let Some(stripped) = rest.strip_prefix('\t') {
        rest = stripped;
        Delimiter::Tab
    } else if let Some(stripped) = rest.strip_prefix('|') {
        rest = stripped;
        Delimiter::Pipe
    } else {
        Delimiter::Comma
    };

    rest = rest
        .strip_prefix(']')
        .ok_or_else(|| ToonError::InvalidHeader {
            message: "array header is missing closing ']'".into(),
            line,
        })?;

    let mut fields = None;
    if let Some(stripped) = rest.strip_prefix('{') {
        let end = stripped.find('}').ok_or_else(|| ToonError::InvalidHeader {
            message: "tabular field list is missing closing '}'".into(),
            line,
        })?;
        let field_text = &stripped[..end];
        let mut names = Vec::new();
        for piece in split_delimited(field_text, delimiter)? {
            let trimmed = piece.trim();
            let name = if let Some(body) = trimmed.strip_prefix('"') {
                let (inner, trailing) = split_quoted(body, line)?;
                if !trailing.trim().is_empty() {
                    return Err(ToonError::InvalidHeader {
                        message: "unexpected content after quoted field name".into(),
                        line,
                    });
                }
                unescape_string(inner).map_err(|e| ToonError::InvalidEscape {
                    sequence: e.sequence,
                    position: e.position,
                })?
            } else {
                trimmed.to_string()
            };
            names.push(SmolStr::new(name));
        }
        fields = Some(names);
        rest = &stripped[end + 1..];
    }

    rest = rest
        .strip_prefix(':')
        .ok_or_else(|| ToonError::InvalidHeader {
            message: "array header is missing ':'".into(),
            line,
        })?;

    let trimmed_rest = rest.trim();
    let inline = if trimmed_rest.is_empty() {
        None
    } else {
        Some(trimmed_rest.to_string())
    };

    Ok(Some(Header {
        key,
        length,
        delimiter,
        fields,
        inline,
    }))
}

/// Find the position of the `[` that opens an array header, rejecting a
/// `[` that shows up inside a quoted key (not a header at all).
fn find_header_bracket(content: &str, line: usize) -> ToonResult<Option<usize>> {
    if let Some(body) = content.strip_prefix('"') {
        let (_, rest) = split_quoted(body, line)?;
        let rest = rest.trim_start();
        return Ok(rest
            .starts_with('[')
            .then(|| content.len() - rest.len()));
    }

    match content.find('[') {
        Some(idx) => {
            // A colon before the bracket means this isn't a header at this
            // position (e.g. `note: a[b]` is a plain scalar value).
            if let Some(colon_idx) = find_unquoted_colon(&content[..idx]) {
                let _ = colon_idx;
                return Ok(None);
            }
            Ok(Some(idx))
        }
        None => Ok(None),
    }
}
