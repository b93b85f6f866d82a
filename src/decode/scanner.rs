//! Splits TOON source into indentation-tagged lines.
//!
//! The decoder works line-at-a-time rather than token-at-a-time: each
//! logical line is reduced to its nesting level and the byte range of its
//! content (indentation stripped), and everything above this module
//! (header parsing, value parsing, tree assembly) operates over that
//! slice of [`Line`]s with a simple cursor.

use memchr::memchr_iter;

use crate::error::{ToonError, ToonResult};

#[derive(Clone, Copy, Debug)]
pub(crate) struct Line {
    pub level: usize,
    pub start: usize,
    pub end: usize,
    pub number: usize,
}

pub(crate) struct Scan {
    pub lines: Vec<Line>,
}

pub(crate) fn scan(input: &str, indent_size: usize, strict: bool) -> ToonResult<Scan> {
    if indent_size == 0 {
        return Err(ToonError::ValidationError(
            "indent size must be greater than zero".into(),
        ));
    }

    let bytes = input.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut line_number = 1;

    for idx in memchr_iter(b'\n', bytes) {
        let mut end = idx;
        if end > start && bytes[end - 1] == b'\r' {
            end -= 1;
        }
        if let Some(line) = build_line(bytes, start, end, indent_size, strict, line_number)? {
            lines.push(line);
        }
        start = idx + 1;
        line_number += 1;
    }

    let mut end = bytes.len();
    if end > start && bytes[end - 1] == b'\r' {
        end -= 1;
    }
    if let Some(line) = build_line(bytes, start, end, indent_size, strict, line_number)? {
        lines.push(line);
    }

    Ok(Scan { lines })
}

/// Returns `None` for blank (or whitespace-only) lines — they carry no
/// structure and the cursor above never needs to see them.
fn build_line(
    bytes: &[u8],
    start: usize,
    end: usize,
    indent_size: usize,
    strict: bool,
    line_number: usize,
) -> ToonResult<Option<Line>> {
    if start >= end || bytes[start..end].iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let mut indent_columns: usize = 0;
    let mut indent_chars: usize = 0;
    for &byte in &bytes[start..end] {
        match byte {
            b' ' => {
                indent_columns += 1;
                indent_chars += 1;
            }
            b'\t' => {
                if strict {
                    return Err(ToonError::IndentationError {
                        message: "tab characters are not allowed in indentation".into(),
                        line: line_number,
                    });
                }
                indent_columns += indent_size;
                indent_chars += 1;
            }
            _ => break,
        }
    }

    if strict && indent_columns % indent_size != 0 {
        return Err(ToonError::IndentationError {
            message: format!(
                "indentation of {indent_columns} columns is not a multiple of {indent_size}"
            ),
            line: line_number,
        });
    }

    Ok(Some(Line {
        level: indent_columns / indent_size,
        start: start + indent_chars,
        end,
        number: line_number,
    }))
}
