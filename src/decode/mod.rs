//! Decoder driver: turns TOON text into a [`Value`] tree.
//!
//! The decoder is a single-threaded, cursor-driven recursive descent parser
//! with no backtracking beyond one-line lookahead. [`scanner`] reduces the
//! input to indentation-tagged lines; [`token`] parses the content of a
//! single line; [`validate`] applies the strict-mode structural checks.

mod scanner;
mod token;
mod validate;

use smol_str::SmolStr;

use crate::constants::MAX_DEPTH;
use crate::error::{ToonError, ToonResult};
use crate::options::DecodeOptions;
use crate::value::Value;
use scanner::Line;
use token::Header;
use validate::{
    validate_array_length, validate_delimiter_consistency, validate_depth, validate_field_list,
};

/// Decode a TOON document using [`DecodeOptions::default`].
///
/// # Examples
/// ```
/// use toon::decode;
///
/// let value = decode("name: Alice\nage: 30").unwrap();
/// assert_eq!(value.get("name").and_then(|v| v.as_str()), Some("Alice"));
/// ```
pub fn decode(input: &str) -> ToonResult<Value> {
    decode_with_options(input, &DecodeOptions::default())
}

/// Decode a TOON document with explicit [`DecodeOptions`].
///
/// # Examples
/// ```
/// use toon::{decode_with_options, DecodeOptions};
///
/// let opts = DecodeOptions::new().with_strict(false);
/// let value = decode_with_options("items[2]: a", &opts).unwrap();
/// assert_eq!(value.as_object().unwrap()[0].1.as_array().unwrap().len(), 1);
/// ```
pub fn decode_with_options(input: &str, opts: &DecodeOptions) -> ToonResult<Value> {
    let indent_size = opts.indent.get_spaces();
    if indent_size == 0 {
        return Err(ToonError::ValidationError(
            "indent size must be greater than zero".into(),
        ));
    }

    let scan = scanner::scan(input, indent_size, opts.strict)?;
    if scan.lines.is_empty() {
        return Err(ToonError::EmptyInput);
    }

    let mut cursor = Cursor::new(&scan.lines);
    let first = *cursor.peek().expect("checked non-empty above");
    let first_content = line_content(input, &first);

    if let Some(header) = token::try_parse_header(first_content, first.number)? {
        if header.key.is_none() {
            validate_delimiter_consistency(Some(header.delimiter), opts.delimiter, first.number)?;
            cursor.advance();
            let value = decode_array_body(input, &mut cursor, &header, 1, opts, first.number)?;
            return finish_root(cursor, value);
        }
    } else if scan.lines.len() == 1 && token::find_unquoted_colon(first_content).is_none() {
        let value = token::parse_primitive(first_content, first.number)?;
        return finish_root(cursor, value);
    }

    let pairs = decode_object(input, &mut cursor, 0, opts)?;
    finish_root(cursor, Value::Object(pairs))
}

fn finish_root(cursor: Cursor<'_>, value: Value) -> ToonResult<Value> {
    if !cursor.is_at_end() {
        return Err(ToonError::StructureError(
            "unexpected trailing content after root value".into(),
        ));
    }
    Ok(value)
}

fn line_content<'a>(input: &'a str, line: &Line) -> &'a str {
    &input[line.start..line.end]
}

/// Forward iterator over scanned lines with one-line lookahead.
struct Cursor<'a> {
    lines: &'a [Line],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(lines: &'a [Line]) -> Self {
        Self { lines, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Line> {
        self.lines.get(self.pos)
    }

    #[allow(dead_code)]
    fn peek_ahead(&self, k: usize) -> Option<&'a Line> {
        self.lines.get(self.pos + k)
    }

    fn advance(&mut self) -> Option<&'a Line> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some(line)
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }
}

/// Decode successive `key: value` / `key:` / `key[...]:` lines at exactly
/// `depth`, stopping at the first line shallower than `depth` or at EOF.
fn decode_object(
    input: &str,
    cursor: &mut Cursor<'_>,
    depth: usize,
    opts: &DecodeOptions,
) -> ToonResult<Vec<(SmolStr, Value)>> {
    validate_depth(depth, MAX_DEPTH)?;
    let mut pairs = Vec::new();

    while let Some(line) = cursor.peek() {
        if line.level < depth {
            break;
        }
        if line.level > depth {
            return Err(ToonError::StructureError(format!(
                "unexpected indentation at line {}",
                line.number
            )));
        }

        let content = line_content(input, line);
        let line_number = line.number;

        if let Some(header) = token::try_parse_header(content, line_number)? {
            let key = header.key.clone().ok_or_else(|| ToonError::InvalidHeader {
                message: "array header inside an object must declare a key".into(),
                line: line_number,
            })?;
            validate_delimiter_consistency(Some(header.delimiter), opts.delimiter, line_number)?;
            cursor.advance();
            let value = decode_array_body(input, cursor, &header, depth + 1, opts, line_number)?;
            pairs.push((key, value));
            continue;
        }

        let (key, rest, was_quoted) = token::parse_key(content, line_number)?;
        if opts.strict && !was_quoted && !token::is_valid_bareword_key(&key) {
            return Err(ToonError::InvalidHeader {
                message: format!("key '{key}' requires quoting"),
                line: line_number,
            });
        }
        let rest_trimmed = rest.trim();
        cursor.advance();

        if rest_trimmed.is_empty() {
            let nested = decode_object(input, cursor, depth + 1, opts)?;
            pairs.push((key, Value::Object(nested)));
        } else {
            let value = token::parse_primitive(rest_trimmed, line_number)?;
            pairs.push((key, value));
        }
    }

    Ok(pairs)
}

/// Decode the body of an array whose header has already been consumed.
/// `body_depth` is the depth at which the array's own content (inline
/// tokens aside) lives.
fn decode_array_body(
    input: &str,
    cursor: &mut Cursor<'_>,
    header: &Header,
    body_depth: usize,
    opts: &DecodeOptions,
    header_line: usize,
) -> ToonResult<Value> {
    validate_depth(body_depth, MAX_DEPTH)?;

    if let Some(inline) = &header.inline {
        if header.fields.is_some() {
            return Err(ToonError::InvalidHeader {
                message: "tabular array header cannot also carry inline values".into(),
                line: header_line,
            });
        }
        let tokens = token::split_delimited(inline, header.delimiter)?;
        if opts.strict {
            validate_array_length(header.length, tokens.len(), "inline array")?;
        }
        let mut items = Vec::with_capacity(tokens.len());
        for tok in &tokens {
            items.push(token::parse_primitive(tok, header_line)?);
        }
        return Ok(Value::Array(items));
    }

    if let Some(fields) = &header.fields {
        validate_field_list(
            &fields.iter().map(|f| f.to_string()).collect::<Vec<_>>(),
            header_line,
        )?;

        let mut rows = Vec::new();
        while let Some(line) = cursor.peek() {
            if line.level < body_depth {
                break;
            }
            if line.level > body_depth {
                return Err(ToonError::StructureError(format!(
                    "unexpected indentation in tabular row at line {}",
                    line.number
                )));
            }
            let content = line_content(input, line);
            let line_number = line.number;
            cursor.advance();

            let cells = token::split_delimited(content, header.delimiter)?;
            if opts.strict && cells.len() != fields.len() {
                return Err(ToonError::ValidationError(format!(
                    "row at line {line_number} has {} value(s), expected {}",
                    cells.len(),
                    fields.len()
                )));
            }

            let mut obj = Vec::with_capacity(fields.len());
            for (i, field) in fields.iter().enumerate() {
                let value = match cells.get(i) {
                    Some(cell) => token::parse_primitive(cell, line_number)?,
                    None => Value::Null,
                };
                obj.push((field.clone(), value));
            }
            rows.push(Value::Object(obj));
        }

        if opts.strict {
            validate_array_length(header.length, rows.len(), "tabular array")?;
        }
        return Ok(Value::Array(rows));
    }

    let mut items = Vec::new();
    while let Some(line) = cursor.peek() {
        if line.level < body_depth {
            break;
        }
        if line.level > body_depth {
            return Err(ToonError::StructureError(format!(
                "unexpected indentation at line {}",
                line.number
            )));
        }
        let content = line_content(input, line);
        if !content.starts_with('-') {
            return Err(ToonError::StructureError(format!(
                "expected a list item ('- ...') at line {}",
                line.number
            )));
        }
        let line_number = line.number;
        cursor.advance();

        let item_rest = content[1..].trim_start();
        let item = decode_list_item(input, cursor, item_rest, body_depth, line_number, opts)?;
        items.push(item);
    }

    if opts.strict {
        validate_array_length(header.length, items.len(), "list array")?;
    }
    Ok(Value::Array(items))
}

/// Decode the content after a list item's leading `- `.
fn decode_list_item(
    input: &str,
    cursor: &mut Cursor<'_>,
    item_rest: &str,
    item_depth: usize,
    line_number: usize,
    opts: &DecodeOptions,
) -> ToonResult<Value> {
    if item_rest.is_empty() {
        // A bare `-` is ambiguous: it's either an empty object (the encoder
        // writes nothing else for `{}`) or the opening of a nested complex
        // array, whose header follows on its own line at item_depth + 1. Only
        // the latter actually produces a line there, so peeking decides it.
        if let Some(next) = cursor.peek() {
            if next.level == item_depth + 1 {
                let content = line_content(input, next);
                if let Some(header) = token::try_parse_header(content, next.number)? {
                    validate_delimiter_consistency(
                        Some(header.delimiter),
                        opts.delimiter,
                        next.number,
                    )?;
                    let next_number = next.number;
                    cursor.advance();
                    return decode_array_body(
                        input,
                        cursor,
                        &header,
                        item_depth + 2,
                        opts,
                        next_number,
                    );
                }
            }
        }
        return Ok(Value::Object(vec![]));
    }

    if let Some(header) = token::try_parse_header(item_rest, line_number)? {
        validate_delimiter_consistency(Some(header.delimiter), opts.delimiter, line_number)?;
        if header.key.is_none() {
            return decode_array_body(input, cursor, &header, item_depth + 1, opts, line_number);
        }

        let key = header.key.clone().expect("checked above");
        let first_value =
            decode_array_body(input, cursor, &header, item_depth + 2, opts, line_number)?;
        let mut pairs = vec![(key, first_value)];
        pairs.extend(decode_object(input, cursor, item_depth + 1, opts)?);
        return Ok(Value::Object(pairs));
    }

    if token::find_unquoted_colon(item_rest).is_some() {
        let (key, rest, was_quoted) = token::parse_key(item_rest, line_number)?;
        if opts.strict && !was_quoted && !token::is_valid_bareword_key(&key) {
            return Err(ToonError::InvalidHeader {
                message: format!("key '{key}' requires quoting"),
                line: line_number,
            });
        }
        let rest_trimmed = rest.trim();

        let mut pairs = Vec::new();
        if rest_trimmed.is_empty() {
            let nested = decode_object(input, cursor, item_depth + 2, opts)?;
            pairs.push((key, Value::Object(nested)));
        } else {
            let value = token::parse_primitive(rest_trimmed, line_number)?;
            pairs.push((key, value));
        }
        pairs.extend(decode_object(input, cursor, item_depth + 1, opts)?);
        return Ok(Value::Object(pairs));
    }

    token::parse_primitive(item_rest, line_number)
}
