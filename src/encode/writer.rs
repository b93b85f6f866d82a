//! Line-oriented output buffer for the encoder.
//!
//! Unlike a byte-streaming writer, [`LineWriter`] thinks in terms of
//! indentation depth and delimiter-scoped value writing: callers start a
//! line at a depth, then push key/value/header tokens onto it. The active
//! delimiter is a stack so nested arrays can each declare their own without
//! the caller threading it through every call.

use itoa::Buffer as ItoaBuffer;
use smol_str::SmolStr;

use crate::error::{ToonError, ToonResult};
use crate::options::{Delimiter, EncodeOptions, LengthMarker};
use crate::text::number::write_canonical_number_into;
use crate::text::quote::{escape_string_into, is_valid_unquoted_key, needs_quoting};
use crate::value::Value;

pub(crate) struct LineWriter {
    buf: String,
    pub(crate) options: EncodeOptions,
    delimiter_stack: Vec<Delimiter>,
}

impl LineWriter {
    pub(crate) fn new(options: EncodeOptions) -> Self {
        Self {
            buf: String::new(),
            options,
            delimiter_stack: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> String {
        self.buf
    }

    pub(crate) fn newline(&mut self) {
        self.buf.push('\n');
    }

    pub(crate) fn write_indent(&mut self, depth: usize) {
        let spaces = self.options.indent.get_spaces() * depth;
        self.buf.extend(std::iter::repeat(' ').take(spaces));
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub(crate) fn write_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// The delimiter in scope for the array currently being written, or the
    /// document default outside any array.
    pub(crate) fn active_delimiter(&self) -> Delimiter {
        self.delimiter_stack
            .last()
            .copied()
            .unwrap_or(self.options.delimiter)
    }

    pub(crate) fn push_delimiter(&mut self, delimiter: Delimiter) {
        self.delimiter_stack.push(delimiter);
    }

    pub(crate) fn pop_delimiter(&mut self) {
        self.delimiter_stack.pop();
    }

    pub(crate) fn write_key(&mut self, key: &str) {
        if is_valid_unquoted_key(key) {
            self.buf.push_str(key);
        } else {
            self.write_quoted(key);
        }
    }

    pub(crate) fn write_quoted(&mut self, s: &str) {
        self.buf.push('"');
        escape_string_into(&mut self.buf, s);
        self.buf.push('"');
    }

    /// Writes an array header's bracketed length (and, for tabular arrays,
    /// its field list) using the writer's configured delimiter and length
    /// marker. The caller is responsible for the preceding key (if any) and
    /// the trailing `:`.
    pub(crate) fn write_array_header(&mut self, length: usize, fields: Option<&[SmolStr]>) {
        self.buf.push('[');
        if self.options.length_marker == LengthMarker::Hash {
            self.buf.push('#');
        }
        let mut num_buf = ItoaBuffer::new();
        self.buf.push_str(num_buf.format(length));
        if self.options.delimiter != Delimiter::Comma {
            self.buf.push(self.options.delimiter.as_char());
        }
        self.buf.push(']');

        if let Some(fields) = fields {
            self.buf.push('{');
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    self.buf.push(self.options.delimiter.as_char());
                }
                self.write_key(field);
            }
            self.buf.push('}');
        }
    }

    /// Writes a primitive `Value` using the currently active delimiter for
    /// string-quoting decisions. Errors on a non-primitive (a driver bug,
    /// per spec's encoder-cannot-fail-on-well-formed-input contract).
    pub(crate) fn write_primitive(&mut self, value: &Value) -> ToonResult<()> {
        match value {
            Value::Null => self.buf.push_str("null"),
            Value::Bool(b) => self.buf.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => write_canonical_number_into(*n, &mut self.buf),
            Value::String(s) => {
                if needs_quoting(s, self.active_delimiter().as_char()) {
                    self.write_quoted(s);
                } else {
                    self.buf.push_str(s);
                }
            }
            Value::Array(_) | Value::Object(_) => {
                return Err(ToonError::StructureError(
                    "expected a primitive value".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Renders a single primitive `Value` the same way [`LineWriter::write_primitive`]
/// would, without requiring a writer. Used for fan-out rendering of tabular
/// rows (see `encode::render_tabular_row`), where each row is built
/// independently before being appended to the shared buffer in order.
pub(crate) fn render_primitive_into(
    out: &mut String,
    value: &Value,
    delimiter: Delimiter,
) -> ToonResult<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_canonical_number_into(*n, out),
        Value::String(s) => {
            if needs_quoting(s, delimiter.as_char()) {
                out.push('"');
                escape_string_into(out, s);
                out.push('"');
            } else {
                out.push_str(s);
            }
        }
        Value::Array(_) | Value::Object(_) => {
            return Err(ToonError::StructureError(
                "expected a primitive value".into(),
            ));
        }
    }
    Ok(())
}
