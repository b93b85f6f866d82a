//! Encoder driver: turns a [`Value`] tree into TOON text.

mod shape;
mod writer;

use smol_str::SmolStr;

use crate::constants::MAX_DEPTH;
use crate::error::{ToonError, ToonResult};
use crate::options::{Delimiter, EncodeOptions};
use crate::value::Value;
use shape::Shape;
use writer::LineWriter;

#[cfg(feature = "parallel")]
use crate::constants::PARALLEL_ROW_THRESHOLD;

/// Encode a [`Value`] using [`EncodeOptions::default`].
///
/// # Examples
/// ```
/// use toon::{encode, Value};
///
/// let value = Value::object([("name", Value::from("Alice")), ("age", Value::from(30))]);
/// assert_eq!(encode(&value).unwrap(), "name: Alice\nage: 30");
/// ```
pub fn encode(value: &Value) -> ToonResult<String> {
    encode_with_options(value, &EncodeOptions::default())
}

/// Encode a [`Value`] with explicit [`EncodeOptions`].
///
/// # Examples
/// ```
/// use toon::{encode_with_options, Delimiter, EncodeOptions, Value};
///
/// let value = Value::from(vec![Value::from(1), Value::from(2), Value::from(3)]);
/// let opts = EncodeOptions::new().with_delimiter(Delimiter::Tab);
/// assert_eq!(encode_with_options(&value, &opts).unwrap(), "[3\t]: 1\t2\t3");
/// ```
pub fn encode_with_options(value: &Value, options: &EncodeOptions) -> ToonResult<String> {
    let mut writer = LineWriter::new(options.clone());

    match value {
        Value::Array(items) => encode_array(&mut writer, None, items, 0)?,
        Value::Object(entries) => write_object(&mut writer, entries, 0)?,
        primitive => writer.write_primitive(primitive)?,
    }

    Ok(writer.finish())
}

fn check_depth(depth: usize) -> ToonResult<()> {
    if depth > MAX_DEPTH {
        return Err(ToonError::StructureError(format!(
            "maximum nesting depth of {MAX_DEPTH} exceeded"
        )));
    }
    Ok(())
}

/// Writes each `key: value` pair of an object at `depth`, one per line.
fn write_object(writer: &mut LineWriter, entries: &[(SmolStr, Value)], depth: usize) -> ToonResult<()> {
    check_depth(depth)?;

    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            writer.newline();
        }
        writer.write_indent(depth);

        match value {
            Value::Array(items) => encode_array(writer, Some(key), items, depth)?,
            Value::Object(nested) => {
                writer.write_key(key);
                writer.write_char(':');
                if !nested.is_empty() {
                    writer.newline();
                    write_object(writer, nested, depth + 1)?;
                }
            }
            primitive => {
                writer.write_key(key);
                writer.write_char(':');
                writer.write_char(' ');
                writer.write_primitive(primitive)?;
            }
        }
    }

    Ok(())
}

/// Writes an array (with an optional leading key) at `depth` — the depth of
/// the header line itself. Any body content (tabular rows, list items,
/// primitive-array elements) lives at `depth + 1`.
fn encode_array(
    writer: &mut LineWriter,
    key: Option<&SmolStr>,
    items: &[Value],
    depth: usize,
) -> ToonResult<()> {
    check_depth(depth)?;

    if let Some(key) = key {
        writer.write_key(key);
    }

    match shape::detect(items) {
        Shape::Empty => {
            writer.write_array_header(0, None);
            writer.write_char(':');
        }
        Shape::InlinePrimitive(values) => {
            writer.write_array_header(values.len(), None);
            writer.write_char(':');
            writer.write_char(' ');
            write_inline_values(writer, values)?;
        }
        Shape::PrimitiveArrays(values) => {
            writer.write_array_header(values.len(), None);
            writer.write_char(':');
            for value in values {
                writer.newline();
                writer.write_indent(depth + 1);
                writer.write_char('-');
                writer.write_char(' ');
                let Value::Array(inner) = value else {
                    unreachable!("Shape::PrimitiveArrays only contains Array elements")
                };
                encode_array(writer, None, inner, depth + 1)?;
            }
        }
        Shape::Tabular { fields, rows } => {
            writer.write_array_header(rows.len(), Some(&fields));
            writer.write_char(':');
            write_tabular_rows(writer, &fields, rows, depth + 1)?;
        }
        Shape::ExpandedList(items) => {
            writer.write_array_header(items.len(), None);
            writer.write_char(':');
            for item in items {
                writer.newline();
                writer.write_indent(depth + 1);
                writer.write_char('-');
                encode_list_item(writer, item, depth + 1)?;
            }
        }
    }

    Ok(())
}

fn write_inline_values(writer: &mut LineWriter, values: &[Value]) -> ToonResult<()> {
    writer.push_delimiter(writer.options.delimiter);
    let delim = writer.active_delimiter().as_char();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            writer.write_char(delim);
        }
        writer.write_primitive(value)?;
    }
    writer.pop_delimiter();
    Ok(())
}

fn write_tabular_rows(
    writer: &mut LineWriter,
    fields: &[SmolStr],
    rows: &[Value],
    body_depth: usize,
) -> ToonResult<()> {
    let delimiter = writer.options.delimiter;

    #[cfg(feature = "parallel")]
    if rows.len() >= PARALLEL_ROW_THRESHOLD {
        use rayon::prelude::*;

        let rendered: Vec<String> = rows
            .par_iter()
            .map(|row| render_tabular_row(row, fields, delimiter))
            .collect::<ToonResult<Vec<_>>>()?;

        for line in rendered {
            writer.newline();
            writer.write_indent(body_depth);
            writer.write_str(&line);
        }
        return Ok(());
    }

    writer.push_delimiter(delimiter);
    for row in rows {
        writer.newline();
        writer.write_indent(body_depth);
        let entries = row.as_object().unwrap_or(&[]);
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                writer.write_char(delimiter.as_char());
            }
            let value = entries
                .iter()
                .find(|(k, _)| k == field)
                .map(|(_, v)| v)
                .unwrap_or(&Value::Null);
            writer.write_primitive(value)?;
        }
    }
    writer.pop_delimiter();
    Ok(())
}

/// Renders one tabular row's delimited cells with no surrounding indent or
/// newline, for use in the rayon fan-out path.
#[cfg(feature = "parallel")]
fn render_tabular_row(row: &Value, fields: &[SmolStr], delimiter: Delimiter) -> ToonResult<String> {
    let entries = row.as_object().unwrap_or(&[]);
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(delimiter.as_char());
        }
        let value = entries
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v)
            .unwrap_or(&Value::Null);
        writer::render_primitive_into(&mut out, value, delimiter)?;
    }
    Ok(out)
}

/// Writes the content after a list item's `-`, per spec §4.4 shape 5.
/// `item_depth` is the depth at which the hyphen itself lives.
fn encode_list_item(writer: &mut LineWriter, item: &Value, item_depth: usize) -> ToonResult<()> {
    match item {
        Value::Array(inner) => {
            writer.write_char(' ');
            encode_array(writer, None, inner, item_depth)?;
        }
        Value::Object(entries) => {
            let Some(((first_key, first_value), rest)) = entries.split_first() else {
                return Ok(());
            };

            match first_value {
                Value::Array(inner) => {
                    writer.write_char(' ');
                    encode_array(writer, Some(first_key), inner, item_depth + 1)?;
                }
                Value::Object(nested) => {
                    writer.write_key(first_key);
                    writer.write_char(':');
                    if !nested.is_empty() {
                        writer.newline();
                        write_object(writer, nested, item_depth + 2)?;
                    }
                }
                primitive => {
                    writer.write_key(first_key);
                    writer.write_char(':');
                    writer.write_char(' ');
                    writer.write_primitive(primitive)?;
                }
            }

            if !rest.is_empty() {
                writer.newline();
                write_object(writer, rest, item_depth + 1)?;
            }
        }
        primitive => {
            writer.write_char(' ');
            writer.write_primitive(primitive)?;
        }
    }

    Ok(())
}
