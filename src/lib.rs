//! # toon
//!
//! A codec for TOON (Token-Oriented Object Notation): a compact,
//! indentation-based serialization format for JSON-equivalent data, designed
//! to spend fewer tokens than JSON when embedded in an LLM prompt.
//!
//! This crate works over its own [`Value`] tree rather than adapting
//! `serde`: TOON's decode-to-string asymmetry (every unquoted scalar decodes
//! to `String`, never `Number`) does not map onto a typed `Deserialize`
//! target, so the API surface is four plain functions instead.
//!
//! ## Example
//! ```rust
//! use toon::{decode, encode, Value};
//!
//! let value = Value::object([
//!     ("name", Value::from("Alice")),
//!     ("age", Value::from(30)),
//! ]);
//!
//! let text = encode(&value)?;
//! assert_eq!(text, "name: Alice\nage: 30");
//!
//! let round_tripped = decode(&text)?;
//! assert_eq!(round_tripped.get("name").and_then(Value::as_str), Some("Alice"));
//! # Ok::<(), toon::ToonError>(())
//! ```
#![warn(rustdoc::missing_crate_level_docs)]

mod constants;
mod decode;
mod encode;
mod error;
mod options;
mod text;
mod value;

pub use decode::{decode, decode_with_options};
pub use encode::{encode, encode_with_options};
pub use error::{ToonError, ToonResult};
pub use options::{Delimiter, DecodeOptions, EncodeOptions, Indent, LengthMarker};
pub use text::quote::{escape_string, is_valid_unquoted_key, needs_quoting};
pub use value::Value;
