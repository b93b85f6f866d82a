use std::fmt;

use crate::constants::DEFAULT_INDENT;

/// Delimiter character used to separate array elements and tabular fields.
///
/// # Examples
/// ```
/// use toon::Delimiter;
///
/// let delim = Delimiter::Pipe;
/// assert_eq!(delim.as_char(), '|');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ',' => Some(Delimiter::Comma),
            '\t' => Some(Delimiter::Tab),
            '|' => Some(Delimiter::Pipe),
            _ => None,
        }
    }

    pub fn contains_in(&self, s: &str) -> bool {
        s.contains(self.as_char())
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Indentation style used for nested structures. Only spaces are
/// supported; TOON indentation must be a fixed, consistent unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(DEFAULT_INDENT)
    }
}

impl Indent {
    pub fn get_string(&self, depth: usize) -> String {
        if depth == 0 {
            return String::new();
        }
        match self {
            Indent::Spaces(count) if *count > 0 => " ".repeat(count * depth),
            Indent::Spaces(_) => String::new(),
        }
    }

    pub fn get_spaces(&self) -> usize {
        match self {
            Indent::Spaces(count) => *count,
        }
    }
}

/// Whether array headers carry an explicit `#` length marker.
///
/// Purely cosmetic: the decoder parses the length the same way whether or
/// not the marker is present. See [`EncodeOptions::with_length_marker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthMarker {
    #[default]
    None,
    Hash,
}

/// Options controlling how a [`Value`](crate::Value) is rendered to TOON text.
///
/// # Examples
/// ```
/// use toon::{Delimiter, EncodeOptions};
///
/// let opts = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
/// let _ = opts;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    pub delimiter: Delimiter,
    pub indent: Indent,
    pub length_marker: LengthMarker,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            indent: Indent::default(),
            length_marker: LengthMarker::None,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_indent(mut self, style: Indent) -> Self {
        self.indent = style;
        self
    }

    pub fn with_spaces(mut self, count: usize) -> Self {
        self.indent = Indent::Spaces(count);
        self
    }

    /// Prefix array-header lengths with `#`, e.g. `items[#3]:`.
    ///
    /// # Examples
    /// ```
    /// use toon::{EncodeOptions, LengthMarker};
    ///
    /// let opts = EncodeOptions::new().with_length_marker(LengthMarker::Hash);
    /// let _ = opts;
    /// ```
    pub fn with_length_marker(mut self, marker: LengthMarker) -> Self {
        self.length_marker = marker;
        self
    }
}

/// Options controlling how TOON text is parsed into a [`Value`](crate::Value).
///
/// # Examples
/// ```
/// use toon::DecodeOptions;
///
/// let opts = DecodeOptions::new().with_strict(false);
/// let _ = opts;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    pub delimiter: Option<Delimiter>,
    pub strict: bool,
    pub indent: Indent,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            strict: true,
            indent: Indent::default(),
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict validation (array-length checks, tabular
    /// field-count checks, tab-in-indentation rejection, bareword-key
    /// shape checks on unquoted keys).
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Pin the expected delimiter instead of auto-detecting it from array
    /// headers.
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_indent(mut self, style: Indent) -> Self {
        self.indent = style;
        self
    }
}
