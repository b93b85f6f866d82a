pub const KEYWORDS: &[&str] = &["null", "true", "false"];

pub const DEFAULT_INDENT: usize = 2;

pub const MAX_DEPTH: usize = 256;

/// Tabular arrays with at least this many rows are rendered row-by-row on
/// a rayon thread pool when the `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub(crate) const PARALLEL_ROW_THRESHOLD: usize = 512;

pub(crate) const QUOTED_KEY_MARKER: char = '\x00';

#[inline]
pub fn is_structural_char(ch: char) -> bool {
    matches!(ch, '[' | ']' | '{' | '}' | ':' | '-')
}

#[inline]
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}
