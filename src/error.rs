use thiserror::Error;

/// All ways encoding or decoding can fail.
///
/// Variants carry enough structured context (line, column, expected/found)
/// for a caller to build their own diagnostics without re-parsing the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToonError {
    #[error("input is empty")]
    EmptyInput,

    #[error("parse error at {line}:{column}: {message}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("structure error: {0}")]
    StructureError(String),

    #[error("invalid escape sequence '{sequence}' at position {position}")]
    InvalidEscape { sequence: String, position: usize },

    #[error("unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("{context}: expected {expected} item(s), found {found}")]
    CountMismatch {
        expected: usize,
        found: usize,
        context: String,
    },

    #[error("indentation error at line {line}: {message}")]
    IndentationError { message: String, line: usize },

    #[error("missing ':' after key or header on line {line}")]
    MissingColon { line: usize },

    #[error("invalid array header at line {line}: {message}")]
    InvalidHeader { message: String, line: usize },

    #[error("delimiter mismatch at line {line}: expected '{expected}'")]
    DelimiterMismatch { expected: char, line: usize },
}

pub type ToonResult<T> = Result<T, ToonError>;
