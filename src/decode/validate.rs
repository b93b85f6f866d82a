//! Strict-mode structural validation shared by the decoder driver.

use std::collections::HashSet;

use crate::error::{ToonError, ToonResult};
use crate::options::Delimiter;

pub(crate) fn validate_depth(depth: usize, max_depth: usize) -> ToonResult<()> {
    if depth > max_depth {
        return Err(ToonError::StructureError(format!(
            "maximum nesting depth of {max_depth} exceeded"
        )));
    }
    Ok(())
}

pub(crate) fn validate_array_length(expected: usize, found: usize, context: &str) -> ToonResult<()> {
    if expected != found {
        return Err(ToonError::CountMismatch {
            expected,
            found,
            context: context.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn validate_field_list(fields: &[String], line: usize) -> ToonResult<()> {
    if fields.is_empty() {
        return Err(ToonError::InvalidHeader {
            message: "field list cannot be empty for tabular arrays".into(),
            line,
        });
    }

    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        if field.is_empty() {
            return Err(ToonError::InvalidHeader {
                message: "field name cannot be empty".into(),
                line,
            });
        }
        if !seen.insert(field.as_str()) {
            return Err(ToonError::InvalidHeader {
                message: format!("duplicate field name '{field}'"),
                line,
            });
        }
    }
    Ok(())
}

pub(crate) fn validate_delimiter_consistency(
    detected: Option<Delimiter>,
    expected: Option<Delimiter>,
    line: usize,
) -> ToonResult<()> {
    if let (Some(detected), Some(expected)) = (detected, expected) {
        if detected != expected {
            return Err(ToonError::DelimiterMismatch {
                expected: expected.as_char(),
                line,
            });
        }
    }
    Ok(())
}
