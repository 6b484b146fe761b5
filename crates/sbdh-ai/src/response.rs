//! Decomposition of a model reply into the eight field tokens.

use sbdh_core::{FIELD_COUNT, FieldValues, SbdhField};
use thiserror::Error;

/// How strictly tokens are checked against each field's code set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CodeValidation {
    /// Only the token count is checked; tokens pass through verbatim.
    #[default]
    Lenient,
    /// Each token (trimmed) must also be one of its field's codes.
    Strict,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("expected {expected} fields but got {found}: '{body}'")]
    FieldCount {
        expected: usize,
        found: usize,
        body: String,
    },
    #[error("{field} does not accept '{token}'")]
    OutOfRange { field: SbdhField, token: String },
}

/// Split a reply into one token per field.
///
/// The body is trimmed as a whole and split on commas; tokens themselves are
/// returned unmodified.
pub fn parse_response(
    body: &str,
    validation: CodeValidation,
) -> Result<FieldValues, ValidationError> {
    let content = body.trim();
    let tokens: Vec<String> = content.split(',').map(str::to_string).collect();
    let values: FieldValues = tokens.try_into().map_err(|tokens: Vec<String>| {
        ValidationError::FieldCount {
            expected: FIELD_COUNT,
            found: tokens.len(),
            body: content.to_string(),
        }
    })?;

    if validation == CodeValidation::Strict {
        for (field, token) in SbdhField::ALL.iter().zip(&values) {
            if !field.accepts(token) {
                return Err(ValidationError::OutOfRange {
                    field: *field,
                    token: token.clone(),
                });
            }
        }
    }

    Ok(values)
}
