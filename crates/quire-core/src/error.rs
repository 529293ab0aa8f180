//! Error types for quire.

use std::fmt;

use thiserror::Error;

/// Top-level result type for quire operations.
pub type Result<T> = std::result::Result<T, QuireError>;

/// Top-level error type for quire.
#[derive(Debug, Error)]
pub enum QuireError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A single violated frontmatter constraint.
///
/// Every variant names the offending key path (`series.part`, `tags[2]`),
/// the expected shape and the value actually found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("missing required field '{field}': expected {expected}, got nothing")]
    MissingRequiredField { field: String, expected: String },

    #[error("invalid field type for '{field}': expected {expected}, got {actual}")]
    InvalidFieldType {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("constraint violated for '{field}': expected {expected}, got {actual}")]
    ConstraintViolated {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("cannot decode '{field}': expected {expected}, got {actual}")]
    DecodeFailure {
        field: String,
        expected: String,
        actual: String,
    },
}

impl SchemaError {
    /// Key path of the field this error is attributed to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::MissingRequiredField { field, .. }
            | Self::InvalidFieldType { field, .. }
            | Self::ConstraintViolated { field, .. }
            | Self::DecodeFailure { field, .. } => field,
        }
    }

    /// Whether the value was present but could not be decoded.
    #[must_use]
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::DecodeFailure { .. })
    }
}

/// Every constraint a frontmatter block violated, in schema order.
///
/// The `Display` form is the complete diagnostic shown to whoever runs the
/// build, one line per violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<SchemaError>,
}

impl ValidationError {
    #[must_use]
    pub fn new(errors: Vec<SchemaError>) -> Self {
        Self { errors }
    }

    #[must_use]
    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }

    /// Find the first violation attributed to `field`.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&SchemaError> {
        self.errors.iter().find(|e| e.field() == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.errors.len() == 1 {
            "error"
        } else {
            "errors"
        };
        write!(
            f,
            "frontmatter failed validation ({} {noun}):",
            self.errors.len()
        )?;
        for err in &self.errors {
            write!(f, "\n  - {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
