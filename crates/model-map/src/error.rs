use thiserror::Error;

use crate::json::{JsonKind, ROOT};

/// Errors raised while mapping between JSON payloads and domain records
#[derive(Error, Debug)]
pub enum MapError {
    #[error("No converter registered for type: {0}")]
    UnsupportedType(String),

    #[error("Null input: {0} is required")]
    NullInput(&'static str),

    #[error("Type mismatch at `{field}`: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: JsonKind,
        found: JsonKind,
    },

    #[error("Number out of range at `{field}`: {value}")]
    OutOfRange { field: String, value: String },

    #[error("Invalid timestamp at `{field}` ({value:?}): {reason}")]
    TimestampParse {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing field: `{field}`")]
    MissingField { field: String },

    #[error("Malformed update record: {0}")]
    Record(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MapError>;

impl MapError {
    /// Stable, machine-readable code for this error
    pub fn kind(&self) -> &'static str {
        match self {
            MapError::UnsupportedType(_) => "unsupported_type",
            MapError::NullInput(_) => "null_input",
            MapError::TypeMismatch { .. } => "type_mismatch",
            MapError::OutOfRange { .. } => "out_of_range",
            MapError::TimestampParse { .. } => "timestamp_parse",
            MapError::MissingField { .. } => "missing_field",
            MapError::Record(_) => "malformed_record",
        }
    }

    /// Field path the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            MapError::TypeMismatch { field, .. }
            | MapError::OutOfRange { field, .. }
            | MapError::TimestampParse { field, .. }
            | MapError::MissingField { field } => Some(field),
            _ => None,
        }
    }

    /// Prefix the field path with the position of a list element,
    /// so `id` inside the third element reads `[2].id`.
    pub(crate) fn at_index(self, index: usize) -> Self {
        self.map_field(|field| match field {
            ROOT => format!("[{}]", index),
            _ => format!("[{}].{}", index, field),
        })
    }

    fn map_field(self, f: impl FnOnce(&str) -> String) -> Self {
        match self {
            MapError::TypeMismatch {
                field,
                expected,
                found,
            } => MapError::TypeMismatch {
                field: f(&field),
                expected,
                found,
            },
            MapError::TimestampParse {
                field,
                value,
                reason,
            } => MapError::TimestampParse {
                field: f(&field),
                value,
                reason,
            },
            MapError::OutOfRange { field, value } => MapError::OutOfRange {
                field: f(&field),
                value,
            },
            MapError::MissingField { field } => MapError::MissingField { field: f(&field) },
            other => other,
        }
    }
}
