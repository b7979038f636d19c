//! Error types for field access

use crate::field::Field;

/// Errors raised when assigning a field from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Field name does not exist on a policy record
    #[error("unknown field: '{0}'")]
    UnknownField(String),

    /// Numeric field received a value that is not a number
    #[error("{field} expects a number, got '{value}'")]
    NotNumeric { field: Field, value: String },

    /// Gender field received an unsupported value
    #[error("invalid gender '{0}' (expected Male, Female or Other)")]
    InvalidGender(String),

    /// Field cannot be assigned through text input
    #[error("{0} is read-only")]
    ReadOnly(Field),
}

impl FieldError {
    /// Create a not-numeric error
    pub fn not_numeric(field: Field, value: impl Into<String>) -> Self {
        Self::NotNumeric {
            field,
            value: value.into(),
        }
    }
}
