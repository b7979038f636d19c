//! Error types for the form engine

use mswasth_record::{Field, FieldError};

/// Form engine errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Field assignment failed
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Submission blocked by unfilled required fields
    #[error("missing required fields: {}", join_names(.0))]
    MissingRequired(Vec<Field>),

    /// Field cannot receive dictated text
    #[error("{0} does not accept dictation")]
    DictationUnsupported(Field),

    /// An extraction is already outstanding for this form
    #[error("autofill already in progress")]
    AutofillInProgress,
}

fn join_names(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_lists_field_names() {
        let err = FormError::MissingRequired(vec![Field::BranchName, Field::Gender]);
        assert_eq!(err.to_string(), "missing required fields: branchName, gender");
    }
}
