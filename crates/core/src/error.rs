use serde::Serialize;

/// A single rejected input field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as it appears in the request body (e.g. `startDate`).
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `id` is the identifier exactly as the caller supplied it, which may not
    /// be numeric.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {}", describe_fields(.0))]
    Validation(Vec<FieldError>),
}

impl CoreError {
    /// Shorthand for a validation failure on a single field.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::Validation(vec![FieldError::new(field, message)])
    }
}

/// Render field errors as `field: message; field: message`.
pub fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_lists_every_field() {
        let err = CoreError::Validation(vec![
            FieldError::new("name", "is required"),
            FieldError::new("endDate", "must be an ISO 8601 date"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: name: is required; endDate: must be an ISO 8601 date"
        );
    }

    #[test]
    fn not_found_display_keeps_raw_id() {
        let err = CoreError::NotFound {
            entity: "Tour",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Entity not found: Tour with id abc");
    }
}
