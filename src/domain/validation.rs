use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::utils::errors::ApiError;

/// A single rejected value, keyed by field name in [`ValidationErrors`].
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub code: String,
    pub message: String,
}

/// Field-level validation failures collected while binding a form.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<FieldError>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, code: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.reject(field, code, message);
        errors
    }

    pub fn reject(&mut self, field: &str, code: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(FieldError {
                code: code.to_string(),
                message: message.into(),
            });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn has_field_errors(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// First error recorded against `field`.
    pub fn field_error(&self, field: &str) -> Option<&FieldError> {
        self.fields.get(field).and_then(|errors| errors.first())
    }

    pub fn error_count(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, errors) in &self.fields {
            for error in errors {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, error.message)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_pass() {
        let errors = ValidationErrors::new();
        assert!(errors.is_empty());
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn test_reject_collects_per_field() {
        let mut errors = ValidationErrors::new();
        errors.reject("name", "required", "is required");
        errors.reject("name", "duplicate", "is already in use");
        errors.reject("type", "required", "is required");

        assert_eq!(errors.error_count(), 3);
        assert!(errors.has_field_errors("name"));
        assert!(!errors.has_field_errors("birthDate"));
        assert_eq!(errors.field_error("name").unwrap().code, "required");
    }

    #[test]
    fn test_display_lists_every_message() {
        let mut errors = ValidationErrors::new();
        errors.reject("city", "required", "must not be blank");
        errors.reject("address", "required", "must not be blank");

        assert_eq!(
            errors.to_string(),
            "address: must not be blank; city: must not be blank"
        );
    }

    #[test]
    fn test_into_result_wraps_validation_error() {
        let errors = ValidationErrors::single("lastName", "notFound", "not found");
        match errors.into_result() {
            Err(ApiError::Validation(inner)) => {
                assert_eq!(inner.field_error("lastName").unwrap().code, "notFound");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_serializes_as_field_map() {
        let errors = ValidationErrors::single("page", "min", "must be at least 1");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["page"][0]["code"], "min");
        assert_eq!(json["page"][0]["message"], "must be at least 1");
    }
}
