// ⚠️ Validation Errors - user-correctable input problems
// Every variant is recoverable: the caller shows the message and lets the user fix it.

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail")]
pub enum ValidationError {
    /// Ingredient name is empty after trimming
    #[error("ingredient name must not be empty")]
    EmptyName,

    /// Percent is not a finite number in [0, 100]
    #[error("percent must be a number between 0 and 100")]
    OutOfRange,

    /// Tried to move past ingredient entry with an empty list
    #[error("at least one ingredient is required")]
    NoIngredients,

    /// Remove was asked for a position the list does not have
    #[error("no ingredient at position {0}")]
    IndexOutOfBounds(usize),

    /// Email does not look like `local@domain.tld`
    #[error("email address is not valid")]
    InvalidEmail,

    /// Required settings field is blank
    #[error("{0} is required")]
    MissingField(&'static str),
}

impl ValidationError {
    /// Name of the input field the error belongs to (for form display)
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "name",
            ValidationError::OutOfRange => "percent",
            ValidationError::NoIngredients | ValidationError::IndexOutOfBounds(_) => "ingredients",
            ValidationError::InvalidEmail => "email",
            ValidationError::MissingField(field) => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(ValidationError::EmptyName.to_string(), "ingredient name must not be empty");
        assert_eq!(
            ValidationError::MissingField("productName").to_string(),
            "productName is required"
        );
        assert_eq!(ValidationError::IndexOutOfBounds(4).to_string(), "no ingredient at position 4");
    }

    #[test]
    fn test_field_mapping() {
        assert_eq!(ValidationError::OutOfRange.field(), "percent");
        assert_eq!(ValidationError::InvalidEmail.field(), "email");
        assert_eq!(ValidationError::MissingField("targetLanguage").field(), "targetLanguage");
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(ValidationError::MissingField("email")).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "MissingField", "detail": "email"}));

        let json = serde_json::to_value(ValidationError::NoIngredients).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "NoIngredients"}));
    }
}
