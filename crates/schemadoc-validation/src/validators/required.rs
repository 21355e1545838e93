//! Non-blank validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;

/// Validator that rejects blank strings and empty collections.
///
/// Absence is handled by the field's presence; this rule covers values that
/// are present but carry nothing.
#[derive(Debug, Clone, Default)]
pub struct RequiredValidator {
    /// Custom error message
    pub message: Option<String>,
}

impl RequiredValidator {
    pub fn new() -> Self {
        Self { message: None }
    }

    /// Create a required validator with custom message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    fn is_blank(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Array(arr) => arr.is_empty(),
            Value::Object(obj) => obj.is_empty(),
            _ => false,
        }
    }
}

impl ValidationRule for RequiredValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if !Self::is_blank(value) {
            return Ok(());
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("{} is a required field", field));

        Err(ValidationError::with_code(field, message, "required").into())
    }

    fn rule_name(&self) -> &'static str {
        "required"
    }

    fn parameters(&self) -> Option<Value> {
        self.message
            .as_ref()
            .map(|msg| serde_json::json!({ "message": msg }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_values_fail() {
        let validator = RequiredValidator::new();

        for value in [Value::Null, json!(""), json!("   "), json!([]), json!({})] {
            let result = validator.validate(&value, "name");
            assert!(result.is_err(), "expected {value} to be rejected");
        }
    }

    #[test]
    fn test_filled_values_pass() {
        let validator = RequiredValidator::new();

        assert!(validator.validate(&json!("John"), "name").is_ok());
        assert!(validator.validate(&json!(["tag1"]), "tags").is_ok());
        // Numbers and booleans are never blank, including 0 and false
        assert!(validator.validate(&json!(0), "count").is_ok());
        assert!(validator.validate(&json!(false), "active").is_ok());
    }

    #[test]
    fn test_default_and_custom_message() {
        let errors = RequiredValidator::new()
            .validate(&json!(""), "description")
            .unwrap_err();
        assert_eq!(errors.messages(), vec!["description is a required field"]);

        let errors = RequiredValidator::with_message("This field cannot be empty")
            .validate(&json!(""), "email")
            .unwrap_err();
        assert_eq!(errors.errors[0].message, "This field cannot be empty");
        assert_eq!(errors.errors[0].code, "required");
    }
}
