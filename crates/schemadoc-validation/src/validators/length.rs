//! Length-based validators for strings and arrays

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;

/// Validator for string/array length constraints
#[derive(Debug, Clone, Default)]
pub struct LengthValidator {
    /// Minimum length (inclusive)
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    pub max: Option<usize>,
    /// Exact length required
    pub exact: Option<usize>,
    /// Custom error message
    pub message: Option<String>,
}

impl LengthValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn exact(mut self, exact: usize) -> Self {
        self.exact = Some(exact);
        self
    }

    pub fn range(mut self, min: usize, max: usize) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Length of a string in chars, or of an array in items
    fn length_of(value: &Value) -> Option<(usize, &'static str)> {
        match value {
            Value::String(s) => Some((s.chars().count(), "characters")),
            Value::Array(arr) => Some((arr.len(), "items")),
            _ => None,
        }
    }

    fn violation(&self, field: &str, code: &str, default: String) -> ValidationResult<()> {
        let message = self.message.clone().unwrap_or(default);
        Err(ValidationError::with_code(field, message, code).into())
    }
}

impl ValidationRule for LengthValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        let Some((length, unit)) = Self::length_of(value) else {
            return Err(ValidationError::with_code(
                field,
                format!("{} must be a string or array for length validation", field),
                "invalid_type",
            )
            .into());
        };

        if let Some(exact) = self.exact {
            if length != exact {
                return self.violation(
                    field,
                    "length_exact",
                    format!("{} must be exactly {} {}", field, exact, unit),
                );
            }
            return Ok(());
        }

        if let Some(min) = self.min {
            if length < min {
                return self.violation(
                    field,
                    "length_min",
                    format!("{} must be at least {} {}", field, min, unit),
                );
            }
        }

        if let Some(max) = self.max {
            if length > max {
                return self.violation(
                    field,
                    "length_max",
                    format!("{} must be at most {} {}", field, max, unit),
                );
            }
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "length"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(min) = self.min {
            params.insert("min".to_string(), Value::from(min));
        }
        if let Some(max) = self.max {
            params.insert("max".to_string(), Value::from(max));
        }
        if let Some(exact) = self.exact {
            params.insert("exact".to_string(), Value::from(exact));
        }
        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        if params.is_empty() {
            None
        } else {
            Some(Value::Object(params))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_min_constraint() {
        let validator = LengthValidator::new().min(3);

        let errors = validator.validate(&json!("hi"), "name").unwrap_err();
        assert_eq!(errors.messages(), vec!["name must be at least 3 characters"]);
        assert!(validator.validate(&json!("bob"), "name").is_ok());
    }

    #[test]
    fn test_max_constraint_on_arrays() {
        let validator = LengthValidator::new().max(2);

        assert!(validator.validate(&json!(["a", "b"]), "tags").is_ok());
        let errors = validator.validate(&json!(["a", "b", "c"]), "tags").unwrap_err();
        assert_eq!(errors.messages(), vec!["tags must be at most 2 items"]);
    }

    #[test]
    fn test_exact_constraint() {
        let validator = LengthValidator::new().exact(4);

        assert!(validator.validate(&json!("test"), "code").is_ok());
        assert!(validator.validate(&json!("testing"), "code").is_err());
    }

    #[test]
    fn test_unicode_counts_chars() {
        let validator = LengthValidator::new().max(4);
        assert!(validator.validate(&json!("café"), "name").is_ok());
    }

    #[test]
    fn test_invalid_type() {
        let errors = LengthValidator::new()
            .min(1)
            .validate(&json!(42), "age")
            .unwrap_err();
        assert_eq!(errors.errors[0].code, "invalid_type");
    }

    #[test]
    fn test_custom_message() {
        let errors = LengthValidator::new()
            .min(8)
            .message("Password must be strong")
            .validate(&json!("weak"), "password")
            .unwrap_err();
        assert_eq!(errors.messages(), vec!["Password must be strong"]);
    }
}
