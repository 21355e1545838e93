//! Custom validation functions and closures

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;
use std::sync::Arc;

/// Signature of a user-defined check
pub type ValidationFn = Arc<dyn Fn(&Value, &str) -> ValidationResult<()> + Send + Sync>;

/// Custom validator that wraps a user-defined validation function
#[derive(Clone)]
pub struct CustomValidator {
    /// Name/identifier for this custom validator
    pub name: String,
    validator: ValidationFn,
    /// Replaces every message produced by the function when set
    pub message: Option<String>,
}

impl CustomValidator {
    pub fn new<F>(name: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&Value, &str) -> ValidationResult<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            validator: Arc::new(validator),
            message: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Build a validator from a predicate and a message template.
    ///
    /// `{path}` in the message is replaced by the field path.
    pub fn test<F>(name: impl Into<String>, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        let code = name.clone();
        let message = message.into();
        Self::new(name, move |value, field| {
            if predicate(value) {
                Ok(())
            } else {
                Err(ValidationError::with_code(field, message.replace("{path}", field), code.as_str()).into())
            }
        })
    }
}

impl std::fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomValidator")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish()
    }
}

impl ValidationRule for CustomValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        match ((self.validator)(value, field), &self.message) {
            (Err(mut errors), Some(custom_message)) => {
                for error in &mut errors.errors {
                    error.message = custom_message.clone();
                }
                Err(errors)
            }
            (result, _) => result,
        }
    }

    fn rule_name(&self) -> &'static str {
        "custom"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();
        params.insert("name".to_string(), Value::String(self.name.clone()));
        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }
        Some(Value::Object(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_closure_validator() {
        let validator = CustomValidator::new("even", |value, field| match value.as_i64() {
            Some(n) if n % 2 == 0 => Ok(()),
            _ => Err(ValidationError::new(field, format!("{} must be even", field)).into()),
        });

        assert!(validator.validate(&json!(4), "count").is_ok());
        let errors = validator.validate(&json!(3), "count").unwrap_err();
        assert_eq!(errors.messages(), vec!["count must be even"]);
    }

    #[test]
    fn test_predicate_helper() {
        let validator = CustomValidator::test("lowercase", "{path} must be lowercase", |value| {
            value.as_str().is_some_and(|s| s == s.to_lowercase())
        });

        assert!(validator.validate(&json!("abc"), "slug").is_ok());
        let errors = validator.validate(&json!("ABC"), "slug").unwrap_err();
        assert_eq!(errors.errors[0].message, "slug must be lowercase");
        assert_eq!(errors.errors[0].code, "lowercase");
    }

    #[test]
    fn test_message_override() {
        let validator = CustomValidator::test("never", "{path} fails", |_| false).message("nope");
        let errors = validator.validate(&json!(1), "x").unwrap_err();
        assert_eq!(errors.messages(), vec!["nope"]);
    }
}
