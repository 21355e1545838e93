//! Email format validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(
                r"^[a-zA-Z0-9]([a-zA-Z0-9._%+-]*[a-zA-Z0-9])?@[a-zA-Z0-9]([a-zA-Z0-9.-]*[a-zA-Z0-9])?\.[a-zA-Z]{2,}$",
            )
            .ok()
        })
        .as_ref()
}

/// Validator for email address format
#[derive(Debug, Clone, Default)]
pub struct EmailValidator {
    /// Custom error message
    pub message: Option<String>,
}

impl EmailValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn is_valid(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        // RFC 5321 limits
        if local.is_empty() || local.len() > 64 || domain.is_empty() || domain.len() > 255 {
            return false;
        }

        !email.contains("..") && email_regex().is_some_and(|regex| regex.is_match(email))
    }
}

impl ValidationRule for EmailValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        let Some(email) = value.as_str() else {
            return Err(ValidationError::with_code(
                field,
                format!("{} must be a string for email validation", field),
                "invalid_type",
            )
            .into());
        };

        if Self::is_valid(email) {
            return Ok(());
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("{} must be a valid email", field));

        Err(ValidationError::with_code(field, message, "invalid_email").into())
    }

    fn rule_name(&self) -> &'static str {
        "email"
    }
}
