//! Pattern-based validators using regular expressions

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use regex::Regex;
use serde_json::Value;

/// Validator for custom regular expression patterns.
///
/// A value passes when the pattern matches anywhere in it. Full-match mode
/// checks against an anchored copy of the pattern instead.
#[derive(Debug, Clone)]
pub struct PatternValidator {
    pattern: Regex,
    /// `^(?:pattern)$`, present only in full-match mode
    anchored: Option<Regex>,
    /// Custom error message
    pub message: Option<String>,
}

impl PatternValidator {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    pub fn from_regex(regex: Regex) -> Self {
        Self {
            pattern: regex,
            anchored: None,
            message: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Require the whole value to match
    pub fn full_match(mut self) -> Result<Self, regex::Error> {
        self.anchored = Some(Regex::new(&format!("^(?:{})$", self.pattern.as_str()))?);
        Ok(self)
    }

    fn matches(&self, text: &str) -> bool {
        match &self.anchored {
            Some(anchored) => anchored.is_match(text),
            None => self.pattern.is_match(text),
        }
    }
}

impl ValidationRule for PatternValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        let Some(text) = value.as_str() else {
            return Err(ValidationError::with_code(
                field,
                format!("{} must be a string for pattern validation", field),
                "invalid_type",
            )
            .into());
        };

        if self.matches(text) {
            return Ok(());
        }

        let message = self.message.clone().unwrap_or_else(|| {
            format!(
                "{} must match the following: \"{}\"",
                field,
                self.pattern.as_str()
            )
        });

        Err(ValidationError::with_code(field, message, "pattern_mismatch").into())
    }

    fn rule_name(&self) -> &'static str {
        "pattern"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "pattern": self.pattern.as_str(),
            "full_match": self.anchored.is_some(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_match_by_default() {
        let validator = PatternValidator::new(r"\d+").unwrap();

        assert!(validator.validate(&json!("order-42"), "ref").is_ok());
        let errors = validator.validate(&json!("order"), "ref").unwrap_err();
        assert_eq!(errors.messages(), vec!["ref must match the following: \"\\d+\""]);
    }

    #[test]
    fn test_alternation_accepts_longer_branch() {
        let validator = PatternValidator::new("a|ab").unwrap();
        assert!(validator.validate(&json!("ab"), "code").is_ok());

        let anchored = PatternValidator::new("a|ab").unwrap().full_match().unwrap();
        assert!(anchored.validate(&json!("ab"), "code").is_ok());
        assert!(anchored.validate(&json!("a"), "code").is_ok());
        assert!(anchored.validate(&json!("abc"), "code").is_err());
    }

    #[test]
    fn test_full_match_rejects_surrounding_text() {
        let validator = PatternValidator::new(r"[a-z]+").unwrap().full_match().unwrap();

        assert!(validator.validate(&json!("abc"), "slug").is_ok());
        let errors = validator.validate(&json!("abc1"), "slug").unwrap_err();
        assert_eq!(errors.messages(), vec!["slug must match the following: \"[a-z]+\""]);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        assert!(PatternValidator::new("(unclosed").is_err());
    }
}
