//! Numeric value validators

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;

/// Validator for numeric constraints
#[derive(Debug, Clone, Default)]
pub struct NumericValidator {
    /// Minimum value (inclusive)
    pub min: Option<f64>,
    /// Maximum value (inclusive)
    pub max: Option<f64>,
    /// Allow only integers (no decimals)
    pub integer_only: bool,
    /// Allow only positive numbers (> 0)
    pub positive_only: bool,
    /// Allow only negative numbers (< 0)
    pub negative_only: bool,
    /// Custom error message
    pub message: Option<String>,
}

impl NumericValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn integer_only(mut self, integer_only: bool) -> Self {
        self.integer_only = integer_only;
        self
    }

    /// Allow only positive numbers (> 0); clears `negative_only`
    pub fn positive_only(mut self, positive_only: bool) -> Self {
        self.positive_only = positive_only;
        if positive_only {
            self.negative_only = false;
        }
        self
    }

    /// Allow only negative numbers (< 0); clears `positive_only`
    pub fn negative_only(mut self, negative_only: bool) -> Self {
        self.negative_only = negative_only;
        if negative_only {
            self.positive_only = false;
        }
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Numbers, or numeric strings accepted by a non-strict type check
    fn numeric_value(value: &Value) -> Option<f64> {
        match value {
            Value::Number(num) => num.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    fn violation(&self, field: &str, code: &str, default: String) -> ValidationResult<()> {
        let message = self.message.clone().unwrap_or(default);
        Err(ValidationError::with_code(field, message, code).into())
    }
}

impl ValidationRule for NumericValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        let Some(num) = Self::numeric_value(value) else {
            return Err(ValidationError::with_code(
                field,
                format!("{} must be a numeric value", field),
                "invalid_type",
            )
            .into());
        };

        if !num.is_finite() {
            return self.violation(
                field,
                "invalid_number",
                format!("{} must be a finite number", field),
            );
        }

        if self.integer_only && num.fract() != 0.0 {
            return self.violation(field, "not_integer", format!("{} must be an integer", field));
        }

        if self.positive_only && num <= 0.0 {
            return self.violation(
                field,
                "not_positive",
                format!("{} must be a positive number", field),
            );
        }

        if self.negative_only && num >= 0.0 {
            return self.violation(
                field,
                "not_negative",
                format!("{} must be a negative number", field),
            );
        }

        if let Some(min) = self.min {
            if num < min {
                return self.violation(
                    field,
                    "below_minimum",
                    format!("{} must be greater than or equal to {}", field, min),
                );
            }
        }

        if let Some(max) = self.max {
            if num > max {
                return self.violation(
                    field,
                    "above_maximum",
                    format!("{} must be less than or equal to {}", field, max),
                );
            }
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "numeric"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(min) = self.min {
            params.insert("min".to_string(), Value::from(min));
        }
        if let Some(max) = self.max {
            params.insert("max".to_string(), Value::from(max));
        }
        params.insert("integer_only".to_string(), Value::Bool(self.integer_only));
        params.insert("positive_only".to_string(), Value::Bool(self.positive_only));
        params.insert("negative_only".to_string(), Value::Bool(self.negative_only));

        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        Some(Value::Object(params))
    }
}
