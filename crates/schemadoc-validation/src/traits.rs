//! Core validation traits

use crate::error::ValidationResult;
use serde_json::Value;

/// A single constraint attached to a field schema.
///
/// Rules are called only with present values that already passed the
/// field's type check; `field` is the path used in messages.
pub trait ValidationRule: Send + Sync {
    /// Validate a single value
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()>;

    /// Get the validation rule name/type
    fn rule_name(&self) -> &'static str;

    /// Get validation rule parameters/configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }
}

/// Trait for types that can be converted to a validation value
pub trait ToValidationValue {
    fn to_validation_value(&self) -> Value;
}

impl ToValidationValue for String {
    fn to_validation_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValidationValue for &str {
    fn to_validation_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValidationValue for i32 {
    fn to_validation_value(&self) -> Value {
        Value::Number(serde_json::Number::from(*self))
    }
}

impl ToValidationValue for i64 {
    fn to_validation_value(&self) -> Value {
        Value::Number(serde_json::Number::from(*self))
    }
}

impl ToValidationValue for f64 {
    fn to_validation_value(&self) -> Value {
        serde_json::Number::from_f64(*self)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

impl ToValidationValue for bool {
    fn to_validation_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValidationValue for Value {
    fn to_validation_value(&self) -> Value {
        self.clone()
    }
}

impl<T> ToValidationValue for Option<T>
where
    T: ToValidationValue,
{
    fn to_validation_value(&self) -> Value {
        match self {
            Some(value) => value.to_validation_value(),
            None => Value::Null,
        }
    }
}

impl<T> ToValidationValue for Vec<T>
where
    T: ToValidationValue,
{
    fn to_validation_value(&self) -> Value {
        Value::Array(self.iter().map(|item| item.to_validation_value()).collect())
    }
}
