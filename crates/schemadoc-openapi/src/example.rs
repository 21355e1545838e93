//! Replay of declared examples through the rules they illustrate.

use crate::error::{OpenApiError, OpenApiResult};
use schemadoc_validation::{FieldSchema, ValidateOptions};
use serde_json::Value;

/// Field label used when an example belongs to an unnamed node
pub const ANONYMOUS_FIELD: &str = "<anonymous_field>";

/// Checks example values against their own field schema before publication
#[derive(Debug, Clone, Copy, Default)]
pub struct ExampleVerifier;

impl ExampleVerifier {
    pub fn new() -> Self {
        Self
    }

    /// Strictly validate `example` against `node`.
    ///
    /// Messages name the root value after `field_name`, so a failing example
    /// for `age` reads `age must be a `number` type ...`.
    pub fn verify(
        &self,
        node: &FieldSchema,
        example: &Value,
        field_name: Option<&str>,
    ) -> OpenApiResult<()> {
        let field = field_name.unwrap_or(ANONYMOUS_FIELD);
        tracing::debug!("Verifying example for field {}", field);

        node.validate_as(example, field, ValidateOptions::strict())
            .map_err(|errors| OpenApiError::InvalidExample {
                field: field.to_string(),
                violations: errors.messages(),
            })
    }
}
