use schemadoc_validation::SchemaBuildError;
use thiserror::Error;

/// Result type for OpenAPI operations
pub type OpenApiResult<T> = Result<T, OpenApiError>;

/// Errors that can occur during OpenAPI generation
#[derive(Debug, Error)]
pub enum OpenApiError {
    /// A node's kind has no translation rule
    #[error("unsupported field type: {0}")]
    UnsupportedFieldType(String),

    /// The root schema carries no metadata bag
    #[error("metadata for schema is missing")]
    MissingMetadata,

    /// `path` or `method` is absent from the root metadata
    #[error("metadata for schema is missing required field: {0}")]
    MissingRequiredMetadataField(&'static str),

    /// A declared example fails its own field's validation
    #[error("Example for field: {field} is invalid: {}", json_list(.violations))]
    InvalidExample {
        field: String,
        violations: Vec<String>,
    },

    /// The schema tree nests deeper than the configured limit
    #[error("schema nesting exceeds the maximum depth of {limit}")]
    MaxDepthExceeded { limit: usize },

    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The operation schema is not an object node
    #[error("operation schema must be an object, got {0}")]
    InvalidRootSchema(&'static str),

    /// A query/params/headers slot is not an object node
    #[error("{location} parameters must be declared by an object, got {kind}")]
    InvalidParameterContainer {
        location: &'static str,
        kind: &'static str,
    },

    #[error("invalid tag: {0}")]
    InvalidTag(String),

    /// Schema descriptor could not be turned into a field schema
    #[error("schema error: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OpenApiError {
    pub fn config_error<T: ToString>(msg: T) -> Self {
        Self::Config(msg.to_string())
    }

    pub fn schema_error<T: ToString>(msg: T) -> Self {
        Self::Schema(msg.to_string())
    }
}

/// Render violations as a JSON array of strings
fn json_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_default()
}

impl From<SchemaBuildError> for OpenApiError {
    fn from(error: SchemaBuildError) -> Self {
        match error {
            SchemaBuildError::UnsupportedFieldType(kind) => Self::UnsupportedFieldType(kind),
            other => Self::schema_error(other),
        }
    }
}
