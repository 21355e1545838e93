use crate::error::{OpenApiError, OpenApiResult};
use crate::specification::{HttpMethod, Response, Responses};
use schemadoc_validation::FieldSchema;

pub const DEFAULT_SUMMARY: &str = "No summary";
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// Operation-level facts read from a root schema's metadata bag
#[derive(Debug, Clone, PartialEq)]
pub struct OperationMetadata {
    pub path: String,
    pub method: HttpMethod,
    pub summary: String,
    pub description: String,
    pub response_overrides: Option<Responses>,
    pub tags: Vec<String>,
    pub security: Option<String>,
    pub operation_id: Option<String>,
    pub deprecated: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataExtractor;

impl MetadataExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, root: &FieldSchema) -> OpenApiResult<OperationMetadata> {
        let meta = root.get_meta().ok_or(OpenApiError::MissingMetadata)?;

        let path = meta
            .path
            .clone()
            .ok_or(OpenApiError::MissingRequiredMetadataField("path"))?;
        let method: HttpMethod = meta
            .method
            .as_deref()
            .ok_or(OpenApiError::MissingRequiredMetadataField("method"))?
            .parse()?;

        let response_overrides = meta
            .responses
            .as_ref()
            .map(|responses| {
                responses
                    .iter()
                    .map(|(status, definition)| {
                        let response: Response = serde_json::from_value(definition.clone())?;
                        Ok((status.clone(), response))
                    })
                    .collect::<OpenApiResult<Responses>>()
            })
            .transpose()?;

        Ok(OperationMetadata {
            path,
            method,
            summary: non_empty(meta.summary.as_deref()).unwrap_or(DEFAULT_SUMMARY).to_string(),
            description: non_empty(meta.description.as_deref())
                .unwrap_or(DEFAULT_DESCRIPTION)
                .to_string(),
            response_overrides,
            tags: meta.tags.clone(),
            security: meta.security.clone(),
            operation_id: meta.operation_id.clone(),
            deprecated: meta.deprecated,
        })
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemadoc_validation::Meta;
    use serde_json::json;

    fn root(meta: Meta) -> FieldSchema {
        FieldSchema::object(Vec::<(String, FieldSchema)>::new()).meta(meta)
    }

    #[test]
    fn test_defaults_for_summary_and_description() {
        let metadata = MetadataExtractor::new()
            .extract(&root(Meta::new().path("/users/{id}").method("post")))
            .unwrap();

        assert_eq!(metadata.path, "/users/{id}");
        assert_eq!(metadata.method, HttpMethod::Post);
        assert_eq!(metadata.summary, "No summary");
        assert_eq!(metadata.description, "No description");
        assert!(metadata.response_overrides.is_none());
    }

    #[test]
    fn test_missing_bag() {
        let node = FieldSchema::object(Vec::<(String, FieldSchema)>::new());
        assert!(matches!(
            MetadataExtractor::new().extract(&node),
            Err(OpenApiError::MissingMetadata)
        ));
    }

    #[test]
    fn test_missing_path_reported_before_method() {
        let result = MetadataExtractor::new().extract(&root(Meta::new().summary("orphan")));
        assert!(matches!(
            result,
            Err(OpenApiError::MissingRequiredMetadataField("path"))
        ));

        let result = MetadataExtractor::new().extract(&root(Meta::new().path("/health")));
        assert!(matches!(
            result,
            Err(OpenApiError::MissingRequiredMetadataField("method"))
        ));
    }

    #[test]
    fn test_unknown_method() {
        let result = MetadataExtractor::new().extract(&root(Meta::new().path("/x").method("trace")));
        assert!(matches!(result, Err(OpenApiError::UnsupportedMethod(m)) if m == "trace"));
    }

    #[test]
    fn test_operation_fields_and_overrides() {
        let meta = Meta::new()
            .path("/orders")
            .method("GET")
            .summary("List orders")
            .tag("Orders")
            .security("bearerAuth")
            .operation_id("listOrders")
            .response("409", json!({ "description": "conflict" }));

        let metadata = MetadataExtractor::new().extract(&root(meta)).unwrap();
        assert_eq!(metadata.method, HttpMethod::Get);
        assert_eq!(metadata.summary, "List orders");
        assert_eq!(metadata.tags, vec!["Orders".to_string()]);
        assert_eq!(metadata.security.as_deref(), Some("bearerAuth"));
        assert_eq!(metadata.operation_id.as_deref(), Some("listOrders"));

        let overrides = metadata.response_overrides.unwrap();
        assert_eq!(overrides["409"].description, "conflict");
    }

    #[test]
    fn test_malformed_override_is_an_error() {
        let meta = Meta::new()
            .path("/orders")
            .method("get")
            .response("500", json!({ "content": {} }));

        assert!(matches!(
            MetadataExtractor::new().extract(&root(meta)),
            Err(OpenApiError::Json(_))
        ));
    }
}
