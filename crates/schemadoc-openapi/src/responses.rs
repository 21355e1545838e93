use crate::specification::{Items, Response, Responses, Schema};
use indexmap::IndexMap;
use schemadoc_validation::{FieldSchema, ValidateOptions};
use serde_json::{json, Value};

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Builds the response set of an operation
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseAssembler;

impl ResponseAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Baseline `200`/`403`/`default` responses with `overrides` laid on top
    pub fn assemble(
        &self,
        request_body: Option<&FieldSchema>,
        overrides: Option<&Responses>,
    ) -> Responses {
        let mut responses = Responses::new();
        responses.insert("200".to_string(), Response::new("success"));
        responses.insert("403".to_string(), self.validation_error(request_body));
        responses.insert(
            "default".to_string(),
            Response::new("Some error may have occurred"),
        );

        if let Some(overrides) = overrides {
            for (status, definition) in overrides {
                responses.insert(status.clone(), definition.clone());
            }
        }

        responses
    }

    /// Messages produced by validating an empty body, in order
    pub fn empty_body_violations(&self, request_body: Option<&FieldSchema>) -> Vec<String> {
        let Some(node) = request_body else {
            return Vec::new();
        };

        let options = ValidateOptions::strict().with_abort_early(false);
        match node.validate(&json!({}), options) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.messages(),
        }
    }

    fn validation_error(&self, request_body: Option<&FieldSchema>) -> Response {
        let violations = self.empty_body_violations(request_body);

        let mut properties = IndexMap::new();
        properties.insert("code".to_string(), Schema::typed("number").with_example(json!(403)));
        properties.insert(
            "message".to_string(),
            Schema::typed("string").with_example(json!("error")),
        );
        properties.insert(
            "errors".to_string(),
            Schema {
                items: Some(Items::Single(Box::new(Schema::typed("string")))),
                ..Schema::typed("array")
            }
            .with_example(json!(violations)),
        );

        Response::new("Validation error").with_content(
            JSON_MEDIA_TYPE,
            Schema {
                properties: Some(properties),
                ..Schema::typed("object")
            },
        )
    }

    /// Envelope response `{statusCode, body}` documenting a handler's reply
    pub fn response_object(
        description: &str,
        status_code: impl Into<Value>,
        body_properties: Option<IndexMap<String, Schema>>,
    ) -> Response {
        let mut properties = IndexMap::new();
        properties.insert(
            "statusCode".to_string(),
            Schema::typed("number").with_example(status_code.into()),
        );
        if let Some(body) = body_properties {
            properties.insert(
                "body".to_string(),
                Schema {
                    properties: Some(body),
                    ..Schema::typed("object")
                },
            );
        }

        Response::new(description).with_content(
            JSON_MEDIA_TYPE,
            Schema {
                properties: Some(properties),
                ..Schema::typed("object")
            },
        )
    }
}
