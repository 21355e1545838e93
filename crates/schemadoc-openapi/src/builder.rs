/*!
Assembly of `{path: {method: operation}}` fragments from operation schemas.

An operation schema is an object node whose children are recognized by name:

| child | becomes |
|---|---|
| `requestBody` | request body under `application/json` |
| `query` | `in: query` parameters |
| `params` | `in: path` parameters |
| `headers` | `in: header` parameters |

Everything else about the operation comes from the root's metadata bag.
*/

use crate::config::TranslatorConfig;
use crate::error::{OpenApiError, OpenApiResult};
use crate::metadata::MetadataExtractor;
use crate::parameters::ParameterExtractor;
use crate::responses::{ResponseAssembler, JSON_MEDIA_TYPE};
use crate::schema::SchemaTranslator;
use crate::specification::{
    MediaType, Operation, ParameterLocation, PathItem, Paths, RequestBody, SecurityRequirement,
};
use indexmap::IndexMap;
use schemadoc_validation::{FieldKind, FieldSchema};

pub const REQUEST_BODY_SLOT: &str = "requestBody";

/// Named slots holding parameters, in the order they are emitted
pub const PARAMETER_SLOTS: [(&str, ParameterLocation); 3] = [
    ("query", ParameterLocation::Query),
    ("params", ParameterLocation::Path),
    ("headers", ParameterLocation::Header),
];

/// Entry point turning one operation schema into a paths fragment
#[derive(Debug, Clone, Default)]
pub struct PathEntryBuilder {
    translator: SchemaTranslator,
    metadata: MetadataExtractor,
    responses: ResponseAssembler,
}

impl PathEntryBuilder {
    pub fn new(config: &TranslatorConfig) -> Self {
        Self {
            translator: SchemaTranslator::new(config.max_depth),
            metadata: MetadataExtractor::new(),
            responses: ResponseAssembler::new(),
        }
    }

    pub fn translator(&self) -> &SchemaTranslator {
        &self.translator
    }

    pub fn build(&self, root: &FieldSchema) -> OpenApiResult<Paths> {
        let metadata = self.metadata.extract(root)?;
        tracing::debug!("Building {} {}", metadata.method, metadata.path);

        if !matches!(root.kind(), FieldKind::Object { .. }) {
            return Err(OpenApiError::InvalidRootSchema(root.kind().name()));
        }

        let request_body_node = root.get_field(REQUEST_BODY_SLOT);
        let request_body = request_body_node
            .map(|node| -> OpenApiResult<RequestBody> {
                let schema = self.translator.translate(node, Some(REQUEST_BODY_SLOT))?;
                let mut content = IndexMap::new();
                content.insert(JSON_MEDIA_TYPE.to_string(), MediaType::new(schema));
                Ok(RequestBody {
                    description: None,
                    content,
                    required: node.is_required().then_some(true),
                    extra: IndexMap::new(),
                })
            })
            .transpose()?;

        let extractor = ParameterExtractor::new(&self.translator);
        let mut parameters = Vec::new();
        for (slot, location) in PARAMETER_SLOTS {
            if let Some(node) = root.get_field(slot) {
                parameters.extend(extractor.extract(location, node)?);
            }
        }

        let responses = self
            .responses
            .assemble(request_body_node, metadata.response_overrides.as_ref());

        let security = metadata
            .security
            .map(|scheme| {
                let mut requirement = SecurityRequirement::new();
                requirement.insert(scheme, Vec::new());
                vec![requirement]
            })
            .unwrap_or_default();

        let operation = Operation {
            tags: metadata.tags,
            summary: Some(metadata.summary),
            description: Some(metadata.description),
            operation_id: metadata.operation_id,
            parameters,
            request_body,
            responses,
            security,
            deprecated: metadata.deprecated,
            ..Default::default()
        };

        let mut item = PathItem::default();
        item.set_operation(metadata.method, operation);

        let mut paths = Paths::new();
        paths.insert(metadata.path, item);
        Ok(paths)
    }
}
