use crate::error::{OpenApiError, OpenApiResult};
use crate::schema::SchemaTranslator;
use crate::specification::{Parameter, ParameterLocation};
use indexmap::IndexMap;
use schemadoc_validation::{FieldKind, FieldSchema};

/// Turns the children of a composite object node into parameter objects
#[derive(Debug, Clone, Copy)]
pub struct ParameterExtractor<'a> {
    translator: &'a SchemaTranslator,
}

impl<'a> ParameterExtractor<'a> {
    pub fn new(translator: &'a SchemaTranslator) -> Self {
        Self { translator }
    }

    /// One parameter per child of `composite`, in declaration order
    pub fn extract(
        &self,
        location: ParameterLocation,
        composite: &FieldSchema,
    ) -> OpenApiResult<Vec<Parameter>> {
        let FieldKind::Object { fields } = composite.kind() else {
            return Err(OpenApiError::InvalidParameterContainer {
                location: location.as_str(),
                kind: composite.kind().name(),
            });
        };

        fields
            .iter()
            .map(|(name, child)| {
                Ok(Parameter {
                    name: name.clone(),
                    location,
                    description: child.get_meta().and_then(|meta| meta.description.clone()),
                    required: child.is_required(),
                    schema: Some(self.translator.translate(child, Some(name))?),
                    extra: IndexMap::new(),
                })
            })
            .collect()
    }
}
