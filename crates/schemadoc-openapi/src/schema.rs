/*!
Translation of validation field schemas into OpenAPI schema objects.

The translator is a recursive fold over a [`FieldSchema`] tree. It holds only
immutable configuration, so one instance can be shared across threads and
reused for any number of trees.
*/

use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::{OpenApiError, OpenApiResult};
use crate::example::ExampleVerifier;
use crate::specification::{ItemEntry, Items, Schema};
use indexmap::IndexMap;
use schemadoc_validation::{ArrayItem, FieldKind, FieldSchema};

/// Maps one validation node to one OpenAPI schema
#[derive(Debug, Clone)]
pub struct SchemaTranslator {
    max_depth: usize,
    verifier: ExampleVerifier,
}

impl Default for SchemaTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl SchemaTranslator {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            verifier: ExampleVerifier::new(),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn verifier(&self) -> &ExampleVerifier {
        &self.verifier
    }

    /// Translate `node`; `name` labels the field in example diagnostics
    pub fn translate(&self, node: &FieldSchema, name: Option<&str>) -> OpenApiResult<Schema> {
        self.translate_at(node, name, 0)
    }

    fn translate_at(
        &self,
        node: &FieldSchema,
        name: Option<&str>,
        depth: usize,
    ) -> OpenApiResult<Schema> {
        if depth > self.max_depth {
            return Err(OpenApiError::MaxDepthExceeded {
                limit: self.max_depth,
            });
        }

        let format = node.get_meta().and_then(|meta| meta.format.clone());
        let mut schema = match node.kind() {
            FieldKind::String => Schema {
                format,
                ..Schema::typed("string")
            },
            FieldKind::Number => Schema::typed("number"),
            FieldKind::Boolean => Schema::typed("boolean"),
            FieldKind::Date => Schema::typed("string").with_format("date-time"),
            FieldKind::Object { fields } => self.translate_object(fields, depth)?,
            FieldKind::Array { whitelist, inner } => Schema {
                items: self.translate_items(whitelist, inner.as_deref(), depth)?,
                ..Schema::typed("array")
            },
        };

        if let Some(example) = node.get_meta().and_then(|meta| meta.example.as_ref()) {
            self.verifier.verify(node, example, name)?;
            schema.example = Some(example.clone());
        }

        Ok(schema)
    }

    fn translate_object(
        &self,
        fields: &IndexMap<String, FieldSchema>,
        depth: usize,
    ) -> OpenApiResult<Schema> {
        let mut properties = IndexMap::with_capacity(fields.len());
        let mut required = Vec::new();

        for (field_name, child) in fields {
            if child.is_required() {
                required.push(field_name.clone());
            }
            let translated = self.translate_at(child, Some(field_name), depth + 1)?;
            properties.insert(field_name.clone(), translated);
        }

        Ok(Schema {
            properties: Some(properties),
            required,
            ..Schema::typed("object")
        })
    }

    fn translate_items(
        &self,
        whitelist: &[ArrayItem],
        inner: Option<&FieldSchema>,
        depth: usize,
    ) -> OpenApiResult<Option<Items>> {
        if !whitelist.is_empty() {
            let entries = whitelist
                .iter()
                .map(|alternative| match alternative {
                    ArrayItem::Schema(node) => self
                        .translate_at(node, None, depth + 1)
                        .map(ItemEntry::Schema),
                    ArrayItem::Literal(value) => Ok(ItemEntry::Literal(value.clone())),
                })
                .collect::<OpenApiResult<Vec<_>>>()?;
            return Ok(Some(Items::Alternatives(entries)));
        }

        match inner {
            Some(node) => {
                let schema = self.translate_at(node, None, depth + 1)?;
                Ok(Some(Items::Single(Box::new(schema))))
            }
            None => Ok(None),
        }
    }
}
