/*!
The growing OpenAPI document that translated fragments are merged into.

[`DocumentAccumulator`] owns the document across calls. Fragments for
distinct `(path, method)` pairs never clobber each other; adding the same
pair twice keeps the later operation.

```rust,no_run
use schemadoc_openapi::{DocumentAccumulator, OpenApiConfig};

let mut docs = DocumentAccumulator::new(OpenApiConfig::new("Shop API", "1.0.0"));
docs.load_operation_file("schemas/orders.yaml")?;
docs.persist("target/openapi.json")?;
# Ok::<(), schemadoc_openapi::OpenApiError>(())
```
*/

use crate::builder::PathEntryBuilder;
use crate::config::OpenApiConfig;
use crate::error::{OpenApiError, OpenApiResult};
use crate::export::OpenApiExporter;
use crate::specification::{Components, HttpMethod, OpenApiSpec, Paths, Schema, Tag};
use indexmap::IndexMap;
use schemadoc_validation::{FieldSchema, SchemaDescriptor, ValidateOptions};
use serde::Deserialize;
use serde_json::json;
use std::path::Path;

/// Paths and component schemas read from a fragment file
#[derive(Debug, Default, Deserialize)]
pub struct DocumentFragment {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
}

/// Owner of the merged OpenAPI document
#[derive(Debug)]
pub struct DocumentAccumulator {
    config: OpenApiConfig,
    builder: PathEntryBuilder,
    spec: OpenApiSpec,
}

impl DocumentAccumulator {
    /// Start an empty document described by `config`
    pub fn new(config: OpenApiConfig) -> Self {
        let mut spec = OpenApiSpec::new(&config.info.title, &config.info.version);
        spec.info = config.info.clone();
        spec.servers = config.servers.clone();
        spec.tags = config.tags.clone();
        if !config.security_schemes.is_empty() {
            spec.components = Some(Components {
                security_schemes: config.security_schemes.clone(),
                ..Default::default()
            });
        }

        Self::with_spec(config, spec)
    }

    /// Start from an existing JSON or YAML OpenAPI document
    pub fn from_base_file(path: impl AsRef<Path>, config: OpenApiConfig) -> OpenApiResult<Self> {
        let path = path.as_ref();
        let spec: OpenApiSpec = read_structured(path)?;
        tracing::info!("Loaded base OpenAPI document from {}", path.display());
        Ok(Self::with_spec(config, spec))
    }

    fn with_spec(config: OpenApiConfig, spec: OpenApiSpec) -> Self {
        Self {
            builder: PathEntryBuilder::new(&config.translator),
            config,
            spec,
        }
    }

    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }

    pub fn config(&self) -> &OpenApiConfig {
        &self.config
    }

    /// Translate an operation schema and merge the result
    pub fn add_operation(&mut self, root: &FieldSchema) -> OpenApiResult<()> {
        let paths = self.builder.build(root)?;
        self.add_paths(paths);
        Ok(())
    }

    /// Merge a paths fragment, one operation at a time
    pub fn add_paths(&mut self, paths: Paths) {
        for (path, mut item) in paths {
            let target = self.spec.paths.entry(path.clone()).or_default();

            for method in HttpMethod::ALL {
                if let Some(operation) = item.take_operation(method) {
                    if target.set_operation(method, operation).is_some() {
                        tracing::warn!("Replacing existing operation {} {}", method, path);
                    }
                }
            }

            if item.summary.is_some() {
                target.summary = item.summary;
            }
            if item.description.is_some() {
                target.description = item.description;
            }
            if !item.parameters.is_empty() {
                target.parameters = item.parameters;
            }
        }
    }

    /// Register a schema under `components.schemas`
    pub fn add_schema(&mut self, name: &str, schema: Schema) {
        let schemas = &mut self.spec.components_mut().schemas;
        if schemas.insert(name.to_string(), schema).is_some() {
            tracing::warn!("Replacing component schema {}", name);
        }
    }

    /// Translate a field schema and register it under `components.schemas`
    pub fn add_field_schema(&mut self, name: &str, node: &FieldSchema) -> OpenApiResult<()> {
        let schema = self.builder.translator().translate(node, Some(name))?;
        self.add_schema(name, schema);
        Ok(())
    }

    /// Add a document-level tag, replacing a tag of the same name
    pub fn add_tag(&mut self, name: &str, description: &str) -> OpenApiResult<()> {
        let tag_schema = FieldSchema::object([
            ("name", FieldSchema::string().required().non_blank()),
            ("description", FieldSchema::string().required().non_blank()),
        ]);
        tag_schema
            .validate(
                &json!({ "name": name, "description": description }),
                ValidateOptions::strict().with_abort_early(false),
            )
            .map_err(|errors| OpenApiError::InvalidTag(errors.messages().join("; ")))?;

        let tag = Tag {
            name: name.to_string(),
            description: Some(description.to_string()),
            external_docs: None,
        };
        match self.spec.tags.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => *existing = tag,
            None => self.spec.tags.push(tag),
        }
        Ok(())
    }

    /// Merge a YAML or JSON file with optional `paths` and `schemas` keys
    pub fn load_fragment_file(&mut self, path: impl AsRef<Path>) -> OpenApiResult<()> {
        let path = path.as_ref();
        let fragment: DocumentFragment = read_structured(path)?;
        tracing::debug!(
            "Merging {} paths and {} schemas from {}",
            fragment.paths.len(),
            fragment.schemas.len(),
            path.display()
        );

        for (name, schema) in fragment.schemas {
            self.add_schema(&name, schema);
        }
        self.add_paths(fragment.paths);
        Ok(())
    }

    /// Translate every operation schema listed in a YAML or JSON file.
    ///
    /// All operations are built before any is merged, so a failing entry
    /// leaves the document untouched.
    pub fn load_operation_file(&mut self, path: impl AsRef<Path>) -> OpenApiResult<usize> {
        let path = path.as_ref();
        let descriptors: Vec<SchemaDescriptor> = read_structured(path)?;

        let fragments = descriptors
            .into_iter()
            .map(|descriptor| -> OpenApiResult<Paths> {
                let root = FieldSchema::try_from(descriptor)?;
                self.builder.build(&root)
            })
            .collect::<OpenApiResult<Vec<Paths>>>()?;

        let count = fragments.len();
        for paths in fragments {
            self.add_paths(paths);
        }
        tracing::info!("Added {} operations from {}", count, path.display());
        Ok(count)
    }

    pub fn to_json(&self, pretty: bool) -> OpenApiResult<String> {
        OpenApiExporter::to_json(&self.spec, pretty)
    }

    pub fn to_yaml(&self) -> OpenApiResult<String> {
        OpenApiExporter::to_yaml(&self.spec)
    }

    /// Write the document in the configured export format
    pub fn persist(&self, path: impl AsRef<Path>) -> OpenApiResult<()> {
        OpenApiExporter::write(&self.spec, path.as_ref(), &self.config.export)
    }
}

fn read_structured<T>(path: &Path) -> OpenApiResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    let contents = std::fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(serde_json::from_str(&contents)?),
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&contents)?),
        _ => Err(OpenApiError::config_error(format!(
            "expected a .json, .yaml or .yml file: {}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::{ItemEntry, Items, Operation, PathItem};
    use crate::test_utils::test_utils::{create_test_config, empty_root};
    use schemadoc_validation::Meta;
    use std::io::Write;

    fn fragment(path: &str, method: HttpMethod, summary: &str) -> Paths {
        let mut item = PathItem::default();
        item.set_operation(
            method,
            Operation {
                summary: Some(summary.to_string()),
                ..Default::default()
            },
        );
        let mut paths = Paths::new();
        paths.insert(path.to_string(), item);
        paths
    }

    #[test]
    fn test_new_document_carries_config() {
        let docs = DocumentAccumulator::new(create_test_config());
        let spec = docs.spec();

        assert_eq!(spec.openapi, "3.1.0");
        assert_eq!(spec.info.title, "Test API");
        assert_eq!(spec.servers.len(), 1);
        assert!(spec
            .components
            .as_ref()
            .unwrap()
            .security_schemes
            .contains_key("bearerAuth"));
    }

    #[test]
    fn test_distinct_methods_on_same_path_are_kept() {
        let mut docs = DocumentAccumulator::new(OpenApiConfig::default());
        docs.add_paths(fragment("/users", HttpMethod::Get, "list"));
        docs.add_paths(fragment("/users", HttpMethod::Post, "create"));

        let item = &docs.spec().paths["/users"];
        assert_eq!(item.get.as_ref().unwrap().summary.as_deref(), Some("list"));
        assert_eq!(item.post.as_ref().unwrap().summary.as_deref(), Some("create"));
    }

    #[test]
    fn test_same_pair_is_last_write_wins() {
        let mut docs = DocumentAccumulator::new(OpenApiConfig::default());
        docs.add_paths(fragment("/users", HttpMethod::Get, "first"));
        docs.add_paths(fragment("/users", HttpMethod::Get, "second"));

        let item = &docs.spec().paths["/users"];
        assert_eq!(item.get.as_ref().unwrap().summary.as_deref(), Some("second"));
        assert_eq!(docs.spec().paths.len(), 1);
    }

    #[test]
    fn test_add_operation_and_field_schema() {
        let mut docs = DocumentAccumulator::new(OpenApiConfig::default());
        docs.add_operation(&empty_root(Meta::new().path("/ping").method("head")))
            .unwrap();
        docs.add_field_schema(
            "User",
            &FieldSchema::object([("name", FieldSchema::string().required())]),
        )
        .unwrap();

        assert!(docs.spec().paths["/ping"].head.is_some());
        let schema = &docs.spec().components.as_ref().unwrap().schemas["User"];
        assert_eq!(schema.required, vec!["name".to_string()]);
    }

    #[test]
    fn test_add_tag_validates_and_replaces() {
        let mut docs = DocumentAccumulator::new(OpenApiConfig::default());
        docs.add_tag("Users", "User endpoints").unwrap();
        docs.add_tag("Users", "Account endpoints").unwrap();

        assert_eq!(docs.spec().tags.len(), 1);
        assert_eq!(
            docs.spec().tags[0].description.as_deref(),
            Some("Account endpoints")
        );

        match docs.add_tag("  ", "") {
            Err(OpenApiError::InvalidTag(message)) => {
                assert!(message.contains("name"));
                assert!(message.contains("description"));
            }
            other => panic!("expected InvalidTag, got {other:?}"),
        }
    }

    #[test]
    fn test_load_fragment_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            r#"
schemas:
  Error:
    type: object
    properties:
      message: {{ type: string }}
paths:
  /status:
    get:
      summary: Service status
      responses:
        "200":
          description: ok
"#
        )
        .unwrap();

        let mut docs = DocumentAccumulator::new(OpenApiConfig::default());
        docs.load_fragment_file(file.path()).unwrap();

        let status = docs.spec().paths["/status"].get.as_ref().unwrap();
        assert_eq!(status.summary.as_deref(), Some("Service status"));
        assert_eq!(status.responses["200"].description, "ok");
        assert!(docs.spec().components.as_ref().unwrap().schemas.contains_key("Error"));
    }

    #[test]
    fn test_operation_file_is_all_or_nothing() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            r#"
- type: object
  meta: {{ path: /a, method: get }}
- type: object
  meta: {{ path: /b, method: get }}
  fields:
    query:
      type: object
      fields:
        limit: {{ type: number, meta: {{ example: lots }} }}
"#
        )
        .unwrap();

        let mut docs = DocumentAccumulator::new(OpenApiConfig::default());
        assert!(matches!(
            docs.load_operation_file(file.path()),
            Err(OpenApiError::InvalidExample { field, .. }) if field == "limit"
        ));
        assert!(docs.spec().paths.is_empty());
    }

    #[test]
    fn test_from_base_file_keeps_existing_paths() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{
                "openapi": "3.1.0",
                "info": {{ "title": "Legacy", "version": "0.9.0" }},
                "paths": {{ "/legacy": {{ "get": {{ "responses": {{}} }} }} }}
            }}"#
        )
        .unwrap();

        let mut docs = DocumentAccumulator::from_base_file(file.path(), OpenApiConfig::default())
            .unwrap();
        docs.add_paths(fragment("/legacy", HttpMethod::Post, "create"));

        assert_eq!(docs.spec().info.title, "Legacy");
        let item = &docs.spec().paths["/legacy"];
        assert!(item.get.is_some());
        assert!(item.post.is_some());
    }

    #[test]
    fn test_base_file_members_survive_persist() {
        let base = json!({
            "openapi": "3.1.0",
            "info": { "title": "Legacy", "version": "0.9.0" },
            "webhooks": { "ping": {} },
            "paths": {
                "/legacy": {
                    "get": {
                        "x-internal": true,
                        "responses": {
                            "200": {
                                "description": "ok",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Role" },
                                        "examples": { "admin": { "value": ["x"] } }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Role": {
                        "type": "array",
                        "items": [{ "label": "x" }, { "type": "string", "minLength": 1 }],
                        "minItems": 1
                    }
                },
                "responses": { "NotFound": { "description": "missing" } }
            }
        });
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", base).unwrap();

        let docs = DocumentAccumulator::from_base_file(file.path(), OpenApiConfig::default())
            .unwrap();
        let role = &docs.spec().components.as_ref().unwrap().schemas["Role"];
        let alternatives = role.items.as_ref().and_then(Items::as_alternatives).unwrap();
        assert_eq!(alternatives[0], ItemEntry::Literal(json!({ "label": "x" })));
        assert!(matches!(&alternatives[1], ItemEntry::Schema(schema) if schema.extra["minLength"] == 1));

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("openapi.json");
        docs.persist(&target).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(written, base);
    }

    #[test]
    fn test_persist_json() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out").join("openapi.json");

        let mut docs = DocumentAccumulator::new(OpenApiConfig::default());
        docs.add_paths(fragment("/users", HttpMethod::Get, "list"));
        docs.persist(&target).unwrap();

        let written: OpenApiSpec =
            serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(&written, docs.spec());
    }
}
