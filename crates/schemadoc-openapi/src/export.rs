/*!
Serialization of OpenAPI documents to JSON and YAML.
*/

use crate::config::{ExportConfig, ExportFormat};
use crate::error::{OpenApiError, OpenApiResult};
use crate::specification::OpenApiSpec;
use std::path::Path;

/// Export service for OpenAPI documents
pub struct OpenApiExporter;

impl OpenApiExporter {
    pub fn to_json(spec: &OpenApiSpec, pretty: bool) -> OpenApiResult<String> {
        if pretty {
            serde_json::to_string_pretty(spec).map_err(OpenApiError::from)
        } else {
            serde_json::to_string(spec).map_err(OpenApiError::from)
        }
    }

    pub fn to_yaml(spec: &OpenApiSpec) -> OpenApiResult<String> {
        serde_yaml::to_string(spec).map_err(OpenApiError::from)
    }

    /// Render in the configured format
    pub fn render(spec: &OpenApiSpec, config: &ExportConfig) -> OpenApiResult<String> {
        match config.format {
            ExportFormat::Json => Self::to_json(spec, config.pretty_print),
            ExportFormat::Yaml => Self::to_yaml(spec),
        }
    }

    /// Write the rendered document, creating missing parent directories
    pub fn write(spec: &OpenApiSpec, path: &Path, config: &ExportConfig) -> OpenApiResult<()> {
        let rendered = Self::render(spec, config)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, rendered)?;

        tracing::info!("Wrote OpenAPI document to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::create_test_spec;

    #[test]
    fn test_json_and_yaml_render_same_document() {
        let spec = create_test_spec();

        let json = OpenApiExporter::to_json(&spec, false).unwrap();
        let from_json: OpenApiSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(from_json, spec);

        let yaml = OpenApiExporter::to_yaml(&spec).unwrap();
        assert!(yaml.contains("3.1.0"));
        let from_yaml: OpenApiSpec = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(from_yaml, spec);
    }

    #[test]
    fn test_pretty_json_is_multiline() {
        let spec = create_test_spec();
        assert!(OpenApiExporter::to_json(&spec, true).unwrap().contains('\n'));
        assert!(!OpenApiExporter::to_json(&spec, false).unwrap().contains('\n'));
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("docs").join("openapi.yaml");
        let config = ExportConfig {
            format: ExportFormat::Yaml,
            pretty_print: true,
        };

        OpenApiExporter::write(&create_test_spec(), &target, &config).unwrap();
        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.contains("title: Test API"));
    }
}
