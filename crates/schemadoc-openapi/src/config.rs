use crate::error::{OpenApiError, OpenApiResult};
use crate::specification::{ApiInfo, License, SecurityScheme, Server, Tag};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Nesting limit applied when no configuration says otherwise
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for OpenAPI document generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenApiConfig {
    /// API information
    pub info: ApiInfo,

    pub servers: Vec<Server>,

    /// Security schemes published under `components.securitySchemes`
    pub security_schemes: IndexMap<String, SecurityScheme>,

    /// Global tags for grouping operations
    pub tags: Vec<Tag>,

    pub translator: TranslatorConfig,

    pub export: ExportConfig,
}

/// Limits applied while walking schema trees
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Deepest nesting accepted before failing with `MaxDepthExceeded`
    pub max_depth: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,

    /// Pretty print JSON output
    pub pretty_print: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Json,
            pretty_print: true,
        }
    }
}

/// Available export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            info: ApiInfo {
                title: "API Documentation".to_string(),
                description: Some("Generated from request validation schemas".to_string()),
                terms_of_service: None,
                contact: None,
                license: Some(License {
                    name: "MIT".to_string(),
                    url: Some("https://opensource.org/licenses/MIT".to_string()),
                }),
                version: "1.0.0".to_string(),
            },
            servers: Vec::new(),
            security_schemes: IndexMap::new(),
            tags: Vec::new(),
            translator: TranslatorConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl OpenApiConfig {
    /// Create a new configuration with custom API info
    pub fn new(title: &str, version: &str) -> Self {
        let mut config = Self::default();
        config.info.title = title.to_string();
        config.info.version = version.to_string();
        config
    }

    /// Load configuration from a `.json`, `.yaml`/`.yml` or `.toml` file
    pub fn from_file(path: impl AsRef<Path>) -> OpenApiResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&contents)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)?,
            Some("toml") => toml::from_str(&contents)?,
            other => {
                return Err(OpenApiError::config_error(format!(
                    "unsupported configuration file extension: {}",
                    other.unwrap_or("<none>")
                )))
            }
        };

        tracing::debug!("Loaded OpenAPI configuration from {}", path.display());
        Ok(config)
    }

    /// Add a server configuration
    pub fn add_server(mut self, url: &str, description: Option<&str>) -> Self {
        self.servers.push(Server {
            url: url.to_string(),
            description: description.map(|s| s.to_string()),
        });
        self
    }

    /// Add a security scheme
    pub fn add_security_scheme(mut self, name: &str, scheme: SecurityScheme) -> Self {
        self.security_schemes.insert(name.to_string(), scheme);
        self
    }

    /// Add a tag
    pub fn add_tag(mut self, name: &str, description: Option<&str>) -> Self {
        self.tags.push(Tag {
            name: name.to_string(),
            description: description.map(|s| s.to_string()),
            external_docs: None,
        });
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.translator.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builder_methods() {
        let config = OpenApiConfig::new("Shop API", "2.1.0")
            .add_server("https://api.example.com", Some("Production"))
            .add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http {
                    scheme: "bearer".to_string(),
                    bearer_format: Some("JWT".to_string()),
                },
            )
            .add_tag("Orders", Some("Order management"))
            .with_max_depth(8);

        assert_eq!(config.info.title, "Shop API");
        assert_eq!(config.info.version, "2.1.0");
        assert_eq!(config.servers.len(), 1);
        assert!(config.security_schemes.contains_key("bearerAuth"));
        assert_eq!(config.tags[0].name, "Orders");
        assert_eq!(config.translator.max_depth, 8);
    }

    #[test]
    fn test_from_toml_file_fills_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[info]
title = "Inventory"
version = "0.3.0"

[translator]
max_depth = 12
"#
        )
        .unwrap();

        let config = OpenApiConfig::from_file(file.path()).unwrap();
        assert_eq!(config.info.title, "Inventory");
        assert_eq!(config.translator.max_depth, 12);
        assert_eq!(config.export.format, ExportFormat::Json);
        assert!(config.export.pretty_print);
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "info:\n  title: Billing\n  version: 1.0.0\nexport:\n  format: yaml\n  pretty_print: false"
        )
        .unwrap();

        let config = OpenApiConfig::from_file(file.path()).unwrap();
        assert_eq!(config.export.format, ExportFormat::Yaml);
        assert!(!config.export.pretty_print);
        assert_eq!(config.translator.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(matches!(
            OpenApiConfig::from_file(file.path()),
            Err(OpenApiError::Config(_))
        ));
    }
}
