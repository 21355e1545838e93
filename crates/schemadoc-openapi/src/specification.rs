use crate::error::{OpenApiError, OpenApiResult};
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub const OPENAPI_VERSION: &str = "3.1.0";

/// Mapping from URL path to the operations defined on it
pub type Paths = IndexMap<String, PathItem>;

/// Responses keyed by status code (`"200"`, `"default"`)
pub type Responses = IndexMap<String, Response>;

/// Security requirement
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Complete OpenAPI document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiSpec {
    pub openapi: String,

    pub info: ApiInfo,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub servers: Vec<Server>,

    #[serde(default)]
    pub paths: Paths,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub components: Option<Components>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub security: Vec<SecurityRequirement>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<Tag>,

    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none", default)]
    pub external_docs: Option<ExternalDocumentation>,

    /// Members not modelled above, kept verbatim
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// API metadata information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    #[serde(rename = "termsOfService", skip_serializing_if = "Option::is_none", default)]
    pub terms_of_service: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub contact: Option<Contact>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub license: Option<License>,

    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// HTTP methods an operation can be declared for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = OpenApiError;

    fn from_str(s: &str) -> OpenApiResult<Self> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| OpenApiError::UnsupportedMethod(s.to_string()))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path item containing operations for a specific path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub get: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub put: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub post: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub delete: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub options: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub head: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub patch: Option<Operation>,

    /// Common parameters for all operations on this path
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<Parameter>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl PathItem {
    fn slot(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Options => &mut self.options,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Patch => &mut self.patch,
        }
    }

    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
        }
    }

    /// Store an operation, returning the one it replaced
    pub fn set_operation(&mut self, method: HttpMethod, operation: Operation) -> Option<Operation> {
        self.slot(method).replace(operation)
    }

    /// Take an operation out of the item
    pub fn take_operation(&mut self, method: HttpMethod) -> Option<Operation> {
        self.slot(method).take()
    }

    /// Declared operations in method order
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(|method| self.operation(method).map(|op| (method, op)))
    }
}

/// HTTP operation (GET, POST, etc.)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Operation {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none", default)]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<Parameter>,

    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none", default)]
    pub request_body: Option<RequestBody>,

    #[serde(default)]
    pub responses: Responses,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub security: Vec<SecurityRequirement>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub deprecated: Option<bool>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Where a parameter is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Path => "path",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub schema: Option<Schema>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    /// Media type content
    pub content: IndexMap<String, MediaType>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub required: Option<bool>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Response specification.
///
/// Members this model does not name (`headers`, `links`, extensions) are
/// kept verbatim so caller-declared responses round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,

    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub content: IndexMap<String, MediaType>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Response {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            content: IndexMap::new(),
            extra: IndexMap::new(),
        }
    }

    /// Attach a schema under a media type
    pub fn with_content(mut self, media_type: impl Into<String>, schema: Schema) -> Self {
        self.content.insert(media_type.into(), MediaType::new(schema));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub schema: Option<Schema>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub example: Option<serde_json::Value>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl MediaType {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Some(schema),
            example: None,
            extra: IndexMap::new(),
        }
    }
}

/// Schema for data types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub schema_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    /// Properties for object types
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub properties: Option<IndexMap<String, Schema>>,

    /// Required properties, in declaration order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub required: Vec<String>,

    /// Items for array types
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub items: Option<Items>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub example: Option<serde_json::Value>,

    /// Members not modelled above, kept verbatim
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Schema {
    /// Schema with only `type` set
    pub fn typed(schema_type: &str) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_example(mut self, example: serde_json::Value) -> Self {
        self.example = Some(example);
        self
    }
}

/// Array element description
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Items {
    /// Every element matches one schema
    Single(Box<Schema>),
    /// Elements match one of an ordered list of alternatives
    Alternatives(Vec<ItemEntry>),
}

impl Items {
    pub fn as_single(&self) -> Option<&Schema> {
        match self {
            Items::Single(schema) => Some(schema),
            Items::Alternatives(_) => None,
        }
    }

    pub fn as_alternatives(&self) -> Option<&[ItemEntry]> {
        match self {
            Items::Single(_) => None,
            Items::Alternatives(entries) => Some(entries),
        }
    }
}

impl<'de> Deserialize<'de> for Items {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Array(entries) => entries
                .into_iter()
                .map(ItemEntry::from_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Items::Alternatives)
                .map_err(D::Error::custom),
            single => serde_json::from_value(single)
                .map(|schema| Items::Single(Box::new(schema)))
                .map_err(D::Error::custom),
        }
    }
}

/// Keywords that mark a whitelist object as a schema rather than a literal
const SCHEMA_KEYWORDS: [&str; 9] = [
    "type", "$ref", "properties", "items", "enum", "const", "oneOf", "anyOf", "allOf",
];

/// One alternative of an array whitelist: a translated schema or a literal value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemEntry {
    Schema(Schema),
    Literal(serde_json::Value),
}

impl ItemEntry {
    /// Objects carrying a schema keyword are schemas, every other value is a literal
    fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let is_schema = value
            .as_object()
            .is_some_and(|object| SCHEMA_KEYWORDS.iter().any(|keyword| object.contains_key(*keyword)));
        if is_schema {
            serde_json::from_value(value).map(ItemEntry::Schema)
        } else {
            Ok(ItemEntry::Literal(value))
        }
    }
}

impl<'de> Deserialize<'de> for ItemEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ItemEntry::from_value(serde_json::Value::deserialize(deserializer)?).map_err(D::Error::custom)
    }
}

/// Reusable components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Components {
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub schemas: IndexMap<String, Schema>,

    #[serde(rename = "securitySchemes", skip_serializing_if = "IndexMap::is_empty", default)]
    pub security_schemes: IndexMap<String, SecurityScheme>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityScheme {
    #[serde(rename = "apiKey")]
    ApiKey {
        name: String,
        #[serde(rename = "in")]
        location: String,
    },
    #[serde(rename = "http")]
    Http {
        scheme: String,
        #[serde(rename = "bearerFormat", skip_serializing_if = "Option::is_none", default)]
        bearer_format: Option<String>,
    },
    #[serde(rename = "openIdConnect")]
    OpenIdConnect {
        #[serde(rename = "openIdConnectUrl")]
        open_id_connect_url: String,
    },
}

/// Tag for grouping operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none", default)]
    pub external_docs: Option<ExternalDocumentation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDocumentation {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

impl OpenApiSpec {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            openapi: OPENAPI_VERSION.to_string(),
            info: ApiInfo {
                title: title.to_string(),
                description: None,
                terms_of_service: None,
                contact: None,
                license: None,
                version: version.to_string(),
            },
            servers: Vec::new(),
            paths: Paths::new(),
            components: None,
            security: Vec::new(),
            tags: Vec::new(),
            external_docs: None,
            extra: IndexMap::new(),
        }
    }

    pub fn components_mut(&mut self) -> &mut Components {
        self.components.get_or_insert_with(Components::default)
    }
}
