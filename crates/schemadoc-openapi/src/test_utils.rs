#[cfg(test)]
pub mod test_utils {
    use crate::config::OpenApiConfig;
    use crate::specification::*;
    use schemadoc_validation::{FieldSchema, Meta};

    /// Create a test OpenAPI specification
    #[allow(dead_code)]
    pub fn create_test_spec() -> OpenApiSpec {
        let mut spec = OpenApiSpec::new("Test API", "1.0.0");

        spec.info.description = Some("A test API for OpenAPI generation".to_string());

        spec.servers.push(Server {
            url: "http://localhost:3000".to_string(),
            description: Some("Development server".to_string()),
        });

        spec.tags.push(Tag {
            name: "Users".to_string(),
            description: Some("User management operations".to_string()),
            external_docs: None,
        });

        let mut item = PathItem::default();
        item.set_operation(
            HttpMethod::Get,
            Operation {
                tags: vec!["Users".to_string()],
                summary: Some("List users".to_string()),
                responses: {
                    let mut responses = Responses::new();
                    responses.insert("200".to_string(), Response::new("success"));
                    responses
                },
                ..Default::default()
            },
        );
        spec.paths.insert("/users".to_string(), item);

        spec
    }

    /// Configuration with one server and a bearer scheme
    #[allow(dead_code)]
    pub fn create_test_config() -> OpenApiConfig {
        OpenApiConfig::new("Test API", "1.0.0")
            .add_server("http://localhost:3000", Some("Development server"))
            .add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http {
                    scheme: "bearer".to_string(),
                    bearer_format: Some("JWT".to_string()),
                },
            )
    }

    /// Operation schema with only a metadata bag
    #[allow(dead_code)]
    pub fn empty_root(meta: Meta) -> FieldSchema {
        FieldSchema::object(Vec::<(String, FieldSchema)>::new()).meta(meta)
    }

    /// `PUT /users/{id}` with a body, one parameter per location
    #[allow(dead_code)]
    pub fn create_user_update_schema() -> FieldSchema {
        FieldSchema::object([
            (
                "requestBody",
                FieldSchema::object([
                    ("name", FieldSchema::string().required().min_length(2).example("Ada")),
                    ("email", FieldSchema::string().email().format("email")),
                    ("birthday", FieldSchema::date()),
                ])
                .required(),
            ),
            ("query", FieldSchema::object([("notify", FieldSchema::boolean())])),
            (
                "params",
                FieldSchema::object([(
                    "id",
                    FieldSchema::string().required().description("User identifier"),
                )]),
            ),
            (
                "headers",
                FieldSchema::object([("authorization", FieldSchema::string().required())]),
            ),
        ])
        .meta(Meta::new().path("/users/{id}").method("put").summary("Update a user"))
    }
}
