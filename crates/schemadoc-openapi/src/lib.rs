/*!
# schemadoc-openapi

OpenAPI 3.1 documentation generated from request validation schemas.

An operation is described once, as a `schemadoc-validation` tree, and this
crate turns that tree into the matching OpenAPI fragment. Examples declared
on fields are replayed through the field's own rules first, so published
examples never contradict the validation they document.

## Features

- Recursive translation of field schemas into OpenAPI schema objects
- Query, path and header parameters from named slots of an operation schema
- Baseline `200`/`403`/`default` responses, with the `403` example listing
  the violations an empty request body produces
- A document accumulator merging fragments, component schemas and tags
- JSON and YAML export

## Usage

```rust
use schemadoc_openapi::{PathEntryBuilder, specification::HttpMethod};
use schemadoc_validation::{FieldSchema, Meta};

let root = FieldSchema::object([
    ("requestBody", FieldSchema::object([
        ("name", FieldSchema::string().required().example("Ada")),
    ])),
    ("params", FieldSchema::object([
        ("id", FieldSchema::string().required()),
    ])),
])
.meta(Meta::new().path("/users/{id}").method("put"));

let paths = PathEntryBuilder::default().build(&root).unwrap();
let operation = paths["/users/{id}"].operation(HttpMethod::Put).unwrap();
assert_eq!(operation.summary.as_deref(), Some("No summary"));
```
*/

pub use crate::{
    builder::PathEntryBuilder,
    config::OpenApiConfig,
    document::DocumentAccumulator,
    error::{OpenApiError, OpenApiResult},
    example::ExampleVerifier,
    export::OpenApiExporter,
    metadata::{MetadataExtractor, OperationMetadata},
    parameters::ParameterExtractor,
    responses::ResponseAssembler,
    schema::SchemaTranslator,
    specification::OpenApiSpec,
};

// Core modules
pub mod config;
pub mod error;
pub mod specification;

// Translation
pub mod builder;
pub mod example;
pub mod metadata;
pub mod parameters;
pub mod responses;
pub mod schema;

// Document handling
pub mod document;
pub mod export;

// Test utilities
#[cfg(test)]
mod test_utils;
