//! # schemadoc-validation
//!
//! Typed validation schemas for request data. A [`FieldSchema`] is a tree of
//! field nodes (`string`, `number`, `boolean`, `date`, `array`, `object`),
//! each with a presence, an optional metadata bag and extra rules. Schemas
//! validate `serde_json::Value`s synchronously, optionally in strict mode,
//! and report violations in declaration order.
//!
//! ```
//! use schemadoc_validation::{FieldSchema, ValidateOptions};
//! use serde_json::json;
//!
//! let body = FieldSchema::object([
//!     ("name", FieldSchema::string().required()),
//!     ("age", FieldSchema::number().min(0.0)),
//! ]);
//!
//! let errors = body
//!     .validate(&json!({}), ValidateOptions::strict().with_abort_early(false))
//!     .unwrap_err();
//! assert_eq!(errors.messages(), vec!["name is a required field"]);
//! ```

pub mod descriptor;
pub mod error;
pub mod meta;
pub mod schema;
pub mod traits;
pub mod validators;

pub use descriptor::{DescriptorItem, SchemaDescriptor};
pub use error::{SchemaBuildError, ValidationError, ValidationErrors, ValidationResult};
pub use meta::Meta;
pub use schema::{ArrayItem, FieldKind, FieldSchema, Presence, ValidateOptions, ROOT_LABEL};
pub use traits::{ToValidationValue, ValidationRule};

pub use validators::{
    CustomValidator, EmailValidator, LengthValidator, NumericValidator, PatternValidator,
    RequiredValidator,
};
