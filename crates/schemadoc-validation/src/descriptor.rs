//! Serializable description of a field schema tree.
//!
//! Descriptors let schemas live in YAML or JSON files:
//!
//! ```yaml
//! type: object
//! meta: { path: /users, method: post }
//! fields:
//!   requestBody:
//!     type: object
//!     fields:
//!       name: { type: string, required: true, minLength: 2 }
//! ```

use crate::error::SchemaBuildError;
use crate::meta::Meta;
use crate::schema::{ArrayItem, FieldKind, FieldSchema, Presence};
use crate::validators::{LengthValidator, NumericValidator, PatternValidator};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescriptor {
    /// Kind name: `string`, `number`, `boolean`, `date`, `array` or `object`
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    /// Children of an object
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub fields: IndexMap<String, SchemaDescriptor>,

    /// Element schema of an array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaDescriptor>>,

    /// Enumerated alternatives of an array
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<DescriptorItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default)]
    pub integer: bool,

    #[serde(default)]
    pub email: bool,
}

/// Whitelist entry: a nested descriptor, or any other value taken literally
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptorItem {
    Schema(SchemaDescriptor),
    Literal(Value),
}

impl SchemaDescriptor {
    /// Build the schema, naming `path` in construction errors
    pub fn into_field_schema(self, path: &str) -> Result<FieldSchema, SchemaBuildError> {
        let kind = match self.kind.as_str() {
            "string" => FieldKind::String,
            "number" => FieldKind::Number,
            "boolean" => FieldKind::Boolean,
            "date" => FieldKind::Date,
            "array" => {
                let inner = self
                    .items
                    .map(|items| items.into_field_schema(&format!("{}[]", path)))
                    .transpose()?
                    .map(Box::new);
                let whitelist = self
                    .one_of
                    .into_iter()
                    .map(|item| match item {
                        DescriptorItem::Schema(d) => d.into_field_schema(path).map(ArrayItem::Schema),
                        DescriptorItem::Literal(v) => Ok(ArrayItem::Literal(v)),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                FieldKind::Array { whitelist, inner }
            }
            "object" => {
                let fields = self
                    .fields
                    .into_iter()
                    .map(|(name, child)| {
                        let child = child.into_field_schema(&name)?;
                        Ok((name, child))
                    })
                    .collect::<Result<IndexMap<_, _>, SchemaBuildError>>()?;
                FieldKind::Object { fields }
            }
            other => return Err(SchemaBuildError::UnsupportedFieldType(other.to_string())),
        };

        let is_numeric = matches!(kind, FieldKind::Number);
        let presence = if self.required {
            Presence::Required
        } else {
            Presence::Optional
        };
        let mut schema = FieldSchema::new(kind).presence(presence);

        if let Some(meta) = self.meta {
            schema = schema.meta(meta);
        }

        if self.min.is_some() || self.max.is_some() {
            if is_numeric {
                let mut numeric = NumericValidator::new();
                numeric.min = self.min;
                numeric.max = self.max;
                schema = schema.rule(numeric);
            } else {
                let mut length = LengthValidator::new();
                length.min = length_bound(self.min, "min", path)?;
                length.max = length_bound(self.max, "max", path)?;
                schema = schema.rule(length);
            }
        }
        if self.integer {
            schema = schema.integer();
        }
        if self.min_length.is_some() || self.max_length.is_some() {
            let mut length = LengthValidator::new();
            length.min = self.min_length;
            length.max = self.max_length;
            schema = schema.rule(length);
        }
        if let Some(pattern) = self.pattern {
            let validator = PatternValidator::new(&pattern).map_err(|source| {
                SchemaBuildError::InvalidPattern {
                    field: path.to_string(),
                    source,
                }
            })?;
            schema = schema.rule(validator);
        }
        if self.email {
            schema = schema.email();
        }

        Ok(schema)
    }
}

/// `min`/`max` of a string or array counts characters or items
fn length_bound(
    bound: Option<f64>,
    name: &'static str,
    path: &str,
) -> Result<Option<usize>, SchemaBuildError> {
    bound
        .map(|value| {
            if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
                Ok(value as usize)
            } else {
                Err(SchemaBuildError::InvalidBound {
                    field: path.to_string(),
                    bound: name,
                    value,
                })
            }
        })
        .transpose()
}

impl TryFrom<SchemaDescriptor> for FieldSchema {
    type Error = SchemaBuildError;

    fn try_from(descriptor: SchemaDescriptor) -> Result<Self, Self::Error> {
        descriptor.into_field_schema(crate::schema::ROOT_LABEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValidateOptions;
    use serde_json::json;

    fn parse(yaml: &str) -> Result<FieldSchema, SchemaBuildError> {
        let descriptor: SchemaDescriptor = serde_yaml::from_str(yaml).unwrap();
        FieldSchema::try_from(descriptor)
    }

    #[test]
    fn test_object_descriptor_keeps_field_order() {
        let schema = parse(
            r#"
type: object
fields:
  zeta: { type: string, required: true }
  alpha: { type: number, min: 1 }
"#,
        )
        .unwrap();

        let names: Vec<&String> = schema.fields().unwrap().keys().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert!(schema.get_field("zeta").unwrap().is_required());
        assert!(schema
            .validate(&json!({ "zeta": "z", "alpha": 0 }), ValidateOptions::strict())
            .is_err());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = parse("type: object\nfields:\n  big: { type: bigint }\n").unwrap_err();
        assert!(matches!(err, SchemaBuildError::UnsupportedFieldType(kind) if kind == "bigint"));
    }

    #[test]
    fn test_array_whitelist_mixes_schemas_and_literals() {
        let schema = parse(
            r#"
type: array
oneOf:
  - { type: string }
  - 7
  - { label: literal-object }
"#,
        )
        .unwrap();

        let whitelist = schema.whitelist();
        assert_eq!(whitelist.len(), 3);
        assert!(matches!(whitelist[0], ArrayItem::Schema(_)));
        assert!(matches!(&whitelist[1], ArrayItem::Literal(v) if *v == json!(7)));
        assert!(matches!(&whitelist[2], ArrayItem::Literal(v) if v["label"] == "literal-object"));
    }

    #[test]
    fn test_string_constraints() {
        let schema = parse("type: string\nminLength: 2\npattern: '[a-z]+'\n").unwrap();

        assert!(schema.validate(&json!("ab"), ValidateOptions::strict()).is_ok());
        assert!(schema.validate(&json!("a"), ValidateOptions::strict()).is_err());
        assert!(schema.validate(&json!("AB"), ValidateOptions::strict()).is_err());
    }

    #[test]
    fn test_length_bounds_must_be_whole_counts() {
        let err = parse("type: object\nfields:\n  tags: { type: array, min: -1 }\n").unwrap_err();
        assert!(matches!(
            err,
            SchemaBuildError::InvalidBound { ref field, bound: "min", value } if field == "tags" && value == -1.0
        ));

        let err = parse("type: string\nmax: 2.5\n").unwrap_err();
        assert!(matches!(err, SchemaBuildError::InvalidBound { bound: "max", .. }));

        let schema = parse("type: string\nmin: 2\nmax: 3\n").unwrap();
        assert!(schema.validate(&json!("abc"), ValidateOptions::strict()).is_ok());
        assert!(schema.validate(&json!("abcd"), ValidateOptions::strict()).is_err());

        let schema = parse("type: number\nmin: -1.5\n").unwrap();
        assert!(schema.validate(&json!(-1), ValidateOptions::strict()).is_ok());
    }

    #[test]
    fn test_invalid_pattern_names_field() {
        let err = parse("type: object\nfields:\n  code: { type: string, pattern: '(' }\n").unwrap_err();
        assert!(matches!(err, SchemaBuildError::InvalidPattern { ref field, .. } if field == "code"));
    }
}
