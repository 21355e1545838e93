//! Field schema tree and strict validation.

use crate::error::{ValidationError, ValidationErrors, ValidationResult};
use crate::meta::Meta;
use crate::traits::{ToValidationValue, ValidationRule};
use crate::validators::{
    CustomValidator, EmailValidator, LengthValidator, NumericValidator, PatternValidator,
    RequiredValidator,
};
use chrono::{DateTime, NaiveDate};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Label used for the root value when validation is not given one
pub const ROOT_LABEL: &str = "this";

/// Whether a field must be present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Required,
    #[default]
    Optional,
}

/// One alternative of an array's enumerated whitelist
#[derive(Debug, Clone)]
pub enum ArrayItem {
    Schema(FieldSchema),
    /// Plain value, accepted by equality
    Literal(Value),
}

impl ArrayItem {
    fn accepts(&self, value: &Value, options: ValidateOptions) -> bool {
        match self {
            ArrayItem::Literal(literal) => literal == value,
            ArrayItem::Schema(schema) => {
                let mut scratch = ValidationErrors::new();
                schema.check(value, ROOT_LABEL, None, options.with_abort_early(true), &mut scratch);
                scratch.is_empty()
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            ArrayItem::Literal(Value::String(s)) => s.clone(),
            ArrayItem::Literal(other) => other.to_string(),
            ArrayItem::Schema(schema) => format!("<{}>", schema.kind.name()),
        }
    }
}

impl From<FieldSchema> for ArrayItem {
    fn from(schema: FieldSchema) -> Self {
        ArrayItem::Schema(schema)
    }
}

impl From<Value> for ArrayItem {
    fn from(value: Value) -> Self {
        ArrayItem::Literal(value)
    }
}

/// Closed set of field kinds
#[derive(Debug, Clone)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Date,
    Array {
        /// Enumerated alternatives; takes priority over `inner` when non-empty
        whitelist: Vec<ArrayItem>,
        inner: Option<Box<FieldSchema>>,
    },
    Object {
        fields: IndexMap<String, FieldSchema>,
    },
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::Array { .. } => "array",
            FieldKind::Object { .. } => "object",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options for a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Reject values that would need coercion to match the kind
    pub strict: bool,
    /// Stop at the first violation
    pub abort_early: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            strict: false,
            abort_early: true,
        }
    }
}

impl ValidateOptions {
    /// Strict validation stopping at the first violation
    pub fn strict() -> Self {
        Self {
            strict: true,
            abort_early: true,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = abort_early;
        self
    }
}

/// A node of a validation schema tree.
#[derive(Clone)]
pub struct FieldSchema {
    kind: FieldKind,
    presence: Presence,
    meta: Option<Meta>,
    rules: Vec<Arc<dyn ValidationRule>>,
}

impl fmt::Debug for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule_names: Vec<&str> = self.rules.iter().map(|r| r.rule_name()).collect();
        f.debug_struct("FieldSchema")
            .field("kind", &self.kind)
            .field("presence", &self.presence)
            .field("meta", &self.meta)
            .field("rules", &rule_names)
            .finish()
    }
}

impl FieldSchema {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            presence: Presence::Optional,
            meta: None,
            rules: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }

    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }

    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    pub fn date() -> Self {
        Self::new(FieldKind::Date)
    }

    /// Array of unknown element shape
    pub fn array() -> Self {
        Self::new(FieldKind::Array {
            whitelist: Vec::new(),
            inner: None,
        })
    }

    /// Array whose elements all match `inner`
    pub fn array_of(inner: FieldSchema) -> Self {
        Self::array().of(inner)
    }

    /// Object with fields in declaration order
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldSchema)>,
        K: Into<String>,
    {
        Self::new(FieldKind::Object {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }

    pub fn required(mut self) -> Self {
        self.presence = Presence::Required;
        self
    }

    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    pub fn presence(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    /// Replace the metadata bag
    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    fn meta_mut(&mut self) -> &mut Meta {
        self.meta.get_or_insert_with(Meta::default)
    }

    pub fn example(mut self, example: impl ToValidationValue) -> Self {
        self.meta_mut().example = Some(example.to_validation_value());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.meta_mut().description = Some(description.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.meta_mut().format = Some(format.into());
        self
    }

    /// Attach an extra rule, run after the type check
    pub fn rule<R>(mut self, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    pub fn min_length(self, min: usize) -> Self {
        self.rule(LengthValidator::new().min(min))
    }

    pub fn max_length(self, max: usize) -> Self {
        self.rule(LengthValidator::new().max(max))
    }

    pub fn min(self, min: f64) -> Self {
        self.rule(NumericValidator::new().min(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.rule(NumericValidator::new().max(max))
    }

    pub fn integer(self) -> Self {
        self.rule(NumericValidator::new().integer_only(true))
    }

    pub fn positive(self) -> Self {
        self.rule(NumericValidator::new().positive_only(true))
    }

    pub fn matches(self, pattern: Regex) -> Self {
        self.rule(PatternValidator::from_regex(pattern))
    }

    pub fn email(self) -> Self {
        self.rule(EmailValidator::new())
    }

    /// Reject blank strings and empty collections
    pub fn non_blank(self) -> Self {
        self.rule(RequiredValidator::new())
    }

    /// Attach a predicate; `{path}` in `message` names the failing value
    pub fn test<F>(self, name: impl Into<String>, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.rule(CustomValidator::test(name, message, predicate))
    }

    /// Set the element schema of an array node; ignored for other kinds
    pub fn of(mut self, inner: FieldSchema) -> Self {
        if let FieldKind::Array { inner: slot, .. } = &mut self.kind {
            *slot = Some(Box::new(inner));
        }
        self
    }

    /// Set the enumerated alternatives of an array node; ignored for other kinds
    pub fn one_of<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ArrayItem>,
    {
        if let FieldKind::Array { whitelist, .. } = &mut self.kind {
            *whitelist = items.into_iter().map(Into::into).collect();
        }
        self
    }

    /// Add or replace a field of an object node; ignored for other kinds
    pub fn field(mut self, name: impl Into<String>, schema: FieldSchema) -> Self {
        if let FieldKind::Object { fields } = &mut self.kind {
            fields.insert(name.into(), schema);
        }
        self
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn get_presence(&self) -> Presence {
        self.presence
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    pub fn get_meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub fn rules(&self) -> &[Arc<dyn ValidationRule>] {
        &self.rules
    }

    /// Children of an object node
    pub fn fields(&self) -> Option<&IndexMap<String, FieldSchema>> {
        match &self.kind {
            FieldKind::Object { fields } => Some(fields),
            _ => None,
        }
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields().and_then(|fields| fields.get(name))
    }

    /// Element schema of an array node
    pub fn inner_type(&self) -> Option<&FieldSchema> {
        match &self.kind {
            FieldKind::Array { inner, .. } => inner.as_deref(),
            _ => None,
        }
    }

    /// Enumerated alternatives of an array node (empty for other kinds)
    pub fn whitelist(&self) -> &[ArrayItem] {
        match &self.kind {
            FieldKind::Array { whitelist, .. } => whitelist,
            _ => &[],
        }
    }

    /// Validate a value, naming the root value `this` in messages
    pub fn validate(&self, value: &Value, options: ValidateOptions) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        self.check(value, ROOT_LABEL, None, options, &mut errors);
        into_result(errors)
    }

    /// Validate a value, naming the root value `label` in messages.
    ///
    /// Nested paths are prefixed with the label: `user.address.street` under
    /// `user`, where [`FieldSchema::validate`] reports `address.street`.
    pub fn validate_as(
        &self,
        value: &Value,
        label: &str,
        options: ValidateOptions,
    ) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        self.check(value, label, Some(label), options, &mut errors);
        into_result(errors)
    }

    /// `prefix` is the path children are nested under; `None` at an unlabelled root.
    fn check(
        &self,
        value: &Value,
        path: &str,
        prefix: Option<&str>,
        options: ValidateOptions,
        errors: &mut ValidationErrors,
    ) {
        if value.is_null() {
            if self.is_required() {
                errors.add(ValidationError::with_code(
                    path,
                    format!("{} is a required field", path),
                    "required",
                ));
            }
            return;
        }

        let Some(value) = self.coerce(value, options.strict) else {
            errors.add(
                ValidationError::with_code(
                    path,
                    format!(
                        "{} must be a `{}` type, but the final value was: `{}`.",
                        path, self.kind, value
                    ),
                    "invalid_type",
                )
                .context(serde_json::json!({ "expected": self.kind.name() })),
            );
            return;
        };

        match &self.kind {
            FieldKind::Object { fields } => {
                for (name, child) in fields {
                    let child_path = match prefix {
                        Some(p) => format!("{}.{}", p, name),
                        None => name.clone(),
                    };
                    let child_value = value.get(name).unwrap_or(&Value::Null);
                    child.check(child_value, &child_path, Some(&child_path), options, errors);
                    if options.abort_early && !errors.is_empty() {
                        return;
                    }
                }
            }
            FieldKind::Array { whitelist, inner } => {
                let items = value.as_array().map(Vec::as_slice).unwrap_or_default();
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", prefix.unwrap_or_default(), index);
                    if !whitelist.is_empty() {
                        if !whitelist.iter().any(|alt| alt.accepts(item, options)) {
                            let allowed: Vec<String> = whitelist.iter().map(ArrayItem::describe).collect();
                            errors.add(ValidationError::with_code(
                                &item_path,
                                format!(
                                    "{} must be one of the following values: {}",
                                    item_path,
                                    allowed.join(", ")
                                ),
                                "one_of",
                            ));
                        }
                    } else if let Some(inner) = inner {
                        inner.check(item, &item_path, Some(&item_path), options, errors);
                    }
                    if options.abort_early && !errors.is_empty() {
                        return;
                    }
                }
            }
            _ => {}
        }

        for rule in &self.rules {
            if let Err(rule_errors) = rule.validate(&value, path) {
                errors.merge(rule_errors);
                if options.abort_early {
                    return;
                }
            }
        }
    }

    /// Value as seen by the rules, or `None` when it does not match the kind
    fn coerce<'a>(&self, value: &'a Value, strict: bool) -> Option<Cow<'a, Value>> {
        let matches = match &self.kind {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Date => value.as_str().is_some_and(is_rfc3339),
            FieldKind::Array { .. } => value.is_array(),
            FieldKind::Object { .. } => value.is_object(),
        };
        if matches {
            return Some(Cow::Borrowed(value));
        }
        if strict {
            return None;
        }

        let coerced = match (&self.kind, value) {
            (FieldKind::String, Value::Number(n)) => Value::String(n.to_string()),
            (FieldKind::String, Value::Bool(b)) => Value::String(b.to_string()),
            (FieldKind::Number, Value::String(s)) => {
                let parsed = s.trim().parse::<f64>().ok()?;
                Value::Number(serde_json::Number::from_f64(parsed)?)
            }
            (FieldKind::Boolean, Value::String(s)) => match s.as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => return None,
            },
            (FieldKind::Date, Value::String(s))
                if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() =>
            {
                value.clone()
            }
            (FieldKind::Date, Value::Number(n)) => {
                let millis = n.as_i64()?;
                let date = DateTime::from_timestamp_millis(millis)?;
                Value::String(date.to_rfc3339())
            }
            _ => return None,
        };
        Some(Cow::Owned(coerced))
    }
}

fn is_rfc3339(text: &str) -> bool {
    DateTime::parse_from_rfc3339(text).is_ok()
}

fn into_result(errors: ValidationErrors) -> ValidationResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
