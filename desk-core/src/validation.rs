//! Declarative validation of submitted form fields.
//!
//! A [`Schema`] lists the fields an action accepts together with the
//! [`Rule`]s each must satisfy. Validation is pure: it never touches the
//! store and always hands back the raw input on failure so a form can be
//! re-rendered with the values the user typed.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::RecordId;

/// Raw submitted form data, field name to string value.
pub type FieldMap = BTreeMap<String, String>;

type Check = dyn Fn(&str) -> bool + Send + Sync;

/// A single predicate over a field value and the message reported when it
/// does not hold.
#[derive(Clone)]
pub struct Rule {
    check: Arc<Check>,
    message: Cow<'static, str>,
}

impl Rule {
    pub fn new<F>(message: impl Into<Cow<'static, str>>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
            message: message.into(),
        }
    }

    pub fn required() -> Self {
        Self::new("is required", |value| !value.trim().is_empty())
    }

    pub fn record_id() -> Self {
        Self::new("must be a valid identifier", |value| {
            value.parse::<RecordId>().is_ok()
        })
    }

    pub fn max_length(max: usize) -> Self {
        Self::new(format!("must be at most {} characters", max), move |value| {
            value.chars().count() <= max
        })
    }

    pub fn email() -> Self {
        lazy_static! {
            static ref EMAIL_REGEX: Regex =
                Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid");
        }

        Self::new("must be a valid email address", |value| {
            EMAIL_REGEX.is_match(value)
        })
    }

    fn failure(&self, value: &str) -> Option<&str> {
        if (self.check)(value) {
            None
        } else {
            Some(self.message.as_ref())
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
struct FieldSpec {
    name: &'static str,
    rules: Vec<Rule>,
    optional: bool,
}

/// The declared shape of an action's input.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field whose rules always run. A missing field is checked
    /// as the empty string.
    pub fn field(mut self, name: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push(FieldSpec {
            name,
            rules: rules.into_iter().collect(),
            optional: false,
        });
        self
    }

    /// Declares a field that may be left empty. Its rules only run against
    /// non-blank values, and a blank value is narrowed to `None`.
    pub fn optional(mut self, name: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push(FieldSpec {
            name,
            rules: rules.into_iter().collect(),
            optional: true,
        });
        self
    }

    pub fn validate(&self, raw: &FieldMap) -> Result<ValidatedFields, ValidationFailure> {
        let mut values = BTreeMap::new();
        let mut field_errors: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for spec in &self.fields {
            let value = raw.get(spec.name).map(String::as_str).unwrap_or("");

            if spec.optional && value.trim().is_empty() {
                values.insert(spec.name, None);
                continue;
            }

            let messages: Vec<String> = spec
                .rules
                .iter()
                .filter_map(|rule| rule.failure(value))
                .map(str::to_string)
                .collect();

            if messages.is_empty() {
                values.insert(spec.name, Some(value.to_string()));
            } else {
                field_errors.insert(spec.name.to_string(), messages);
            }
        }

        if field_errors.is_empty() {
            Ok(ValidatedFields { values })
        } else {
            tracing::trace!(
                fields = format!("{:?}", field_errors.keys().collect::<Vec<_>>()),
                "form validation failed"
            );
            Err(ValidationFailure {
                field_errors,
                form_errors: Vec::new(),
                fields: raw.clone(),
            })
        }
    }
}

/// Field values that passed validation, restricted to the declared fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    values: BTreeMap<&'static str, Option<String>>,
}

impl ValidatedFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Narrows the fields into a typed value.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        let object: Map<String, Value> = self
            .values
            .into_iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    value.map(Value::String).unwrap_or(Value::Null),
                )
            })
            .collect();
        serde_json::from_value(Value::Object(object))
    }
}

/// Validation result handed back to the form: messages per field, and the
/// raw input for re-display.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("validation failed for {} field(s)", .field_errors.len())]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    pub field_errors: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form_errors: Vec<String>,
    pub fields: FieldMap,
}

/// Typed input of an action, with the schema its raw fields must satisfy.
pub trait FormInput: DeserializeOwned {
    fn schema() -> Schema;
}

/// Validates raw fields against `T`'s schema and narrows them into `T`.
pub fn parse<T: FormInput>(raw: FieldMap) -> Result<T, ValidationFailure> {
    let validated = T::schema().validate(&raw)?;
    validated.deserialize().map_err(|e| ValidationFailure {
        field_errors: BTreeMap::new(),
        form_errors: vec![e.to_string()],
        fields: raw,
    })
}
