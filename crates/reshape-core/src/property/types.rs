//! Core types for property declarations and normalized rules
//!
//! A [`PropertyDeclaration`] is what a caller writes; a [`PropertyRule`] is the
//! canonical record the parser evaluates. Declarations are turned into rules
//! once, when the parser configuration is built.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::path::PropertyPath;
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A zero-argument function producing a default value
pub type ProducerFn = Arc<dyn Fn() -> Value + Send + Sync>;

/// Value used when a property is missing from the source
#[derive(Clone)]
pub enum DefaultValue {
    /// Used as is
    Literal(Value),
    /// Invoked every time a default is needed
    Producer(ProducerFn),
}

impl DefaultValue {
    /// Create a literal default
    pub fn literal(value: impl Into<Value>) -> Self {
        DefaultValue::Literal(value.into())
    }

    /// Create a lazily evaluated default
    pub fn producer<F>(producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        DefaultValue::Producer(Arc::new(producer))
    }

    /// Produce the default value
    pub fn evaluate(&self) -> Value {
        match self {
            DefaultValue::Literal(value) => value.clone(),
            DefaultValue::Producer(producer) => producer(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            DefaultValue::Producer(_) => f.write_str("Producer(<fn>)"),
        }
    }
}

impl PartialEq for DefaultValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DefaultValue::Literal(a), DefaultValue::Literal(b)) => a == b,
            // Producers are only equal to themselves
            (DefaultValue::Producer(a), DefaultValue::Producer(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<'de> Deserialize<'de> for DefaultValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(DefaultValue::Literal)
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Literal(value)
    }
}

/// Expected type of a property, used to pick a zero value when it is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Boolean,
    Number,
    Date,
    String,
}

impl ValueType {
    /// The value written for a missing property of this type
    ///
    /// Dates are rendered as the current UTC time in RFC 3339 form.
    pub fn zero_value(&self) -> Value {
        match self {
            ValueType::Boolean => Value::Bool(false),
            ValueType::Number => Value::from(0),
            ValueType::Date => Value::String(chrono::Utc::now().to_rfc3339()),
            ValueType::String => Value::String(String::new()),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Boolean => write!(f, "boolean"),
            ValueType::Number => write!(f, "number"),
            ValueType::Date => write!(f, "date"),
            ValueType::String => write!(f, "string"),
        }
    }
}

/// Options attached to a property declared as `{ "name": { ... } }`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyOptions {
    /// Destination path, defaults to the property name
    #[serde(default)]
    pub alias: Option<String>,
    /// Default used when the property is missing
    #[serde(default)]
    pub value: Option<DefaultValue>,
    /// Expected type, selects a zero value when no default is given
    #[serde(default, rename = "type")]
    pub value_type: Option<ValueType>,
}

/// Fully spelled out declaration: `{ "name": "a.b", "alias": "x.y", ... }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertySpec {
    /// Source path
    pub name: String,
    /// Destination path, defaults to `name`
    #[serde(default)]
    pub alias: Option<String>,
    /// Default used when the property is missing
    #[serde(default)]
    pub value: Option<DefaultValue>,
    /// Expected type, selects a zero value when no default is given
    #[serde(default, rename = "type")]
    pub value_type: Option<ValueType>,
}

impl PropertySpec {
    /// Declaration reading and writing `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            value: None,
            value_type: None,
        }
    }
}

/// One caller supplied property declaration, in any of its shorthand forms
///
/// When loaded from JSON the form is picked from the shape of the value:
///
/// | JSON | variant |
/// |---|---|
/// | `"a.b"` | [`Name`](Self::Name) |
/// | `{ "a.b": "x.y" }` | [`Rename`](Self::Rename) |
/// | `{ "a": { "alias": "b", "value": 1, "type": "number" } }` | [`Options`](Self::Options) |
/// | `{ "name": "a", "alias": "b" }` | [`Explicit`](Self::Explicit) |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum PropertyDeclaration {
    /// Keep the property under the same path
    Name(String),
    /// Move the property from `name` to `alias`
    Rename { name: String, alias: String },
    /// Property keyed by its name with extra options
    Options { name: String, options: PropertyOptions },
    /// Explicit declaration object
    Explicit(PropertySpec),
}

impl PropertyDeclaration {
    pub fn name(name: impl Into<String>) -> Self {
        PropertyDeclaration::Name(name.into())
    }

    pub fn rename(name: impl Into<String>, alias: impl Into<String>) -> Self {
        PropertyDeclaration::Rename {
            name: name.into(),
            alias: alias.into(),
        }
    }

    pub fn options(name: impl Into<String>, options: PropertyOptions) -> Self {
        PropertyDeclaration::Options {
            name: name.into(),
            options,
        }
    }

    pub fn explicit(spec: PropertySpec) -> Self {
        PropertyDeclaration::Explicit(spec)
    }

    fn from_object(map: Map<String, Value>) -> Result<Self> {
        // A lone key other than `name` is the property name itself
        if map.len() != 1 || map.contains_key("name") {
            let spec = serde_json::from_value(Value::Object(map)).map_err(|e| {
                Error::configuration(format!("Invalid property declaration: {}", e), None)
            })?;
            return Ok(PropertyDeclaration::Explicit(spec));
        }

        let Some((name, value)) = map.into_iter().next() else {
            return Err(Error::configuration("Empty property declaration", None));
        };

        match value {
            Value::String(alias) => Ok(PropertyDeclaration::Rename { name, alias }),
            Value::Object(mut options) => {
                // The key names the property, a nested `name` is ignored
                options.remove("name");
                let options = serde_json::from_value(Value::Object(options)).map_err(|e| {
                    Error::configuration(
                        format!("Invalid options for property '{}': {}", name, e),
                        Some(name.as_str()),
                    )
                })?;
                Ok(PropertyDeclaration::Options { name, options })
            }
            other => Err(Error::configuration(
                format!(
                    "Property '{}' must map to an alias string or an options object, got {}",
                    name, other
                ),
                Some(name.as_str()),
            )),
        }
    }
}

impl TryFrom<Value> for PropertyDeclaration {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(name) => Ok(PropertyDeclaration::Name(name)),
            Value::Object(map) => Self::from_object(map),
            other => Err(Error::configuration(
                format!("Property declaration must be a string or an object, got {}", other),
                None,
            )),
        }
    }
}

impl From<&str> for PropertyDeclaration {
    fn from(name: &str) -> Self {
        PropertyDeclaration::Name(name.to_string())
    }
}

impl From<String> for PropertyDeclaration {
    fn from(name: String) -> Self {
        PropertyDeclaration::Name(name)
    }
}

impl From<PropertySpec> for PropertyDeclaration {
    fn from(spec: PropertySpec) -> Self {
        PropertyDeclaration::Explicit(spec)
    }
}

impl From<PropertyRule> for PropertyDeclaration {
    fn from(rule: PropertyRule) -> Self {
        PropertyDeclaration::Explicit(PropertySpec {
            name: rule.source.to_string(),
            alias: Some(rule.destination.to_string()),
            value: rule.default,
            value_type: rule.value_type,
        })
    }
}

/// Normalized property rule evaluated by the parser
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRule {
    /// Where the value is read from
    pub source: PropertyPath,
    /// Where the value is written to
    pub destination: PropertyPath,
    /// Explicit default for a missing value
    pub default: Option<DefaultValue>,
    /// Expected type, used when no explicit default is set
    pub value_type: Option<ValueType>,
}

impl PropertyRule {
    /// Rule copying `path` to the same location
    pub fn keep(path: PropertyPath) -> Self {
        Self {
            destination: path.clone(),
            source: path,
            default: None,
            value_type: None,
        }
    }

    /// Value written when the source path is missing
    ///
    /// An explicit default wins over the type's zero value; with neither the
    /// property is written as `null`.
    pub fn fallback(&self) -> Value {
        match (&self.default, self.value_type) {
            (Some(default), _) => default.evaluate(),
            (None, Some(value_type)) => value_type.zero_value(),
            (None, None) => Value::Null,
        }
    }
}
