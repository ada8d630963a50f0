//! Dotted property paths over `serde_json::Value` trees
//!
//! A [`PropertyPath`] is the parsed form of a string such as `"user.address.city"`.
//! [`resolve`] reads the value a path points at and [`build`] writes a value at a
//! path, creating the intermediate objects on the way.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Separator between the segments of a dotted path
pub const SEPARATOR: char = '.';

/// A non-empty sequence of non-empty segment names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    /// Parse a dotted path, rejecting empty paths and empty segments
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::configuration("Property path must not be empty", None));
        }

        let segments: Vec<String> = path.split(SEPARATOR).map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(Error::configuration(
                format!("Property path '{}' contains an empty segment", path),
                Some(path),
            ));
        }

        Ok(Self { segments })
    }

    /// The segments of this path, outermost first
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Never true for a parsed path
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for PropertyPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PropertyPath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for PropertyPath {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<PropertyPath> for String {
    fn from(path: PropertyPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Read the value at `path`, or `None` when any segment is missing
///
/// Objects are walked by key and arrays by decimal index. A falsy value
/// (`null`, `false`, `0`, `0.0` or `""`) anywhere on the way, including the
/// leaf itself, counts as missing.
///
/// # Examples
///
/// ```
/// use reshape_core::path::{resolve, PropertyPath};
/// use serde_json::json;
///
/// let data = json!({ "author": { "email": "name@example.com" } });
/// let path = PropertyPath::parse("author.email").unwrap();
/// assert_eq!(resolve(&data, &path), Some(&json!("name@example.com")));
///
/// let missing = PropertyPath::parse("author.name").unwrap();
/// assert_eq!(resolve(&data, &missing), None);
/// ```
pub fn resolve<'a>(source: &'a Value, path: &PropertyPath) -> Option<&'a Value> {
    let mut current = source;

    for segment in path.segments() {
        if is_falsy(current) {
            return None;
        }
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index))?,
            _ => return None,
        };
    }

    if is_falsy(current) {
        None
    } else {
        Some(current)
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Write `value` at `path`, creating intermediate objects as needed
///
/// Existing intermediate objects are reused, so two paths sharing a prefix end
/// up merged under the same container. A non-object found where a container is
/// needed is replaced by an empty object. The leaf is always overwritten.
///
/// # Examples
///
/// ```
/// use reshape_core::path::{build, PropertyPath};
/// use serde_json::{json, Value};
///
/// let mut out = Value::Null;
/// build(&mut out, &PropertyPath::parse("user.email").unwrap(), json!("a@b.c"));
/// build(&mut out, &PropertyPath::parse("user.name").unwrap(), json!("A"));
/// assert_eq!(out, json!({ "user": { "email": "a@b.c", "name": "A" } }));
/// ```
pub fn build(destination: &mut Value, path: &PropertyPath, value: Value) {
    if !destination.is_object() {
        *destination = Value::Object(Map::new());
    }

    if let Value::Object(map) = destination {
        insert_at(map, path.segments(), value);
    }
}

fn insert_at(map: &mut Map<String, Value>, segments: &[String], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert(last.clone(), value);
        }
        [head, rest @ ..] => {
            let child = map
                .entry(head.clone())
                .or_insert_with(|| Value::Object(Map::new()));

            if !child.is_object() {
                *child = Value::Object(Map::new());
            }

            if let Value::Object(child_map) = child {
                insert_at(child_map, rest, value);
            }
        }
    }
}
