//! Root relocation around a transformation
//!
//! A root specification names a nested object to descend into before the
//! properties are extracted, and a path to wrap the result under afterwards.
//!
//! | spec | descend | wrap |
//! |---|---|---|
//! | `"user"` | `user` | `user` |
//! | `"user>"` | `user` | - |
//! | `">user"` | - | `user` |
//! | `"user>person"` | `user` | `person` |
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::path::{self, PropertyPath};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Separator between the descend and wrap halves of a root spec
pub const ROOT_SEPARATOR: char = '>';

/// Parsed root specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootSpec {
    descend: Option<PropertyPath>,
    wrap: Option<PropertyPath>,
}

impl RootSpec {
    /// Build a spec from its two halves; at least one must be set
    pub fn new(descend: Option<PropertyPath>, wrap: Option<PropertyPath>) -> Result<Self> {
        if descend.is_none() && wrap.is_none() {
            return Err(Error::configuration(
                "Root specification needs a descend or a wrap path",
                Some("root"),
            ));
        }
        Ok(Self { descend, wrap })
    }

    /// Parse one of `"path"`, `"path>"`, `">path"` or `"pathA>pathB"`
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        let mut halves = spec.split(ROOT_SEPARATOR);

        let (descend, wrap) = match (halves.next(), halves.next(), halves.next()) {
            (Some(only), None, _) => {
                let path = parse_half(only, spec)?;
                (path.clone(), path)
            }
            (Some(descend), Some(wrap), None) => (parse_half(descend, spec)?, parse_half(wrap, spec)?),
            _ => {
                return Err(Error::configuration(
                    format!("Root specification '{}' has more than one '{}'", spec, ROOT_SEPARATOR),
                    Some("root"),
                ))
            }
        };

        Self::new(descend, wrap).map_err(|_| {
            Error::configuration(format!("Root specification '{}' names no path", spec), Some("root"))
        })
    }

    /// Path descended into before transforming
    pub fn descend(&self) -> Option<&PropertyPath> {
        self.descend.as_ref()
    }

    /// Path the result is wrapped under after transforming
    pub fn wrap(&self) -> Option<&PropertyPath> {
        self.wrap.as_ref()
    }

    /// Select the object to transform
    ///
    /// When the descend path is missing from the input the input itself is
    /// transformed.
    pub fn strip(&self, input: &Value) -> Value {
        let Some(descend) = &self.descend else {
            return input.clone();
        };

        match path::resolve(input, descend) {
            Some(inner) => inner.clone(),
            None => {
                log::debug!("Root '{}' not found in input, transforming the whole input", descend);
                input.clone()
            }
        }
    }

    /// Place the transformed result under the wrap path, if any
    pub fn wrap_result(&self, result: Value) -> Value {
        match &self.wrap {
            Some(wrap) => {
                let mut wrapped = Value::Object(Map::new());
                path::build(&mut wrapped, wrap, result);
                wrapped
            }
            None => result,
        }
    }
}

fn parse_half(half: &str, spec: &str) -> Result<Option<PropertyPath>> {
    let half = half.trim();
    if half.is_empty() {
        return Ok(None);
    }

    PropertyPath::parse(half).map(Some).map_err(|e| {
        Error::configuration(format!("Invalid root specification '{}': {}", spec, e), Some("root"))
    })
}

impl FromStr for RootSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RootSpec {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RootSpec> for String {
    fn from(spec: RootSpec) -> Self {
        spec.to_string()
    }
}

impl fmt::Display for RootSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.descend, &self.wrap) {
            (Some(descend), Some(wrap)) if descend == wrap => write!(f, "{}", descend),
            (Some(descend), Some(wrap)) => write!(f, "{}{}{}", descend, ROOT_SEPARATOR, wrap),
            (Some(descend), None) => write!(f, "{}{}", descend, ROOT_SEPARATOR),
            (None, Some(wrap)) => write!(f, "{}{}", ROOT_SEPARATOR, wrap),
            (None, None) => Ok(()),
        }
    }
}
