//! Parser pipeline implementation
//!
//! This module applies a [`ParserConfig`] to JSON data: root relocation, the
//! collection level hooks, dispatch over a single object or an array, and
//! per element rule evaluation.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::error::HookKind;
use crate::path;
use crate::property::PropertyRule;
use crate::{Error, Result};
use super::config::ParserConfig;
use serde_json::{Map, Value};

/// Reusable parser over one configuration
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a parser for `config`
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// The configuration this parser applies
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Transform an object or an array of objects
    ///
    /// # Examples
    ///
    /// ```
    /// use reshape_core::{Parser, ParserConfig};
    /// use serde_json::json;
    ///
    /// let config = ParserConfig::builder()
    ///     .property("id")
    ///     .property(reshape_core::PropertyDeclaration::rename("address.city", "city"))
    ///     .build()
    ///     .unwrap();
    /// let parser = Parser::new(config);
    ///
    /// let out = parser
    ///     .parse(&json!({ "id": 1, "secret": "x", "address": { "city": "Oslo" } }))
    ///     .unwrap();
    /// assert_eq!(out, json!({ "id": 1, "city": "Oslo" }));
    /// ```
    pub fn parse(&self, data: &Value) -> Result<Value> {
        parse(&self.config, data)
    }

    /// Parse JSON text, then transform it
    pub fn parse_str(&self, json: &str) -> Result<Value> {
        let data: Value = serde_json::from_str(json)?;
        self.parse(&data)
    }

    /// Transform a single element, running only the element hooks
    pub fn parse_element(&self, element: Value) -> Result<Value> {
        parse_element(&self.config, element)
    }

    /// Rebuild source shaped data from transformed data
    ///
    /// Not supported; always returns [`Error::Unsupported`].
    pub fn compose(&self, _data: &Value) -> Result<Value> {
        Err(Error::Unsupported {
            message: "Composing source data from transformed data is not implemented".to_string(),
            feature: Some("compose".to_string()),
        })
    }
}

/// Transform `input` according to `config`
///
/// A `null` input yields an empty object without running any hook.
pub fn parse(config: &ParserConfig, input: &Value) -> Result<Value> {
    if input.is_null() {
        return Ok(Value::Object(Map::new()));
    }

    let object = match config.root() {
        Some(root) => root.strip(input),
        None => input.clone(),
    };

    let hooks = config.hooks();
    let object = hooks.run(HookKind::BeforeParse, config, object)?;

    let result = match object {
        Value::Array(elements) => {
            log::trace!("Parsing {} elements", elements.len());
            let parsed = elements
                .into_iter()
                .map(|element| parse_element(config, element))
                .collect::<Result<Vec<_>>>()?;
            Value::Array(parsed)
        }
        element => parse_element(config, element)?,
    };

    let result = hooks.run(HookKind::AfterParse, config, result)?;

    Ok(match config.root() {
        Some(root) => root.wrap_result(result),
        None => result,
    })
}

/// Transform one element: element hooks around rule evaluation
///
/// With no rules configured the element passes through unchanged.
pub fn parse_element(config: &ParserConfig, element: Value) -> Result<Value> {
    let hooks = config.hooks();
    let source = hooks.run(HookKind::BeforeParseElement, config, element)?;

    let result = if config.rules().is_empty() {
        source
    } else {
        apply_rules(config.rules(), &source)
    };

    hooks.run(HookKind::AfterParseElement, config, result)
}

fn apply_rules(rules: &[PropertyRule], source: &Value) -> Value {
    let mut result = Value::Object(Map::new());

    for rule in rules {
        let value = match path::resolve(source, &rule.source) {
            Some(value) => value.clone(),
            None => {
                log::trace!("Property '{}' missing, writing fallback to '{}'", rule.source, rule.destination);
                rule.fallback()
            }
        };
        path::build(&mut result, &rule.destination, value);
    }

    result
}
