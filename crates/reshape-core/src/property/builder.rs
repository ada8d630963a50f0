//! Builder for creating property rules
//!
//! This module provides a fluent builder API for constructing a single
//! [`PropertyRule`] with path validation.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::path::PropertyPath;
use crate::Result;
use super::types::{DefaultValue, PropertyRule, ValueType};
use serde_json::Value;

/// Builder for creating property rules
#[derive(Debug, Clone)]
pub struct PropertyRuleBuilder {
    name: String,
    alias: Option<String>,
    default: Option<DefaultValue>,
    value_type: Option<ValueType>,
}

impl PropertyRuleBuilder {
    /// Create a new rule builder reading from `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            default: None,
            value_type: None,
        }
    }

    /// Set the destination path
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set a literal default value
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Literal(value.into()));
        self
    }

    /// Set a function producing the default value
    pub fn producer<F>(mut self, producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::producer(producer));
        self
    }

    /// Set the default directly
    pub fn default_value(mut self, default: Option<DefaultValue>) -> Self {
        self.default = default;
        self
    }

    /// Set the expected type
    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Set or clear the expected type
    pub fn maybe_value_type(mut self, value_type: Option<ValueType>) -> Self {
        self.value_type = value_type;
        self
    }

    /// Build the property rule
    ///
    /// An absent or empty alias makes the destination equal to the source.
    pub fn build(self) -> Result<PropertyRule> {
        let source = PropertyPath::parse(&self.name)?;
        let destination = match self.alias.as_deref() {
            Some(alias) if !alias.is_empty() => PropertyPath::parse(alias)?,
            _ => source.clone(),
        };

        Ok(PropertyRule {
            source,
            destination,
            default: self.default,
            value_type: self.value_type,
        })
    }
}
