//! Property declarations and their normalization into rules
//!
//! Callers describe the properties to extract in one of four shorthand forms
//! (see [`PropertyDeclaration`]). The parser configuration normalizes them once
//! into [`PropertyRule`]s which are then evaluated for every element.
//!
//! # Module Organization
//!
//! - [`types`] - Declaration forms, rules, defaults and expected types
//! - [`normalizer`] - Expansion of declarations into rules
//! - [`builder`] - Fluent builder for a single rule
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

pub mod types;

pub mod normalizer;

pub mod builder;

#[cfg(test)]
mod tests;

pub use types::{
    DefaultValue, ProducerFn, PropertyDeclaration, PropertyOptions, PropertyRule, PropertySpec,
    ValueType,
};

pub use normalizer::{normalize, normalize_declaration};
pub use builder::PropertyRuleBuilder;
