//! Expansion of property declaration shorthands into canonical rules
//!
//! Every declaration form ends up as one [`PropertyRule`] with a source path,
//! a destination path, an optional default and an optional expected type.
//! The output keeps the order in which the declarations were given.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::Result;
use super::builder::PropertyRuleBuilder;
use super::types::{PropertyDeclaration, PropertyRule};

/// Normalize a list of declarations into rules, preserving declared order
///
/// # Examples
///
/// ```
/// use reshape_core::property::{normalize, PropertyDeclaration};
///
/// let rules = normalize(vec![
///     PropertyDeclaration::name("name"),
///     PropertyDeclaration::rename("address.city", "city"),
/// ]).unwrap();
///
/// assert_eq!(rules[0].destination.to_string(), "name");
/// assert_eq!(rules[1].source.to_string(), "address.city");
/// assert_eq!(rules[1].destination.to_string(), "city");
/// ```
pub fn normalize<I>(declarations: I) -> Result<Vec<PropertyRule>>
where
    I: IntoIterator<Item = PropertyDeclaration>,
{
    declarations.into_iter().map(normalize_declaration).collect()
}

/// Normalize a single declaration
pub fn normalize_declaration(declaration: PropertyDeclaration) -> Result<PropertyRule> {
    let builder = match declaration {
        PropertyDeclaration::Name(name) => PropertyRuleBuilder::new(name),
        PropertyDeclaration::Rename { name, alias } => PropertyRuleBuilder::new(name).alias(alias),
        PropertyDeclaration::Options { name, options } => {
            let builder = PropertyRuleBuilder::new(name)
                .default_value(options.value)
                .maybe_value_type(options.value_type);
            match options.alias {
                Some(alias) => builder.alias(alias),
                None => builder,
            }
        }
        PropertyDeclaration::Explicit(spec) => {
            let builder = PropertyRuleBuilder::new(spec.name)
                .default_value(spec.value)
                .maybe_value_type(spec.value_type);
            match spec.alias {
                Some(alias) => builder.alias(alias),
                None => builder,
            }
        }
    };

    builder.build()
}
