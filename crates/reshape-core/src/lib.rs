//! Reshape Core - declarative reshaping of JSON objects
//!
//! This crate transforms an object, or an array of objects, into a new shape
//! described by a list of property declarations: which properties to keep,
//! where to move them, and what to write when they are missing.
//!
//! # Main Components
//!
//! - **Property paths**: dotted paths read with [`path::resolve`] and written with [`path::build`]
//! - **Property declarations**: four shorthand forms normalized into [`PropertyRule`]s
//! - **Root relocation**: descend into a nested object and wrap the result again
//! - **Parser**: applies the rules, with hooks around every stage
//!
//! # Example
//!
//! ```
//! use reshape_core::{parser, ParserConfig, PropertyDeclaration, Result};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let config = ParserConfig::builder()
//!         .root("user>person")
//!         .property("id")
//!         .property(PropertyDeclaration::rename("profile.mail", "email"))
//!         .build()?;
//!
//!     let out = parser(config).parse(&json!({
//!         "user": { "id": 1, "profile": { "mail": "a@b.c" }, "token": "secret" }
//!     }))?;
//!
//!     assert_eq!(out, json!({ "person": { "id": 1, "email": "a@b.c" } }));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod error;
pub mod path;
pub mod property;
pub mod root;
pub mod parser;

// Re-export main types for convenience
pub use error::{Error, HookKind, Result};
pub use path::PropertyPath;
pub use property::{
    DefaultValue, PropertyDeclaration, PropertyOptions, PropertyRule, PropertyRuleBuilder,
    PropertySpec, ValueType,
};
pub use root::RootSpec;
pub use parser::{Hooks, Parser, ParserConfig, ParserConfigBuilder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create a parser for `config`
pub fn parser(config: ParserConfig) -> Parser {
    Parser::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_default_parser_passes_through() {
        let parser = Parser::default();
        let data = json!({ "id": 1, "nested": { "a": [1, 2] } });
        assert_eq!(parser.parse(&data).unwrap(), data);
        assert_eq!(parser.parse(&serde_json::Value::Null).unwrap(), json!({}));
    }

    #[test]
    fn test_parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Parser>();
        assert_send_sync::<ParserConfig>();
    }
}
