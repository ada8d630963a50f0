//! Object reshaping parser
//!
//! The parser applies normalized property rules to an object or to every
//! object of an array, optionally relocating a root object first and wrapping
//! the result afterwards. Hooks can replace the data at four points:
//!
//! 1. `before_parse` - the whole input, after the root is stripped
//! 2. `before_parse_element` - each element, before the rules apply
//! 3. `after_parse_element` - each transformed element
//! 4. `after_parse` - the whole result, before it is wrapped
//!
//! # Module Organization
//!
//! - [`config`] - Immutable configuration, builder and JSON loading
//! - [`pipeline`] - The parse pipeline and the [`Parser`] handle
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

pub mod config;

pub mod pipeline;


pub use config::{HookFn, Hooks, ParserConfig, ParserConfigBuilder};
pub use pipeline::{parse, parse_element, Parser};
