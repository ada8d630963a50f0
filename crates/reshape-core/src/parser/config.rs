//! Parser configuration
//!
//! A [`ParserConfig`] holds the normalized property rules, the optional root
//! specification and the lifecycle hooks. It is built once, either through
//! [`ParserConfigBuilder`] or from a JSON document, and never changes
//! afterwards. Cloning is cheap and a config can be shared across threads.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::error::HookKind;
use crate::property::{normalize, PropertyDeclaration, PropertyRule};
use crate::root::RootSpec;
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// A lifecycle hook: receives the configuration and a value, returns the replacement value
pub type HookFn = Arc<dyn Fn(&ParserConfig, Value) -> anyhow::Result<Value> + Send + Sync>;

/// Optional callbacks invoked around the transformation
#[derive(Clone, Default)]
pub struct Hooks {
    /// Runs on the whole (root stripped) input
    pub before_parse: Option<HookFn>,
    /// Runs on the whole result, before it is wrapped
    pub after_parse: Option<HookFn>,
    /// Runs on every element before the rules are applied
    pub before_parse_element: Option<HookFn>,
    /// Runs on every transformed element
    pub after_parse_element: Option<HookFn>,
}

impl Hooks {
    /// The hook registered for `kind`, if any
    pub fn get(&self, kind: HookKind) -> Option<&HookFn> {
        match kind {
            HookKind::BeforeParse => self.before_parse.as_ref(),
            HookKind::AfterParse => self.after_parse.as_ref(),
            HookKind::BeforeParseElement => self.before_parse_element.as_ref(),
            HookKind::AfterParseElement => self.after_parse_element.as_ref(),
        }
    }

    fn slot(&mut self, kind: HookKind) -> &mut Option<HookFn> {
        match kind {
            HookKind::BeforeParse => &mut self.before_parse,
            HookKind::AfterParse => &mut self.after_parse,
            HookKind::BeforeParseElement => &mut self.before_parse_element,
            HookKind::AfterParseElement => &mut self.after_parse_element,
        }
    }

    /// Run the hook for `kind`, or hand `value` back untouched
    pub(crate) fn run(&self, kind: HookKind, config: &ParserConfig, value: Value) -> Result<Value> {
        match self.get(kind) {
            Some(hook) => hook(config, value).map_err(|source| Error::Hook { hook: kind, source }),
            None => Ok(value),
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before_parse", &self.before_parse.is_some())
            .field("after_parse", &self.after_parse.is_some())
            .field("before_parse_element", &self.before_parse_element.is_some())
            .field("after_parse_element", &self.after_parse_element.is_some())
            .finish()
    }
}

/// Immutable parser configuration
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    rules: Arc<Vec<PropertyRule>>,
    root: Option<RootSpec>,
    hooks: Hooks,
}

/// Serialized form of a configuration document
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigDocument {
    #[serde(alias = "attrs")]
    properties: Vec<PropertyDeclaration>,
    root: Option<RootSpec>,
}

impl ParserConfig {
    /// Start building a configuration
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }

    /// Load a configuration document such as
    /// `{ "properties": ["id", { "name": "fullName" }], "root": "user>" }`
    ///
    /// `attrs` is accepted in place of `properties`. Hooks and default
    /// producers cannot be expressed in JSON; attach hooks with
    /// [`with_hooks`](Self::with_hooks).
    pub fn from_json(document: &Value) -> Result<Self> {
        let document: ConfigDocument = serde_json::from_value(document.clone())?;
        Self::from_document(document)
    }

    /// Load a configuration document from JSON text
    pub fn from_json_str(document: &str) -> Result<Self> {
        let document: ConfigDocument = serde_json::from_str(document)?;
        Self::from_document(document)
    }

    /// Load a configuration document from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        log::debug!("Loading parser configuration from {}", path.display());
        Self::from_json_str(&content)
    }

    fn from_document(document: ConfigDocument) -> Result<Self> {
        let rules = normalize(document.properties)?;
        Ok(Self::from_parts(rules, document.root, Hooks::default()))
    }

    fn from_parts(rules: Vec<PropertyRule>, root: Option<RootSpec>, hooks: Hooks) -> Self {
        log::debug!(
            "Parser configuration ready: {} rules, root {}",
            rules.len(),
            root.as_ref().map_or_else(|| "none".to_string(), ToString::to_string)
        );
        Self {
            rules: Arc::new(rules),
            root,
            hooks,
        }
    }

    /// Replace the hooks of this configuration
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Normalized rules, in declaration order
    pub fn rules(&self) -> &[PropertyRule] {
        &self.rules
    }

    /// Root specification, if any
    pub fn root(&self) -> Option<&RootSpec> {
        self.root.as_ref()
    }

    /// Registered hooks
    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }
}

/// Builder for [`ParserConfig`]
#[derive(Debug, Default)]
pub struct ParserConfigBuilder {
    properties: Vec<PropertyDeclaration>,
    root: Option<String>,
    hooks: Hooks,
}

impl ParserConfigBuilder {
    /// Add one property declaration
    pub fn property(mut self, declaration: impl Into<PropertyDeclaration>) -> Self {
        self.properties.push(declaration.into());
        self
    }

    /// Add several property declarations
    pub fn properties<I, D>(mut self, declarations: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<PropertyDeclaration>,
    {
        self.properties.extend(declarations.into_iter().map(Into::into));
        self
    }

    /// Same as [`properties`](Self::properties)
    pub fn attrs<I, D>(self, declarations: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<PropertyDeclaration>,
    {
        self.properties(declarations)
    }

    /// Set the root specification, e.g. `"user>person"`
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Hook run on the whole input before dispatch
    pub fn before_parse<F>(self, hook: F) -> Self
    where
        F: Fn(&ParserConfig, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.hook(HookKind::BeforeParse, hook)
    }

    /// Hook run on the whole result before it is wrapped
    pub fn after_parse<F>(self, hook: F) -> Self
    where
        F: Fn(&ParserConfig, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.hook(HookKind::AfterParse, hook)
    }

    /// Hook run on every element before the rules apply
    pub fn before_parse_element<F>(self, hook: F) -> Self
    where
        F: Fn(&ParserConfig, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.hook(HookKind::BeforeParseElement, hook)
    }

    /// Hook run on every transformed element
    pub fn after_parse_element<F>(self, hook: F) -> Self
    where
        F: Fn(&ParserConfig, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.hook(HookKind::AfterParseElement, hook)
    }

    /// Register a hook for an arbitrary lifecycle point
    pub fn hook<F>(mut self, kind: HookKind, hook: F) -> Self
    where
        F: Fn(&ParserConfig, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        *self.hooks.slot(kind) = Some(Arc::new(hook));
        self
    }

    /// Normalize the declarations and build the configuration
    pub fn build(self) -> Result<ParserConfig> {
        let rules = normalize(self.properties)?;
        let root = self.root.as_deref().map(RootSpec::parse).transpose()?;
        Ok(ParserConfig::from_parts(rules, root, self.hooks))
    }
}
