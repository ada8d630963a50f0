//! Error types for the reshape core library
//!
//! Missing data is never an error in this crate: absent properties resolve to
//! `None` and are filled from defaults. The variants below cover invalid
//! configuration, failing user hooks and the I/O / JSON plumbing around
//! configuration loading.

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Main error type for reshape operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid property declaration, property path or root specification
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
    },

    /// A user supplied hook returned an error
    #[error("Hook {hook} failed: {source}")]
    Hook {
        hook: HookKind,
        #[source]
        source: anyhow::Error,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Unsupported feature or operation
    #[error("Unsupported operation: {message}")]
    Unsupported {
        message: String,
        feature: Option<String>,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a configuration error tied to a declaration field
    pub(crate) fn configuration(message: impl Into<String>, field: Option<&str>) -> Self {
        Error::Configuration {
            message: message.into(),
            field: field.map(str::to_string),
        }
    }
}

/// The lifecycle points at which a hook can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookKind {
    /// Before the whole input is dispatched
    BeforeParse,
    /// After every element has been transformed
    AfterParse,
    /// Before a single element is transformed
    BeforeParseElement,
    /// After a single element has been transformed
    AfterParseElement,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookKind::BeforeParse => write!(f, "beforeParse"),
            HookKind::AfterParse => write!(f, "afterParse"),
            HookKind::BeforeParseElement => write!(f, "beforeParseElement"),
            HookKind::AfterParseElement => write!(f, "afterParseElement"),
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Configuration {
            message: "Invalid path".to_string(),
            field: None,
        };
        assert_eq!(err.to_string(), "Configuration error: Invalid path");
    }

    #[test]
    fn test_hook_error_display() {
        let err = Error::Hook {
            hook: HookKind::AfterParseElement,
            source: anyhow::anyhow!("boom"),
        };
        assert_eq!(err.to_string(), "Hook afterParseElement failed: boom");
    }

    #[test]
    fn test_json_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Json { .. }));
    }
}
