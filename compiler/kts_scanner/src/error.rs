//! Errors for parsing configuration values and symbol names.
//!
//! Scanning itself never produces an error value: recognizers fail by
//! returning `None`, and broken internal invariants panic.

use std::fmt;

/// A configuration value or symbol name that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Not one of `prefix`, `increment-or-digit`.
    UnknownSignPolicy(String),
    /// Not one of `compact`, `context`.
    UnknownLayout(String),
    /// Not the name of an external token.
    UnknownSymbol(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownSignPolicy(v) => write!(
                f,
                "unknown sign policy '{v}' (expected 'prefix' or 'increment-or-digit')"
            ),
            ConfigError::UnknownLayout(v) => write!(
                f,
                "unknown state layout '{v}' (expected 'compact' or 'context')"
            ),
            ConfigError::UnknownSymbol(v) => write!(f, "unknown external token '{v}'"),
        }
    }
}

impl std::error::Error for ConfigError {}
