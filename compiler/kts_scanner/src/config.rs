//! Scanner configuration.
//!
//! Two behaviors differ between deployments of the grammar and are chosen
//! here rather than hard-coded: how a line-leading `+`/`-` interacts with
//! semicolon insertion, and whether the declaration context travels in the
//! serialized checkpoint.

use std::fmt;
use std::str::FromStr;

use crate::ConfigError;

/// How a `+` or `-` at the start of a new line affects semicolon insertion.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignPolicy {
    /// A line-leading sign always starts a new statement. A binary `+`/`-`
    /// must stay on the line of its left operand.
    #[default]
    AlwaysPrefix,
    /// Only `++`, `--` or a sign directly followed by a digit starts a new
    /// statement; any other line-leading sign continues the expression.
    IncrementOrDigit,
}

impl SignPolicy {
    const fn as_str(self) -> &'static str {
        match self {
            SignPolicy::AlwaysPrefix => "prefix",
            SignPolicy::IncrementOrDigit => "increment-or-digit",
        }
    }
}

impl fmt::Display for SignPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prefix" => Ok(SignPolicy::AlwaysPrefix),
            "increment-or-digit" => Ok(SignPolicy::IncrementOrDigit),
            _ => Err(ConfigError::UnknownSignPolicy(s.to_string())),
        }
    }
}

/// Serialized checkpoint layout.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateLayout {
    /// Delimiter stack bytes only.
    Compact,
    /// Delimiter stack bytes followed by the two declaration-context bytes.
    #[default]
    WithContext,
}

impl StateLayout {
    const fn as_str(self) -> &'static str {
        match self {
            StateLayout::Compact => "compact",
            StateLayout::WithContext => "context",
        }
    }
}

impl fmt::Display for StateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateLayout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compact" => Ok(StateLayout::Compact),
            "context" => Ok(StateLayout::WithContext),
            _ => Err(ConfigError::UnknownLayout(s.to_string())),
        }
    }
}

/// Scanner configuration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScannerConfig {
    /// Line-leading `+`/`-` rule.
    pub sign_policy: SignPolicy,
    /// Checkpoint layout.
    pub layout: StateLayout,
}

impl ScannerConfig {
    /// Default configuration: `AlwaysPrefix`, `WithContext`.
    pub const fn new() -> Self {
        ScannerConfig {
            sign_policy: SignPolicy::AlwaysPrefix,
            layout: StateLayout::WithContext,
        }
    }

    #[must_use]
    pub const fn with_sign_policy(mut self, sign_policy: SignPolicy) -> Self {
        self.sign_policy = sign_policy;
        self
    }

    #[must_use]
    pub const fn with_layout(mut self, layout: StateLayout) -> Self {
        self.layout = layout;
        self
    }
}
