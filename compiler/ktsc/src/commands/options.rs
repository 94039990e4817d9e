//! Option parsing for the `lex` and `state` commands.

use std::fmt;

use kts_scanner::{ConfigError, ScannerConfig, TokenKind, ValidSymbols};

/// Parsed command-line options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub path: String,
    pub config: ScannerConfig,
    /// Kinds to print; every kind when `None`.
    pub only: Option<ValidSymbols>,
}

impl Options {
    /// Check whether tokens of `kind` are printed.
    pub fn shows(&self, kind: TokenKind) -> bool {
        self.only.is_none_or(|only| only.allows(kind))
    }
}

/// A command line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    MissingPath,
    UnexpectedArgument(String),
    UnknownOption(String),
    InvalidValue {
        option: &'static str,
        source: ConfigError,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingPath => write!(f, "missing file path"),
            CliError::UnexpectedArgument(arg) => write!(f, "unexpected argument '{arg}'"),
            CliError::UnknownOption(arg) => write!(f, "unknown option '{arg}'"),
            CliError::InvalidValue { option, source } => write!(f, "{option}: {source}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::InvalidValue { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Parse the arguments after the command name. Flags may come before or
/// after the path.
pub fn parse_options(args: &[String]) -> Result<Options, CliError> {
    let mut path = None;
    let mut config = ScannerConfig::default();
    let mut only = None;

    for arg in args {
        if let Some(value) = arg.strip_prefix("--sign-policy=") {
            let policy = value.parse().map_err(|source| CliError::InvalidValue {
                option: "--sign-policy",
                source,
            })?;
            config = config.with_sign_policy(policy);
        } else if let Some(value) = arg.strip_prefix("--layout=") {
            let layout = value.parse().map_err(|source| CliError::InvalidValue {
                option: "--layout",
                source,
            })?;
            config = config.with_layout(layout);
        } else if let Some(value) = arg.strip_prefix("--only=") {
            only = Some(parse_symbols(value)?);
        } else if arg.starts_with('-') {
            return Err(CliError::UnknownOption(arg.clone()));
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            return Err(CliError::UnexpectedArgument(arg.clone()));
        }
    }

    Ok(Options {
        path: path.ok_or(CliError::MissingPath)?,
        config,
        only,
    })
}

fn parse_symbols(list: &str) -> Result<ValidSymbols, CliError> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .try_fold(ValidSymbols::empty(), |set, name| {
            let kind: TokenKind = name.parse().map_err(|source| CliError::InvalidValue {
                option: "--only",
                source,
            })?;
            Ok(set | kind.symbol())
        })
}
