//! Contextual external scanner for the Kotlin grammar.
//!
//! The generated parser lexes almost everything itself. It calls into this
//! crate only for the tokens a context-free lexer cannot decide:
//!
//! - automatic semicolons at line ends
//! - string delimiters and literal content around interpolations
//! - nested `/* */` comments
//! - `?.` with trivia between the characters
//! - the end of the import list and dots inside import paths
//! - `class` and the `constructor` of a primary constructor
//!
//! Every request carries a [`ValidSymbols`] set and a cursor implementing
//! [`Lexer`](kts_lexer_core::Lexer). The [`Scanner`] keeps a stack of open
//! string delimiters and a one-shot class-header context between requests,
//! and snapshots both into a byte [`Checkpoint`] the host stores with each
//! token.
//!
//! [`tokenize`] drives a scanner over a whole file the way a parser would,
//! for debugging and the `ktsc` tool.

mod config;
mod context;
mod delimiter;
mod dispatch;
mod error;
mod host;
mod recognize;
mod scanner;
mod state;
mod symbol;
mod words;

pub use config::{ScannerConfig, SignPolicy, StateLayout};
pub use context::DeclContext;
pub use delimiter::{
    Delimiter, DelimiterStack, CONTEXT_BYTES, SERIALIZATION_BUFFER_SIZE, STACK_CAPACITY,
};
pub use error::ConfigError;
pub use host::{tokenize, ExternalToken};
pub use scanner::Scanner;
pub use state::{Checkpoint, ScannerState};
pub use symbol::{TokenKind, ValidSymbols};

// Hosts index their symbol tables with a kind; keep it one byte.
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::TokenKind;
    const _: () = assert!(std::mem::size_of::<TokenKind>() == 1);
    const _: () = assert!(std::mem::size_of::<Option<TokenKind>>() == 1);
}
