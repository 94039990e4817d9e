//! Token recognizers.
//!
//! Each recognizer starts at the host's cursor, consumes what it inspects
//! and reports whether it produced a token. None of them backtrack: a
//! recognizer that fails leaves the cursor wherever it stopped, and later
//! recognizers in the same request start from there. The dispatcher orders
//! them so that this is harmless.

mod asi;
mod class_header;
mod comment;
mod import;
mod safe_nav;
mod string;

pub(crate) use asi::{scan_automatic_semicolon, AsiOutcome};
pub(crate) use class_header::scan_declaration_keyword;
pub(crate) use comment::scan_multiline_comment;
pub(crate) use import::{scan_import_dot, scan_import_list_delimiter};
pub(crate) use safe_nav::scan_safe_nav;
pub(crate) use string::{scan_string_content, scan_string_start};

use crate::TokenKind;

/// What a recognizer tells the dispatcher.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Step {
    /// A token was recognized; its end is marked.
    Emit(TokenKind),
    /// Nothing here; try the next rule.
    Next,
    /// Nothing here, and no later rule may try.
    Stop,
}

#[cfg(test)]
mod tests;
