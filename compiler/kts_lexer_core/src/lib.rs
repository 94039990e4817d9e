//! Cursor interface for the Kotlin external scanner.
//!
//! The scanner never owns its input. The host parser hands it a [`Lexer`]
//! positioned at the start of a token request, and the scanner reports a
//! token boundary through `advance`/`skip`/`mark_end`.
//!
//! This crate is standalone so hosts can implement [`Lexer`] over their own
//! input representation. It also ships [`SourceCursor`], an in-memory
//! implementation over a sentinel-terminated [`SourceBuffer`], which the
//! debug host, the CLI and the test suites drive the scanner with.

mod cursor;
mod lexer;
mod source_buffer;

pub use cursor::SourceCursor;
pub use lexer::{Lexer, Span};
pub use source_buffer::{EncodingIssue, EncodingIssueKind, SourceBuffer};
