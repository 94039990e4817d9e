//! The cursor interface the scanner reads through.

use std::fmt;

/// Character-level cursor supplied by the host parser.
///
/// Mirrors the host lexer contract:
///
/// - [`lookahead`](Self::lookahead) is the next unread character, `'\0'` at
///   end of input (interior NUL characters also read as `'\0'`; use
///   [`eof`](Self::eof) to tell them apart).
/// - [`advance`](Self::advance) consumes the lookahead into the token.
/// - [`skip`](Self::skip) consumes the lookahead as leading trivia: the token
///   start moves to the new position.
/// - [`mark_end`](Self::mark_end) commits the current position as the token
///   end. It may be called any number of times; the last call wins. Without
///   a call the token ends wherever the cursor stopped.
///
/// When a scan fails the host rewinds to the request position, so anything
/// consumed on a failure path is free to discard.
pub trait Lexer {
    /// The next unread character, or `'\0'` at end of input.
    fn lookahead(&self) -> char;

    /// Consume the lookahead, including it in the token.
    fn advance(&mut self);

    /// Consume the lookahead, excluding it from the token.
    fn skip(&mut self);

    /// Commit the current position as the token end.
    fn mark_end(&mut self);

    /// Returns `true` once every character has been consumed.
    fn eof(&self) -> bool;
}

/// Byte range of a token in the source.
///
/// `start == end` for zero-width tokens such as an inserted semicolon.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create an empty span at `pos`.
    #[inline]
    pub const fn point(pos: u32) -> Self {
        Span {
            start: pos,
            end: pos,
        }
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    /// Check if the span is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
