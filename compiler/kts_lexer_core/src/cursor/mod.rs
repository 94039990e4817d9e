//! In-memory [`Lexer`] over a sentinel-terminated buffer.
//!
//! The cursor reproduces the host's token-boundary rules exactly, so the
//! scanner behaves the same under test as it does inside the parser:
//!
//! - `skip` moves the token start to the position after the skipped
//!   character, even after earlier `advance` calls.
//! - `mark_end` records the token end; without it the token ends at the
//!   cursor position.
//! - If the recorded end lies before the token start (a zero-width token
//!   marked before trailing trivia was skipped), the start snaps back to the
//!   end.
//!
//! # Interior Null Bytes
//!
//! A null at `pos < source_len` is an interior null: it reads as `'\0'` but
//! [`Lexer::eof`] stays `false`. A null at `pos >= source_len` is the
//! sentinel (EOF).

use crate::{Lexer, Span};

/// Cursor over a sentinel-terminated byte buffer, decoding UTF-8 on demand.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor). The
/// cursor is [`Copy`], so a host can snapshot it before a scan request and
/// fall back to the snapshot when the scan fails.
#[derive(Clone, Copy, Debug)]
pub struct SourceCursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
    /// Where the current token starts. Moved forward by `skip`.
    token_start: u32,
    /// Last position committed by `mark_end`, if any.
    marked_end: Option<u32>,
}

/// Size assertion: the cursor should stay within 40 bytes on 64-bit platforms.
const _: () = assert!(std::mem::size_of::<SourceCursor<'static>>() <= 40);

impl<'a> SourceCursor<'a> {
    /// Create a new cursor at position 0.
    ///
    /// # Contract
    ///
    /// `buf[source_len]` must be `0x00` and every later byte must also be
    /// `0x00`. Guaranteed by `SourceBuffer::new()`.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
            token_start: 0,
            marked_end: None,
        }
    }

    /// Start a new token request at `pos`, forgetting any previous mark.
    ///
    /// Positions past the source are clamped to the end of input.
    pub fn reset(&mut self, pos: u32) {
        let pos = pos.min(self.source_len);
        self.pos = pos;
        self.token_start = pos;
        self.marked_end = None;
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content.
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// The token span as the host would report it after a successful scan.
    pub fn token_span(&self) -> Span {
        let end = self.marked_end.unwrap_or(self.pos);
        let start = self.token_start.min(end);
        Span::new(start, end)
    }

    /// Source text covered by `span`.
    ///
    /// Returns an empty string for spans that do not fall on character
    /// boundaries; spans produced by the cursor always do.
    pub fn slice(&self, span: Span) -> &'a str {
        let end = span.end.min(self.source_len) as usize;
        let start = (span.start as usize).min(end);
        std::str::from_utf8(&self.buf[start..end]).unwrap_or("")
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// - `0xC0..=0xDF`: 2 bytes
    /// - `0xE0..=0xEF`: 3 bytes
    /// - `0xF0..=0xF7`: 4 bytes
    /// - Everything else (ASCII, continuation, invalid): 1 byte
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Width of the character under the cursor, clamped to the source end.
    #[inline]
    fn current_width(&self) -> u32 {
        let width = Self::utf8_char_width(self.buf[self.pos as usize]);
        width.min(self.source_len.saturating_sub(self.pos)).max(1)
    }

    /// Move past the lookahead character. A no-op at end of input.
    #[inline]
    fn step(&mut self) {
        if self.pos < self.source_len {
            self.pos += self.current_width();
        }
    }
}

impl Lexer for SourceCursor<'_> {
    fn lookahead(&self) -> char {
        let byte = self.buf[self.pos as usize];
        if byte.is_ascii() {
            return char::from(byte);
        }
        let start = self.pos as usize;
        let end = start + self.current_width() as usize;
        std::str::from_utf8(&self.buf[start..end])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    #[inline]
    fn advance(&mut self) {
        self.step();
    }

    #[inline]
    fn skip(&mut self) {
        self.step();
        self.token_start = self.pos;
    }

    #[inline]
    fn mark_end(&mut self) {
        self.marked_end = Some(self.pos);
    }

    #[inline]
    fn eof(&self) -> bool {
        self.pos >= self.source_len
    }
}
