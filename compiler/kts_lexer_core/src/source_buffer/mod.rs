//! Sentinel-terminated source buffer backing [`SourceCursor`].
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content, so
//! the cursor reads `'\0'` at end of input without a bounds check, the same
//! way the host lexer reports a NUL lookahead at EOF. The total size is
//! rounded up to the next 64-byte boundary; the zero padding keeps the
//! decoder's multi-byte reads in bounds near the end of the buffer.
//!
//! # Encoding Detection
//!
//! During construction the buffer records encoding issues:
//! - UTF-8 BOM (Kotlin sources are read without one by the host)
//! - UTF-16 BOMs (wrong encoding)
//! - Interior null bytes (read as `'\0'` lookahead, indistinguishable from
//!   EOF for recognizers that do not ask [`Lexer::eof`](crate::Lexer::eof))
//!
//! Issues are recorded as [`EncodingIssue`] values; the CLI reports them as
//! warnings before scanning.

use crate::{SourceCursor, Span};

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
    /// Byte offsets at which each line starts. Always contains `0`.
    line_starts: Vec<u32>,
    /// Encoding issues detected during construction.
    encoding_issues: Vec<EncodingIssue>,
}

/// Encoding issue detected during source buffer construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingIssue {
    /// What kind of encoding issue was detected.
    pub kind: EncodingIssueKind,
    /// Byte position in the source where the issue was found.
    pub pos: u32,
    /// Byte length of the problematic sequence.
    pub len: u32,
}

/// Kind of encoding issue detected in source buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingIssueKind {
    /// UTF-8 BOM (`0xEF 0xBB 0xBF`) at start.
    Utf8Bom,
    /// UTF-16 Little-Endian BOM (`0xFF 0xFE`) at start.
    Utf16LeBom,
    /// UTF-16 Big-Endian BOM (`0xFE 0xFF`) at start.
    Utf16BeBom,
    /// Null byte (U+0000) in source content.
    InteriorNull,
}

impl EncodingIssueKind {
    /// Human-readable description used in CLI warnings.
    pub fn describe(self) -> &'static str {
        match self {
            EncodingIssueKind::Utf8Bom => "UTF-8 byte order mark",
            EncodingIssueKind::Utf16LeBom => "UTF-16 (little-endian) byte order mark",
            EncodingIssueKind::Utf16BeBom => "UTF-16 (big-endian) byte order mark",
            EncodingIssueKind::InteriorNull => "interior null byte",
        }
    }
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from source code.
    ///
    /// Source files larger than `u32::MAX` bytes are accepted but the
    /// `source_len` field saturates at the last character boundary at or
    /// below `u32::MAX`.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let source_len = source_bytes.len();

        // Round up to next 64-byte boundary (minimum: source + 1 sentinel byte).
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // The sentinel (buf[source_len]) and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source_bytes);

        let mut encoding_issues = Vec::new();
        detect_encoding_issues(source_bytes, &mut encoding_issues);

        Self {
            buf,
            source_len: saturating_len(source),
            line_starts: compute_line_starts(source_bytes),
            encoding_issues,
        }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Returns the source text (without sentinel or padding).
    #[allow(
        unsafe_code,
        reason = "from_utf8_unchecked on source originally validated as &str"
    )]
    pub fn as_str(&self) -> &str {
        // SAFETY: `buf[..source_len]` was copied from a `&str` and
        // `source_len` lies on a character boundary of it.
        unsafe { std::str::from_utf8_unchecked(self.as_bytes()) }
    }

    /// Returns the full buffer including sentinel and cache-line padding.
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Create a [`SourceCursor`] positioned at byte 0.
    pub fn cursor(&self) -> SourceCursor<'_> {
        SourceCursor::new(&self.buf, self.source_len)
    }

    /// Create a [`SourceCursor`] positioned at `pos`, as the host does at the
    /// start of every token request.
    pub fn cursor_at(&self, pos: u32) -> SourceCursor<'_> {
        let mut cursor = self.cursor();
        cursor.reset(pos);
        cursor
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Encoding issues detected during construction.
    pub fn encoding_issues(&self) -> &[EncodingIssue] {
        &self.encoding_issues
    }

    /// Source text covered by `span`.
    pub fn slice(&self, span: Span) -> &str {
        self.cursor().slice(span)
    }

    /// One-based line and column (in bytes) of `pos`.
    pub fn line_col(&self, pos: u32) -> (u32, u32) {
        // `line_starts[0] == 0`, so the partition point is at least 1.
        let line = self.line_starts.partition_point(|&start| start <= pos);
        let line_start = self.line_starts[line - 1];
        let line = u32::try_from(line).unwrap_or(u32::MAX);
        (line, pos - line_start + 1)
    }
}

/// Source length in bytes, cut back to a character boundary if it does not
/// fit in `u32`.
fn saturating_len(source: &str) -> u32 {
    let mut len = source.len().min(u32::MAX as usize);
    while !source.is_char_boundary(len) {
        len -= 1;
    }
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Record the start offset of every line. A lone `\r` does not start a line.
fn compute_line_starts(source: &[u8]) -> Vec<u32> {
    let mut starts = vec![0];
    starts.extend(
        memchr::memchr_iter(b'\n', source).filter_map(|nl| u32::try_from(nl + 1).ok()),
    );
    starts
}

/// Detect BOM and interior null byte issues in source bytes.
fn detect_encoding_issues(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    detect_bom(source, issues);
    detect_interior_nulls(source, issues);
}

/// Detect byte order marks at the start of the source.
fn detect_bom(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    let (kind, len) = match source {
        [0xEF, 0xBB, 0xBF, ..] => (EncodingIssueKind::Utf8Bom, 3),
        [0xFF, 0xFE, ..] => (EncodingIssueKind::Utf16LeBom, 2),
        [0xFE, 0xFF, ..] => (EncodingIssueKind::Utf16BeBom, 2),
        _ => return,
    };
    issues.push(EncodingIssue { kind, pos: 0, len });
}

/// Detect null bytes (U+0000) within the source content.
fn detect_interior_nulls(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    for pos in memchr::memchr_iter(0, source) {
        if let Ok(pos) = u32::try_from(pos) {
            issues.push(EncodingIssue {
                kind: EncodingIssueKind::InteriorNull,
                pos,
                len: 1,
            });
        }
    }
}
