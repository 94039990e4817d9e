//! String delimiters and the fixed-capacity stack of open strings.
//!
//! # Wire Encoding
//!
//! In memory a delimiter is `{ quote, triple }`. In a checkpoint it is a
//! single byte: the quote's ASCII code, plus one when triple-quoted. This
//! works because every quote the scanner opens (`"`, 34) has an even code,
//! leaving the low bit free.

use smallvec::SmallVec;

/// Size of the host's serialization buffer.
pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;

/// Bytes the declaration context occupies at the end of a checkpoint.
pub const CONTEXT_BYTES: usize = 2;

/// Maximum number of simultaneously open strings.
///
/// A full stack plus the context bytes exactly fills the host buffer.
pub const STACK_CAPACITY: usize = SERIALIZATION_BUFFER_SIZE - CONTEXT_BYTES;

/// Inline slots before the stack spills to the heap. Nesting deeper than a
/// handful of interpolated strings is rare.
const INLINE_DEPTH: usize = 8;

/// The delimiter of an open string literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delimiter {
    /// Terminator character, as an ASCII byte.
    quote: u8,
    /// `true` for `"""` strings.
    triple: bool,
}

impl Delimiter {
    /// Delimiter of a `"..."` string.
    pub const QUOTE: Delimiter = Delimiter {
        quote: b'"',
        triple: false,
    };

    /// Delimiter of a `"""..."""` string.
    pub const TRIPLE_QUOTE: Delimiter = Delimiter {
        quote: b'"',
        triple: true,
    };

    /// The terminator character.
    #[inline]
    pub fn quote(self) -> char {
        char::from(self.quote)
    }

    /// Check if the string is triple-quoted.
    #[inline]
    pub const fn is_triple(self) -> bool {
        self.triple
    }

    /// Wire byte: quote code, low bit set for triple-quoted.
    #[inline]
    pub const fn encode(self) -> u8 {
        self.quote | self.triple as u8
    }

    /// Inverse of [`encode`](Self::encode). Any byte decodes; the low bit
    /// selects triple-ness.
    #[inline]
    pub const fn decode(byte: u8) -> Self {
        Delimiter {
            quote: byte & !1,
            triple: byte & 1 == 1,
        }
    }
}

/// Stack of open string delimiters, innermost on top.
///
/// Pushing past [`STACK_CAPACITY`] or popping an empty stack is a scanner
/// defect (or a corrupted checkpoint), never bad user input, and panics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelimiterStack {
    entries: SmallVec<[Delimiter; INLINE_DEPTH]>,
}

impl DelimiterStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open strings.
    #[inline]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Check if no string is open.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The innermost open delimiter, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<Delimiter> {
        self.entries.last().copied()
    }

    /// Open a string.
    ///
    /// # Panics
    ///
    /// Panics when the stack is already at [`STACK_CAPACITY`].
    pub fn push(&mut self, delimiter: Delimiter) {
        assert!(
            self.entries.len() < STACK_CAPACITY,
            "delimiter stack overflow: {} open strings (capacity {STACK_CAPACITY})",
            self.entries.len()
        );
        self.entries.push(delimiter);
    }

    /// Close the innermost string.
    ///
    /// # Panics
    ///
    /// Panics when no string is open.
    pub fn pop(&mut self) -> Delimiter {
        match self.entries.pop() {
            Some(delimiter) => delimiter,
            None => panic!("delimiter stack underflow: closing a string that was never opened"),
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Delimiters from outermost to innermost.
    pub fn iter(&self) -> impl Iterator<Item = Delimiter> + '_ {
        self.entries.iter().copied()
    }

    /// Write the wire bytes into `buffer`, returning the count.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is shorter than the stack.
    pub fn encode_into(&self, buffer: &mut [u8]) -> usize {
        let depth = self.entries.len();
        assert!(
            buffer.len() >= depth,
            "serialization buffer too small: {} bytes for {depth} delimiters",
            buffer.len()
        );
        for (slot, delimiter) in buffer.iter_mut().zip(&self.entries) {
            *slot = delimiter.encode();
        }
        depth
    }

    /// Replace the contents with decoded wire bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` holds more than [`STACK_CAPACITY`] entries.
    pub fn decode_from(&mut self, bytes: &[u8]) {
        assert!(
            bytes.len() <= STACK_CAPACITY,
            "delimiter stack overflow: checkpoint holds {} delimiters (capacity {STACK_CAPACITY})",
            bytes.len()
        );
        self.entries.clear();
        self.entries
            .extend(bytes.iter().copied().map(Delimiter::decode));
    }
}
