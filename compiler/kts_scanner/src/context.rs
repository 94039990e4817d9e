//! Declaration context for primary-constructor disambiguation.
//!
//! The class-header recognizer records what it saw on the `class` line; the
//! next semicolon-insertion request takes the record and clears it. The
//! context therefore applies to exactly one statement boundary: the one
//! right after the class header.

/// What the most recent class header looked like.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclContext {
    /// A `class` keyword was seen and not yet consumed by semicolon insertion.
    pub is_class_decl: bool,
    /// The header reached `{`, `;` or end of input on the `class` line.
    pub class_sig_ended: bool,
}

impl DeclContext {
    /// No class header pending.
    pub const NONE: Self = Self {
        is_class_decl: false,
        class_sig_ended: false,
    };

    /// Context recorded after a `class` keyword.
    #[inline]
    pub const fn class_header(sig_ended: bool) -> Self {
        Self {
            is_class_decl: true,
            class_sig_ended: sig_ended,
        }
    }

    /// A primary constructor may still follow on a later line.
    #[inline]
    pub const fn expects_primary_constructor(self) -> bool {
        self.is_class_decl && !self.class_sig_ended
    }

    /// Read the context and reset it.
    #[inline]
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Wire bytes, one per flag.
    #[inline]
    pub const fn encode(self) -> [u8; 2] {
        [self.is_class_decl as u8, self.class_sig_ended as u8]
    }

    /// Inverse of [`encode`](Self::encode); any non-zero byte reads as `true`.
    #[inline]
    pub const fn decode(bytes: [u8; 2]) -> Self {
        Self {
            is_class_decl: bytes[0] != 0,
            class_sig_ended: bytes[1] != 0,
        }
    }
}
