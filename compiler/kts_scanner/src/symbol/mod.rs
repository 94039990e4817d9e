//! External token kinds and the valid-symbol set.
//!
//! The discriminants are the grammar's external-token indices: the host
//! passes a boolean vector indexed by them and reads the returned kind back
//! as an index. Reordering variants is a breaking change to the grammar.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::ConfigError;

/// A token kind the scanner can produce.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// Explicit `;` or a zero-width inserted statement terminator.
    AutomaticSemicolon = 0,
    /// End of a run of import headers.
    ImportListDelimiter = 1,
    /// `?.`, possibly with whitespace or comments between the characters.
    SafeNav = 2,
    /// `/* ... */`, nested, or unterminated at end of input.
    MultilineComment = 3,
    /// `"` or `"""`.
    StringStart = 4,
    /// The closing delimiter of the innermost open string.
    StringEnd = 5,
    /// Literal string content between delimiters and interpolations.
    StringContent = 6,
    /// `constructor` introducing a primary constructor.
    PrimaryConstructorKeyword = 7,
    /// `.` inside an import path.
    ImportDot = 8,
    /// `class` opening a class declaration header.
    ClassKeyword = 9,
}

impl TokenKind {
    /// Number of token kinds.
    pub const COUNT: usize = 10;

    /// All kinds, in external-token order.
    pub const ALL: [TokenKind; Self::COUNT] = [
        TokenKind::AutomaticSemicolon,
        TokenKind::ImportListDelimiter,
        TokenKind::SafeNav,
        TokenKind::MultilineComment,
        TokenKind::StringStart,
        TokenKind::StringEnd,
        TokenKind::StringContent,
        TokenKind::PrimaryConstructorKeyword,
        TokenKind::ImportDot,
        TokenKind::ClassKeyword,
    ];

    /// The external-token index the host uses.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Kind for an external-token index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The grammar's name for this external token.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::AutomaticSemicolon => "_automatic_semicolon",
            TokenKind::ImportListDelimiter => "_import_list_delimiter",
            TokenKind::SafeNav => "safe_nav",
            TokenKind::MultilineComment => "multiline_comment",
            TokenKind::StringStart => "_string_start",
            TokenKind::StringEnd => "_string_end",
            TokenKind::StringContent => "string_content",
            TokenKind::PrimaryConstructorKeyword => "_primary_constructor_keyword",
            TokenKind::ImportDot => "_import_dot",
            TokenKind::ClassKeyword => "_class_keyword",
        }
    }

    /// The singleton set containing this kind.
    #[inline]
    pub const fn symbol(self) -> ValidSymbols {
        ValidSymbols::from_bits_retain(1 << self as u16)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenKind {
    type Err = ConfigError;

    /// Accepts the grammar name with or without the leading underscore.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim_start_matches('_');
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().trim_start_matches('_') == wanted)
            .ok_or_else(|| ConfigError::UnknownSymbol(s.to_string()))
    }
}

bitflags! {
    /// The token kinds the grammar accepts at the current parse position.
    ///
    /// Read-only input to the dispatcher. Bit `i` corresponds to the kind
    /// with external-token index `i`.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ValidSymbols: u16 {
        const AUTOMATIC_SEMICOLON = 1 << 0;
        const IMPORT_LIST_DELIMITER = 1 << 1;
        const SAFE_NAV = 1 << 2;
        const MULTILINE_COMMENT = 1 << 3;
        const STRING_START = 1 << 4;
        const STRING_END = 1 << 5;
        const STRING_CONTENT = 1 << 6;
        const PRIMARY_CONSTRUCTOR_KEYWORD = 1 << 7;
        const IMPORT_DOT = 1 << 8;
        const CLASS_KEYWORD = 1 << 9;
    }
}

impl ValidSymbols {
    /// Build the set from the host's boolean vector.
    ///
    /// Entries past the known kinds are ignored; a short vector leaves the
    /// missing kinds invalid.
    pub fn from_flags(flags: &[bool]) -> Self {
        flags
            .iter()
            .zip(TokenKind::ALL)
            .filter(|(valid, _)| **valid)
            .fold(Self::empty(), |set, (_, kind)| set | kind.symbol())
    }

    /// Check whether `kind` is valid here.
    #[inline]
    pub const fn allows(self, kind: TokenKind) -> bool {
        self.contains(kind.symbol())
    }

    /// The host requests every symbol at once only while recovering from a
    /// syntax error. String content is never legitimately valid together
    /// with declaration-level tokens, so its presence is the signal.
    #[inline]
    pub const fn in_error_recovery(self) -> bool {
        self.contains(Self::STRING_CONTENT)
    }

    /// Kinds in the set, in external-token order.
    pub fn kinds(self) -> impl Iterator<Item = TokenKind> {
        TokenKind::ALL
            .into_iter()
            .filter(move |kind| self.allows(*kind))
    }
}

impl From<TokenKind> for ValidSymbols {
    fn from(kind: TokenKind) -> Self {
        kind.symbol()
    }
}
