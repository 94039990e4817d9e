//! Character classes and whole-word matching shared by the recognizers.
//!
//! Every helper reads through the [`Lexer`] and consumes what it inspects;
//! there is no backtracking. A caller that needs the inspected characters in
//! its token passes [`Consume::Advance`], otherwise [`Consume::Skip`].

use kts_lexer_core::Lexer;

/// Longest keyword the recognizers look for (`constructor`).
const MAX_KEYWORD: usize = 11;

/// How inspected characters are consumed.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Consume {
    /// Keep them in the token.
    Advance,
    /// Treat them as leading trivia.
    Skip,
}

impl Consume {
    #[inline]
    pub(crate) fn step<L: Lexer + ?Sized>(self, lexer: &mut L) {
        match self {
            Consume::Advance => lexer.advance(),
            Consume::Skip => lexer.skip(),
        }
    }
}

/// Identifier continuation: letters, digits, `_`.
#[inline]
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Identifier start: letters, `_`.
#[inline]
pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// `\n` or `\r`.
#[inline]
pub(crate) fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

/// Whitespace that does not end a line.
#[inline]
pub(crate) fn is_horizontal_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0B' | '\x0C')
}

/// Consume any whitespace, line breaks included.
pub(crate) fn skip_whitespace<L: Lexer + ?Sized>(lexer: &mut L, consume: Consume) {
    while lexer.lookahead().is_whitespace() {
        consume.step(lexer);
    }
}

/// Consume spaces and tabs, stopping at a line break.
pub(crate) fn skip_horizontal_space<L: Lexer + ?Sized>(lexer: &mut L, consume: Consume) {
    while is_horizontal_space(lexer.lookahead()) {
        consume.step(lexer);
    }
}

/// Consume whitespace, `//` line comments and nested `/* */` block comments.
///
/// A lone `/` is consumed and ends the run; callers that reach it are about
/// to fail anyway.
pub(crate) fn skip_trivia<L: Lexer + ?Sized>(lexer: &mut L, consume: Consume) {
    loop {
        skip_whitespace(lexer, consume);
        if lexer.lookahead() != '/' {
            return;
        }
        consume.step(lexer);
        match lexer.lookahead() {
            '/' => {
                while !is_line_break(lexer.lookahead()) && !lexer.eof() {
                    consume.step(lexer);
                }
            }
            '*' => {
                consume.step(lexer);
                skip_block_comment_body(lexer, consume);
            }
            _ => return,
        }
    }
}

/// Consume a block comment body after the opening `/*`, up to and including
/// the matching `*/` or end of input.
fn skip_block_comment_body<L: Lexer + ?Sized>(lexer: &mut L, consume: Consume) {
    let mut depth = 1u32;
    while !lexer.eof() {
        match lexer.lookahead() {
            '*' => {
                consume.step(lexer);
                if lexer.lookahead() == '/' {
                    consume.step(lexer);
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
            }
            '/' => {
                consume.step(lexer);
                if lexer.lookahead() == '*' {
                    consume.step(lexer);
                    depth += 1;
                }
            }
            _ => consume.step(lexer),
        }
    }
}

/// Match `word` exactly, requiring a non-word character after it.
///
/// Stops at the first mismatch; the characters matched so far stay consumed.
pub(crate) fn match_word<L: Lexer + ?Sized>(lexer: &mut L, word: &str, consume: Consume) -> bool {
    for expected in word.chars() {
        if lexer.lookahead() != expected {
            return false;
        }
        consume.step(lexer);
    }
    !is_word_char(lexer.lookahead())
}

/// Words the semicolon and declaration recognizers distinguish.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Keyword {
    Import,
    Else,
    As,
    Where,
    Catch,
    Finally,
    Public,
    Private,
    Protected,
    Internal,
    Constructor,
}

impl Keyword {
    fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "import" => Keyword::Import,
            "else" => Keyword::Else,
            "as" => Keyword::As,
            "where" => Keyword::Where,
            "catch" => Keyword::Catch,
            "finally" => Keyword::Finally,
            "public" => Keyword::Public,
            "private" => Keyword::Private,
            "protected" => Keyword::Protected,
            "internal" => Keyword::Internal,
            "constructor" => Keyword::Constructor,
            _ => return None,
        })
    }

    /// Words after which a line break never ends the statement.
    pub(crate) const fn continues_statement(self) -> bool {
        matches!(
            self,
            Keyword::Else | Keyword::As | Keyword::Where | Keyword::Catch | Keyword::Finally
        )
    }

    /// `public`, `private`, `protected`, `internal`.
    pub(crate) const fn is_visibility(self) -> bool {
        matches!(
            self,
            Keyword::Public | Keyword::Private | Keyword::Protected | Keyword::Internal
        )
    }
}

/// Consume a whole word and classify it.
///
/// Only ASCII words of keyword length are buffered; anything longer or
/// non-ASCII is consumed in full and reported as `None`.
pub(crate) fn read_keyword<L: Lexer + ?Sized>(lexer: &mut L, consume: Consume) -> Option<Keyword> {
    let mut buf = [0u8; MAX_KEYWORD];
    let mut len = 0;
    let mut fits = true;
    while is_word_char(lexer.lookahead()) {
        match u8::try_from(lexer.lookahead()) {
            Ok(byte) if fits && byte.is_ascii() && len < MAX_KEYWORD => {
                buf[len] = byte;
                len += 1;
            }
            _ => fits = false,
        }
        consume.step(lexer);
    }
    if !fits {
        return None;
    }
    std::str::from_utf8(&buf[..len])
        .ok()
        .and_then(Keyword::from_word)
}
