//! Class headers and the primary-constructor keyword.
//!
//! A class header may break across lines before its primary constructor:
//!
//! ```text
//! class Foo
//!     @Inject private constructor(x: Int)
//! ```
//!
//! Semicolon insertion would end the declaration at the line break. The
//! class recognizer records whether the header is still open at the end of
//! its line so the next insertion request can tell.

use kts_lexer_core::Lexer;
use tracing::debug;

use crate::context::DeclContext;
use crate::state::ScannerState;
use crate::words::{is_line_break, match_word, skip_whitespace, Consume};
use crate::{TokenKind, ValidSymbols};

/// The whole word `class` or `constructor`, after any whitespace.
///
/// Both words start with `c`, and that character is consumed before the
/// second one decides which keyword to finish. Only the keywords `symbols`
/// allows are tried.
pub(crate) fn scan_declaration_keyword<L: Lexer + ?Sized>(
    lexer: &mut L,
    state: &mut ScannerState,
    symbols: ValidSymbols,
) -> Option<TokenKind> {
    skip_whitespace(lexer, Consume::Skip);
    if lexer.lookahead() != 'c' {
        return None;
    }
    lexer.advance();
    match lexer.lookahead() {
        'l' if symbols.allows(TokenKind::ClassKeyword) => {
            if !match_word(lexer, "lass", Consume::Advance) {
                return None;
            }
            lexer.mark_end();
            record_class_header(lexer, state);
            Some(TokenKind::ClassKeyword)
        }
        'o' if symbols.allows(TokenKind::PrimaryConstructorKeyword) => {
            if !match_word(lexer, "onstructor", Consume::Advance) {
                return None;
            }
            lexer.mark_end();
            Some(TokenKind::PrimaryConstructorKeyword)
        }
        _ => None,
    }
}

/// Inspect the rest of the line after `class`; none of it joins the token.
///
/// The header signature ends on this line if a `{` or `;` outside
/// parentheses (or end of input) comes before the line break or a `//`
/// comment.
fn record_class_header<L: Lexer + ?Sized>(lexer: &mut L, state: &mut ScannerState) {
    let mut parens = 0u32;
    let sig_ended = loop {
        match lexer.lookahead() {
            '{' | ';' if parens == 0 => break true,
            c if is_line_break(c) => break false,
            _ if lexer.eof() => break true,
            '(' => {
                parens += 1;
                lexer.advance();
            }
            ')' => {
                parens = parens.saturating_sub(1);
                lexer.advance();
            }
            '/' => {
                lexer.advance();
                if lexer.lookahead() == '/' {
                    break false;
                }
            }
            _ => lexer.advance(),
        }
    };
    state.context = DeclContext::class_header(sig_ended);
    debug!(sig_ended, "class header context recorded");
}
