//! Safe navigation `?.`.

use kts_lexer_core::Lexer;

use crate::words::{skip_trivia, Consume};

/// `?` then `.`, with whitespace or comments allowed before the `?` (leading
/// trivia) and between the two characters (kept in the token).
pub(crate) fn scan_safe_nav<L: Lexer + ?Sized>(lexer: &mut L) -> bool {
    skip_trivia(lexer, Consume::Skip);
    if lexer.lookahead() != '?' {
        return false;
    }
    lexer.advance();
    skip_trivia(lexer, Consume::Advance);
    if lexer.lookahead() != '.' {
        return false;
    }
    lexer.advance();
    lexer.mark_end();
    true
}
