//! Nested block comments.

use kts_lexer_core::Lexer;

/// `/* ... */`, nesting on every inner `/*`.
///
/// A comment still open at end of input is accepted as complete. An interior
/// NUL character rejects it.
pub(crate) fn scan_multiline_comment<L: Lexer + ?Sized>(lexer: &mut L) -> bool {
    if lexer.lookahead() != '/' {
        return false;
    }
    lexer.advance();
    if lexer.lookahead() != '*' {
        return false;
    }
    lexer.advance();

    let mut after_star = false;
    let mut depth = 1u32;
    loop {
        match lexer.lookahead() {
            '*' => {
                lexer.advance();
                after_star = true;
            }
            '/' => {
                lexer.advance();
                if after_star {
                    after_star = false;
                    depth -= 1;
                    if depth == 0 {
                        lexer.mark_end();
                        return true;
                    }
                } else if lexer.lookahead() == '*' {
                    lexer.advance();
                    depth += 1;
                }
            }
            '\0' if lexer.eof() => {
                lexer.mark_end();
                return true;
            }
            '\0' => return false,
            _ => {
                lexer.advance();
                after_star = false;
            }
        }
    }
}
