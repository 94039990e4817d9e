//! Import headers: the end of an import list and dots inside import paths.

use kts_lexer_core::Lexer;

use crate::recognize::Step;
use crate::words::{
    is_horizontal_space, is_line_break, match_word, skip_horizontal_space, skip_whitespace,
    Consume,
};
use crate::TokenKind;

/// End of a run of import headers.
///
/// Zero-width at end of input and in front of a non-`import` line; covers
/// the line breaks when a blank line ends the list. Fails while the next
/// line is another `import`, or when no line break follows at all.
pub(crate) fn scan_import_list_delimiter<L: Lexer + ?Sized>(lexer: &mut L) -> bool {
    lexer.mark_end();
    if lexer.eof() {
        return true;
    }
    if !line_separator(lexer) {
        return false;
    }
    if line_separator(lexer) {
        lexer.mark_end();
        return true;
    }
    skip_horizontal_space(lexer, Consume::Advance);
    !match_word(lexer, "import", Consume::Advance)
}

/// Consume horizontal whitespace and one line separator (LF, CR or CRLF).
fn line_separator<L: Lexer + ?Sized>(lexer: &mut L) -> bool {
    let mut after_cr = false;
    loop {
        match lexer.lookahead() {
            c if is_horizontal_space(c) && !after_cr => lexer.advance(),
            '\n' => {
                lexer.advance();
                return true;
            }
            '\r' if !after_cr => {
                after_cr = true;
                lexer.advance();
            }
            _ => return after_cr,
        }
    }
}

/// A `.` inside an import path.
///
/// The token end is marked before the dot. When the path breaks off at the
/// end of a line and the next line is another `import`, the result is a
/// zero-width terminator at that mark, so the malformed header does not
/// swallow the next one. Any other next line leaves an ordinary dot token
/// covering the dot and the whitespace after it.
///
/// Telling `import` from another word starting with `i` consumes part of
/// that word, and the end mark cannot move back behind it. That one case
/// fails the request so the grammar lexes the dot itself.
pub(crate) fn scan_import_dot<L: Lexer + ?Sized>(lexer: &mut L) -> Step {
    if lexer.lookahead() != '.' {
        return Step::Next;
    }
    lexer.mark_end();
    lexer.advance();

    if !lexer.lookahead().is_whitespace() {
        lexer.mark_end();
        return Step::Emit(TokenKind::ImportDot);
    }
    skip_horizontal_space(lexer, Consume::Advance);
    if !is_line_break(lexer.lookahead()) {
        lexer.mark_end();
        return Step::Emit(TokenKind::ImportDot);
    }
    skip_whitespace(lexer, Consume::Advance);
    if lexer.lookahead() != 'i' {
        lexer.mark_end();
        return Step::Emit(TokenKind::ImportDot);
    }
    if match_word(lexer, "import", Consume::Advance) {
        Step::Emit(TokenKind::AutomaticSemicolon)
    } else {
        Step::Stop
    }
}
