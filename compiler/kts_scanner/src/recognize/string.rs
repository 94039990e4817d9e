//! String delimiters and literal content.
//!
//! Strings are split into START, a run of CONTENT tokens and END. The grammar
//! lexes interpolations (`$name`, `${...}`) itself, which is why content
//! stops in front of every `$` that begins one.

use kts_lexer_core::Lexer;

use crate::delimiter::{Delimiter, DelimiterStack};
use crate::words::is_ident_start;
use crate::TokenKind;

/// Quotes in a triple-quoted delimiter.
const TRIPLE: usize = 3;

/// `"` or `"""`. Pushes the delimiter.
///
/// `""` is an empty single-quoted string: the token covers the first quote
/// only and the second one closes it.
pub(crate) fn scan_string_start<L: Lexer + ?Sized>(
    lexer: &mut L,
    stack: &mut DelimiterStack,
) -> bool {
    if lexer.lookahead() != '"' {
        return false;
    }
    lexer.advance();
    lexer.mark_end();
    for _ in 1..TRIPLE {
        if lexer.lookahead() != '"' {
            stack.push(Delimiter::QUOTE);
            return true;
        }
        lexer.advance();
    }
    lexer.mark_end();
    stack.push(Delimiter::TRIPLE_QUOTE);
    true
}

/// Content or the closing delimiter of the innermost open string.
///
/// Fails when no string is open, in front of an interpolation, and at end
/// of input.
pub(crate) fn scan_string_content<L: Lexer + ?Sized>(
    lexer: &mut L,
    stack: &mut DelimiterStack,
) -> Option<TokenKind> {
    let delimiter = stack.peek()?;
    let quote = delimiter.quote();
    let mut has_content = false;
    loop {
        match lexer.lookahead() {
            '\0' => return None,
            '$' => {
                if has_content {
                    lexer.mark_end();
                    return Some(TokenKind::StringContent);
                }
                lexer.advance();
                let next = lexer.lookahead();
                if is_ident_start(next) || next == '{' {
                    return None;
                }
                lexer.mark_end();
                return Some(TokenKind::StringContent);
            }
            '\\' => {
                lexer.advance();
                if !lexer.eof() {
                    lexer.advance();
                }
                has_content = true;
            }
            c if c == quote && delimiter.is_triple() => {
                lexer.mark_end();
                let mut run = 0;
                while run < TRIPLE && lexer.lookahead() == quote {
                    lexer.advance();
                    run += 1;
                }
                if run < TRIPLE {
                    has_content = true;
                    continue;
                }
                // Content ends before the run; the next request closes.
                if has_content {
                    return Some(TokenKind::StringContent);
                }
                while lexer.lookahead() == quote {
                    lexer.advance();
                }
                lexer.mark_end();
                stack.pop();
                return Some(TokenKind::StringEnd);
            }
            c if c == quote => {
                if has_content {
                    lexer.mark_end();
                    return Some(TokenKind::StringContent);
                }
                lexer.advance();
                lexer.mark_end();
                stack.pop();
                return Some(TokenKind::StringEnd);
            }
            _ => {
                lexer.advance();
                has_content = true;
            }
        }
    }
}
