//! Automatic semicolon insertion.
//!
//! Called with the cursor right after the previous token. The token end is
//! marked before anything is read, so an inserted terminator is zero-width
//! at that position no matter how far the lookahead wanders. An explicit `;`
//! is consumed and becomes the token instead.
//!
//! Only whitespace is crossed while looking for the line break. Comments are
//! left for the comment recognizer; the decision table sees their `/`.

use kts_lexer_core::Lexer;
use tracing::debug;

use crate::context::DeclContext;
use crate::state::ScannerState;
use crate::words::{
    is_ident_start, is_word_char, match_word, read_keyword, skip_whitespace, Consume, Keyword,
};
use crate::{SignPolicy, TokenKind, ValidSymbols};

/// Result of a semicolon-insertion attempt.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum AsiOutcome {
    /// A statement terminator, zero-width or an explicit `;`.
    Insert,
    /// The line after a class header starts with `constructor`; the keyword
    /// is the token.
    Constructor,
    /// The statement continues on the next line.
    Continue,
    /// A modifier or annotation leads up to a primary constructor. The
    /// grammar has to lex it itself, so the whole request must fail.
    Defer,
}

pub(crate) fn scan_automatic_semicolon<L: Lexer + ?Sized>(
    lexer: &mut L,
    state: &mut ScannerState,
    symbols: ValidSymbols,
    sign_policy: SignPolicy,
) -> AsiOutcome {
    let context = state.context.take();
    if context.is_class_decl {
        debug!(
            sig_ended = context.class_sig_ended,
            "class header context consumed"
        );
    }
    lexer.mark_end();

    let mut same_line = true;
    loop {
        if lexer.eof() {
            return AsiOutcome::Insert;
        }
        match lexer.lookahead() {
            ';' => return explicit_semicolon(lexer),
            '\n' => {
                lexer.skip();
                same_line = false;
                break;
            }
            '\r' => {
                lexer.skip();
                if lexer.lookahead() == '\n' {
                    lexer.skip();
                }
                same_line = false;
                break;
            }
            c if c.is_whitespace() => lexer.skip(),
            _ => break,
        }
    }

    if same_line {
        return if lexer.lookahead() == 'i' && match_word(lexer, "import", Consume::Skip) {
            AsiOutcome::Insert
        } else {
            AsiOutcome::Continue
        };
    }

    skip_whitespace(lexer, Consume::Skip);
    match lexer.lookahead() {
        ',' | '.' | ':' | '*' | '%' | '>' | '<' | '=' | '{' | '[' | '(' | '?' | '|' | '&' => {
            AsiOutcome::Continue
        }
        // `//` and `/*` start a comment; a lone `/` divides.
        '/' => {
            lexer.skip();
            insert_if(matches!(lexer.lookahead(), '/' | '*'))
        }
        sign @ ('+' | '-') => line_leading_sign(lexer, sign, sign_policy),
        '!' => {
            lexer.skip();
            insert_if(lexer.lookahead() != '=')
        }
        ';' => explicit_semicolon(lexer),
        '@' if context.expects_primary_constructor() => {
            if constructor_follows(lexer) {
                AsiOutcome::Defer
            } else {
                AsiOutcome::Insert
            }
        }
        c if is_ident_start(c) => line_leading_word(lexer, context, symbols),
        _ => AsiOutcome::Insert,
    }
}

#[inline]
fn insert_if(insert: bool) -> AsiOutcome {
    if insert {
        AsiOutcome::Insert
    } else {
        AsiOutcome::Continue
    }
}

fn explicit_semicolon<L: Lexer + ?Sized>(lexer: &mut L) -> AsiOutcome {
    lexer.advance();
    lexer.mark_end();
    AsiOutcome::Insert
}

fn line_leading_sign<L: Lexer + ?Sized>(
    lexer: &mut L,
    sign: char,
    sign_policy: SignPolicy,
) -> AsiOutcome {
    match sign_policy {
        SignPolicy::AlwaysPrefix => AsiOutcome::Insert,
        SignPolicy::IncrementOrDigit => {
            lexer.skip();
            let next = lexer.lookahead();
            insert_if(next == sign || next.is_ascii_digit())
        }
    }
}

/// The word is read with `advance` so that, when it is `constructor`, the
/// token starts at its first character.
fn line_leading_word<L: Lexer + ?Sized>(
    lexer: &mut L,
    context: DeclContext,
    symbols: ValidSymbols,
) -> AsiOutcome {
    let Some(keyword) = read_keyword(lexer, Consume::Advance) else {
        return AsiOutcome::Insert;
    };
    let expects_constructor = context.expects_primary_constructor();
    match keyword {
        k if k.continues_statement() => AsiOutcome::Continue,
        Keyword::Constructor if expects_constructor => {
            if symbols.allows(TokenKind::PrimaryConstructorKeyword) && !symbols.in_error_recovery()
            {
                lexer.mark_end();
                AsiOutcome::Constructor
            } else {
                AsiOutcome::Defer
            }
        }
        k if k.is_visibility() && expects_constructor => {
            if constructor_follows(lexer) {
                AsiOutcome::Defer
            } else {
                AsiOutcome::Insert
            }
        }
        _ => AsiOutcome::Insert,
    }
}

/// Walk visibility modifiers and annotations, which may span lines, and
/// report whether they end in the word `constructor`.
fn constructor_follows<L: Lexer + ?Sized>(lexer: &mut L) -> bool {
    loop {
        skip_whitespace(lexer, Consume::Advance);
        match lexer.lookahead() {
            '@' => {
                lexer.advance();
                skip_annotation(lexer);
            }
            c if is_ident_start(c) => match read_keyword(lexer, Consume::Advance) {
                Some(Keyword::Constructor) => return true,
                Some(keyword) if keyword.is_visibility() => {}
                _ => return false,
            },
            _ => return false,
        }
    }
}

/// Consume an annotation after its `@`: a dotted name and an optional
/// parenthesized argument list.
fn skip_annotation<L: Lexer + ?Sized>(lexer: &mut L) {
    while is_word_char(lexer.lookahead()) || lexer.lookahead() == '.' {
        lexer.advance();
    }
    if lexer.lookahead() != '(' {
        return;
    }
    let mut depth = 0u32;
    while !lexer.eof() {
        match lexer.lookahead() {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    lexer.advance();
                    return;
                }
            }
            _ => {}
        }
        lexer.advance();
    }
}
