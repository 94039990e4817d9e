//! Ordered rule table mapping a valid-symbol set to recognizers.
//!
//! Rules run top to bottom. A rule whose predicate rejects the valid set is
//! skipped without touching the cursor. The first rule to emit wins; a rule
//! may also stop the request outright, which the host reads as "no external
//! token here" and lexes the position itself.
//!
//! Recognizers do not backtrack, so order matters: semicolon insertion looks
//! at the raw position first, and the whitespace rule sits in front of the
//! recognizers that expect to start on a significant character. `class` and
//! `constructor` begin with the same character and share one rule.

use kts_lexer_core::Lexer;

use crate::recognize::{
    scan_automatic_semicolon, scan_declaration_keyword, scan_import_dot,
    scan_import_list_delimiter, scan_multiline_comment, scan_safe_nav, scan_string_content,
    scan_string_start, AsiOutcome, Step,
};
use crate::state::ScannerState;
use crate::words::{skip_whitespace, Consume};
use crate::{ScannerConfig, TokenKind, ValidSymbols};

/// Inputs shared by every rule of one scan request.
pub(crate) struct Request<'s> {
    pub state: &'s mut ScannerState,
    pub symbols: ValidSymbols,
    pub config: ScannerConfig,
}

/// One row of the dispatch table.
pub(crate) struct Rule<L: ?Sized> {
    /// Rule name for tracing.
    pub name: &'static str,
    /// Whether the rule applies to this valid set.
    pub applies: fn(ValidSymbols) -> bool,
    /// The recognizer.
    pub run: fn(&mut L, &mut Request<'_>) -> Step,
}

/// The dispatch table, in priority order.
pub(crate) fn rules<L: Lexer + ?Sized>() -> [Rule<L>; 9] {
    [
        Rule {
            name: "automatic_semicolon",
            applies: |symbols| symbols.allows(TokenKind::AutomaticSemicolon),
            run: automatic_semicolon,
        },
        Rule {
            name: "import_dot",
            applies: |symbols| symbols.allows(TokenKind::ImportDot),
            run: |lexer, _| scan_import_dot(lexer),
        },
        Rule {
            name: "declaration_keyword",
            applies: |symbols| {
                (symbols.allows(TokenKind::ClassKeyword)
                    || symbols.allows(TokenKind::PrimaryConstructorKeyword))
                    && !symbols.in_error_recovery()
            },
            run: |lexer, request| {
                scan_declaration_keyword(lexer, request.state, request.symbols)
                    .map_or(Step::Next, Step::Emit)
            },
        },
        Rule {
            name: "import_list_delimiter",
            applies: |symbols| symbols.allows(TokenKind::ImportListDelimiter),
            run: |lexer, _| {
                final_if(
                    scan_import_list_delimiter(lexer),
                    TokenKind::ImportListDelimiter,
                )
            },
        },
        Rule {
            name: "string_content",
            applies: |symbols| symbols.allows(TokenKind::StringContent),
            run: |lexer, request| {
                scan_string_content(lexer, &mut request.state.delimiters)
                    .map_or(Step::Next, Step::Emit)
            },
        },
        Rule {
            name: "whitespace",
            applies: |_| true,
            run: |lexer, _| {
                skip_whitespace(lexer, Consume::Skip);
                Step::Next
            },
        },
        Rule {
            name: "string_start",
            applies: |symbols| symbols.allows(TokenKind::StringStart),
            run: |lexer, request| {
                emit_if(
                    scan_string_start(lexer, &mut request.state.delimiters),
                    TokenKind::StringStart,
                )
            },
        },
        Rule {
            name: "multiline_comment",
            applies: |symbols| symbols.allows(TokenKind::MultilineComment),
            run: |lexer, _| emit_if(scan_multiline_comment(lexer), TokenKind::MultilineComment),
        },
        Rule {
            name: "safe_nav",
            applies: |symbols| symbols.allows(TokenKind::SafeNav),
            run: |lexer, _| final_if(scan_safe_nav(lexer), TokenKind::SafeNav),
        },
    ]
}

#[inline]
fn emit_if(recognized: bool, kind: TokenKind) -> Step {
    if recognized {
        Step::Emit(kind)
    } else {
        Step::Next
    }
}

/// For recognizers whose failure ends the request.
#[inline]
fn final_if(recognized: bool, kind: TokenKind) -> Step {
    if recognized {
        Step::Emit(kind)
    } else {
        Step::Stop
    }
}

/// Semicolon insertion, falling back to safe navigation when the line
/// continues with `?`.
fn automatic_semicolon<L: Lexer + ?Sized>(lexer: &mut L, request: &mut Request<'_>) -> Step {
    let outcome = scan_automatic_semicolon(
        lexer,
        request.state,
        request.symbols,
        request.config.sign_policy,
    );
    match outcome {
        AsiOutcome::Insert => Step::Emit(TokenKind::AutomaticSemicolon),
        AsiOutcome::Constructor => Step::Emit(TokenKind::PrimaryConstructorKeyword),
        AsiOutcome::Defer => Step::Stop,
        AsiOutcome::Continue
            if request.symbols.allows(TokenKind::SafeNav) && lexer.lookahead() == '?' =>
        {
            final_if(scan_safe_nav(lexer), TokenKind::SafeNav)
        }
        AsiOutcome::Continue => Step::Next,
    }
}

/// Run the table against one request.
pub(crate) fn dispatch<L: Lexer + ?Sized>(
    lexer: &mut L,
    request: &mut Request<'_>,
) -> Option<TokenKind> {
    for rule in rules::<L>() {
        if !(rule.applies)(request.symbols) {
            continue;
        }
        match (rule.run)(lexer, request) {
            Step::Emit(kind) => {
                tracing::trace!(rule = rule.name, %kind, "external token");
                return Some(kind);
            }
            Step::Stop => {
                tracing::trace!(rule = rule.name, "request stopped");
                return None;
            }
            Step::Next => tracing::trace!(rule = rule.name, "no match"),
        }
    }
    None
}
