use super::*;
use crate::context::DeclContext;
use crate::delimiter::{Delimiter, DelimiterStack};
use crate::state::ScannerState;
use crate::{SignPolicy, ValidSymbols};
use kts_lexer_core::{SourceBuffer, SourceCursor, Span};
use pretty_assertions::assert_eq;

fn text<'a>(cursor: &SourceCursor<'a>) -> &'a str {
    cursor.slice(cursor.token_span())
}

fn stack_of(delimiter: Delimiter) -> DelimiterStack {
    let mut stack = DelimiterStack::new();
    stack.push(delimiter);
    stack
}

// ─── Automatic semicolon ───────────────────────────────────────────────

fn asi(source: &str) -> AsiOutcome {
    asi_with(source, DeclContext::NONE, SignPolicy::AlwaysPrefix).0
}

fn asi_with(source: &str, context: DeclContext, policy: SignPolicy) -> (AsiOutcome, Span) {
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    let mut state = ScannerState::new();
    state.context = context;
    let symbols = ValidSymbols::AUTOMATIC_SEMICOLON | ValidSymbols::PRIMARY_CONSTRUCTOR_KEYWORD;
    let outcome = scan_automatic_semicolon(&mut cursor, &mut state, symbols, policy);
    assert_eq!(state.context, DeclContext::NONE, "context is one-shot");
    (outcome, cursor.token_span())
}

#[test]
fn asi_inserts_at_end_of_input() {
    assert_eq!(asi(""), AsiOutcome::Insert);
    assert_eq!(asi("   "), AsiOutcome::Insert);
}

#[test]
fn asi_consumes_explicit_semicolon() {
    let buf = SourceBuffer::new("a  ; b");
    let mut cursor = buf.cursor_at(1);
    let outcome = scan_automatic_semicolon(
        &mut cursor,
        &mut ScannerState::new(),
        ValidSymbols::AUTOMATIC_SEMICOLON,
        SignPolicy::AlwaysPrefix,
    );
    assert_eq!(outcome, AsiOutcome::Insert);
    assert_eq!(text(&cursor), ";");
}

#[test]
fn asi_inserted_terminator_is_zero_width() {
    let buf = SourceBuffer::new("a  \n  b");
    let mut cursor = buf.cursor_at(1);
    let outcome = scan_automatic_semicolon(
        &mut cursor,
        &mut ScannerState::new(),
        ValidSymbols::AUTOMATIC_SEMICOLON,
        SignPolicy::AlwaysPrefix,
    );
    assert_eq!(outcome, AsiOutcome::Insert);
    assert_eq!(cursor.token_span(), Span::point(1));
}

#[test]
fn asi_same_line_only_for_import() {
    assert_eq!(asi(" import x"), AsiOutcome::Insert);
    assert_eq!(asi(" in x"), AsiOutcome::Continue);
    assert_eq!(asi(" + b"), AsiOutcome::Continue);
    assert_eq!(asi(" foo"), AsiOutcome::Continue);
}

#[test]
fn asi_continuation_characters() {
    for source in [
        "\n, b", "\n.b", "\n: T", "\n* b", "\n% b", "\n> b", "\n< b", "\n= b", "\n{", "\n[0]",
        "\n(x)", "\n?.b", "\n|| b", "\n&& b",
    ] {
        assert_eq!(asi(source), AsiOutcome::Continue, "{source:?}");
    }
}

#[test]
fn asi_slash_inserts_only_before_comments() {
    assert_eq!(asi("\n/ 2"), AsiOutcome::Continue);
    assert_eq!(asi("\n// note"), AsiOutcome::Insert);
    assert_eq!(asi("\n/* note */"), AsiOutcome::Insert);
}

#[test]
fn asi_comment_on_same_line_is_not_crossed() {
    assert_eq!(asi(" /* c */\nb"), AsiOutcome::Continue);
}

#[test]
fn asi_bang() {
    assert_eq!(asi("\n!= b"), AsiOutcome::Continue);
    assert_eq!(asi("\n!done"), AsiOutcome::Insert);
}

#[test]
fn asi_sign_always_prefix() {
    assert_eq!(asi("\n+ b"), AsiOutcome::Insert);
    assert_eq!(asi("\n- b"), AsiOutcome::Insert);
}

#[test]
fn asi_sign_increment_or_digit() {
    let run = |source| asi_with(source, DeclContext::NONE, SignPolicy::IncrementOrDigit).0;
    assert_eq!(run("\n+ b"), AsiOutcome::Continue);
    assert_eq!(run("\n- b"), AsiOutcome::Continue);
    assert_eq!(run("\n++i"), AsiOutcome::Insert);
    assert_eq!(run("\n--i"), AsiOutcome::Insert);
    assert_eq!(run("\n-1"), AsiOutcome::Insert);
    assert_eq!(run("\n+-1"), AsiOutcome::Continue);
}

#[test]
fn asi_continuation_keywords() {
    for source in ["\nelse", "\n as T", "\nwhere T : Any", "\ncatch (e: E)", "\r\nfinally {"] {
        assert_eq!(asi(source), AsiOutcome::Continue, "{source:?}");
    }
    for source in ["\nelsewhere", "\nassert(x)", "\ncatcher"] {
        assert_eq!(asi(source), AsiOutcome::Insert, "{source:?}");
    }
}

#[test]
fn asi_words_starting_with_i() {
    for source in ["\nimport a", "\nin", "\ninstanceof", "\nif (x)", "\ninternal fun f()"] {
        assert_eq!(asi(source), AsiOutcome::Insert, "{source:?}");
    }
}

#[test]
fn asi_other_characters_insert() {
    for source in ["\n}", "\nval x", "\n\"s\"", "\n\n\n  x", "\r@Ann fun f()", "\n;"] {
        assert_eq!(asi(source), AsiOutcome::Insert, "{source:?}");
    }
}

#[test]
fn asi_constructor_after_open_class_header() {
    let buf = SourceBuffer::new("Foo\n  constructor(x: Int)");
    let mut cursor = buf.cursor_at(3);
    let mut state = ScannerState::new();
    state.context = DeclContext::class_header(false);
    let outcome = scan_automatic_semicolon(
        &mut cursor,
        &mut state,
        ValidSymbols::AUTOMATIC_SEMICOLON | ValidSymbols::PRIMARY_CONSTRUCTOR_KEYWORD,
        SignPolicy::AlwaysPrefix,
    );
    assert_eq!(outcome, AsiOutcome::Constructor);
    assert_eq!(text(&cursor), "constructor");
    assert_eq!(state.context, DeclContext::NONE);
}

#[test]
fn asi_constructor_without_keyword_symbol_defers() {
    let buf = SourceBuffer::new("\nconstructor()");
    let mut state = ScannerState::new();
    state.context = DeclContext::class_header(false);
    let outcome = scan_automatic_semicolon(
        &mut buf.cursor(),
        &mut state,
        ValidSymbols::AUTOMATIC_SEMICOLON,
        SignPolicy::AlwaysPrefix,
    );
    assert_eq!(outcome, AsiOutcome::Defer);
}

#[test]
fn asi_constructor_in_error_recovery_defers() {
    let buf = SourceBuffer::new("\nconstructor()");
    let mut state = ScannerState::new();
    state.context = DeclContext::class_header(false);
    let outcome = scan_automatic_semicolon(
        &mut buf.cursor(),
        &mut state,
        ValidSymbols::all(),
        SignPolicy::AlwaysPrefix,
    );
    assert_eq!(outcome, AsiOutcome::Defer);
}

#[test]
fn asi_modifiers_and_annotations_before_constructor_defer() {
    let open = DeclContext::class_header(false);
    for source in [
        "\n  private constructor()",
        "\n  internal constructor()",
        "\npublic protected constructor()",
        "\n  @Inject constructor()",
        "\n  @Inject\n  internal constructor()",
        "\n  @field.Named(\"a(b)\") @Other public constructor()",
    ] {
        assert_eq!(
            asi_with(source, open, SignPolicy::AlwaysPrefix).0,
            AsiOutcome::Defer,
            "{source:?}"
        );
    }
}

#[test]
fn asi_modifiers_without_constructor_insert() {
    let open = DeclContext::class_header(false);
    for source in ["\nprivate val x = 1", "\n@Ann fun f()", "\ninternal class Bar"] {
        assert_eq!(
            asi_with(source, open, SignPolicy::AlwaysPrefix).0,
            AsiOutcome::Insert,
            "{source:?}"
        );
    }
}

#[test]
fn asi_constructor_needs_open_header() {
    assert_eq!(asi("\nconstructor(x)"), AsiOutcome::Insert);
    assert_eq!(asi("\nprivate constructor(x)"), AsiOutcome::Insert);
    let closed = DeclContext::class_header(true);
    assert_eq!(
        asi_with("\nconstructor(x)", closed, SignPolicy::AlwaysPrefix).0,
        AsiOutcome::Insert
    );
}

// ─── Strings ───────────────────────────────────────────────────────────

#[test]
fn string_start_single_and_triple() {
    let buf = SourceBuffer::new("\"abc\"");
    let mut cursor = buf.cursor();
    let mut stack = DelimiterStack::new();
    assert!(scan_string_start(&mut cursor, &mut stack));
    assert_eq!(text(&cursor), "\"");
    assert_eq!(stack.peek(), Some(Delimiter::QUOTE));

    let buf = SourceBuffer::new("\"\"\"abc");
    let mut cursor = buf.cursor();
    let mut stack = DelimiterStack::new();
    assert!(scan_string_start(&mut cursor, &mut stack));
    assert_eq!(text(&cursor), "\"\"\"");
    assert_eq!(stack.peek(), Some(Delimiter::TRIPLE_QUOTE));
}

#[test]
fn string_start_empty_string_covers_first_quote() {
    let buf = SourceBuffer::new("\"\" + x");
    let mut cursor = buf.cursor();
    let mut stack = DelimiterStack::new();
    assert!(scan_string_start(&mut cursor, &mut stack));
    assert_eq!(cursor.token_span(), Span::new(0, 1));
    assert_eq!(stack.peek(), Some(Delimiter::QUOTE));
}

#[test]
fn string_start_requires_quote() {
    let buf = SourceBuffer::new("'c'");
    let mut stack = DelimiterStack::new();
    assert!(!scan_string_start(&mut buf.cursor(), &mut stack));
    assert!(stack.is_empty());
}

/// Scan content requests until the string closes, collecting `(kind, text)`.
fn string_tokens(body: &str, delimiter: Delimiter) -> Vec<(TokenKind, String)> {
    let buf = SourceBuffer::new(body);
    let mut stack = stack_of(delimiter);
    let mut pos = 0;
    let mut tokens = Vec::new();
    while !stack.is_empty() {
        let mut cursor = buf.cursor_at(pos);
        let Some(kind) = scan_string_content(&mut cursor, &mut stack) else {
            break;
        };
        tokens.push((kind, text(&cursor).to_string()));
        pos = cursor.token_span().end;
    }
    tokens
}

fn tokens(expected: &[(TokenKind, &str)]) -> Vec<(TokenKind, String)> {
    expected
        .iter()
        .map(|&(kind, text)| (kind, text.to_string()))
        .collect()
}

#[test]
fn string_content_then_end() {
    assert_eq!(
        string_tokens("abc\"", Delimiter::QUOTE),
        tokens(&[
            (TokenKind::StringContent, "abc"),
            (TokenKind::StringEnd, "\"")
        ])
    );
}

#[test]
fn string_escaped_dollar_before_end() {
    assert_eq!(
        string_tokens("aa\\$\"", Delimiter::QUOTE),
        tokens(&[
            (TokenKind::StringContent, "aa\\$"),
            (TokenKind::StringEnd, "\"")
        ])
    );
}

#[test]
fn string_escaped_quote_is_content() {
    assert_eq!(
        string_tokens("say \\\"hi\\\"\"", Delimiter::QUOTE),
        tokens(&[
            (TokenKind::StringContent, "say \\\"hi\\\""),
            (TokenKind::StringEnd, "\"")
        ])
    );
}

#[test]
fn string_triple_keeps_short_quote_runs() {
    assert_eq!(
        string_tokens("a\"b\"\"\"", Delimiter::TRIPLE_QUOTE),
        tokens(&[
            (TokenKind::StringContent, "a\"b"),
            (TokenKind::StringEnd, "\"\"\"")
        ])
    );
    assert_eq!(
        string_tokens("x\"\"y\"\"\"", Delimiter::TRIPLE_QUOTE),
        tokens(&[
            (TokenKind::StringContent, "x\"\"y"),
            (TokenKind::StringEnd, "\"\"\"")
        ])
    );
}

#[test]
fn string_triple_extra_quotes_fold_into_end() {
    assert_eq!(
        string_tokens("\"\"\"\"\"", Delimiter::TRIPLE_QUOTE),
        tokens(&[(TokenKind::StringEnd, "\"\"\"\"\"")])
    );
}

#[test]
fn string_content_stops_before_interpolation() {
    let buf = SourceBuffer::new("ab$name\"");
    let mut cursor = buf.cursor();
    let mut stack = stack_of(Delimiter::QUOTE);
    assert_eq!(
        scan_string_content(&mut cursor, &mut stack),
        Some(TokenKind::StringContent)
    );
    assert_eq!(text(&cursor), "ab");

    for source in ["$name\"", "${x}\"", "$_x\""] {
        let buf = SourceBuffer::new(source);
        let mut stack = stack_of(Delimiter::QUOTE);
        assert_eq!(scan_string_content(&mut buf.cursor(), &mut stack), None, "{source:?}");
        assert_eq!(stack.depth(), 1);
    }
}

#[test]
fn string_lone_dollar_is_content() {
    let buf = SourceBuffer::new("$ 5\"");
    let mut cursor = buf.cursor();
    let mut stack = stack_of(Delimiter::QUOTE);
    assert_eq!(
        scan_string_content(&mut cursor, &mut stack),
        Some(TokenKind::StringContent)
    );
    assert_eq!(text(&cursor), "$");
}

#[test]
fn string_content_fails_without_open_string_or_at_eof() {
    let buf = SourceBuffer::new("abc");
    assert_eq!(scan_string_content(&mut buf.cursor(), &mut DelimiterStack::new()), None);
    let mut stack = stack_of(Delimiter::QUOTE);
    assert_eq!(scan_string_content(&mut buf.cursor(), &mut stack), None);
    assert_eq!(stack.depth(), 1);
}

// ─── Comments & safe navigation ────────────────────────────────────────

#[test]
fn multiline_comment_nests() {
    let buf = SourceBuffer::new("/* a /* b */ c */ d");
    let mut cursor = buf.cursor();
    assert!(scan_multiline_comment(&mut cursor));
    assert_eq!(text(&cursor), "/* a /* b */ c */");
}

#[test]
fn multiline_comment_unterminated_at_eof() {
    let buf = SourceBuffer::new("/* unterminated");
    let mut cursor = buf.cursor();
    assert!(scan_multiline_comment(&mut cursor));
    assert_eq!(text(&cursor), "/* unterminated");
}

#[test]
fn multiline_comment_rejects_interior_nul() {
    let buf = SourceBuffer::new("/* a \0 b */");
    assert!(!scan_multiline_comment(&mut buf.cursor()));
}

#[test]
fn multiline_comment_requires_opener() {
    for source in ["// line", "/ 2", "x"] {
        let buf = SourceBuffer::new(source);
        assert!(!scan_multiline_comment(&mut buf.cursor()), "{source:?}");
    }
}

#[test]
fn safe_nav_skips_leading_comment() {
    let buf = SourceBuffer::new(" /* c */ ?. b");
    let mut cursor = buf.cursor();
    assert!(scan_safe_nav(&mut cursor));
    assert_eq!(text(&cursor), "?.");
}

#[test]
fn safe_nav_keeps_inner_trivia() {
    let buf = SourceBuffer::new("?\n  // c\n  .b");
    let mut cursor = buf.cursor();
    assert!(scan_safe_nav(&mut cursor));
    assert_eq!(text(&cursor), "?\n  // c\n  .");
}

#[test]
fn safe_nav_rejects_elvis() {
    let buf = SourceBuffer::new("?: b");
    assert!(!scan_safe_nav(&mut buf.cursor()));
}

// ─── Imports ───────────────────────────────────────────────────────────

fn delimiter(source: &str) -> Option<Span> {
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    scan_import_list_delimiter(&mut cursor).then(|| cursor.token_span())
}

#[test]
fn import_list_ends_at_eof() {
    assert_eq!(delimiter(""), Some(Span::point(0)));
}

#[test]
fn import_list_ends_at_blank_line() {
    assert_eq!(delimiter("\n\nfun main()"), Some(Span::new(0, 2)));
    assert_eq!(delimiter("  \r\n \n"), Some(Span::new(0, 6)));
}

#[test]
fn import_list_ends_before_other_statement() {
    assert_eq!(delimiter("\nfun main()"), Some(Span::point(0)));
    assert_eq!(delimiter("\n   val x = 1"), Some(Span::point(0)));
    assert_eq!(delimiter("\nimported()"), Some(Span::point(0)));
}

#[test]
fn import_list_continues() {
    assert_eq!(delimiter("\nimport b"), None);
    assert_eq!(delimiter("\r\n  import b"), None);
}

#[test]
fn import_list_needs_line_break() {
    assert_eq!(delimiter(" as x"), None);
}

#[test]
fn import_dot_plain() {
    let buf = SourceBuffer::new(".bar");
    let mut cursor = buf.cursor();
    assert_eq!(scan_import_dot(&mut cursor), Step::Emit(TokenKind::ImportDot));
    assert_eq!(text(&cursor), ".");
}

#[test]
fn import_dot_with_trailing_space() {
    let buf = SourceBuffer::new(". *");
    let mut cursor = buf.cursor();
    assert_eq!(scan_import_dot(&mut cursor), Step::Emit(TokenKind::ImportDot));
    assert_eq!(text(&cursor), ". ");
}

#[test]
fn import_dot_before_next_import_is_terminator() {
    let buf = SourceBuffer::new("a.\nimport b");
    let mut cursor = buf.cursor_at(1);
    assert_eq!(
        scan_import_dot(&mut cursor),
        Step::Emit(TokenKind::AutomaticSemicolon)
    );
    assert_eq!(cursor.token_span(), Span::point(1));
}

#[test]
fn import_dot_at_line_end_is_still_a_dot() {
    let buf = SourceBuffer::new(".\nfun main()");
    let mut cursor = buf.cursor();
    assert_eq!(scan_import_dot(&mut cursor), Step::Emit(TokenKind::ImportDot));
    assert_eq!(text(&cursor), ".\n");

    let buf = SourceBuffer::new("a. \n\n  val x");
    let mut cursor = buf.cursor_at(1);
    assert_eq!(scan_import_dot(&mut cursor), Step::Emit(TokenKind::ImportDot));
    assert_eq!(cursor.token_span(), Span::new(1, 7));
}

#[test]
fn import_dot_before_other_i_word_stops_request() {
    let buf = SourceBuffer::new(".\ninternal fun f()");
    assert_eq!(scan_import_dot(&mut buf.cursor()), Step::Stop);
}

#[test]
fn import_dot_needs_dot() {
    let buf = SourceBuffer::new("bar");
    assert_eq!(scan_import_dot(&mut buf.cursor()), Step::Next);
}

// ─── Class headers ─────────────────────────────────────────────────────

fn class_header(source: &str) -> Option<(String, DeclContext)> {
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    let mut state = ScannerState::new();
    let kind = scan_declaration_keyword(&mut cursor, &mut state, ValidSymbols::CLASS_KEYWORD);
    (kind == Some(TokenKind::ClassKeyword)).then(|| (text(&cursor).to_string(), state.context))
}

fn declaration_keyword(source: &str, symbols: ValidSymbols) -> Option<(TokenKind, String)> {
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    let mut state = ScannerState::new();
    scan_declaration_keyword(&mut cursor, &mut state, symbols)
        .map(|kind| (kind, text(&cursor).to_string()))
}

#[test]
fn class_header_signature_ends_on_line() {
    assert_eq!(
        class_header("class Foo(val x: Int) {"),
        Some(("class".to_string(), DeclContext::class_header(true)))
    );
    assert_eq!(
        class_header("  class Foo;"),
        Some(("class".to_string(), DeclContext::class_header(true)))
    );
    assert_eq!(
        class_header("class Foo"),
        Some(("class".to_string(), DeclContext::class_header(true)))
    );
}

#[test]
fn class_header_continues_on_next_line() {
    assert_eq!(
        class_header("class Foo\n  constructor(x: Int)"),
        Some(("class".to_string(), DeclContext::class_header(false)))
    );
    assert_eq!(
        class_header("class Foo<T> : Bar\r\n{"),
        Some(("class".to_string(), DeclContext::class_header(false)))
    );
}

#[test]
fn class_header_requires_whole_word() {
    assert_eq!(class_header("classifier"), None);
    assert_eq!(class_header("Class Foo"), None);
}

#[test]
fn class_header_ignores_braces_inside_parens() {
    assert_eq!(
        class_header("class Foo(val f: () -> Unit = {})\n"),
        Some(("class".to_string(), DeclContext::class_header(false)))
    );
    assert_eq!(
        class_header("class Foo(val f: () -> Unit = {}) {"),
        Some(("class".to_string(), DeclContext::class_header(true)))
    );
}

#[test]
fn class_header_stops_at_line_comment() {
    assert_eq!(
        class_header("class Foo // {\n"),
        Some(("class".to_string(), DeclContext::class_header(false)))
    );
    assert_eq!(
        class_header("class Foo<A, B> where A : B/C {"),
        Some(("class".to_string(), DeclContext::class_header(true)))
    );
}

#[test]
fn primary_constructor_same_line() {
    let symbols = ValidSymbols::PRIMARY_CONSTRUCTOR_KEYWORD;
    assert_eq!(
        declaration_keyword("  constructor(x: Int)", symbols),
        Some((TokenKind::PrimaryConstructorKeyword, "constructor".to_string()))
    );
    assert_eq!(declaration_keyword("constructors", symbols), None);
}

#[test]
fn declaration_keyword_picks_by_second_char() {
    let both = ValidSymbols::CLASS_KEYWORD | ValidSymbols::PRIMARY_CONSTRUCTOR_KEYWORD;
    assert_eq!(
        declaration_keyword("constructor(x: Int)", both),
        Some((TokenKind::PrimaryConstructorKeyword, "constructor".to_string()))
    );
    assert_eq!(
        declaration_keyword("class Foo", both),
        Some((TokenKind::ClassKeyword, "class".to_string()))
    );
    assert_eq!(
        declaration_keyword("class Foo", ValidSymbols::PRIMARY_CONSTRUCTOR_KEYWORD),
        None
    );
    assert_eq!(
        declaration_keyword("constructor()", ValidSymbols::CLASS_KEYWORD),
        None
    );
}
