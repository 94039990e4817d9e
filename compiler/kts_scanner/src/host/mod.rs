//! A debugging host that drives the scanner over a whole file.
//!
//! The real host is a generated parser that knows exactly which external
//! tokens are valid at every position. This one approximates it with a few
//! flags (inside a string, inside an import header, after a class keyword,
//! after a token that can end a statement) and lexes everything the
//! scanner declines as a coarse grammar token: a word, a character literal,
//! a line comment, or a single character.
//!
//! Like the real host it restores the checkpoint of the last external
//! token before every request and rewinds the cursor when a request fails.
//! A zero-width token is never requested twice at the same offset.

use kts_lexer_core::{SourceBuffer, Span};

use crate::state::Checkpoint;
use crate::words::{is_ident_start, is_line_break, is_word_char};
use crate::{Scanner, ScannerConfig, TokenKind, ValidSymbols};

/// Words after which a line break never ends a statement.
const OPEN_WORDS: &[&str] = &[
    "val", "var", "fun", "if", "while", "for", "when", "is", "in", "as", "import", "package",
    "typealias", "interface", "object", "try", "do", "class", "public", "private", "protected",
    "internal", "data", "sealed", "enum", "open", "abstract", "override", "inline", "suspend",
    "const", "lateinit",
];

/// An external token with the checkpoint taken right after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalToken {
    pub kind: TokenKind,
    pub span: Span,
    pub checkpoint: Checkpoint,
}

/// Lexing mode of the debug host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    /// Inside a string literal, between interpolations.
    String,
    /// Inside `${...}`; counts nested braces.
    Interpolation { braces: u32 },
}

/// Run the scanner over `source` and collect every external token.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize(source: &SourceBuffer, config: ScannerConfig) -> Vec<ExternalToken> {
    let mut host = Host::new(source, config);
    host.run();
    tracing::debug!(tokens = host.tokens.len(), "tokenize finished");
    host.tokens
}

struct Host<'a> {
    source: &'a SourceBuffer,
    text: &'a str,
    scanner: Scanner,
    checkpoint: Checkpoint,
    modes: Vec<Mode>,
    pos: u32,
    /// Kinds already emitted zero-width at `pos`.
    spent: ValidSymbols,
    can_end_statement: bool,
    import_header: bool,
    import_list_open: bool,
    class_header: bool,
    after_member_access: bool,
    tokens: Vec<ExternalToken>,
}

impl<'a> Host<'a> {
    fn new(source: &'a SourceBuffer, config: ScannerConfig) -> Self {
        let scanner = Scanner::with_config(config);
        Host {
            source,
            text: source.as_str(),
            checkpoint: scanner.checkpoint(),
            scanner,
            modes: Vec::new(),
            pos: 0,
            spent: ValidSymbols::empty(),
            can_end_statement: false,
            import_header: false,
            import_list_open: false,
            class_header: false,
            after_member_access: false,
            tokens: Vec::new(),
        }
    }

    fn run(&mut self) {
        loop {
            match self.request() {
                Some((kind, span)) if span.end > self.pos || !self.spent.allows(kind) => {
                    self.accept(kind, span);
                }
                _ if self.pos >= self.source.len() => break,
                _ => self.lex_grammar_token(),
            }
        }
    }

    fn in_string(&self) -> bool {
        matches!(self.modes.last(), Some(Mode::String))
    }

    /// Ask the scanner for a token at `pos`, the way the parser would.
    fn request(&mut self) -> Option<(TokenKind, Span)> {
        if self.in_string() {
            return self.scan(ValidSymbols::STRING_CONTENT | ValidSymbols::STRING_END);
        }
        // Semicolon insertion first, on its own, so a failed attempt cannot
        // disturb the other recognizers.
        if self.can_end_statement && !self.spent.allows(TokenKind::AutomaticSemicolon) {
            let mut symbols = ValidSymbols::AUTOMATIC_SEMICOLON | ValidSymbols::SAFE_NAV;
            if self.class_header {
                symbols |= ValidSymbols::PRIMARY_CONSTRUCTOR_KEYWORD;
            }
            if let Some(token) = self.scan(symbols) {
                return Some(token);
            }
        }
        self.scan(self.code_symbols())
    }

    fn code_symbols(&self) -> ValidSymbols {
        let mut symbols =
            ValidSymbols::MULTILINE_COMMENT | ValidSymbols::STRING_START | ValidSymbols::SAFE_NAV;
        if self.import_header {
            symbols |= ValidSymbols::IMPORT_DOT;
        }
        if self.import_list_open {
            symbols |= ValidSymbols::IMPORT_LIST_DELIMITER;
        }
        if self.class_header {
            symbols |= ValidSymbols::PRIMARY_CONSTRUCTOR_KEYWORD;
        } else if !self.after_member_access && !self.import_list_open {
            // Declarations only start once the import list is closed.
            symbols |= ValidSymbols::CLASS_KEYWORD;
        }
        symbols.difference(self.spent)
    }

    fn scan(&mut self, symbols: ValidSymbols) -> Option<(TokenKind, Span)> {
        self.scanner.restore(&self.checkpoint);
        let mut cursor = self.source.cursor_at(self.pos);
        let kind = self.scanner.scan(&mut cursor, symbols)?;
        Some((kind, cursor.token_span()))
    }

    fn accept(&mut self, kind: TokenKind, span: Span) {
        tracing::trace!(%kind, %span, "accepted");
        self.checkpoint = self.scanner.checkpoint();
        self.tokens.push(ExternalToken {
            kind,
            span,
            checkpoint: self.checkpoint.clone(),
        });
        if span.end > self.pos {
            self.pos = span.end;
            self.spent = ValidSymbols::empty();
        } else {
            self.spent |= kind.symbol();
        }

        match kind {
            TokenKind::AutomaticSemicolon => {
                if self.import_header {
                    self.import_header = false;
                    self.import_list_open = true;
                }
                self.class_header = false;
                self.can_end_statement = false;
            }
            TokenKind::ImportListDelimiter => self.import_list_open = false,
            TokenKind::StringStart => {
                self.modes.push(Mode::String);
                self.can_end_statement = false;
            }
            TokenKind::StringEnd => {
                self.modes.pop();
                self.can_end_statement = true;
                self.after_member_access = false;
            }
            TokenKind::ClassKeyword => {
                self.class_header = true;
                self.can_end_statement = false;
            }
            TokenKind::PrimaryConstructorKeyword => {
                self.class_header = false;
                self.can_end_statement = false;
            }
            TokenKind::SafeNav => {
                self.after_member_access = true;
                self.can_end_statement = false;
            }
            TokenKind::ImportDot => self.can_end_statement = false,
            TokenKind::StringContent | TokenKind::MultilineComment => {}
        }
    }

    /// Consume one token the scanner declined.
    fn lex_grammar_token(&mut self) {
        let rest = self.text.get(self.pos as usize..).unwrap_or("");
        let mut chars = rest.chars();
        let Some(first) = chars.next() else {
            self.pos = self.source.len();
            return;
        };
        let second = chars.next().unwrap_or('\0');

        let len = if self.in_string() {
            self.string_fallback(rest, first, second)
        } else {
            self.code_token(rest, first, second)
        };
        self.pos += u32::try_from(len.max(first.len_utf8())).unwrap_or(u32::MAX);
        self.spent = ValidSymbols::empty();
    }

    /// Inside a string the scanner only declines interpolations (and input
    /// it cannot finish).
    fn string_fallback(&mut self, rest: &str, first: char, second: char) -> usize {
        match (first, second) {
            ('$', '{') => {
                self.modes.push(Mode::Interpolation { braces: 0 });
                self.can_end_statement = false;
                2
            }
            ('$', c) if is_ident_start(c) => 1 + word_len(&rest[1..]),
            _ => first.len_utf8(),
        }
    }

    fn code_token(&mut self, rest: &str, first: char, second: char) -> usize {
        match first {
            c if c.is_whitespace() => rest
                .find(|c: char| !c.is_whitespace())
                .unwrap_or(rest.len()),
            c if is_word_char(c) => {
                let len = word_len(rest);
                let word = &rest[..len];
                if word == "import" {
                    self.import_header = true;
                    self.import_list_open = false;
                }
                self.can_end_statement = !OPEN_WORDS.contains(&word);
                self.after_member_access = false;
                len
            }
            '\'' => {
                self.can_end_statement = true;
                char_literal_len(rest)
            }
            '/' if second == '/' => rest.find(is_line_break).unwrap_or(rest.len()),
            '{' => {
                if let Some(Mode::Interpolation { braces }) = self.modes.last_mut() {
                    *braces += 1;
                }
                self.class_header = false;
                self.can_end_statement = false;
                1
            }
            '}' => {
                match self.modes.last_mut() {
                    Some(Mode::Interpolation { braces: 0 }) => {
                        self.modes.pop();
                    }
                    Some(Mode::Interpolation { braces }) => *braces -= 1,
                    _ => {}
                }
                self.can_end_statement = true;
                1
            }
            ')' | ']' => {
                self.can_end_statement = true;
                1
            }
            '+' | '-' if second == first => {
                self.can_end_statement = true;
                2
            }
            ':' if second == ':' => {
                self.after_member_access = true;
                self.can_end_statement = false;
                2
            }
            '.' => {
                self.after_member_access = true;
                self.can_end_statement = false;
                1
            }
            c => {
                self.can_end_statement = false;
                c.len_utf8()
            }
        }
    }
}

fn word_len(text: &str) -> usize {
    text.find(|c: char| !is_word_char(c)).unwrap_or(text.len())
}

/// `'x'`, `'\n'`, `'A'`; an unclosed literal runs to the end of the
/// line.
fn char_literal_len(text: &str) -> usize {
    let mut escaped = false;
    for (index, c) in text.char_indices().skip(1) {
        match c {
            '\n' | '\r' => return index,
            '\\' if !escaped => escaped = true,
            '\'' if !escaped => return index + 1,
            _ => escaped = false,
        }
    }
    text.len()
}
