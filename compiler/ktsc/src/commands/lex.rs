//! `lex` and `state`: print the external tokens of a file.

use kts_lexer_core::SourceBuffer;
use kts_scanner::{tokenize, ExternalToken};

use super::{read_file, Options};

/// Scan a file and print its external tokens, with the checkpoint after
/// each one when `show_state` is set.
pub fn scan_file(options: &Options, show_state: bool) {
    let content = read_file(&options.path);
    let buf = SourceBuffer::new(&content);

    for issue in buf.encoding_issues() {
        let (line, col) = buf.line_col(issue.pos);
        eprintln!(
            "warning: {}:{line}:{col}: {}",
            options.path,
            issue.kind.describe()
        );
    }

    let tokens = tokenize(&buf, options.config);
    tracing::debug!(path = %options.path, tokens = tokens.len(), "scanned");

    let shown: Vec<&ExternalToken> = tokens
        .iter()
        .filter(|token| options.shows(token.kind))
        .collect();
    println!(
        "External tokens for '{}' ({} tokens):",
        options.path,
        shown.len()
    );
    for token in shown {
        println!("  {}", render_token(&buf, token, show_state));
    }
}

/// `line:col kind "text"`, then the checkpoint in hex.
fn render_token(buf: &SourceBuffer, token: &ExternalToken, show_state: bool) -> String {
    let (line, col) = buf.line_col(token.span.start);
    let position = format!("{line}:{col}");
    let mut out = format!(
        "{position:<8} {:<30} {:?}",
        token.kind.name(),
        buf.slice(token.span)
    );
    if show_state {
        if token.checkpoint.is_empty() {
            out.push_str("  state=-");
        } else {
            out.push_str(&format!("  state={}", token.checkpoint));
        }
    }
    out
}
