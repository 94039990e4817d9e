//! Kotlin external scanner CLI.
//!
//! Runs the scanner over a source file the way the generated parser would
//! and prints the external tokens it produced.

mod commands;

use std::sync::Once;

use commands::{parse_options, scan_file, Options};

static TRACING_INIT: Once = Once::new();

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    match command.as_str() {
        "lex" | "state" => {
            let options = parse_or_exit(command, &args[2..]);
            scan_file(&options, command == "state");
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-v" => {
            println!("ktsc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_or_exit(command: &str, args: &[String]) -> Options {
    match parse_options(args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("Usage: ktsc {command} <file.kt> [options]");
            std::process::exit(1);
        }
    }
}

/// Install a hierarchical subscriber when `RUST_LOG` is set.
///
/// Try `RUST_LOG=kts_scanner=trace` to follow every dispatch rule.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .init();
        }
    });
}

fn print_usage() {
    println!("Kotlin external scanner");
    println!();
    println!("Usage: ktsc <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file.kt>        Print the external tokens of a file");
    println!("  state <file.kt>      Same, with the checkpoint after each token");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --sign-policy=<p>    Line-leading +/-: prefix (default), increment-or-digit");
    println!("  --layout=<l>         Checkpoint layout: context (default), compact");
    println!("  --only=<names>       Comma-separated external tokens to print");
    println!();
    println!("Examples:");
    println!("  ktsc lex Main.kt");
    println!("  ktsc state Main.kt --layout=compact");
    println!("  ktsc lex Main.kt --only=_automatic_semicolon,safe_nav");
    println!("  RUST_LOG=kts_scanner=trace ktsc lex Main.kt");
}
