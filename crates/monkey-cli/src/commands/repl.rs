// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Interactive REPL for Monkey.
//!
//! Reads one line at a time, runs it through the lexer and parser, and
//! prints either the program's canonical re-print or the accumulated parse
//! errors under a fixed banner. With `--tokens` the parser is skipped and
//! the raw token stream is printed instead.
//!
//! Exit condition: end of the input stream (Ctrl-D) or Ctrl-C. Exit code 0.

use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use tracing::debug;

use monkey_core::parse::{parse, Lexer, ParseError};

const PROMPT: &str = ">> ";

const MONKEY_FACE: &str = r#"
            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

/// Runs the read-parse-print loop until end of input.
pub fn run(tokens: bool) -> Result<()> {
    greet();

    let config = Config::builder().auto_add_history(true).build();
    let mut rl: DefaultEditor = DefaultEditor::with_config(config).into_diagnostic()?;

    let history_file = history_path();
    if let Some(path) = &history_file {
        let _ = rl.load_history(path);
    }

    debug!(tokens, "starting repl session");

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if tokens {
                    print!("{}", render_tokens(&line));
                } else {
                    print!("{}", render_line(&line));
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err).into_diagnostic(),
        }
    }

    if let Some(path) = &history_file {
        let _ = rl.save_history(path);
    }

    Ok(())
}

fn greet() {
    println!("Hello {}! This is the Monkey programming language!", username());
    println!("Feel free to type in commands");
}

/// Best-effort user name for the greeting.
fn username() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "there".into())
}

fn history_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".monkey_history"))
}

/// Parses one line and renders either the program or the error banner.
fn render_line(line: &str) -> String {
    let (program, errors) = parse(line);
    if errors.is_empty() {
        format!("{program}\n")
    } else {
        debug!(errors = errors.len(), "line failed to parse");
        render_parse_errors(&errors)
    }
}

/// Renders the fixed error banner with one diagnostic per line.
fn render_parse_errors(errors: &[ParseError]) -> String {
    let mut out = String::from(MONKEY_FACE);
    out.push_str("Woops! We ran into some monkey business here!\n");
    out.push_str(" parser errors:\n");
    for error in errors {
        out.push('\t');
        out.push_str(&error.to_string());
        out.push('\n');
    }
    out
}

/// Renders the token stream of one line, one token per line, up to EOF.
fn render_tokens(line: &str) -> String {
    let mut lexer = Lexer::new(line);
    let mut out = String::new();
    loop {
        let token = lexer.next_token();
        if token.kind().is_eof() {
            break;
        }
        out.push_str(&token.to_string());
        out.push('\n');
    }
    out
}
