// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Monkey command-line interface.
//!
//! This is the main entry point for the `monkey` command.

use clap::{Parser, Subcommand};
use miette::Result;

mod commands;

/// Monkey: a small, C-like, expression-oriented scripting language
#[derive(Debug, Parser)]
#[command(name = "monkey")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start an interactive REPL (the default)
    Repl {
        /// Print the token stream instead of the parsed program
        #[arg(long)]
        tokens: bool,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber only if RUST_LOG is explicitly set,
    // so the REPL's stdout stays clean by default.
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .try_init();
    }

    // Install miette's fancy error handler for CLI-level failures.
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Repl { tokens: false }) {
        Command::Repl { tokens } => commands::repl::run(tokens),
    }
}
