// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the Monkey parser.
//!
//! Errors carry source locations ([`Span`]) and integrate with [`miette`]
//! for rendered diagnostics. Their `Display` output is the plain message
//! the REPL prints, e.g. `expected next token to be ASSIGN, got INT instead`.

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use super::{Span, TokenKind};

/// A parse error encountered while building the AST.
///
/// The parser uses error recovery, so parse errors don't stop parsing.
/// They accumulate on the parser and are exposed through
/// [`Parser::errors`](super::Parser::errors).
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic()]
pub struct ParseError {
    /// The kind of parse error.
    #[source]
    pub kind: ParseErrorKind,
    /// The source location of the offending token.
    #[label("here")]
    pub span: Span,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Creates a structural error: the peek token was not the required kind.
    #[must_use]
    pub fn unexpected_token(expected: TokenKind, got: TokenKind, span: Span) -> Self {
        Self::new(ParseErrorKind::UnexpectedToken { expected, got }, span)
    }

    /// Creates a dispatch error: no prefix handler for the current kind.
    #[must_use]
    pub fn no_prefix_parse_fn(kind: TokenKind, span: Span) -> Self {
        Self::new(ParseErrorKind::NoPrefixParseFn(kind), span)
    }

    /// Creates a value error: an integer literal that does not fit `i64`.
    #[must_use]
    pub fn invalid_integer(literal: impl Into<EcoString>, span: Span) -> Self {
        Self::new(
            ParseErrorKind::InvalidIntegerLiteral {
                literal: literal.into(),
            },
            span,
        )
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// `expectPeek` found a different token kind than required.
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken {
        /// The kind the grammar required.
        expected: TokenKind,
        /// The kind actually found.
        got: TokenKind,
    },

    /// No prefix handler is registered for a token kind.
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenKind),

    /// An integer literal failed to parse as a signed 64-bit value.
    #[error("could not parse {literal:?} as integer")]
    InvalidIntegerLiteral {
        /// The offending literal text.
        literal: EcoString,
    },
}
