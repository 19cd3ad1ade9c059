// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Pratt parser for Monkey source code.
//!
//! This parser builds an AST from the token stream of a [`Lexer`]. It is
//! designed for interactive use with error recovery and accumulated
//! diagnostics.
//!
//! # Design Philosophy
//!
//! - **Error recovery is mandatory** - parsing always produces a [`Program`]
//! - **Multiple errors** - report all errors, don't stop at the first
//! - **Two-token window** - `cur_token` and `peek_token`, nothing more
//! - **Synchronization points** - recover at statement boundaries
//!
//! # Expression Precedence (Pratt Parsing)
//!
//! Expressions are parsed by dispatching on the current token kind through
//! prefix handlers (no left operand) and infix handlers (extend a left
//! operand), under a seven-level precedence lattice:
//!
//! | Level | Tokens |
//! |-------|--------|
//! | `EQUALS` | `==` `!=` |
//! | `LESSGREATER` | `<` `>` |
//! | `SUM` | `+` `-` |
//! | `PRODUCT` | `*` `/` |
//! | `PREFIX` | right-binding power of `!x` and `-x` |
//! | `CALL` | `(` starting an argument list |
//!
//! All operators are left-associative: an infix handler parses its right
//! operand at the operator's own precedence, and the Pratt loop only
//! absorbs a peeked operator that binds *strictly* tighter.
//!
//! # Usage
//!
//! ```
//! use monkey_core::parse::{Lexer, Parser};
//!
//! let mut parser = Parser::new(Lexer::new("let x = 5;"));
//! let program = parser.parse_program();
//!
//! assert!(parser.errors().is_empty());
//! assert_eq!(program.to_string(), "let x = 5;");
//! ```

use tracing::{instrument, trace};

use crate::ast::{
    BlockStatement, Boolean, CallExpression, Expression, ExpressionStatement, FunctionLiteral,
    Identifier, IfExpression, InfixExpression, IntegerLiteral, LetStatement, PrefixExpression,
    Program, ReturnStatement, Statement,
};
use crate::parse::{Lexer, ParseError, Span, Token, TokenKind};

/// Operator binding power, lowest to highest.
///
/// `Lowest` is the default for token kinds that carry no operator meaning;
/// `Prefix` is never a token's own precedence, only the right-binding power
/// passed when consuming a prefix operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `!x` `-x`
    Prefix,
    /// `f(x)`
    Call,
}

impl Precedence {
    /// Returns the binding power of a token kind.
    fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Self::Equals,
            TokenKind::Lt | TokenKind::Gt => Self::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Self::Sum,
            TokenKind::Slash | TokenKind::Asterisk => Self::Product,
            TokenKind::LParen => Self::Call,
            _ => Self::Lowest,
        }
    }
}

/// Convenience function: lex and parse `source` in one call.
///
/// # Examples
///
/// ```
/// use monkey_core::parse::parse;
///
/// let (program, errors) = parse("1 + 2 * 3");
/// assert!(errors.is_empty());
/// assert_eq!(program.to_string(), "(1 + (2 * 3))");
/// ```
#[must_use]
pub fn parse(source: &str) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    (program, parser.errors)
}

/// The parser state: a lexer, a two-token window and accumulated errors.
///
/// One parser owns one lexer; neither is safe for concurrent use. Callers
/// wanting parallel parsing construct independent pairs per input.
pub struct Parser<'src> {
    /// The token source.
    lexer: Lexer<'src>,
    /// The token under examination.
    cur_token: Token,
    /// One token of lookahead.
    peek_token: Token,
    /// Accumulated diagnostics.
    errors: Vec<ParseError>,
}

impl<'src> Parser<'src> {
    /// Creates a new parser, pulling two tokens so that both `cur_token`
    /// and `peek_token` are populated.
    #[must_use]
    pub fn new(lexer: Lexer<'src>) -> Self {
        let placeholder = Token::new(TokenKind::Eof, "", Span::default());
        let mut parser = Self {
            lexer,
            cur_token: placeholder.clone(),
            peek_token: placeholder,
            errors: Vec::new(),
        };
        parser.next_token();
        parser.next_token();
        parser
    }

    /// Parses the whole input into a [`Program`], driving the lexer to EOF.
    ///
    /// Errors never abort parsing; the returned program may be partial.
    /// Check [`Parser::errors`] afterwards.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.cur_token_is(TokenKind::Eof) {
            match self.parse_statement() {
                Some(statement) => program.statements.push(statement),
                None => self.synchronize(),
            }
            self.next_token();
        }

        program
    }

    /// Returns the diagnostics accumulated so far, in discovery order.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.kind() {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => Some(self.parse_return_statement()),
            _ => Some(self.parse_expression_statement()),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }

        let name = self.cur_identifier();

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }

        // Step past the `=`.
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest);

        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Statement::Let(LetStatement { token, name, value }))
    }

    fn parse_return_statement(&mut self) -> Statement {
        let token = self.cur_token.clone();

        // Step past the `return`.
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest);

        // A `while`, not an `if`: runs of trailing semicolons are all
        // consumed here. Not observable past the first one, since the
        // driver advances between statements anyway.
        while self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Statement::Return(ReturnStatement { token, value })
    }

    #[instrument(level = "trace", skip_all)]
    fn parse_expression_statement(&mut self) -> Statement {
        let token = self.cur_token.clone();

        let expression = self.parse_expression(Precedence::Lowest);

        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Statement::Expression(ExpressionStatement { token, expression })
    }

    /// Parses `{ <statements> }`.
    ///
    /// Precondition: `cur_token` is `{`. Stops *on* the closing `}` (or
    /// EOF) without consuming past it; the caller's ensuing advance covers
    /// the brace.
    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.cur_token.clone();
        let mut statements = Vec::new();

        self.next_token();

        while !self.cur_token_is(TokenKind::RBrace) && !self.cur_token_is(TokenKind::Eof) {
            match self.parse_statement() {
                Some(statement) => statements.push(statement),
                None => self.synchronize(),
            }
            self.next_token();
        }

        BlockStatement { token, statements }
    }

    // ========================================================================
    // Expressions (Pratt core)
    // ========================================================================

    /// Parses an expression whose operators bind tighter than
    /// `min_precedence`.
    ///
    /// The loop absorbs a peeked infix operator only while it binds
    /// *strictly* tighter than `min_precedence`, which makes every
    /// operator left-associative.
    #[instrument(level = "trace", skip_all, fields(min = ?min_precedence))]
    fn parse_expression(&mut self, min_precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_token_is(TokenKind::Semicolon) && min_precedence < self.peek_precedence() {
            left = match self.peek_token.kind() {
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Slash
                | TokenKind::Asterisk
                | TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::Gt => {
                    self.next_token();
                    self.parse_infix_expression(left)?
                }
                TokenKind::LParen => {
                    self.next_token();
                    self.parse_call_expression(left)?
                }
                // No infix handler: hand the finished left operand back.
                _ => return Some(left),
            };
        }

        Some(left)
    }

    /// Dispatches on `cur_token` to the prefix handler for its kind.
    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.cur_token.kind() {
            TokenKind::Ident => Some(self.parse_identifier()),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::True | TokenKind::False => Some(self.parse_boolean()),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            kind => {
                self.errors
                    .push(ParseError::no_prefix_parse_fn(kind, self.cur_token.span()));
                None
            }
        }
    }

    fn parse_identifier(&self) -> Expression {
        Expression::Identifier(self.cur_identifier())
    }

    fn parse_boolean(&self) -> Expression {
        Expression::Boolean(Boolean {
            token: self.cur_token.clone(),
            value: self.cur_token_is(TokenKind::True),
        })
    }

    #[instrument(level = "trace", skip_all)]
    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        trace!(literal = %token.literal(), "parsing integer literal");

        let Some(value) = parse_integer(token.literal()) else {
            self.errors
                .push(ParseError::invalid_integer(token.literal().clone(), token.span()));
            return None;
        };

        Some(Expression::Integer(IntegerLiteral { token, value }))
    }

    #[instrument(level = "trace", skip_all)]
    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = token.literal().clone();

        // Step past the operator.
        self.next_token();

        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    #[instrument(level = "trace", skip_all)]
    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = token.literal().clone();

        // The right operand is parsed at this operator's own precedence,
        // so equal-precedence neighbors group to the left.
        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    /// Parses `( <expression> )`. The parens raise the precedence of the
    /// inner expression and leave no node of their own.
    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();

        let expression = self.parse_expression(Precedence::Lowest);

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        expression
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let consequence = self.parse_block_statement();

        let alternative = if self.peek_token_is(TokenKind::Else) {
            self.next_token();

            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }

            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If(IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let body = self.parse_block_statement();

        Some(Expression::Function(FunctionLiteral {
            token,
            parameters,
            body,
        }))
    }

    /// Parses `()`, `(x)` or `(x, y, …)` after `fn`.
    ///
    /// Precondition: `cur_token` is `(`. Consumes through the closing `)`.
    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = Vec::new();

        if self.peek_token_is(TokenKind::RParen) {
            self.next_token();
            return Some(parameters);
        }

        self.next_token();
        parameters.push(self.cur_identifier());

        while self.peek_token_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            parameters.push(self.cur_identifier());
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(parameters)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let arguments = self.parse_call_arguments()?;

        Some(Expression::Call(CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    /// Same shape as the parameter list, but each slot is a full
    /// expression at `Lowest`.
    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut arguments = Vec::new();

        if self.peek_token_is(TokenKind::RParen) {
            self.next_token();
            return Some(arguments);
        }

        self.next_token();
        arguments.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(arguments)
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    fn cur_token_is(&self, kind: TokenKind) -> bool {
        self.cur_token.kind() == kind
    }

    fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind() == kind
    }

    /// Builds an [`Identifier`] from the current token.
    fn cur_identifier(&self) -> Identifier {
        Identifier {
            token: self.cur_token.clone(),
            name: self.cur_token.literal().clone(),
        }
    }

    /// Advances if the peek token has the required kind; otherwise records
    /// a structural error and leaves the window untouched.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_token_is(kind) {
            self.next_token();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek_token.kind())
    }

    fn cur_precedence(&self) -> Precedence {
        Precedence::of(self.cur_token.kind())
    }

    // ========================================================================
    // Error Handling & Recovery
    // ========================================================================

    fn peek_error(&mut self, expected: TokenKind) {
        self.errors.push(ParseError::unexpected_token(
            expected,
            self.peek_token.kind(),
            self.peek_token.span(),
        ));
    }

    /// Synchronizes to a statement boundary after a failed production.
    ///
    /// Advances until the current token is a semicolon, a closing brace or
    /// EOF, so the tokens of the broken statement don't get re-parsed as a
    /// fresh expression statement.
    fn synchronize(&mut self) {
        while !matches!(
            self.cur_token.kind(),
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        ) {
            self.next_token();
        }
    }
}

/// Parses an integer literal with `strtol`-style base detection.
///
/// The lexer only produces runs of decimal digits, so the reachable cases
/// are decimal and octal: a leading zero on a multi-digit literal selects
/// base 8. `09` (not octal) and values outside `i64` yield `None`.
fn parse_integer(literal: &str) -> Option<i64> {
    match literal.strip_prefix('0') {
        Some(rest) if !rest.is_empty() => i64::from_str_radix(rest, 8).ok(),
        _ => literal.parse().ok(),
    }
}
