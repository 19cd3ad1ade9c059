// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) definitions for Monkey.
//!
//! The AST represents the structure of a Monkey program after parsing.
//! Every node retains the token that introduced it, and every node can
//! re-print itself through [`std::fmt::Display`]; the printed form is the
//! minimal parenthesized rendition used throughout the parser tests:
//!
//! ```
//! use monkey_core::parse::{Lexer, Parser};
//!
//! let mut parser = Parser::new(Lexer::new("1 + 2 * 3"));
//! let program = parser.parse_program();
//! assert_eq!(program.to_string(), "(1 + (2 * 3))");
//! ```
//!
//! # Shape
//!
//! Two closed enums, [`Statement`] and [`Expression`], carry struct
//! payloads per variant. The tree is single-owner: children live in
//! `Box`/`Vec` fields of their parent, so dropping a [`Program`] releases
//! the whole tree. Because the parser recovers from errors rather than
//! aborting, parsing may leave gaps: see the `Option` fields on
//! [`LetStatement`], [`ReturnStatement`] and [`ExpressionStatement`].

use std::fmt;

use ecow::EcoString;

use crate::parse::Token;

/// Root node: the ordered list of statements of one source unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
}

impl Program {
    /// Returns the literal of the first statement's token, or `""` for an
    /// empty program.
    #[must_use]
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map_or("", |statement| statement.token_literal())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// A statement: a syntactic unit that does not itself produce a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let(LetStatement),
    /// `return <value>;`
    Return(ReturnStatement),
    /// A bare expression in statement position.
    Expression(ExpressionStatement),
    /// `{ <statements> }`
    Block(BlockStatement),
}

impl Statement {
    /// Returns the literal of the token that introduced this statement.
    #[must_use]
    pub fn token_literal(&self) -> &str {
        match self {
            Self::Let(statement) => statement.token.literal(),
            Self::Return(statement) => statement.token.literal(),
            Self::Expression(statement) => statement.token.literal(),
            Self::Block(statement) => statement.token.literal(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let(statement) => fmt::Display::fmt(statement, f),
            Self::Return(statement) => fmt::Display::fmt(statement, f),
            Self::Expression(statement) => fmt::Display::fmt(statement, f),
            Self::Block(statement) => fmt::Display::fmt(statement, f),
        }
    }
}

/// `let x = 5;`
///
/// The name is always present when the statement is emitted; the value may
/// be absent when expression parsing failed after the `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetStatement {
    /// The `let` token.
    pub token: Token,
    /// The bound name.
    pub name: Identifier,
    /// The bound value.
    pub value: Option<Expression>,
}

impl fmt::Display for LetStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = ", self.token.literal(), self.name)?;
        if let Some(value) = &self.value {
            write!(f, "{value}")?;
        }
        f.write_str(";")
    }
}

/// `return 10;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStatement {
    /// The `return` token.
    pub token: Token,
    /// The returned value.
    pub value: Option<Expression>,
}

impl fmt::Display for ReturnStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.token.literal())?;
        if let Some(value) = &self.value {
            write!(f, "{value}")?;
        }
        f.write_str(";")
    }
}

/// An expression used as a statement: `x + 10;`
///
/// The expression is absent only when the parser recovered from a missing
/// prefix handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStatement {
    /// The first token of the expression.
    pub token: Token,
    /// The wrapped expression.
    pub expression: Option<Expression>,
}

impl fmt::Display for ExpressionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expression {
            Some(expression) => fmt::Display::fmt(expression, f),
            None => Ok(()),
        }
    }
}

/// `{ <statements> }`: the body of an `if` arm or function literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStatement {
    /// The `{` token.
    pub token: Token,
    /// The statements inside the braces.
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// An expression: a syntactic unit that produces a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A name: `foo`
    Identifier(Identifier),
    /// An integer literal: `5`
    Integer(IntegerLiteral),
    /// `true` or `false`
    Boolean(Boolean),
    /// A prefix operator application: `!x`, `-5`
    Prefix(PrefixExpression),
    /// A binary operator application: `x + y`
    Infix(InfixExpression),
    /// `if (<cond>) { … } else { … }`
    If(IfExpression),
    /// `fn(<params>) { … }`
    Function(FunctionLiteral),
    /// `<callee>(<args>)`
    Call(CallExpression),
}

impl Expression {
    /// Returns the literal of the token that introduced this expression.
    #[must_use]
    pub fn token_literal(&self) -> &str {
        match self {
            Self::Identifier(expression) => expression.token.literal(),
            Self::Integer(expression) => expression.token.literal(),
            Self::Boolean(expression) => expression.token.literal(),
            Self::Prefix(expression) => expression.token.literal(),
            Self::Infix(expression) => expression.token.literal(),
            Self::If(expression) => expression.token.literal(),
            Self::Function(expression) => expression.token.literal(),
            Self::Call(expression) => expression.token.literal(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(expression) => fmt::Display::fmt(expression, f),
            Self::Integer(expression) => fmt::Display::fmt(expression, f),
            Self::Boolean(expression) => fmt::Display::fmt(expression, f),
            Self::Prefix(expression) => fmt::Display::fmt(expression, f),
            Self::Infix(expression) => fmt::Display::fmt(expression, f),
            Self::If(expression) => fmt::Display::fmt(expression, f),
            Self::Function(expression) => fmt::Display::fmt(expression, f),
            Self::Call(expression) => fmt::Display::fmt(expression, f),
        }
    }
}

/// A name in expression position, or the target of a `let` binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// The `IDENT` token.
    pub token: Token,
    /// The spelled name.
    pub name: EcoString,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A signed 64-bit integer literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLiteral {
    /// The `INT` token.
    pub token: Token,
    /// The parsed value.
    pub value: i64,
}

impl fmt::Display for IntegerLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Re-print the source spelling, not the parsed value.
        f.write_str(self.token.literal())
    }
}

/// `true` / `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boolean {
    /// The `TRUE` or `FALSE` token.
    pub token: Token,
    /// The literal's value.
    pub value: bool,
}

impl fmt::Display for Boolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token.literal())
    }
}

/// `<op><right>`, printed as `(<op><right>)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixExpression {
    /// The operator token (`!` or `-`).
    pub token: Token,
    /// The operator spelling.
    pub operator: EcoString,
    /// The operand.
    pub right: Box<Expression>,
}

impl fmt::Display for PrefixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

/// `<left> <op> <right>`, printed as `(<left> <op> <right>)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfixExpression {
    /// The operator token.
    pub token: Token,
    /// The left operand.
    pub left: Box<Expression>,
    /// The operator spelling.
    pub operator: EcoString,
    /// The right operand.
    pub right: Box<Expression>,
}

impl fmt::Display for InfixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

/// `if (<cond>) { … }` with an optional `else { … }`.
///
/// The consequence is always present; the alternative exists iff an `else`
/// followed the consequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfExpression {
    /// The `if` token.
    pub token: Token,
    /// The tested condition.
    pub condition: Box<Expression>,
    /// The block taken when the condition holds.
    pub consequence: BlockStatement,
    /// The `else` block, if any.
    pub alternative: Option<BlockStatement>,
}

impl fmt::Display for IfExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if{} {}", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, "else {alternative}")?;
        }
        Ok(())
    }
}

/// `fn(<params>) { <body> }`.
///
/// Duplicate parameter names are syntactically permitted; rejecting them is
/// not this layer's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionLiteral {
    /// The `fn` token.
    pub token: Token,
    /// Parameters in source order.
    pub parameters: Vec<Identifier>,
    /// The function body.
    pub body: BlockStatement,
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.token.literal())?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}")?;
        }
        write!(f, ") {}", self.body)
    }
}

/// `<function>(<arguments>)`, where the callee is any expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpression {
    /// The `(` token that opened the argument list.
    pub token: Token,
    /// The called expression: an identifier or a function literal.
    pub function: Box<Expression>,
    /// Arguments in source order.
    pub arguments: Vec<Expression>,
}

impl fmt::Display for CallExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{argument}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{Span, TokenKind};

    fn token(kind: TokenKind, literal: &str) -> Token {
        Token::new(kind, literal, Span::default())
    }

    fn ident(name: &str) -> Identifier {
        Identifier {
            token: token(TokenKind::Ident, name),
            name: name.into(),
        }
    }

    #[test]
    fn program_reprints_let_statement() {
        // Hand-built AST for `let myVar = anotherVar;`.
        let program = Program {
            statements: vec![Statement::Let(LetStatement {
                token: token(TokenKind::Let, "let"),
                name: ident("myVar"),
                value: Some(Expression::Identifier(ident("anotherVar"))),
            })],
        };

        assert_eq!(program.to_string(), "let myVar = anotherVar;");
        assert_eq!(program.token_literal(), "let");
    }

    #[test]
    fn empty_program_has_empty_token_literal() {
        let program = Program::default();
        assert_eq!(program.token_literal(), "");
        assert_eq!(program.to_string(), "");
    }

    #[test]
    fn let_statement_with_absent_value_still_prints_semicolon() {
        let statement = LetStatement {
            token: token(TokenKind::Let, "let"),
            name: ident("x"),
            value: None,
        };
        assert_eq!(statement.to_string(), "let x = ;");
    }

    #[test]
    fn prefix_and_infix_parenthesization() {
        let five = Expression::Integer(IntegerLiteral {
            token: token(TokenKind::Int, "5"),
            value: 5,
        });
        let negated = Expression::Prefix(PrefixExpression {
            token: token(TokenKind::Minus, "-"),
            operator: "-".into(),
            right: Box::new(five.clone()),
        });
        assert_eq!(negated.to_string(), "(-5)");

        let sum = Expression::Infix(InfixExpression {
            token: token(TokenKind::Plus, "+"),
            left: Box::new(negated),
            operator: "+".into(),
            right: Box::new(five),
        });
        assert_eq!(sum.to_string(), "((-5) + 5)");
    }

    #[test]
    fn call_expression_joins_arguments() {
        let call = Expression::Call(CallExpression {
            token: token(TokenKind::LParen, "("),
            function: Box::new(Expression::Identifier(ident("add"))),
            arguments: vec![
                Expression::Identifier(ident("a")),
                Expression::Identifier(ident("b")),
            ],
        });
        assert_eq!(call.to_string(), "add(a, b)");
    }
}
