// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for Monkey source code.
//!
//! This module converts source text into a stream of [`Token`]s. The lexer
//! is a hand-written byte scanner with exactly one byte of lookahead, used
//! only to fuse `==` and `!=`.
//!
//! # Design Principles
//!
//! - **Never fails**: unrecognized bytes become [`TokenKind::Illegal`]
//! - **Pull-based**: one token per [`Lexer::next_token`] call, no buffering
//! - **Infinite tail**: once the input is exhausted, every further call
//!   returns an `EOF` token
//!
//! # Example
//!
//! ```
//! use monkey_core::parse::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("let x = 5;");
//! assert_eq!(lexer.next_token().kind(), TokenKind::Let);
//! assert_eq!(lexer.next_token().literal(), "x");
//! ```

use ecow::EcoString;

use super::{Span, Token, TokenKind};

/// A lexer that tokenizes Monkey source code.
///
/// The scanner is byte-addressed: `position` is the index of the byte under
/// examination, `read_position` the index of the next byte, and `ch` the
/// current byte (`0` once the input is exhausted). Construction performs one
/// advance so that `ch` is valid before the first [`Lexer::next_token`].
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// The same text viewed as bytes.
    input: &'src [u8],
    /// Index of the current byte.
    position: usize,
    /// Index of the next byte. `position + 1` after the first advance.
    read_position: usize,
    /// The current byte, or `0` at end of input.
    ch: u8,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.position)
            .field("remaining", &self.source.get(self.position..).unwrap_or(""))
            .finish()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Self {
            source,
            input: source.as_bytes(),
            position: 0,
            read_position: 0,
            ch: 0,
        };
        lexer.read_char();
        lexer
    }

    /// Lexes the next token.
    ///
    /// After end of input every call returns `Token { EOF, "" }`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let kind = match self.ch {
            b'=' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    TokenKind::Eq
                } else {
                    TokenKind::Assign
                }
            }
            b'!' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Asterisk,
            b'/' => TokenKind::Slash,
            b'<' => TokenKind::Lt,
            b'>' => TokenKind::Gt,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            0 => {
                return Token::new(
                    TokenKind::Eof,
                    EcoString::new(),
                    Span::from(start..start),
                );
            }
            ch if is_letter(ch) => {
                // The read loop leaves `position` at the first non-letter
                // byte, so this path skips the trailing advance below.
                let literal = self.read_identifier();
                let kind = TokenKind::lookup_ident(&literal);
                return Token::new(kind, literal, Span::from(start..self.position));
            }
            ch if ch.is_ascii_digit() => {
                let literal = self.read_number();
                return Token::new(TokenKind::Int, literal, Span::from(start..self.position));
            }
            _ => TokenKind::Illegal,
        };

        let token = Token::new(
            kind,
            self.literal_from(start),
            Span::from(start..self.position + 1),
        );
        self.read_char();
        token
    }

    /// Advances one byte.
    fn read_char(&mut self) {
        if self.read_position >= self.input.len() {
            self.ch = 0;
        } else {
            self.ch = self.input[self.read_position];
        }
        self.position = self.read_position;
        self.read_position += 1;
    }

    /// Returns the next byte without consuming it, or `0` at end of input.
    fn peek_char(&self) -> u8 {
        if self.read_position >= self.input.len() {
            0
        } else {
            self.input[self.read_position]
        }
    }

    /// Reads a maximal run of identifier bytes (letters and underscores).
    ///
    /// Digits never continue an identifier: `x1` lexes as `x` then `1`.
    fn read_identifier(&mut self) -> EcoString {
        let start = self.position;
        while is_letter(self.ch) {
            self.read_char();
        }
        EcoString::from(&self.source[start..self.position])
    }

    /// Reads a maximal run of decimal digits.
    fn read_number(&mut self) -> EcoString {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char();
        }
        EcoString::from(&self.source[start..self.position])
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    /// Extracts the literal text from `start` through the current byte.
    ///
    /// Bytes at or above 0x80 can fall outside UTF-8 character boundaries;
    /// those single illegal bytes are rendered via their Latin-1 mapping so
    /// the literal stays valid UTF-8.
    fn literal_from(&self, start: usize) -> EcoString {
        match self.source.get(start..self.position + 1) {
            Some(text) => EcoString::from(text),
            None => {
                let mut literal = EcoString::new();
                literal.push(char::from(self.ch));
                literal
            }
        }
    }
}

/// Returns `true` for the bytes that may appear in an identifier.
const fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to lex the whole input and extract `(kind, literal)` pairs,
    /// including the final EOF.
    fn lex_all(source: &str) -> Vec<(TokenKind, EcoString)> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind().is_eof();
            tokens.push((token.kind(), token.literal().clone()));
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn lex_kinds(source: &str) -> Vec<TokenKind> {
        lex_all(source).into_iter().map(|(kind, _)| kind).collect()
    }

    #[test]
    fn lex_empty() {
        assert_eq!(lex_kinds(""), vec![TokenKind::Eof]);
        assert_eq!(lex_kinds("   \t\r\n"), vec![TokenKind::Eof]);
    }

    #[test]
    fn lex_punctuators() {
        assert_eq!(
            lex_kinds("=+(){},;"),
            vec![
                TokenKind::Assign,
                TokenKind::Plus,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_two_byte_operators() {
        assert_eq!(
            lex_all("=="),
            vec![
                (TokenKind::Eq, "==".into()),
                (TokenKind::Eof, "".into()),
            ]
        );
        assert_eq!(
            lex_all("!="),
            vec![
                (TokenKind::NotEq, "!=".into()),
                (TokenKind::Eof, "".into()),
            ]
        );
    }

    #[test]
    fn lex_bare_assign_and_bang_at_end_of_input() {
        assert_eq!(
            lex_all("="),
            vec![
                (TokenKind::Assign, "=".into()),
                (TokenKind::Eof, "".into()),
            ]
        );
        assert_eq!(
            lex_all("!"),
            vec![
                (TokenKind::Bang, "!".into()),
                (TokenKind::Eof, "".into()),
            ]
        );
    }

    #[test]
    fn lex_let_statement() {
        assert_eq!(
            lex_all("let five = 5;"),
            vec![
                (TokenKind::Let, "let".into()),
                (TokenKind::Ident, "five".into()),
                (TokenKind::Assign, "=".into()),
                (TokenKind::Int, "5".into()),
                (TokenKind::Semicolon, ";".into()),
                (TokenKind::Eof, "".into()),
            ]
        );
    }

    #[test]
    fn lex_full_operator_set() {
        let source = "!-/*5;\n5 < 10 > 5;\n10 == 10;\n10 != 9;";
        assert_eq!(
            lex_kinds(source),
            vec![
                TokenKind::Bang,
                TokenKind::Minus,
                TokenKind::Slash,
                TokenKind::Asterisk,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::Lt,
                TokenKind::Int,
                TokenKind::Gt,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::Eq,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::NotEq,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_keywords() {
        assert_eq!(
            lex_kinds("fn let true false if else return"),
            vec![
                TokenKind::Function,
                TokenKind::Let,
                TokenKind::True,
                TokenKind::False,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::Return,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_identifiers_with_underscores() {
        assert_eq!(
            lex_all("_tmp foo_bar"),
            vec![
                (TokenKind::Ident, "_tmp".into()),
                (TokenKind::Ident, "foo_bar".into()),
                (TokenKind::Eof, "".into()),
            ]
        );
    }

    #[test]
    fn digits_do_not_continue_identifiers() {
        assert_eq!(
            lex_all("x1"),
            vec![
                (TokenKind::Ident, "x".into()),
                (TokenKind::Int, "1".into()),
                (TokenKind::Eof, "".into()),
            ]
        );
    }

    #[test]
    fn lex_illegal_bytes() {
        assert_eq!(
            lex_all("@"),
            vec![
                (TokenKind::Illegal, "@".into()),
                (TokenKind::Eof, "".into()),
            ]
        );

        // Bytes >= 0x80 are illegal; the stream keeps going afterwards.
        let kinds = lex_kinds("x § y");
        assert_eq!(kinds[0], TokenKind::Ident);
        assert_eq!(kinds[1], TokenKind::Illegal);
        assert_eq!(*kinds.last().unwrap(), TokenKind::Eof);
    }

    #[test]
    fn eof_is_sticky() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind(), TokenKind::Ident);
        for _ in 0..4 {
            let token = lexer.next_token();
            assert_eq!(token.kind(), TokenKind::Eof);
            assert_eq!(token.literal(), "");
        }
    }

    #[test]
    fn spans_cover_token_bytes() {
        let mut lexer = Lexer::new("let ab == 12");
        let token = lexer.next_token();
        assert_eq!(token.span().as_range(), 0..3);
        let token = lexer.next_token();
        assert_eq!(token.span().as_range(), 4..6);
        let token = lexer.next_token();
        assert_eq!(token.span().as_range(), 7..9);
        let token = lexer.next_token();
        assert_eq!(token.span().as_range(), 10..12);
    }

    #[test]
    fn literals_reconstruct_the_input() {
        let source = "let add = fn(x, y) { x + y != 0; };";
        let joined: String = lex_all(source)
            .iter()
            .map(|(_, literal)| literal.as_str())
            .collect();
        let stripped: String = source.split_whitespace().collect();
        assert_eq!(joined, stripped);
    }
}
