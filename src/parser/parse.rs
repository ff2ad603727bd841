//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, the [`ParseError`] diagnostic
//! type, the helpers shared by every grammar production, and the top-level
//! entry points ([`Parser::parse_next`], [`Parser::parse_file`] and
//! [`Ast::parse_next`]).
//!
//! # Parser Architecture
//!
//! Each grammar production is a factory method on [`Parser`]:
//! - `declarations`: `enum` / `type` definitions and member fields
//! - `values`: default values, including compound resolution
//!
//! Factories share one convention: the outer production consumes the
//! keyword or lookahead token and hands it to the inner factory, which can
//! assume its first token has already been identified.
//!
//! Parsing stops at the first diagnostic; there is no resynchronization.

use crate::parser::ast::Ast;
use crate::parser::lexer::ScanError;
use crate::parser::sequence::TokenSequence;
use crate::parser::token::{Token, TokenKind};
use std::fmt;
use thiserror::Error;

/// Diagnostic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unexpected character, unterminated string or comment.
    Lexical,
    /// Wrong or missing token, unexpected end of input, unmatched brace.
    Syntax,
    /// Duplicate or invalid names, self-parenting, mixed compounds,
    /// malformed array designators.
    Semantic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Lexical => "lexical error",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::Semantic => "semantic error",
        })
    }
}

/// Parser error type: a message plus, where one exists, the token that
/// caused it (for location display).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError<'src> {
    pub kind: ErrorKind,
    pub message: String,
    pub token: Option<Token<'src>>,
}

impl<'src> ParseError<'src> {
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        token: Option<Token<'src>>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            token,
        }
    }

    pub(crate) fn syntax(message: impl Into<String>, token: Token<'src>) -> Self {
        Self::new(ErrorKind::Syntax, message, Some(token))
    }

    pub(crate) fn semantic(message: impl Into<String>, token: Token<'src>) -> Self {
        Self::new(ErrorKind::Semantic, message, Some(token))
    }

    /// Prefix the message with the production it surfaced through.
    pub(crate) fn context(mut self, prefix: impl fmt::Display) -> Self {
        self.message = format!("{prefix}: {}", self.message);
        self
    }
}

impl<'src> From<ScanError<'src>> for ParseError<'src> {
    fn from(err: ScanError<'src>) -> Self {
        ParseError {
            kind: ErrorKind::Lexical,
            message: err.message,
            token: err.token,
        }
    }
}

/// Recursive descent parser over a [`TokenSequence`]
pub struct Parser<'a, 'src> {
    pub(crate) tokens: TokenSequence<'a, 'src>,
}

impl<'a, 'src> Parser<'a, 'src> {
    pub fn new(tokens: impl Into<TokenSequence<'a, 'src>>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }

    /// Tokens not consumed yet.
    pub fn remaining(&self) -> TokenSequence<'a, 'src> {
        self.tokens
    }

    /// Parse every remaining definition into a fresh [`Ast`].
    pub fn parse_file(&mut self) -> Result<Ast<'src>, ParseError<'src>> {
        let mut ast = Ast::new();
        while self.parse_next(&mut ast)?.is_some() {}
        Ok(ast)
    }

    /// Parse one top-level definition into `ast`.
    ///
    /// Returns the name of the definition added, or `None` once the tokens
    /// are exhausted.
    pub fn parse_next(
        &mut self,
        ast: &mut Ast<'src>,
    ) -> Result<Option<&'src str>, ParseError<'src>> {
        let Some(first) = self.tokens.take_front() else {
            return Ok(None);
        };
        let definition = self.parse_definition(first)?;
        ast.define(definition).map(Some)
    }

    // ===== Helper methods =====

    pub(crate) fn unexpected_eoi(context: impl fmt::Display) -> ParseError<'src> {
        ParseError::new(
            ErrorKind::Syntax,
            format!("unexpected end of input {context}"),
            None,
        )
    }

    pub(crate) fn expected_identifier(
        what: &str,
        after: &str,
        actual: Token<'src>,
    ) -> ParseError<'src> {
        ParseError::syntax(
            format!("expected {what} after {after}, got '{}'", actual.text),
            actual,
        )
    }

    /// Describe the front token failing to be `expected`, distinguishing end
    /// of input from a mismatch.
    pub(crate) fn not_expected(
        &self,
        after: impl fmt::Display,
        expected: &str,
    ) -> ParseError<'src> {
        match self.tokens.front() {
            None => Self::unexpected_eoi(format_args!(
                "after {after}; expected {expected}"
            )),
            Some(token) => ParseError::syntax(
                format!("unexpected {} after {after}, expected {expected}", token.kind),
                token,
            ),
        }
    }

    pub(crate) fn take_identifier(
        &mut self,
        what: &str,
        after: &str,
    ) -> Result<Token<'src>, ParseError<'src>> {
        match self.tokens.take_front() {
            None => Err(Self::unexpected_eoi(format_args!("after {after}"))),
            Some(word) if word.is(TokenKind::Word) => Ok(word),
            Some(other) => Err(Self::expected_identifier(what, after, other)),
        }
    }

    pub(crate) fn take_open_brace(
        &mut self,
        after: &str,
    ) -> Result<Token<'src>, ParseError<'src>> {
        match self.tokens.take_front() {
            None => Err(Self::unexpected_eoi(format_args!(
                "after {after}, expected open brace ('{{')"
            ))),
            Some(brace) if brace.is(TokenKind::LBrace) => Ok(brace),
            Some(other) => Err(ParseError::syntax(
                format!(
                    "expected open brace ('{{') after {after}, got '{}'",
                    other.text
                ),
                other,
            )),
        }
    }

    /// Brace-and-comma list handling, after the opening brace.
    ///
    /// Takes tokens until the closing `}`, handing each other token to
    /// `item` and then skipping any trailing commas. The first error from
    /// `item` stops the list. Returns the closing brace.
    pub(crate) fn process_list<F>(
        &mut self,
        label: &str,
        mut item: F,
    ) -> Result<Token<'src>, ParseError<'src>>
    where
        F: FnMut(&mut Self, Token<'src>) -> Result<(), ParseError<'src>>,
    {
        loop {
            let Some(token) = self.tokens.take_front() else {
                return Err(Self::unexpected_eoi(format_args!(
                    "during {label} list, expected '}}'"
                )));
            };

            if token.is(TokenKind::RBrace) {
                return Ok(token);
            }

            item(self, token)?;

            while self.tokens.take_front_if(TokenKind::Comma).is_some() {}
        }
    }
}

impl<'src> Ast<'src> {
    /// Parse the next definition from `tokens` into this AST, advancing
    /// `tokens` past whatever was consumed.
    pub fn parse_next(
        &mut self,
        tokens: &mut TokenSequence<'_, 'src>,
    ) -> Result<Option<&'src str>, ParseError<'src>> {
        let mut parser = Parser::new(*tokens);
        let result = parser.parse_next(self);
        *tokens = parser.remaining();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::scan;
    use pretty_assertions::assert_eq;

    fn parse_err(source: &str) -> ParseError<'_> {
        let tokens = scan(source).unwrap();
        Parser::new(&tokens).parse_file().unwrap_err()
    }

    #[test]
    fn test_parse_next_reports_names() {
        let tokens = scan("enum A { X } type B {}").unwrap();
        let mut ts = TokenSequence::from(&tokens);
        let mut ast = Ast::new();

        assert_eq!(ast.parse_next(&mut ts), Ok(Some("A")));
        assert_eq!(ts.front().map(|t| t.text), Some("type"));
        assert_eq!(ast.parse_next(&mut ts), Ok(Some("B")));
        assert!(ts.is_empty());
        assert_eq!(ast.parse_next(&mut ts), Ok(None));
        assert_eq!(ast.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let ast = Parser::new(TokenSequence::new(&[])).parse_file().unwrap();
        assert!(ast.is_empty());
    }

    #[test]
    fn test_unmatched_close_brace() {
        let err = parse_err("type T { int n }}");
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert!(err.message.contains("unmatched close-brace"), "{}", err.message);
        assert_eq!(err.token.map(|t| t.text), Some("}"));
    }

    #[test]
    fn test_top_level_keywords() {
        let err = parse_err("struct S {}");
        assert_eq!(err.message, "expected either 'enum' or 'type'; got 'struct'");

        let err = parse_err("42");
        assert_eq!(
            err.message,
            "unexpected '42' at top-level, expecting keywords 'enum' or 'type'"
        );
    }

    #[test]
    fn test_missing_close_brace() {
        let err = parse_err("enum E { A, B");
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(
            err.message,
            "enum 'E': unexpected end of input during enum member list, expected '}'"
        );
        assert_eq!(err.token, None);
    }

    #[test]
    fn test_open_brace_required() {
        let err = parse_err("enum E A }");
        assert_eq!(err.message, "expected open brace ('{') after enum name, got 'A'");

        let err = parse_err("enum E");
        assert_eq!(
            err.message,
            "unexpected end of input after enum name, expected open brace ('{')"
        );
    }

    #[test]
    fn test_scan_error_is_lexical() {
        let err: ParseError = scan("enum @").unwrap_err().into();
        assert_eq!(err.kind, ErrorKind::Lexical);
        assert_eq!(err.message, "unexpected character");
        assert_eq!(err.to_string(), "unexpected character");
    }

    #[test]
    fn test_stops_at_first_error() {
        let tokens = scan("enum A { X } enum A { Y } enum B { Z }").unwrap();
        let mut parser = Parser::new(&tokens);
        let mut ast = Ast::new();
        assert_eq!(parser.parse_next(&mut ast), Ok(Some("A")));
        assert!(parser.parse_next(&mut ast).is_err());
        assert_eq!(ast.len(), 1);
        let first = ast.get("A").and_then(|d| d.as_enum()).unwrap();
        assert_eq!(first.members()[0].text, "X");
    }
}
