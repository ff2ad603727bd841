//! Token model shared by the scanner, the token cursor and the parser
//!
//! A [`Token`] is a tagged span borrowed from the source buffer: it never
//! copies characters, so a token (and every AST node built from tokens)
//! cannot outlive the text it was scanned from.

use std::fmt;

/// All token kinds produced by the scanner.
///
/// The last group of kinds only appear while scanning (comment skipping and
/// error reporting); the parser never sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Word,
    Integer,
    Float,
    String,
    LBrace,   // {
    RBrace,   // }
    LBracket, // [
    RBracket, // ]
    Equals,   // =
    Scope,    // ::
    Colon,    // :
    Comma,    // ,

    // Internal
    Invalid,
    LineComment,
    OpenComment,
    CloseComment,
    EndOfInput,
}

impl TokenKind {
    /// Human readable name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Word => "identifier",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::LBrace => "open brace",
            TokenKind::RBrace => "close brace",
            TokenKind::LBracket => "open bracket",
            TokenKind::RBracket => "close bracket",
            TokenKind::Equals => "equals",
            TokenKind::Scope => "scope operator",
            TokenKind::Colon => "colon",
            TokenKind::Comma => "comma",
            TokenKind::Invalid => "invalid character",
            TokenKind::LineComment => "line comment",
            TokenKind::OpenComment => "unterminated comment",
            TokenKind::CloseComment => "block comment",
            TokenKind::EndOfInput => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed span of source text.
///
/// Equality is structural: two tokens are equal when their kinds match and
/// their text is identical, regardless of where in the source they live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str) -> Self {
        Self { kind, text }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// True for a `Word` token whose text is exactly `word`.
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Word && self.text == word
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "end of input"),
            kind => write!(f, "{} '{}'", kind, self.text),
        }
    }
}

/// Position of a token within its source buffer.
///
/// `offset` is a byte offset; `line` and `column` are 1-based, with columns
/// counted in bytes (the grammar is ASCII-only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
