//! Scanner (tokenizer) for TypeDef source text
//!
//! Converts a source buffer into a lazy sequence of [`Token`]s. Tokens are
//! slices of the original buffer; the scanner never allocates for token text.
//! Whitespace and comments are skipped between tokens, with the number of
//! skipped comments kept as a side channel ([`Scanner::comment_stats`]).
//!
//! The only configuration is the identifier length policy
//! ([`ScannerConfig`]); overlong words are reported as [`ScanWarning`]s and
//! never truncated.

use crate::parser::token::{SourceLocation, Token, TokenKind};
use log::{trace, warn};
use thiserror::Error;

/// Lexical error, optionally carrying the offending span.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScanError<'src> {
    pub message: String,
    pub token: Option<Token<'src>>,
}

impl<'src> ScanError<'src> {
    pub fn with_token(message: impl Into<String>, token: Token<'src>) -> Self {
        Self {
            message: message.into(),
            token: Some(token),
        }
    }
}

/// Non-fatal scanner diagnostic; the token it refers to is still emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning<'src> {
    pub message: String,
    pub token: Token<'src>,
}

/// Counts of comments skipped so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentStats {
    pub line_comments: usize,
    pub block_comments: usize,
}

/// Scanner policy knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Words longer than this produce a [`ScanWarning`]. `None` disables the
    /// check.
    pub max_word_len: Option<usize>,
}

/// Scanner over a borrowed source buffer.
///
/// Iterating yields `Ok(token)` for each token, `Err(..)` for each lexical
/// error (the offending text is consumed, so scanning may continue), and
/// stops at end of input.
#[derive(Debug)]
pub struct Scanner<'src> {
    source: &'src str,
    rest: &'src str,
    config: ScannerConfig,
    comments: CommentStats,
    warnings: Vec<ScanWarning<'src>>,
}

/// Scan an entire buffer, stopping at the first lexical error.
pub fn scan(source: &str) -> Result<Vec<Token<'_>>, ScanError<'_>> {
    Scanner::new(source).tokenize()
}

/// Byte offset of `token` within `source`, or `None` if the token's text is
/// not a sub-slice of `source`.
pub fn token_offset(source: &str, token: &Token<'_>) -> Option<usize> {
    let base = source.as_ptr() as usize;
    let start = token.text.as_ptr() as usize;
    let offset = start.checked_sub(base)?;
    (offset + token.text.len() <= source.len()).then_some(offset)
}

/// Line/column of `token` within `source`. Counts newlines in the text that
/// precedes the token, so this is linear in the offset.
pub fn locate(source: &str, token: &Token<'_>) -> Option<SourceLocation> {
    let offset = token_offset(source, token)?;
    let preceding = &source.as_bytes()[..offset];
    let line = preceding.iter().filter(|&&c| c == b'\n').count() + 1;
    let line_start = preceding
        .iter()
        .rposition(|&c| c == b'\n')
        .map_or(0, |i| i + 1);
    Some(SourceLocation::new(offset, line, offset - line_start + 1))
}

impl<'src> Scanner<'src> {
    /// Create a scanner with the default (unlimited word length) policy.
    pub fn new(source: &'src str) -> Self {
        Self::with_config(source, ScannerConfig::default())
    }

    pub fn with_config(source: &'src str, config: ScannerConfig) -> Self {
        Self {
            source,
            rest: source,
            config,
            comments: CommentStats::default(),
            warnings: Vec::new(),
        }
    }

    /// Scan all remaining tokens
    pub fn tokenize(&mut self) -> Result<Vec<Token<'src>>, ScanError<'src>> {
        self.by_ref().collect()
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Text that has not been scanned yet.
    pub fn remaining(&self) -> &'src str {
        self.rest
    }

    pub fn comment_stats(&self) -> CommentStats {
        self.comments
    }

    pub fn warnings(&self) -> &[ScanWarning<'src>] {
        &self.warnings
    }

    pub fn token_offset(&self, token: &Token<'_>) -> Option<usize> {
        token_offset(self.source, token)
    }

    pub fn locate(&self, token: &Token<'_>) -> Option<SourceLocation> {
        locate(self.source, token)
    }

    /// Split `len` bytes off the front of the remaining input as a token.
    fn make_token(&mut self, kind: TokenKind, len: usize) -> Token<'src> {
        let (text, rest) = self.rest.split_at(len);
        self.rest = rest;
        Token::new(kind, text)
    }

    /// Consume the character at the front as an `Invalid` token.
    fn unexpected(&mut self) -> Result<Token<'src>, ScanError<'src>> {
        let len = self.rest.chars().next().map_or(0, char::len_utf8);
        let token = self.make_token(TokenKind::Invalid, len);
        Err(ScanError::with_token("unexpected character", token))
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.rest.as_bytes().get(offset).copied()
    }

    fn peek_is_digit(&self, offset: usize) -> bool {
        self.peek(offset).is_some_and(|c| c.is_ascii_digit())
    }

    /// Skip spaces, tabs and line breaks. Returns whether anything was
    /// skipped.
    fn skip_whitespace(&mut self) -> bool {
        let trimmed = self
            .rest
            .trim_start_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
        let skipped = trimmed.len() != self.rest.len();
        self.rest = trimmed;
        skipped
    }

    /// Skip a line comment (`// ...`) or block comment (`/* ... */`) at the
    /// front of the input. `None` when there is no comment here.
    fn skip_comment(&mut self) -> Option<Result<Token<'src>, ScanError<'src>>> {
        if self.peek(0) != Some(b'/') {
            return None;
        }

        match self.peek(1) {
            Some(b'/') => {
                // The newline is left for skip_whitespace.
                let len = self.rest.find('\n').unwrap_or(self.rest.len());
                self.comments.line_comments += 1;
                Some(Ok(self.make_token(TokenKind::LineComment, len)))
            }
            Some(b'*') => match self.rest[2..].find("*/") {
                Some(end) => {
                    self.comments.block_comments += 1;
                    Some(Ok(self.make_token(TokenKind::CloseComment, end + 4)))
                }
                None => {
                    let token =
                        self.make_token(TokenKind::OpenComment, self.rest.len());
                    Some(Err(ScanError::with_token(
                        "unterminated block comment",
                        token,
                    )))
                }
            },
            _ => None,
        }
    }

    /// Single-line quoted string, quotes included. No escape sequences.
    fn scan_string(&mut self) -> Result<Token<'src>, ScanError<'src>> {
        let stop = self.rest[1..]
            .find(|c| matches!(c, '"' | '\r' | '\n'))
            .map(|i| i + 1);

        match stop {
            Some(end) if self.peek(end) == Some(b'"') => {
                Ok(self.make_token(TokenKind::String, end + 1))
            }
            Some(end) => {
                let token = self.make_token(TokenKind::String, end);
                Err(ScanError::with_token("unterminated string", token))
            }
            None => {
                let token = self.make_token(TokenKind::String, self.rest.len());
                Err(ScanError::with_token("unterminated string", token))
            }
        }
    }

    /// Digits with at most one decimal point, starting at byte `start`.
    /// A second `.` ends the token without being consumed.
    fn scan_number(&mut self, start: usize) -> Result<Token<'src>, ScanError<'src>> {
        let bytes = self.rest.as_bytes();
        let mut is_float = false;
        let mut len = start;

        while let Some(&c) = bytes.get(len) {
            if c.is_ascii_digit() {
                len += 1;
            } else if c == b'.' && !is_float {
                is_float = true;
                len += 1;
            } else {
                break;
            }
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Integer
        };
        Ok(self.make_token(kind, len))
    }

    /// `+`/`-` followed by a digit, or by `.` and at least one digit.
    /// Anything else is an unexpected character consuming only the sign.
    fn scan_signed_number(&mut self) -> Result<Token<'src>, ScanError<'src>> {
        if self.peek_is_digit(1) {
            return self.scan_number(1);
        }
        if self.peek(1) == Some(b'.') && self.peek_is_digit(2) {
            return self.scan_number(1);
        }
        self.unexpected()
    }

    fn scan_word(&mut self) -> Result<Token<'src>, ScanError<'src>> {
        let len = self
            .rest
            .bytes()
            .position(|c| !(c.is_ascii_alphanumeric() || c == b'_'))
            .unwrap_or(self.rest.len());
        let token = self.make_token(TokenKind::Word, len);

        if let Some(max) = self.config.max_word_len {
            if len > max {
                let message = format!("word too long (over {max} characters)");
                warn!("{message}: '{}'", token.text);
                self.warnings.push(ScanWarning { message, token });
            }
        }

        Ok(token)
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Result<Token<'src>, ScanError<'src>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.skip_whitespace() {
                continue;
            }
            match self.skip_comment() {
                Some(Ok(_)) => continue,
                Some(Err(err)) => return Some(Err(err)),
                None => {}
            }

            let result = match self.peek(0)? {
                b'"' => self.scan_string(),

                b'{' => Ok(self.make_token(TokenKind::LBrace, 1)),
                b'}' => Ok(self.make_token(TokenKind::RBrace, 1)),
                b'[' => Ok(self.make_token(TokenKind::LBracket, 1)),
                b']' => Ok(self.make_token(TokenKind::RBracket, 1)),
                b'=' => Ok(self.make_token(TokenKind::Equals, 1)),
                b',' => Ok(self.make_token(TokenKind::Comma, 1)),
                b':' => {
                    if self.peek(1) == Some(b':') {
                        Ok(self.make_token(TokenKind::Scope, 2))
                    } else {
                        Ok(self.make_token(TokenKind::Colon, 1))
                    }
                }

                b'+' | b'-' => self.scan_signed_number(),
                b'0'..=b'9' | b'.' => self.scan_number(0),

                b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.scan_word(),

                _ => self.unexpected(),
            };

            if let Ok(token) = &result {
                trace!("token {:?} '{}'", token.kind, token.text);
            }
            return Some(result);
        }
    }
}
