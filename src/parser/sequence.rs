//! Bounded cursor over a pre-scanned token slice
//!
//! The grammar only needs bounded lookahead, so the parser works over a plain
//! slice: consuming a token narrows the slice from the front. Every operation
//! is O(1) and nothing allocates. `TokenSequence` is `Copy`, which makes it
//! cheap to hand a sub-sequence to a caller and take it back.

use crate::parser::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSequence<'a, 'src> {
    tokens: &'a [Token<'src>],
}

impl<'a, 'src> TokenSequence<'a, 'src> {
    pub fn new(tokens: &'a [Token<'src>]) -> Self {
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// The next token without consuming it.
    pub fn front(&self) -> Option<Token<'src>> {
        self.tokens.first().copied()
    }

    /// The token `n` places ahead of the front (`peek(0)` is `front()`).
    pub fn peek(&self, n: usize) -> Option<Token<'src>> {
        self.tokens.get(n).copied()
    }

    /// Consume and return the next token.
    pub fn take_front(&mut self) -> Option<Token<'src>> {
        let (first, rest) = self.tokens.split_first()?;
        self.tokens = rest;
        Some(*first)
    }

    /// Consume the next token only if it is of `kind`.
    pub fn take_front_if(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        if self.peek_ahead(kind) {
            self.take_front()
        } else {
            None
        }
    }

    /// True if the next token is of `kind`.
    pub fn peek_ahead(&self, kind: TokenKind) -> bool {
        self.peek_ahead_at(0, kind)
    }

    /// True if the token `offset` places ahead is of `kind`.
    pub fn peek_ahead_at(&self, offset: usize, kind: TokenKind) -> bool {
        self.peek(offset).is_some_and(|token| token.kind == kind)
    }

    /// Tokens not yet consumed.
    pub fn as_slice(&self) -> &'a [Token<'src>] {
        self.tokens
    }
}

impl<'a, 'src> From<&'a [Token<'src>]> for TokenSequence<'a, 'src> {
    fn from(tokens: &'a [Token<'src>]) -> Self {
        Self::new(tokens)
    }
}

impl<'a, 'src> From<&'a Vec<Token<'src>>> for TokenSequence<'a, 'src> {
    fn from(tokens: &'a Vec<Token<'src>>) -> Self {
        Self::new(tokens)
    }
}
